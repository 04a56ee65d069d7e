//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown record id: {0}")]
    UnknownRecord(usize),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_record() {
        let error = Error::UnknownRecord(7);
        assert_eq!(format!("{}", error), "Unknown record id: 7");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownRecord(3);
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownRecord"));
    }
}
