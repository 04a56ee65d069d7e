use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力ファイルが見つかりません: {0}")]
    MissingInput(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("必須列 '{column}' がありません: {file}")]
    MissingColumn { file: String, column: String },

    #[error("シートが空です: {0}")]
    EmptySheet(String),

    #[error("URLが不正: {0}")]
    InvalidUrl(String),

    #[error("Excel読み込みエラー: {0}")]
    SheetRead(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] refmatch_common::Error),
}

pub type Result<T> = std::result::Result<T, RefMatchError>;
