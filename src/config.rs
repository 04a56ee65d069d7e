use crate::error::{RefMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 既定の入出力とシート列名
///
/// 採点の重みはここでは変更できない（`refmatch_common::weights` を参照）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 売上シート（入力）
    pub sales_file: PathBuf,
    /// ファイル一覧のキャッシュ
    pub listing_file: PathBuf,
    /// URLを書き込んだ売上シート（出力）
    pub output_file: PathBuf,
    /// 照合詳細ログ（出力）
    pub audit_file: PathBuf,
    /// URLを書き込む列名
    pub url_column: String,
    /// フォルダスキャン時のURLの基点
    pub base_url: Option<String>,
    /// 何件ごとに進捗を表示するか
    pub progress_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sales_file: "Sales_Compiled_Sheet 1.xlsx".into(),
            listing_file: "SharePoint_GPT_Images.xlsx".into(),
            output_file: "Sales_Compiled_Sheet_Updated.xlsx".into(),
            audit_file: "Matching_Details_Log.xlsx".into(),
            url_column: "Reference Images' URL".into(),
            base_url: None,
            progress_interval: 50,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RefMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("refmatch").join("config.json"))
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        url::Url::parse(&url).map_err(|e| RefMatchError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.base_url = Some(url);
        self.save()
    }

    pub fn set_url_column(&mut self, column: String) -> Result<()> {
        if column.trim().is_empty() {
            return Err(RefMatchError::Config("列名が空です".into()));
        }
        self.url_column = column;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url_column, "Reference Images' URL");
        assert_eq!(config.progress_interval, 50);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"url_column": "Image URL"}"#).unwrap();
        assert_eq!(config.url_column, "Image URL");
        assert_eq!(config.audit_file, PathBuf::from("Matching_Details_Log.xlsx"));
    }
}
