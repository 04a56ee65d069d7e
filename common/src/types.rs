//! 照合で使う型定義
//!
//! - FileItem: リポジトリから取得したファイル（名前とURL）
//! - TokenTuple: ファイル名を分解したトークン
//! - Record: 売上シートの1行
//! - MatchCandidate: ファイル名とレコードの採点結果
//! - AuditEntry: 割り当て成功時の監査ログ1行

use serde::{Deserialize, Serialize};

/// リポジトリ上のファイル
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub name: String,
    pub url: String,
}

impl FileItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// ファイル名から抽出したトークン
///
/// ファイル名だけから決定的に導出され、保存はされない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTuple {
    pub product: String,
    pub scope: String,
    /// 正規化済みの業種
    pub industry: String,
    pub company: String,
    /// 区切り文字で分割した全パーツ（全文一致用）
    pub raw_parts: Vec<String>,
}

impl TokenTuple {
    /// 全パーツを空白で連結して小文字化したテキスト
    pub fn raw_text(&self) -> String {
        self.raw_parts.join(" ").to_lowercase()
    }
}

/// 売上シートの1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// 読み込み順の0始まりインデックス
    pub id: usize,
    /// 会社名（空文字は欠損扱い）
    pub company_name: String,
    /// 業種（空文字は欠損扱い）
    pub industry: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// 割り当てられた画像URL
    #[serde(default)]
    pub assigned_url: Option<String>,
}

impl Record {
    pub fn new(id: usize, company_name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            id,
            company_name: company_name.into(),
            industry: industry.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// 出力用のURL（未割り当てなら空文字）
    pub fn assigned_url_or_empty(&self) -> &str {
        self.assigned_url.as_deref().unwrap_or("")
    }
}

/// 一致度の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthBand {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthBand::Low => write!(f, "low"),
            StrengthBand::Medium => write!(f, "medium"),
            StrengthBand::High => write!(f, "high"),
        }
    }
}

/// 1つのファイル名と1つのレコードの採点結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub record_id: usize,
    pub score: f64,
    pub strength: StrengthBand,
    /// 発火したシグナルのラベル（監査用、比較には使わない）
    pub reasons: Vec<String>,
}

/// ファイルごとの照合結果（勝者なしは None）
pub type MatchResult = Option<MatchCandidate>;

/// 監査ログの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub file_name: String,
    pub matched_company: String,
    pub industry: String,
    pub match_score: f64,
    pub match_details: Vec<String>,
}
