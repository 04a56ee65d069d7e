//! 売上シート・ファイル一覧のExcel入出力
//!
//! 読み込みは calamine、書き出しは rust_xlsxwriter。
//! 元の列はすべて保持し、URL列だけを書き換える。

pub mod reader;
pub mod writer;

use crate::error::{RefMatchError, Result};
use refmatch_common::Record;

pub const COMPANY_COLUMN: &str = "CompanyName";
pub const INDUSTRY_COLUMN: &str = "Industry";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const SCOPE_COLUMN: &str = "Scope";

pub const LISTING_NAME_COLUMN: &str = "File Name";
pub const LISTING_URL_COLUMN: &str = "File URL";

pub const AUDIT_HEADERS: [&str; 5] = [
    "file_name",
    "matched_company",
    "industry",
    "match_score",
    "match_details",
];

/// セル値
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
}

impl Cell {
    /// テキスト欄として読む
    ///
    /// 数値・真偽値は文字列にして使い、空セルは None。
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.is_empty() => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
            Cell::Number(f) => Some(f.to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }

    fn is_text(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Text(_))
    }
}

/// 売上シート全体（ヘッダー＋全行）
#[derive(Debug, Clone)]
pub struct SalesSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    company_col: usize,
    industry_col: usize,
    description_col: Option<usize>,
    scope_col: Option<usize>,
    url_col: usize,
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

impl SalesSheet {
    /// ヘッダーと行から組み立てる
    ///
    /// URL列がなければ末尾に追加する。
    pub fn from_table(
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
        url_column: &str,
        source: &str,
    ) -> Result<Self> {
        let required = |name: &str| {
            find_column(&headers, name).ok_or_else(|| RefMatchError::MissingColumn {
                file: source.to_string(),
                column: name.to_string(),
            })
        };
        let company_col = required(COMPANY_COLUMN)?;
        let industry_col = required(INDUSTRY_COLUMN)?;
        let description_col = find_column(&headers, DESCRIPTION_COLUMN);
        let scope_col = find_column(&headers, SCOPE_COLUMN);

        let mut headers = headers;
        let url_col = match find_column(&headers, url_column) {
            Some(col) => col,
            None => {
                log::warn!("列 '{}' が {} にないため作成します", url_column, source);
                headers.push(url_column.to_string());
                headers.len() - 1
            }
        };

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width.max(row.len()), Cell::Empty);
                row
            })
            .collect();

        Ok(Self {
            headers,
            rows,
            company_col,
            industry_col,
            description_col,
            scope_col,
            url_col,
        })
    }

    pub fn url_column(&self) -> &str {
        &self.headers[self.url_col]
    }

    /// 照合用のレコードに変換する
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .enumerate()
            .map(|(id, row)| Record {
                id,
                company_name: self.text_field(id, row, Some(self.company_col)).unwrap_or_default(),
                industry: self.text_field(id, row, Some(self.industry_col)).unwrap_or_default(),
                description: self.text_field(id, row, self.description_col),
                scope: self.text_field(id, row, self.scope_col),
                assigned_url: None,
            })
            .collect()
    }

    fn text_field(&self, row_idx: usize, row: &[Cell], col: Option<usize>) -> Option<String> {
        let col = col?;
        let cell = row.get(col)?;
        if !cell.is_text() {
            log::debug!(
                "{}行目 '{}': 文字列以外の値 {:?} を文字列として扱います",
                row_idx + 2,
                self.headers[col],
                cell
            );
        }
        cell.as_text()
    }

    /// 割り当て結果をURL列に反映する（未割り当ては空文字）
    pub fn apply_assignments(&mut self, records: &[Record]) {
        for (row, record) in self.rows.iter_mut().zip(records) {
            row[self.url_col] = Cell::Text(record.assigned_url_or_empty().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Empty.as_text(), None);
        assert_eq!(Cell::Text(String::new()).as_text(), None);
        assert_eq!(Cell::Text("PSO".into()).as_text(), Some("PSO".into()));
        assert_eq!(Cell::Number(42.0).as_text(), Some("42".into()));
        assert_eq!(Cell::Number(1.5).as_text(), Some("1.5".into()));
        assert_eq!(Cell::Int(7).as_text(), Some("7".into()));
        assert_eq!(Cell::Bool(true).as_text(), Some("true".into()));
    }

    #[test]
    fn test_missing_required_column() {
        let err = SalesSheet::from_table(headers(&["CompanyName"]), vec![], "URL", "sales.xlsx")
            .unwrap_err();
        assert!(matches!(err, RefMatchError::MissingColumn { ref column, .. } if column == "Industry"));
    }

    #[test]
    fn test_url_column_created_when_absent() {
        let sheet = SalesSheet::from_table(
            headers(&["CompanyName", "Industry"]),
            vec![vec![Cell::Text("PSO".into()), Cell::Text("Oil & Gas".into())]],
            "Reference Images' URL",
            "sales.xlsx",
        )
        .unwrap();
        assert_eq!(sheet.headers.len(), 3);
        assert_eq!(sheet.url_column(), "Reference Images' URL");
        assert_eq!(sheet.rows[0].len(), 3);
    }

    #[test]
    fn test_to_records_recovers_malformed_fields() {
        let sheet = SalesSheet::from_table(
            headers(&["Industry", "CompanyName", "Scope"]),
            vec![
                vec![Cell::Text("Retail".into()), Cell::Number(3.0), Cell::Empty],
                vec![Cell::Empty, Cell::Text("Imtiaz".into())],
            ],
            "URL",
            "sales.xlsx",
        )
        .unwrap();

        let records = sheet.to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_name, "3");
        assert_eq!(records[0].industry, "Retail");
        assert_eq!(records[0].scope, None);
        assert_eq!(records[0].description, None);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].industry, "");
    }

    #[test]
    fn test_apply_assignments_overwrites_url_column() {
        let mut sheet = SalesSheet::from_table(
            headers(&["CompanyName", "Industry", "URL"]),
            vec![
                vec![Cell::Text("A".into()), Cell::Empty, Cell::Text("old".into())],
                vec![Cell::Text("B".into()), Cell::Empty, Cell::Number(1.0)],
            ],
            "URL",
            "sales.xlsx",
        )
        .unwrap();

        let mut records = sheet.to_records();
        records[1].assigned_url = Some("https://files/b.jpg".into());
        sheet.apply_assignments(&records);

        assert_eq!(sheet.rows[0][2], Cell::Text(String::new()));
        assert_eq!(sheet.rows[1][2], Cell::Text("https://files/b.jpg".into()));
    }
}
