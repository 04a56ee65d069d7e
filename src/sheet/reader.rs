//! Excel読み込み（calamine）

use super::{Cell, SalesSheet, LISTING_NAME_COLUMN, LISTING_URL_COLUMN};
use crate::error::{RefMatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use refmatch_common::FileItem;
use std::path::Path;

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Int(*i),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => {
                log::debug!("セルエラー {:?} を空セルとして扱います", e);
                Cell::Empty
            }
        }
    }
}

/// 先頭シートをヘッダー行と本体に分けて読む
pub fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<Cell>>)> {
    if !path.exists() {
        return Err(RefMatchError::MissingInput(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RefMatchError::EmptySheet(path.display().to_string()))??;

    // Range は最初の使用セルから始まるので、先頭の空列を埋めて列位置を保つ
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers: Vec<String> = std::iter::repeat(String::new())
        .take(col_offset)
        .chain(
            rows.next()
                .ok_or_else(|| RefMatchError::EmptySheet(path.display().to_string()))?
                .iter()
                .map(|d| Cell::from(d).as_text().unwrap_or_default()),
        )
        .collect();

    let body = rows
        .map(|row| {
            std::iter::repeat(Cell::Empty)
                .take(col_offset)
                .chain(row.iter().map(Cell::from))
                .collect()
        })
        .collect();

    Ok((headers, body))
}

/// 売上シートを読み込む
pub fn read_sales_sheet(path: &Path, url_column: &str) -> Result<SalesSheet> {
    let (headers, rows) = read_table(path)?;
    SalesSheet::from_table(headers, rows, url_column, &path.display().to_string())
}

/// ファイル一覧Excelを読み込む
///
/// ファイル名が空の行は読み飛ばす。
pub fn read_listing(path: &Path) -> Result<Vec<FileItem>> {
    let (headers, rows) = read_table(path)?;

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| RefMatchError::MissingColumn {
                file: path.display().to_string(),
                column: name.to_string(),
            })
    };
    let name_col = column(LISTING_NAME_COLUMN)?;
    let url_col = column(LISTING_URL_COLUMN)?;

    let items = rows
        .iter()
        .filter_map(|row| {
            let name = row.get(name_col).and_then(Cell::as_text)?;
            let url = row.get(url_col).and_then(Cell::as_text).unwrap_or_default();
            Some(FileItem::new(name, url))
        })
        .collect();

    Ok(items)
}
