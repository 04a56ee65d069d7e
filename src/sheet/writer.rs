//! Excel書き出し（rust_xlsxwriter）

use super::{Cell, SalesSheet, AUDIT_HEADERS, LISTING_NAME_COLUMN, LISTING_URL_COLUMN};
use crate::error::Result;
use refmatch_common::{AuditEntry, FileItem};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) if s.is_empty() => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Number(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// ヘッダー行＋本体を1シートに書き出す
pub fn write_table<H: AsRef<str>>(path: &Path, headers: &[H], rows: &[Vec<Cell>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in headers.iter().enumerate() {
        // 空の見出しは書かない（空列のまま残す）
        if header.as_ref().is_empty() {
            continue;
        }
        worksheet.write_string_with_format(0, col as u16, header.as_ref(), &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_idx as u32 + 1, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// URL列を反映済みの売上シートを書き出す
pub fn write_sales_sheet(sheet: &SalesSheet, path: &Path) -> Result<()> {
    write_table(path, &sheet.headers, &sheet.rows)
}

/// 照合詳細ログを書き出す
pub fn write_audit(entries: &[AuditEntry], path: &Path) -> Result<()> {
    let rows: Vec<Vec<Cell>> = entries
        .iter()
        .map(|e| {
            vec![
                Cell::Text(e.file_name.clone()),
                Cell::Text(e.matched_company.clone()),
                Cell::Text(e.industry.clone()),
                Cell::Number(e.match_score),
                Cell::Text(e.match_details.join(", ")),
            ]
        })
        .collect();

    write_table(path, &AUDIT_HEADERS, &rows)
}

/// ファイル一覧を書き出す（次回の実行で再利用）
pub fn write_listing(items: &[FileItem], path: &Path) -> Result<()> {
    let rows: Vec<Vec<Cell>> = items
        .iter()
        .map(|item| vec![Cell::Text(item.name.clone()), Cell::Text(item.url.clone())])
        .collect();

    write_table(path, &[LISTING_NAME_COLUMN, LISTING_URL_COLUMN], &rows)
}
