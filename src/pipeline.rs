//! 照合処理の一括実行
//!
//! ## 処理フロー
//! 1. ファイル一覧の取得（一覧Excel、なければフォルダスキャン）
//! 2. 売上シートの読み込み
//! 3. 全ファイル×全レコードの採点と割り当て
//! 4. 売上シートと照合詳細ログの保存（失敗しても警告のみ）

use crate::error::{RefMatchError, Result};
use crate::scanner;
use crate::sheet::{reader, writer, SalesSheet};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use refmatch_common::{
    match_file, run_sequential_with, FileItem, MatchResult, Record, RecordStore, RunSummary,
    ScoringTable,
};
use std::path::{Path, PathBuf};

/// 1回の実行の設定
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sales_file: PathBuf,
    pub listing_file: PathBuf,
    pub folder: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output_file: PathBuf,
    pub audit_file: PathBuf,
    pub url_column: String,
    pub parallel: bool,
    /// 0 なら進捗行を出さない
    pub progress_interval: usize,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub record_count: usize,
    /// 売上シートの保存に成功したか
    pub sheet_saved: bool,
    /// 照合詳細ログの保存に成功したか
    pub audit_saved: bool,
}

/// ファイル一覧を取得する
///
/// 一覧Excelがあればそれを使い、なければフォルダをスキャンして一覧を保存する。
/// 一覧が壊れていて読めない場合も、フォルダ指定があればスキャンし直す。
pub fn load_file_items(
    listing_file: &Path,
    folder: Option<&Path>,
    base_url: Option<&str>,
) -> Result<Vec<FileItem>> {
    if listing_file.exists() {
        match reader::read_listing(listing_file) {
            Ok(items) => {
                println!("- 既存の一覧を使用: {}", listing_file.display());
                return Ok(items);
            }
            // フォルダ指定があれば取り直す
            Err(e) if folder.is_some() => {
                log::warn!(
                    "一覧を読み込めないためフォルダを再スキャンします: {}: {}",
                    listing_file.display(),
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }

    let Some(folder) = folder else {
        return Err(RefMatchError::MissingInput(listing_file.display().to_string()));
    };
    let base_url = base_url.ok_or_else(|| {
        RefMatchError::Config("フォルダをスキャンするには --base-url が必要です".into())
    })?;

    let items = scanner::scan_folder(folder, base_url)?;
    if let Err(e) = writer::write_listing(&items, listing_file) {
        log::warn!("一覧の保存に失敗: {}: {}", listing_file.display(), e);
    }
    Ok(items)
}

/// 全ファイルを読み取り専用のレコードに対して並列に採点する
///
/// 結果は入力順に並ぶ。
pub fn match_parallel(
    items: &[FileItem],
    records: &[Record],
    table: &ScoringTable,
    progress: &ProgressBar,
) -> Vec<MatchResult> {
    items
        .par_iter()
        .map(|item| {
            let result = match_file(item, records, table);
            progress.inc(1);
            result
        })
        .collect()
}

/// 照合して割り当てる
pub fn match_items(
    items: &[FileItem],
    store: &mut RecordStore,
    table: &ScoringTable,
    parallel: bool,
    progress_interval: usize,
) -> Result<RunSummary> {
    let progress = ProgressBar::new(items.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:40}] {pos}/{len} {msg}") {
        progress.set_style(style.progress_chars("=> "));
    }

    let summary = if parallel {
        // 採点は並列、書き込みは入力順に1回だけ
        let results = match_parallel(items, store.records(), table, &progress);
        store.apply_all(items.iter().zip(results))?
    } else {
        let total = items.len();
        run_sequential_with(items, store, table, |idx, item, result, records| {
            if progress_interval > 0 && idx % progress_interval == 0 {
                progress.println(describe_progress(idx, total, item, result, records));
            }
            progress.inc(1);
        })?
    };

    progress.finish_and_clear();
    Ok(summary)
}

fn describe_progress(
    idx: usize,
    total: usize,
    item: &FileItem,
    result: &MatchResult,
    records: &[Record],
) -> String {
    let head = format!("  {}/{}: {}", idx + 1, total, item.name);
    match result {
        Some(winner) => {
            let record = &records[winner.record_id];
            format!(
                "{}\n    → {} - {} (スコア {:.2}, {}) {}",
                head,
                record.company_name,
                record.industry,
                winner.score,
                winner.strength,
                winner.reasons.join(", ")
            )
        }
        None => format!("{}\n    → 該当なし", head),
    }
}

/// 保存する（失敗は警告にとどめ、メモリ上の結果は残す）
pub fn persist(
    sheet: &mut SalesSheet,
    store: &RecordStore,
    output_file: &Path,
    audit_file: &Path,
) -> (bool, bool) {
    sheet.apply_assignments(store.records());

    let sheet_saved = match writer::write_sales_sheet(sheet, output_file) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("売上シートの保存に失敗: {}: {}", output_file.display(), e);
            false
        }
    };

    let audit_saved = match writer::write_audit(store.audit(), audit_file) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("照合詳細ログの保存に失敗: {}: {}", audit_file.display(), e);
            false
        }
    };

    (sheet_saved, audit_saved)
}

/// 一括実行
pub fn run(options: &RunOptions, table: &ScoringTable) -> Result<RunReport> {
    println!("[1/3] ファイル一覧を取得中...");
    let items = load_file_items(
        &options.listing_file,
        options.folder.as_deref(),
        options.base_url.as_deref(),
    )?;
    println!("✔ {}件のファイル\n", items.len());

    println!("[2/3] 売上シートを照合中...");
    let mut sheet = reader::read_sales_sheet(&options.sales_file, &options.url_column)?;
    let mut store = RecordStore::new(sheet.to_records());
    println!("- {}件のレコード", store.len());

    let summary = match_items(
        &items,
        &mut store,
        table,
        options.parallel,
        options.progress_interval,
    )?;
    println!("✔ {}/{}件を照合\n", summary.matched_files, summary.total_files);
    if summary.overwritten > 0 {
        log::warn!("{}件のレコードで割り当てを上書きしました", summary.overwritten);
    }

    println!("[3/3] 結果を保存中...");
    let (sheet_saved, audit_saved) =
        persist(&mut sheet, &store, &options.output_file, &options.audit_file);
    if sheet_saved {
        println!("✔ 売上シート: {}", options.output_file.display());
    }
    if audit_saved {
        println!("✔ 照合詳細ログ: {}", options.audit_file.display());
    }

    Ok(RunReport {
        summary,
        record_count: store.len(),
        sheet_saved,
        audit_saved,
    })
}
