//! 割り当てモジュール
//!
//! 勝者となったレコードに画像URLを書き込み、監査ログを残す。
//! レコード集合を変更できるのはこの `RecordStore` だけで、
//! 採点側には `records()` の読み取り専用スライスしか渡さない。

use crate::error::{Error, Result};
use crate::parser::tokenize_filename;
use crate::ranker::select_best;
use crate::types::{AuditEntry, FileItem, MatchCandidate, MatchResult, Record};
use crate::weights::ScoringTable;

/// 1回の実行の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 処理したファイル数
    pub total_files: usize,
    /// 割り当てに成功したファイル数
    pub matched_files: usize,
    /// 既存の割り当てを上書きした回数
    pub overwritten: usize,
}

/// レコード集合と監査ログの所有者
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    audit: Vec<AuditEntry>,
}

impl RecordStore {
    /// レコードを読み込み順で受け取る（id は位置で振り直す）
    pub fn new(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(id, mut record)| {
                record.id = id;
                record
            })
            .collect();

        Self {
            records,
            audit: Vec::new(),
        }
    }

    /// 採点用の読み取り専用ビュー
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn audit(&self) -> &[AuditEntry] {
        &self.audit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 勝者を適用する
    ///
    /// 同じレコードへの既存の割り当ては無条件に上書きする。
    /// 上書きが発生したら true を返す。
    pub fn apply(&mut self, item: &FileItem, winner: &MatchCandidate) -> Result<bool> {
        let record = self
            .records
            .get_mut(winner.record_id)
            .ok_or(Error::UnknownRecord(winner.record_id))?;

        let overwritten = record.assigned_url.is_some();
        record.assigned_url = Some(item.url.clone());

        self.audit.push(AuditEntry {
            file_name: item.name.clone(),
            matched_company: record.company_name.clone(),
            industry: record.industry.clone(),
            match_score: winner.score,
            match_details: winner.reasons.clone(),
        });

        Ok(overwritten)
    }

    /// 照合結果を順番どおりに適用する
    pub fn apply_all<'a, I>(&mut self, results: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = (&'a FileItem, MatchResult)>,
    {
        let mut summary = RunSummary::default();
        for (item, result) in results {
            self.apply_result(item, result, &mut summary)?;
        }
        Ok(summary)
    }

    fn apply_result(
        &mut self,
        item: &FileItem,
        result: MatchResult,
        summary: &mut RunSummary,
    ) -> Result<()> {
        summary.total_files += 1;
        if let Some(winner) = result {
            summary.matched_files += 1;
            if self.apply(item, &winner)? {
                summary.overwritten += 1;
            }
        }
        Ok(())
    }
}

/// 1ファイルを照合する
pub fn match_file(item: &FileItem, records: &[Record], table: &ScoringTable) -> MatchResult {
    let tokens = tokenize_filename(&item.name);
    select_best(&tokens, records, table)
}

/// 全ファイルを順番に照合して割り当てる
pub fn run_sequential(
    items: &[FileItem],
    store: &mut RecordStore,
    table: &ScoringTable,
) -> Result<RunSummary> {
    run_sequential_with(items, store, table, |_, _, _, _| {})
}

/// 進捗通知つきの逐次照合
///
/// `observer` は割り当て前に (位置, ファイル, 結果, レコード) で呼ばれる。
pub fn run_sequential_with<F>(
    items: &[FileItem],
    store: &mut RecordStore,
    table: &ScoringTable,
    mut observer: F,
) -> Result<RunSummary>
where
    F: FnMut(usize, &FileItem, &MatchResult, &[Record]),
{
    let mut summary = RunSummary::default();

    for (idx, item) in items.iter().enumerate() {
        let result = match_file(item, store.records(), table);
        observer(idx, item, &result, store.records());
        store.apply_result(item, result, &mut summary)?;
    }

    Ok(summary)
}
