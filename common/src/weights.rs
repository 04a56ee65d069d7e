//! 採点テーブル
//!
//! 全シグナルの重みと採用閾値・区分の境界をここに集約する。

use crate::types::StrengthBand;

/// 標準の採点テーブル
pub const DEFAULT_TABLE: ScoringTable = ScoringTable {
    threshold: 0.35,
    high_band: 0.70,
    medium_band: 0.50,

    retail_affinity: 0.20,

    // 会社名ラダー（上から順に最初の1つだけ加点）
    company_exact: 0.60,
    company_contains: 0.40,
    company_prefix: 0.30,
    company_partial: 0.20,

    // ラダーとは独立に加算
    company_acronym: 0.50,
    company_abbreviation: 0.50,
    company_whole_word: 0.35,
    company_word_in_token: 0.25,

    industry_exact: 0.30,
    industry_partial: 0.20,

    license_in_description: 0.30,
    scope_match: 0.20,
    product_in_description: 0.20,

    part_in_description: 0.15,
    company_in_scope: 0.25,
    part_in_scope: 0.15,

    min_token_len: 3,
    min_record_word_len: 4,
};

/// 採点に使う重みと閾値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringTable {
    /// この値以上のスコアだけ候補に残す
    pub threshold: f64,
    pub high_band: f64,
    pub medium_band: f64,

    pub retail_affinity: f64,

    pub company_exact: f64,
    pub company_contains: f64,
    pub company_prefix: f64,
    pub company_partial: f64,

    pub company_acronym: f64,
    pub company_abbreviation: f64,
    pub company_whole_word: f64,
    pub company_word_in_token: f64,

    pub industry_exact: f64,
    pub industry_partial: f64,

    pub license_in_description: f64,
    pub scope_match: f64,
    pub product_in_description: f64,

    pub part_in_description: f64,
    pub company_in_scope: f64,
    pub part_in_scope: f64,

    /// 部分一致系シグナルに使うトークンの最小長
    pub min_token_len: usize,
    /// ファイル名に含まれるか調べる会社名単語の最小長
    pub min_record_word_len: usize,
}

impl Default for ScoringTable {
    fn default() -> Self {
        DEFAULT_TABLE
    }
}

impl ScoringTable {
    /// スコアが採用閾値以上か
    pub fn is_eligible(&self, score: f64) -> bool {
        score >= self.threshold
    }

    /// スコアから一致度の区分を決める
    pub fn band(&self, score: f64) -> StrengthBand {
        if score >= self.high_band {
            StrengthBand::High
        } else if score >= self.medium_band {
            StrengthBand::Medium
        } else {
            StrengthBand::Low
        }
    }

    /// 全ての重みが非負か（スコアの単調性の前提）
    pub fn weights_non_negative(&self) -> bool {
        [
            self.retail_affinity,
            self.company_exact,
            self.company_contains,
            self.company_prefix,
            self.company_partial,
            self.company_acronym,
            self.company_abbreviation,
            self.company_whole_word,
            self.company_word_in_token,
            self.industry_exact,
            self.industry_partial,
            self.license_in_description,
            self.scope_match,
            self.product_in_description,
            self.part_in_description,
            self.company_in_scope,
            self.part_in_scope,
        ]
        .iter()
        .all(|w| *w >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let table = ScoringTable::default();
        assert!(table.is_eligible(0.35));
        assert!(!table.is_eligible(0.349999));
    }

    #[test]
    fn test_bands() {
        let table = DEFAULT_TABLE;
        assert_eq!(table.band(0.9), StrengthBand::High);
        assert_eq!(table.band(0.70), StrengthBand::High);
        assert_eq!(table.band(0.69), StrengthBand::Medium);
        assert_eq!(table.band(0.50), StrengthBand::Medium);
        assert_eq!(table.band(0.35), StrengthBand::Low);
    }

    #[test]
    fn test_default_weights_non_negative() {
        assert!(DEFAULT_TABLE.weights_non_negative());
    }

    #[test]
    fn test_ladder_descends() {
        let t = DEFAULT_TABLE;
        assert!(t.company_exact > t.company_contains);
        assert!(t.company_contains > t.company_prefix);
        assert!(t.company_prefix > t.company_partial);
    }
}
