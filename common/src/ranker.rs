//! 候補の順位付けと選択
//!
//! 1つのファイル名を全レコードに対して採点し、閾値で絞り込んで
//! スコア降順に並べる。同点は読み込み順が早いレコードを優先する。

use crate::scorer::{score_with_context, TokenContext};
use crate::types::{MatchCandidate, MatchResult, Record, TokenTuple};
use crate::weights::ScoringTable;

/// 閾値以上の候補をスコア降順で返す
pub fn rank_candidates(
    tokens: &TokenTuple,
    records: &[Record],
    table: &ScoringTable,
) -> Vec<MatchCandidate> {
    let ctx = TokenContext::new(tokens);

    let mut candidates: Vec<MatchCandidate> = records
        .iter()
        .filter_map(|record| {
            let card = score_with_context(&ctx, record, table);
            if !table.is_eligible(card.score) {
                return None;
            }
            Some(MatchCandidate {
                record_id: record.id,
                score: card.score,
                strength: table.band(card.score),
                reasons: card.reasons,
            })
        })
        .collect();

    // 安定ソートなので同点は入力順のまま
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// 最良の候補を1件選ぶ（なければ None）
pub fn select_best(tokens: &TokenTuple, records: &[Record], table: &ScoringTable) -> MatchResult {
    rank_candidates(tokens, records, table).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize_filename;
    use crate::types::StrengthBand;
    use crate::weights::DEFAULT_TABLE;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new(0, "Engro Fertilizers", "Chemicals"),
            Record::new(1, "PSO", "Oil & Gas"),
            Record::new(2, "Imtiaz", "Retail").with_description("license agreement"),
        ]
    }

    #[test]
    fn test_selects_exact_company() {
        let tokens = tokenize_filename("SAPS4HANA_Oil&Gas_PSO.jpg");
        let best = select_best(&tokens, &sample_records(), &DEFAULT_TABLE).expect("候補なし");
        assert_eq!(best.record_id, 1);
        assert_eq!(best.strength, StrengthBand::High);
    }

    #[test]
    fn test_no_match_returns_none() {
        let tokens = tokenize_filename("NoMatch_Here.jpg");
        assert!(rank_candidates(&tokens, &sample_records(), &DEFAULT_TABLE).is_empty());
        assert!(select_best(&tokens, &sample_records(), &DEFAULT_TABLE).is_none());
    }

    #[test]
    fn test_sorted_descending() {
        let records = vec![
            Record::new(0, "Other Co", "Retail"),
            Record::new(1, "Imtiaz", "Retail").with_description("license agreement"),
        ];
        let tokens = tokenize_filename("Qlik_Licenses_Retail_Imtiaz.jpg");
        let ranked = rank_candidates(&tokens, &records, &DEFAULT_TABLE);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].record_id, 1);
        assert!(ranked[0].score > ranked[1].score);
        // 小売 0.2 + 業種 0.3
        assert_eq!(ranked[1].strength, StrengthBand::Medium);
    }

    #[test]
    fn test_tie_keeps_input_order() {
        let records = vec![
            Record::new(0, "Shell", "Oil & Gas"),
            Record::new(1, "Shell", "Oil & Gas"),
            Record::new(2, "Shell", "Oil & Gas"),
        ];
        let tokens = tokenize_filename("SAP_Oil_Shell.jpg");
        let ranked = rank_candidates(&tokens, &records, &DEFAULT_TABLE);
        let ids: Vec<usize> = ranked.iter().map(|c| c.record_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        let records = vec![Record::new(0, "Nobody", "Retail")];
        let tokens = tokenize_filename("SAP_Retail_Gul.jpg");

        // 業種一致だけが発火する条件で重みを閾値ちょうどにする
        let at_threshold = ScoringTable {
            industry_exact: 0.35,
            retail_affinity: 0.0,
            ..DEFAULT_TABLE
        };
        let ranked = rank_candidates(&tokens, &records, &at_threshold);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0.35);
        assert_eq!(ranked[0].strength, StrengthBand::Low);

        let just_below = ScoringTable {
            industry_exact: 0.349999,
            ..at_threshold
        };
        assert!(rank_candidates(&tokens, &records, &just_below).is_empty());
    }
}
