//! refmatch 共通ライブラリ
//!
//! ファイル名と売上レコードの照合ロジック（I/Oなし）

pub mod types;
pub mod alias;
pub mod parser;
pub mod weights;
pub mod scorer;
pub mod ranker;
pub mod assign;
pub mod error;

pub use types::{AuditEntry, FileItem, MatchCandidate, MatchResult, Record, StrengthBand, TokenTuple};
pub use alias::normalize_industry;
pub use parser::tokenize_filename;
pub use weights::{ScoringTable, DEFAULT_TABLE};
pub use scorer::{score_record, Scorecard};
pub use ranker::{rank_candidates, select_best};
pub use assign::{match_file, run_sequential, run_sequential_with, RecordStore, RunSummary};
pub use error::{Error, Result};
