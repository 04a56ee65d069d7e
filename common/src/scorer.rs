//! 候補採点モジュール
//!
//! ファイル名トークンと売上レコード1件の類似度を重み付きで採点する。
//!
//! ## 採点の構造
//! - 会社名ラダー: 上から評価して最初に成立した1段だけ加点
//! - それ以外のシグナル: 条件が成立するたびに独立して加算
//!
//! レコードは読み取りのみ。比較はすべて大文字小文字を区別しない。

use crate::alias::{normalize_industry, strip_non_alnum};
use crate::types::{Record, TokenTuple};
use crate::weights::ScoringTable;
use regex::Regex;
use std::collections::HashSet;

/// 小売系と判定するファイル名キーワード
pub const RETAIL_KEYWORDS: &[&str] = &["retail", "shop", "store", "market", "mart", "supermarket"];

lazy_static::lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\b\w+\b").unwrap();
    static ref ALPHA_WORD_RE: Regex = Regex::new(r"\b[a-zA-Z]+\b").unwrap();
}

/// 採点結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scorecard {
    pub score: f64,
    /// 発火順のシグナルラベル
    pub reasons: Vec<String>,
}

impl Scorecard {
    fn add(&mut self, weight: f64, reason: impl Into<String>) {
        self.score += weight;
        self.reasons.push(reason.into());
    }
}

/// 1ファイル分の前計算済みトークン
///
/// 全レコードとの比較で使い回す。
#[derive(Debug, Clone)]
pub struct TokenContext<'a> {
    pub tokens: &'a TokenTuple,
    raw_text: String,
    company_lower: String,
    company_key: String,
    is_retail: bool,
}

impl<'a> TokenContext<'a> {
    pub fn new(tokens: &'a TokenTuple) -> Self {
        let raw_text = tokens.raw_text();
        let company_lower = tokens.company.to_lowercase();
        let company_key = strip_non_alnum(&company_lower);
        let is_retail = RETAIL_KEYWORDS.iter().any(|k| raw_text.contains(k));

        Self {
            tokens,
            raw_text,
            company_lower,
            company_key,
            is_retail,
        }
    }
}

/// 会社名ラダーの判定材料
struct CompanyPair<'a> {
    /// ファイル名側（英数字のみ・小文字）
    token_key: &'a str,
    /// レコード側（英数字のみ・小文字）
    name_key: &'a str,
    min_len: usize,
}

impl CompanyPair<'_> {
    fn token_long_enough(&self) -> bool {
        self.token_key.chars().count() >= self.min_len
    }
}

/// ラダーの1段
struct LadderRung {
    label: &'static str,
    weight: fn(&ScoringTable) -> f64,
    predicate: fn(&CompanyPair) -> bool,
}

/// 会社名ラダー（この順序で評価し、最初の成立だけ加点）
const COMPANY_LADDER: &[LadderRung] = &[
    LadderRung {
        label: "Exact company name match",
        weight: |t| t.company_exact,
        predicate: |p| p.token_key == p.name_key,
    },
    LadderRung {
        label: "Company name contains abbreviation",
        weight: |t| t.company_contains,
        predicate: |p| p.name_key.contains(p.token_key),
    },
    LadderRung {
        label: "Company name starts with abbreviation",
        weight: |t| t.company_prefix,
        predicate: |p| p.token_long_enough() && p.name_key.starts_with(p.token_key),
    },
    LadderRung {
        label: "Company name contains partial match",
        weight: |t| t.company_partial,
        predicate: |p| p.token_long_enough() && p.name_key.contains(p.token_key),
    },
];

/// トークンとレコード1件を採点する
pub fn score_record(tokens: &TokenTuple, record: &Record, table: &ScoringTable) -> Scorecard {
    score_with_context(&TokenContext::new(tokens), record, table)
}

/// 前計算済みトークンでレコード1件を採点する
pub fn score_with_context(ctx: &TokenContext, record: &Record, table: &ScoringTable) -> Scorecard {
    let mut card = Scorecard::default();

    score_retail(ctx, record, table, &mut card);
    score_company(ctx, record, table, &mut card);
    score_industry(ctx, record, table, &mut card);
    score_license_and_scope(ctx, record, table, &mut card);
    score_product(ctx, record, table, &mut card);
    score_leakage(ctx, record, table, &mut card);

    card
}

fn score_retail(ctx: &TokenContext, record: &Record, table: &ScoringTable, card: &mut Scorecard) {
    if ctx.is_retail && record.industry.to_lowercase().contains("retail") {
        card.add(table.retail_affinity, "Retail industry match");
    }
}

fn score_company(ctx: &TokenContext, record: &Record, table: &ScoringTable, card: &mut Scorecard) {
    if record.company_name.is_empty() || ctx.tokens.company.is_empty() {
        return;
    }

    let name_lower = record.company_name.to_lowercase();
    let name_key = strip_non_alnum(&name_lower);

    // 記号だけの会社名トークンはラダーの対象外
    if !ctx.company_key.is_empty() {
        let pair = CompanyPair {
            token_key: &ctx.company_key,
            name_key: &name_key,
            min_len: table.min_token_len,
        };
        if let Some(rung) = COMPANY_LADDER.iter().find(|rung| (rung.predicate)(&pair)) {
            card.add((rung.weight)(table), rung.label);
        }
    }

    // 頭字語: "International Brands Limited" -> "ibl"
    let words: Vec<&str> = record.company_name.split_whitespace().collect();
    if words.len() > 1 {
        let acronym: String = words
            .iter()
            .filter_map(|w| w.chars().next())
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        if !acronym.is_empty() && acronym == ctx.company_key {
            card.add(table.company_acronym, "Matched company acronym");
        }
    }

    // 略称: 括弧や記号を挟んだ英単語の頭文字
    let abbreviation: String = ALPHA_WORD_RE
        .find_iter(&record.company_name)
        .filter_map(|m| m.as_str().chars().next())
        .flat_map(char::to_lowercase)
        .collect();
    if !abbreviation.is_empty() && abbreviation == ctx.company_lower {
        card.add(table.company_abbreviation, "Matched company abbreviation");
    }

    let name_words: HashSet<&str> = WORD_RE.find_iter(&name_lower).map(|m| m.as_str()).collect();
    if let Some(word) = WORD_RE
        .find_iter(&ctx.company_lower)
        .map(|m| m.as_str())
        .find(|w| w.chars().count() >= table.min_token_len && name_words.contains(w))
    {
        card.add(
            table.company_whole_word,
            format!("Company name contains word '{}'", word),
        );
    }

    if let Some(word) = name_lower
        .split_whitespace()
        .find(|w| w.chars().count() >= table.min_record_word_len && ctx.company_lower.contains(w))
    {
        card.add(
            table.company_word_in_token,
            format!("Company word '{}' in filename", word),
        );
    }
}

fn score_industry(ctx: &TokenContext, record: &Record, table: &ScoringTable, card: &mut Scorecard) {
    let extracted = ctx.tokens.industry.as_str();
    if extracted.is_empty() || record.industry.is_empty() {
        return;
    }

    let sales_industry = normalize_industry(&record.industry);
    if sales_industry.is_empty() {
        return;
    }

    if sales_industry == extracted {
        card.add(table.industry_exact, "Industry exact match");
    } else if sales_industry.contains(extracted) || extracted.contains(sales_industry.as_str()) {
        card.add(table.industry_partial, "Industry partial match");
    }
}

fn score_license_and_scope(
    ctx: &TokenContext,
    record: &Record,
    table: &ScoringTable,
    card: &mut Scorecard,
) {
    if let Some(description) = record.description.as_deref() {
        if ctx.raw_text.contains("license") && description.to_lowercase().contains("license") {
            card.add(table.license_in_description, "License match in description");
        }
    }

    let scope = &ctx.tokens.scope;
    if let Some(record_scope) = record.scope.as_deref() {
        if !scope.is_empty() && record_scope.to_lowercase().contains(&scope.to_lowercase()) {
            card.add(table.scope_match, "Scope match");
        }
    }
}

fn score_product(ctx: &TokenContext, record: &Record, table: &ScoringTable, card: &mut Scorecard) {
    let product = &ctx.tokens.product;
    if let Some(description) = record.description.as_deref() {
        if !product.is_empty() && description.to_lowercase().contains(&product.to_lowercase()) {
            card.add(table.product_in_description, "Product match in description");
        }
    }
}

/// ファイル名パーツが説明・スコープ欄に現れるか
fn score_leakage(ctx: &TokenContext, record: &Record, table: &ScoringTable, card: &mut Scorecard) {
    if let Some(description) = record.description.as_deref() {
        if let Some(part) = first_part_in(ctx, &description.to_lowercase(), table) {
            card.add(
                table.part_in_description,
                format!("Filename part '{}' in description", part),
            );
        }
    }

    if let Some(scope) = record.scope.as_deref() {
        let scope = scope.to_lowercase();

        if !ctx.company_lower.is_empty() && scope.contains(&ctx.company_lower) {
            card.add(table.company_in_scope, "Company abbreviation in scope");
        }

        if let Some(part) = first_part_in(ctx, &scope, table) {
            card.add(
                table.part_in_scope,
                format!("Filename part '{}' in scope", part),
            );
        }
    }
}

fn first_part_in<'a>(ctx: &'a TokenContext, haystack: &str, table: &ScoringTable) -> Option<&'a str> {
    ctx.tokens
        .raw_parts
        .iter()
        .map(String::as_str)
        .find(|part| {
            part.chars().count() >= table.min_token_len && haystack.contains(&part.to_lowercase())
        })
}
