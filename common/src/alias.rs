//! 業種エイリアス変換モジュール
//!
//! 業種の表記ゆれ（"Oil & Gas" / "oil and gas" / "oil" など）を
//! 少数の正規トークンにまとめる。ファイル名から抽出した業種と
//! シート側の業種の両方に同じ変換をかけるので比較は対称になる。

use regex::Regex;
use std::collections::HashMap;

/// 完全一致で置き換えるエイリアス（小文字・trim済みの入力に対して）
const INDUSTRY_ALIASES: &[(&str, &str)] = &[
    ("oil & gas", "oil&gas"),
    ("oil and gas", "oil&gas"),
    ("oil&gas", "oil&gas"),
    ("oil", "oil&gas"),
    ("food & beverage", "food&bev"),
    ("food and beverage", "food&bev"),
    ("food&bev", "food&bev"),
    ("food", "food&bev"),
    ("banking & finance", "bankingfinance"),
    ("banking and finance", "bankingfinance"),
    ("banking", "bankingfinance"),
    ("finance", "bankingfinance"),
    ("consumer products", "consumerproducts"),
    ("consumer goods", "consumerproducts"),
    ("it services", "itservices"),
    ("it service", "itservices"),
    ("higher education", "education"),
    ("telecommunications", "telecom"),
    ("telecommunication", "telecom"),
    ("public sector", "government"),
    ("public sector/govt", "government"),
    ("public sector/finance", "government"),
    ("automobile", "auto"),
    ("automotive", "auto"),
    ("utilities", "energy"),
    ("utility", "energy"),
    ("power transmission", "energy"),
    ("pharma", "pharmaceutical"),
    ("pharmaceuticals", "pharmaceutical"),
];

lazy_static::lazy_static! {
    static ref ALIAS_TABLE: HashMap<&'static str, &'static str> =
        INDUSTRY_ALIASES.iter().copied().collect();
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]").unwrap();
}

/// 業種名を正規化する
///
/// 1. 小文字化してtrim
/// 2. エイリアス表に完全一致すれば正規トークンを返す
/// 3. それ以外は英数字以外を除去し、除去後がエイリアス表にあれば正規トークン、
///    なければ除去後の文字列を返す
///
/// 冪等: 正規化済みの値を再度正規化しても変わらない。
pub fn normalize_industry(industry: &str) -> String {
    let lowered = industry.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    if let Some(canonical) = ALIAS_TABLE.get(lowered.as_str()) {
        return (*canonical).to_string();
    }

    let stripped = strip_non_alnum(&lowered);
    match ALIAS_TABLE.get(stripped.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => stripped,
    }
}

/// 小文字化済みの文字列から英数字以外を除去
pub(crate) fn strip_non_alnum(lowered: &str) -> String {
    NON_ALNUM_RE.replace_all(lowered, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_variants_collapse() {
        assert_eq!(normalize_industry("Oil & Gas"), "oil&gas");
        assert_eq!(normalize_industry("oil and gas"), "oil&gas");
        assert_eq!(normalize_industry("  OIL  "), "oil&gas");
        assert_eq!(normalize_industry("Food and Beverage"), "food&bev");
        assert_eq!(normalize_industry("Finance"), "bankingfinance");
        assert_eq!(normalize_industry("Telecommunications"), "telecom");
        assert_eq!(normalize_industry("Public Sector/Govt"), "government");
        assert_eq!(normalize_industry("Automotive"), "auto");
        assert_eq!(normalize_industry("Utilities"), "energy");
        assert_eq!(normalize_industry("Pharma"), "pharmaceutical");
    }

    #[test]
    fn test_unknown_strips_punctuation() {
        assert_eq!(normalize_industry("Textile & Apparel"), "textileapparel");
        assert_eq!(normalize_industry("Retail"), "retail");
        assert_eq!(normalize_industry("Real-Estate (Dev.)"), "realestatedev");
    }

    #[test]
    fn test_punctuated_alias_key_maps_to_canonical() {
        assert_eq!(normalize_industry("Oil!"), "oil&gas");
        assert_eq!(normalize_industry("Oil-"), "oil&gas");
        assert_eq!(normalize_industry("Food."), "food&bev");
        assert_eq!(normalize_industry("Pharma-"), "pharmaceutical");
        assert_eq!(normalize_industry("(Utilities)"), "energy");
        assert_eq!(normalize_industry("Tele-communications"), "telecom");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_industry(""), "");
        assert_eq!(normalize_industry("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Oil & Gas",
            "Food & Beverage",
            "Banking and Finance",
            "Consumer Goods",
            "IT Services",
            "Higher Education",
            "Public Sector/Finance",
            "Automobile",
            "Power Transmission",
            "Pharmaceuticals",
            "Textile & Apparel",
            "Retail",
            "Oil!",
            "Food.",
            "Pharma-",
            "Banking!",
            "(Utilities)",
            "",
        ];
        for input in inputs {
            let once = normalize_industry(input);
            assert_eq!(normalize_industry(&once), once, "入力: {}", input);
        }
    }

    #[test]
    fn test_every_canonical_value_is_fixed_point() {
        for (_, canonical) in INDUSTRY_ALIASES {
            assert_eq!(normalize_industry(canonical), *canonical);
        }
    }
}
