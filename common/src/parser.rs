//! ファイル名パーサー
//!
//! `Product_Scope_Industry_Company.jpg` 形式のファイル名をトークンに分解する。
//! 形式が崩れていても失敗せず、空のフィールドが増えるだけ。

use crate::alias::normalize_industry;
use crate::types::TokenTuple;

/// パーツの区切り文字
pub const PART_DELIMITER: char = '_';

/// 拡張子を除いたベース名を返す
///
/// 先頭のドットは拡張子とみなさない（".hidden" はそのまま）。
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if file_name[..idx].chars().any(|c| c != '.') => &file_name[..idx],
        _ => file_name,
    }
}

/// ファイル名からトークンを抽出
///
/// # パーツ数ごとの割り当て
/// * 4以上: product, scope, industry, company（2番目が license を含んでも同じ並び）
/// * 3: product, industry, company
/// * 2: product, company
/// * company が空で2パーツ以上なら最後のパーツを company にする
///
/// # Examples
/// ```
/// use refmatch_common::tokenize_filename;
///
/// let tokens = tokenize_filename("SAPS4HANA_Oil&Gas_PSO.jpg");
/// assert_eq!(tokens.product, "SAPS4HANA");
/// assert_eq!(tokens.industry, "oil&gas");
/// assert_eq!(tokens.company, "PSO");
/// ```
pub fn tokenize_filename(file_name: &str) -> TokenTuple {
    let basename = strip_extension(file_name);
    let parts: Vec<String> = basename.split(PART_DELIMITER).map(str::to_string).collect();

    let mut tokens = TokenTuple::default();
    let mut industry = String::new();

    match parts.len() {
        n if n >= 4 => {
            tokens.product = parts[0].clone();
            tokens.scope = parts[1].clone();
            // "Licenses" が2番目に来る形式も並びは同じ
            industry = parts[2].clone();
            tokens.company = parts[3].clone();
        }
        3 => {
            tokens.product = parts[0].clone();
            industry = parts[1].clone();
            tokens.company = parts[2].clone();
        }
        2 => {
            tokens.product = parts[0].clone();
            tokens.company = parts[1].clone();
        }
        _ => {}
    }

    tokens.industry = normalize_industry(&industry);

    if tokens.company.is_empty() && parts.len() > 1 {
        if let Some(last) = parts.last() {
            tokens.company = last.clone();
        }
    }

    tokens.raw_parts = parts;
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("Qlik_Retail_Imtiaz.jpg"), "Qlik_Retail_Imtiaz");
        assert_eq!(strip_extension("a.b.png"), "a.b");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("..jpg"), "..jpg");
    }

    #[test]
    fn test_three_parts() {
        let tokens = tokenize_filename("SAPS4HANA_Oil&Gas_PSO.jpg");
        assert_eq!(tokens.product, "SAPS4HANA");
        assert_eq!(tokens.scope, "");
        assert_eq!(tokens.industry, "oil&gas");
        assert_eq!(tokens.company, "PSO");
        assert_eq!(tokens.raw_parts, vec!["SAPS4HANA", "Oil&Gas", "PSO"]);
    }

    #[test]
    fn test_four_parts_license() {
        let tokens = tokenize_filename("Qlik_Licenses_Retail_Imtiaz.jpg");
        assert_eq!(tokens.product, "Qlik");
        assert_eq!(tokens.scope, "Licenses");
        assert_eq!(tokens.industry, "retail");
        assert_eq!(tokens.company, "Imtiaz");
    }

    #[test]
    fn test_four_parts_standard() {
        let tokens = tokenize_filename("Qlik_SLA_Conglomerate_IBL.jpg");
        assert_eq!(tokens.product, "Qlik");
        assert_eq!(tokens.scope, "SLA");
        assert_eq!(tokens.industry, "conglomerate");
        assert_eq!(tokens.company, "IBL");
    }

    #[test]
    fn test_five_parts_keeps_extra_in_raw() {
        let tokens = tokenize_filename("SAP_AMS_Food_Shan_Phase2.png");
        assert_eq!(tokens.company, "Shan");
        assert_eq!(tokens.industry, "food&bev");
        assert_eq!(tokens.raw_parts.len(), 5);
        assert_eq!(tokens.raw_parts[4], "Phase2");
    }

    #[test]
    fn test_two_parts() {
        let tokens = tokenize_filename("NoMatch_Here.jpg");
        assert_eq!(tokens.product, "NoMatch");
        assert_eq!(tokens.company, "Here");
        assert_eq!(tokens.scope, "");
        assert_eq!(tokens.industry, "");
    }

    #[test]
    fn test_four_parts_empty_company_falls_back_to_last() {
        let tokens = tokenize_filename("Qlik_SLA_Retail__Extra.jpg");
        assert_eq!(tokens.company, "Extra");
    }

    #[test]
    fn test_single_part() {
        let tokens = tokenize_filename("Logo.jpg");
        assert_eq!(tokens.product, "");
        assert_eq!(tokens.company, "");
        assert_eq!(tokens.raw_parts, vec!["Logo"]);
    }

    #[test]
    fn test_empty_name() {
        let tokens = tokenize_filename("");
        assert_eq!(tokens, TokenTuple {
            raw_parts: vec![String::new()],
            ..Default::default()
        });
    }
}
