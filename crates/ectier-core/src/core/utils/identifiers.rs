use phf::{Set, phf_set};
use std::collections::BTreeSet;

/// CAZy class prefixes that mark a carbohydrate-active enzyme family
/// (glycoside hydrolases, polysaccharide lyases, carbohydrate esterases
/// and carbohydrate-binding modules).
pub const CARBOHYDRATE_ACTIVE_PREFIXES: [&str; 4] = ["GH", "PL", "CE", "CBM"];

/// InterPro entries that stand in for an ESTHER cross-reference
/// (alpha/beta hydrolase fold superfamily).
static HYDROLASE_PROXY_INTERPRO: Set<&'static str> = phf_set! {
    "IPR029058",
};

/// Pfam entries that stand in for an ESTHER cross-reference
/// (cutinase and cutinase-like domains).
static HYDROLASE_PROXY_PFAM: Set<&'static str> = phf_set! {
    "PF01083", "PF12740",
};

/// Splits a delimited identifier list on semicolons, commas and whitespace,
/// dropping empty tokens. Tolerates trailing delimiters.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

pub fn parse_token_set(value: &str) -> BTreeSet<String> {
    split_tokens(value).map(str::to_string).collect()
}

/// Upper-cases a family code and strips everything that is not ASCII
/// alphanumeric: `"ce-5"` becomes `"CE5"`, `"GH 13"` becomes `"GH13"`.
pub fn normalize_family_code(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn is_carbohydrate_active_family(code: &str) -> bool {
    let normalized = normalize_family_code(code);
    CARBOHYDRATE_ACTIVE_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
}

pub fn is_hydrolase_proxy_interpro(id: &str) -> bool {
    HYDROLASE_PROXY_INTERPRO.contains(id.trim())
}

pub fn is_hydrolase_proxy_family(id: &str) -> bool {
    HYDROLASE_PROXY_PFAM.contains(id.trim())
}

/// Interprets a review-status cell. Only explicit positive markers count;
/// `"unreviewed"`, blanks and anything unrecognized are treated as not reviewed.
pub fn parse_reviewed_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "reviewed" | "true" | "yes"
    )
}
