//! Gender features of a noun headword template (`m=...`, `f2=...`).

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref GENDER_FEATURE: Regex = Regex::new(r"^([mf])(\d*)=(.+)").unwrap();
}

const ACUTE: char = '\u{0301}';
const GRAVE: char = '\u{0300}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// A single matched feature token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEntry {
    pub gender: Gender,
    pub ordinal: u32,
    pub form: String,
}

/// Counterpart forms found on one page, keyed by ordinal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenderForms {
    pub masculine: BTreeMap<u32, String>,
    pub feminine: BTreeMap<u32, String>,
}

impl GenderForms {
    pub fn is_empty(&self) -> bool {
        self.masculine.is_empty() && self.feminine.is_empty()
    }

    /// Masculine forms in ordinal order.
    pub fn masculine_forms(&self) -> Vec<String> {
        self.masculine.values().cloned().collect()
    }

    /// Feminine forms in ordinal order.
    pub fn feminine_forms(&self) -> Vec<String> {
        self.feminine.values().cloned().collect()
    }
}

/// Remove stress marks and lower-case. Other diacritics (ё, й) are kept.
pub fn normalize_form(raw: &str) -> String {
    raw.nfd()
        .filter(|&c| c != ACUTE && c != GRAVE)
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

/// Parse one `|`-separated token; `None` for anything that is not a gender feature.
pub fn parse_feature(token: &str) -> Option<FeatureEntry> {
    let cap = GENDER_FEATURE.captures(token)?;
    let gender = match &cap[1] {
        "m" => Gender::Masculine,
        _ => Gender::Feminine,
    };
    let ordinal = match &cap[2] {
        "" => 1,
        digits => digits.parse().ok()?,
    };
    Some(FeatureEntry {
        gender,
        ordinal,
        form: normalize_form(&cap[3]),
    })
}

/// Classify all gender features of a template's inner content.
pub fn parse_features(template: &str) -> GenderForms {
    let mut forms = GenderForms::default();
    for entry in template.split('|').filter_map(parse_feature) {
        let bucket = match entry.gender {
            Gender::Masculine => &mut forms.masculine,
            Gender::Feminine => &mut forms.feminine,
        };
        bucket.insert(entry.ordinal, entry.form);
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stress_accent() {
        assert_eq!(normalize_form("ко́шка"), "кошка");
    }

    #[test]
    fn strips_secondary_stress() {
        assert_eq!(normalize_form("вѐтеринар"), "ветеринар");
    }

    #[test]
    fn keeps_yo_and_short_i() {
        assert_eq!(normalize_form("актёр"), "актёр");
        assert_eq!(normalize_form("чайка"), "чайка");
    }

    #[test]
    fn lowercases() {
        assert_eq!(normalize_form("Учи́тельница"), "учительница");
    }

    #[test]
    fn parses_default_ordinal() {
        assert_eq!(
            parse_feature("f=ко́шка"),
            Some(FeatureEntry {
                gender: Gender::Feminine,
                ordinal: 1,
                form: "кошка".to_string(),
            })
        );
    }

    #[test]
    fn parses_multi_digit_ordinal() {
        let entry = parse_feature("m12=x").unwrap();
        assert_eq!(entry.gender, Gender::Masculine);
        assert_eq!(entry.ordinal, 12);
    }

    #[test]
    fn keeps_equals_in_value() {
        assert_eq!(parse_feature("m=a=b").unwrap().form, "a=b");
    }

    #[test]
    fn rejects_non_gender_tokens() {
        assert_eq!(parse_feature("ru-noun+"), None);
        assert_eq!(parse_feature("*"), None);
        assert_eq!(parse_feature("n=x"), None);
        assert_eq!(parse_feature("f="), None);
        assert_eq!(parse_feature(" f=x"), None);
        assert_eq!(parse_feature("fa=x"), None);
        assert_eq!(parse_feature("f99999999999=x"), None);
    }

    #[test]
    fn buckets_by_gender() {
        let forms = parse_features("ru-noun+|учи́тель|m=a|f=б|f2=в|adj=г");
        assert_eq!(forms.masculine_forms(), vec!["a"]);
        assert_eq!(forms.feminine_forms(), vec!["б", "в"]);
    }

    #[test]
    fn default_ordinal_sorts_before_explicit() {
        let forms = parse_features("f2=б|f=а");
        assert_eq!(forms.feminine_forms(), vec!["а", "б"]);
        assert!(forms.masculine.is_empty());
    }

    #[test]
    fn later_token_replaces_same_ordinal() {
        let forms = parse_features("f=а|f1=б");
        assert_eq!(forms.feminine_forms(), vec!["б"]);
    }

    #[test]
    fn no_features() {
        assert!(parse_features("ru-noun+|кот|*").is_empty());
    }
}
