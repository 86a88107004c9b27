//! Field classification for recognized card text
//!
//! Maps a single OCR string onto one card field, or rejects it. Stages run in a
//! fixed order (noise, number, expiry date, name) and the first match wins, so a
//! string is never classified into more than one field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::card::ExpireDate;
use crate::config::ClassifierConfig;

/// Four groups of exactly four digits separated by horizontal whitespace.
/// Only digits count as neighbours; OCR often glues letters onto the run.
static CARD_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^0-9])([0-9]{4}[\t\p{Zs}]+[0-9]{4}[\t\p{Zs}]+[0-9]{4}[\t\p{Zs}]+[0-9]{4})(?:[^0-9]|$)",
    )
    .expect("card number pattern is valid")
});

/// `MM/YY`
static EXPIRE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2})/([0-9]{2})").expect("expiry date pattern is valid")
});

/// Two words of at least two letters, optionally with a middle token such as `J.`
static HOLDER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z]{2,}[\t\p{Zs}](?:[A-Za-z.]+[\t\p{Zs}])?[A-Za-z]{2,}")
        .expect("holder name pattern is valid")
});

static DEFAULT_CLASSIFIER: Lazy<FieldClassifier> = Lazy::new(FieldClassifier::default);

/// A single classified observation of one card field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Card number, whitespace runs collapsed to single spaces
    Number(String),
    /// Card holder name as matched
    Name(String),
    /// Expiry date
    ExpireDate(ExpireDate),
}

impl FieldKind {
    /// Short field label for logging
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Number(_) => "number",
            FieldKind::Name(_) => "name",
            FieldKind::ExpireDate(_) => "expire_date",
        }
    }
}

/// Classifies recognized text into card fields
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    /// Issuer and promotional tokens that reject a string outright
    skip_words: Vec<String>,
    /// Card boilerplate that resembles a name but is not one
    invalid_name_words: Vec<String>,
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl FieldClassifier {
    /// Create a classifier from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            skip_words: lowercase_all(&config.skip_words),
            invalid_name_words: lowercase_all(&config.invalid_name_words),
        }
    }

    /// Classify a recognized string, returning `None` if it is not a card field
    pub fn classify(&self, text: &str) -> Option<FieldKind> {
        let lowered = text.to_lowercase();

        if contains_any(&lowered, &self.skip_words) {
            return None;
        }

        if let Some(caps) = CARD_NUMBER.captures(text) {
            let number = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            return Some(FieldKind::Number(number));
        }

        // An unparseable or out-of-range date only rules out the date stage
        if let Some(caps) = EXPIRE_DATE.captures(text) {
            let month = caps[1].parse::<u8>().ok();
            let year = caps[2].parse::<u16>().ok();
            if let Some(date) = month.zip(year).and_then(|(m, y)| ExpireDate::new(m, y)) {
                return Some(FieldKind::ExpireDate(date));
            }
        }

        if let Some(m) = HOLDER_NAME.find(text) {
            if contains_any(&lowered, &self.invalid_name_words) {
                return None;
            }
            return Some(FieldKind::Name(m.as_str().to_string()));
        }

        None
    }
}

/// Classify with the default word lists
pub fn classify(text: &str) -> Option<FieldKind> {
    DEFAULT_CLASSIFIER.classify(text)
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &str) -> Option<FieldKind> {
        Some(FieldKind::Number(s.to_string()))
    }

    fn name(s: &str) -> Option<FieldKind> {
        Some(FieldKind::Name(s.to_string()))
    }

    fn date(month: u8, year: u16) -> Option<FieldKind> {
        Some(FieldKind::ExpireDate(ExpireDate { month, year }))
    }

    #[test]
    fn test_classify_number() {
        assert_eq!(classify("4111 1111 1111 1111"), number("4111 1111 1111 1111"));
        assert_eq!(classify("5500\t0000  0000 0004"), number("5500 0000 0000 0004"));
    }

    #[test]
    fn test_number_requires_four_groups_of_four() {
        assert_eq!(classify("4111 1111 1111"), None);
        assert_eq!(classify("41111 1111 1111 1111"), None);
        assert_eq!(classify("4111111111111111"), None);
    }

    #[test]
    fn test_number_with_letter_neighbours() {
        assert_eq!(classify("A4111 1111 1111 1111"), number("4111 1111 1111 1111"));
        assert_eq!(classify("4111 1111 1111 1111X"), number("4111 1111 1111 1111"));
        assert_eq!(classify("No.4111 1111 1111 1111."), number("4111 1111 1111 1111"));
        assert_eq!(classify("4111\u{a0}1111 1111 1111"), number("4111 1111 1111 1111"));
    }

    #[test]
    fn test_number_rejects_five_digit_group() {
        assert_eq!(classify("4111 1111 1111 11111"), None);
        assert_eq!(classify("A41111 1111 1111 1111"), None);
    }

    #[test]
    fn test_classify_expire_date() {
        assert_eq!(classify("04/27"), date(4, 27));
        assert_eq!(classify("12/30"), date(12, 30));
    }

    #[test]
    fn test_expire_date_with_surrounding_text() {
        assert_eq!(classify("THRU 09/26"), date(9, 26));
    }

    #[test]
    fn test_expire_date_rejects_invalid_month() {
        assert_eq!(classify("13/27"), None);
        assert_eq!(classify("00/27"), None);
    }

    #[test]
    fn test_invalid_month_falls_through_to_name() {
        assert_eq!(classify("JOHN SMITH 13/27"), name("JOHN SMITH"));
        assert_eq!(classify("JOHN SMITH 04/27"), date(4, 27));
    }

    #[test]
    fn test_classify_name() {
        assert_eq!(classify("JOHN SMITH"), name("JOHN SMITH"));
        assert_eq!(classify("JOHN Q. SMITH"), name("JOHN Q. SMITH"));
        assert_eq!(classify("Jane Doe"), name("Jane Doe"));
    }

    #[test]
    fn test_name_needs_two_words() {
        assert_eq!(classify("SMITH"), None);
        assert_eq!(classify("J SMITH"), None);
    }

    #[test]
    fn test_invalid_name_words_rejected() {
        assert_eq!(classify("VALID THRU"), None);
        assert_eq!(classify("MONTH YEAR"), None);
        assert_eq!(classify("MEMBER SINCE"), None);
    }

    #[test]
    fn test_invalid_name_words_do_not_block_dates() {
        assert_eq!(classify("VALID FROM 01/24"), date(1, 24));
    }

    #[test]
    fn test_skip_words_take_precedence() {
        assert_eq!(classify("visa 4111 1111 1111 1111"), None);
        assert_eq!(classify("VISA"), None);
        assert_eq!(classify("MasterCard"), None);
        assert_eq!(classify("PLATINUM REWARDS"), None);
        assert_eq!(classify("FIRST NATIONAL BANK"), None);
        assert_eq!(classify("CARD HOLDER"), None);
    }

    #[test]
    fn test_number_wins_over_date() {
        assert_eq!(
            classify("4111 1111 1111 1111 04/27"),
            number("4111 1111 1111 1111")
        );
    }

    #[test]
    fn test_date_wins_over_name() {
        assert_eq!(classify("GOOD THRU 04/27"), date(4, 27));
    }

    #[test]
    fn test_unclassifiable_text() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("12345"), None);
        assert_eq!(classify("!!"), None);
    }

    #[test]
    fn test_classify_is_pure() {
        for text in ["4111 1111 1111 1111", "JOHN SMITH", "04/27", "VISA", "noise"] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn test_custom_word_lists() {
        let config = ClassifierConfig {
            skip_words: vec!["ACME".to_string()],
            invalid_name_words: vec![],
        };
        let classifier = FieldClassifier::new(&config);

        assert_eq!(classifier.classify("ACME PREMIER"), None);
        assert_eq!(classifier.classify("CARD HOLDER"), name("CARD HOLDER"));
        assert_eq!(classifier.classify("VALID THRU"), name("VALID THRU"));
    }

    #[test]
    fn test_field_kind_labels() {
        assert_eq!(FieldKind::Number(String::new()).label(), "number");
        assert_eq!(FieldKind::Name(String::new()).label(), "name");
        assert_eq!(
            FieldKind::ExpireDate(ExpireDate { month: 1, year: 1 }).label(),
            "expire_date"
        );
    }
}
