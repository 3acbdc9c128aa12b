//! Field normalizer: free-form cell text to numbers.
//!
//! Everything here is pure and total. Malformed input is routine in this
//! dataset ("NEW", "-", "500-1000", stray commas), so instead of returning
//! errors the parsers return `None` (or a default for votes) and let the
//! filter decide what an unknown value means.

use regex::Regex;
use std::sync::LazyLock;

/// `<number>/5`, with optional whitespace around the slash.
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+\.?[0-9]*)\s*/\s*5").expect("valid rating regex"));

/// Highest value a rating can legitimately take.
pub const MAX_RATING: f64 = 5.0;

/// Tokens the source uses for "not rated yet".
const UNRATED_TOKENS: [&str; 2] = ["new", "-"];

/// Parse rating text into a number.
///
/// Examples: "4.1/5" -> Some(4.1)
///           " 4.2 / 5 " -> Some(4.2)
///           "NEW" | "-" | "" -> None
pub fn parse_rating(text: Option<&str>) -> Option<f64> {
    let text = text?.trim();
    if text.is_empty() || UNRATED_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        return None;
    }

    let captures = RATING_RE.captures(text)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    (0.0..=MAX_RATING).contains(&value).then_some(value)
}

/// Parse approximate-cost text into a number.
///
/// Commas are treated as thousands separators. A hyphenated range is reduced
/// to its upper bound because filtering works against a budget ceiling.
///
/// Examples: "800" -> Some(800.0)
///           "1,000" -> Some(1000.0)
///           "500-1000" -> Some(1000.0)
///           "" | "abc" -> None
pub fn parse_cost(text: Option<&str>) -> Option<f64> {
    let cleaned = text?.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.contains('-') {
        let mut upper: Option<f64> = None;
        for segment in cleaned.split('-').map(str::trim).filter(|s| !s.is_empty()) {
            // one bad segment spoils the whole range
            let value = parse_number(segment)?;
            upper = Some(upper.map_or(value, |u| u.max(value)));
        }
        return upper;
    }

    parse_number(&cleaned)
}

/// Parse vote-count text into a non-negative integer, defaulting to 0.
///
/// Accepts plain integers and integral-looking floats ("12.0"), since some
/// exports write counts that way.
pub fn parse_votes(text: Option<&str>) -> u64 {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0;
    };

    if let Ok(votes) = text.parse::<u64>() {
        return votes;
    }

    match parse_number(text) {
        Some(value) if value >= 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

/// Finite float parse; "inf" and "NaN" are not numbers for our purposes.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_valid_formats() {
        assert_eq!(parse_rating(Some("4.1/5")), Some(4.1));
        assert_eq!(parse_rating(Some("4.0/5")), Some(4.0));
        assert_eq!(parse_rating(Some("5/5")), Some(5.0));
        assert_eq!(parse_rating(Some("3.5/5")), Some(3.5));
        assert_eq!(parse_rating(Some(" 4.2 / 5 ")), Some(4.2));
        assert_eq!(parse_rating(Some("3.9 /5")), Some(3.9));
    }

    #[test]
    fn test_parse_rating_unrated() {
        assert_eq!(parse_rating(Some("NEW")), None);
        assert_eq!(parse_rating(Some("new")), None);
        assert_eq!(parse_rating(Some("-")), None);
        assert_eq!(parse_rating(Some("")), None);
        assert_eq!(parse_rating(Some("   ")), None);
        assert_eq!(parse_rating(None), None);
    }

    #[test]
    fn test_parse_rating_no_pattern() {
        assert_eq!(parse_rating(Some("great")), None);
        assert_eq!(parse_rating(Some("4.1")), None);
        assert_eq!(parse_rating(Some("4.1/10")), None);
        // out of range for a five-point scale
        assert_eq!(parse_rating(Some("7/5")), None);
    }

    #[test]
    fn test_parse_cost_single_values() {
        assert_eq!(parse_cost(Some("800")), Some(800.0));
        assert_eq!(parse_cost(Some("300")), Some(300.0));
        assert_eq!(parse_cost(Some("1,000")), Some(1000.0));
        assert_eq!(parse_cost(Some("2,500")), Some(2500.0));
        assert_eq!(parse_cost(Some(" 450 ")), Some(450.0));
    }

    #[test]
    fn test_parse_cost_range_uses_max() {
        assert_eq!(parse_cost(Some("500-1000")), Some(1000.0));
        assert_eq!(parse_cost(Some("300-600")), Some(600.0));
        assert_eq!(parse_cost(Some("1,200 - 800")), Some(1200.0));
        assert_eq!(parse_cost(Some("-400")), Some(400.0));
    }

    #[test]
    fn test_parse_cost_malformed() {
        assert_eq!(parse_cost(Some("")), None);
        assert_eq!(parse_cost(None), None);
        assert_eq!(parse_cost(Some("abc")), None);
        assert_eq!(parse_cost(Some("-")), None);
        assert_eq!(parse_cost(Some("500-abc")), None);
        assert_eq!(parse_cost(Some("inf")), None);
    }

    #[test]
    fn test_parse_votes() {
        assert_eq!(parse_votes(Some("100")), 100);
        assert_eq!(parse_votes(Some(" 42 ")), 42);
        assert_eq!(parse_votes(Some("12.0")), 12);
        assert_eq!(parse_votes(Some("many")), 0);
        assert_eq!(parse_votes(Some("-3")), 0);
        assert_eq!(parse_votes(Some("")), 0);
        assert_eq!(parse_votes(None), 0);
    }
}
