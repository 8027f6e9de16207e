//! Price text parsing for localized storefront price strings.

use super::money::{CurrencyCode, ExchangeRate, Money};
use crate::error::{PriceError, Result};
use regex_lite::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

/// Marker appended by [`convert_text`]; text already carrying it is left alone.
pub const CONVERTED_MARKER: &str = " (~";

/// Currency markers in priority order. Matched against lowercased text.
const CURRENCY_MARKERS: &[(&str, CurrencyCode)] = &[
    ("₸", CurrencyCode::Kzt),
    ("тг", CurrencyCode::Kzt),
    ("kzt", CurrencyCode::Kzt),
    ("₽", CurrencyCode::Rub),
    ("руб", CurrencyCode::Rub),
    ("rub", CurrencyCode::Rub),
    ("р.", CurrencyCode::Rub),
    ("$", CurrencyCode::Usd),
    ("usd", CurrencyCode::Usd),
    ("€", CurrencyCode::Eur),
    ("eur", CurrencyCode::Eur),
];

static TENGE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(\\d{1,3}(?:[ \u{00A0}\u{202F}]\\d{3})*(?:[.,]\\d+)?|\\d+(?:[.,]\\d+)?)[ \u{00A0}\u{202F}]*₸")
        .unwrap()
});

/// Parses a localized price such as `"1 234,56 ₸"`, `"₽1999"` or `"1,200 руб."`.
pub fn parse_price(text: &str) -> Result<Money> {
    let unrecognized = || PriceError::UnrecognizedPrice(text.to_string());

    let currency = detect_currency(text).ok_or_else(unrecognized)?;
    let amount = parse_amount(text).ok_or_else(unrecognized)?;

    trace!("Parsed {:?} as {} {}", text, amount, currency);
    Ok(Money::new(amount, currency))
}

/// Detects the currency from symbols or abbreviations; the first table match wins.
pub fn detect_currency(text: &str) -> Option<CurrencyCode> {
    let lowered = text.to_lowercase();
    CURRENCY_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, currency)| *currency)
}

/// Extracts the first numeric value from text.
pub fn parse_amount(text: &str) -> Option<f64> {
    let run = first_numeric_run(text)?;
    let value: f64 = normalize_number(&run).parse().ok()?;
    value.is_finite().then_some(value)
}

fn is_space_separator(c: char) -> bool {
    matches!(c, ' ' | '\u{00A0}' | '\u{202F}')
}

/// Whether `chars[at..]` starts with exactly three digits.
fn is_thousands_group(chars: &[char], at: usize) -> bool {
    let digits = chars[at..].iter().take_while(|c| c.is_ascii_digit()).count();
    digits == 3
}

/// Collects digits plus any separators that sit between two digits.
///
/// A space only joins when a three-digit group follows it.
fn first_numeric_run(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let start = chars.iter().position(|c| c.is_ascii_digit())?;

    let mut run = String::new();
    for (i, &c) in chars.iter().enumerate().skip(start) {
        if c.is_ascii_digit() {
            run.push(c);
        } else if matches!(c, ',' | '.') && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()) {
            run.push(c);
        } else if is_space_separator(c) && is_thousands_group(&chars, i + 1) {
            run.push(c);
        } else {
            break;
        }
    }

    Some(run)
}

/// Turns `1 234,56` / `1,200` / `1.234,56` into a dot-decimal string.
///
/// The last `,` or `.` is the decimal point when one or two digits follow it;
/// every other separator groups thousands.
fn normalize_number(run: &str) -> String {
    let decimal_at = run.rfind([',', '.']).filter(|&idx| {
        let fraction = &run[idx + 1..];
        (1..=2).contains(&fraction.len()) && fraction.chars().all(|c| c.is_ascii_digit())
    });

    match decimal_at {
        Some(idx) => {
            let whole: String = run[..idx].chars().filter(|c| c.is_ascii_digit()).collect();
            format!("{}.{}", whole, &run[idx + 1..])
        }
        None => run.chars().filter(|c| c.is_ascii_digit()).collect(),
    }
}

/// Appends a ruble estimate to every tenge amount in `text`.
///
/// `"Цена: 1 999 ₸"` becomes `"Цена: 1 999 ₸ (~300₽)"`. Text that was already
/// converted is returned unchanged.
pub fn convert_text(text: &str, rate: &ExchangeRate) -> Result<String> {
    if rate.from != CurrencyCode::Kzt {
        return Err(PriceError::CurrencyMismatch { expected: CurrencyCode::Kzt, actual: rate.from });
    }

    if text.contains(CONVERTED_MARKER) || !text.contains('₸') {
        return Ok(text.to_string());
    }

    let converted = TENGE_AMOUNT.replace_all(text, |caps: &Captures<'_>| {
        let matched = &caps[0];
        match normalize_number(&caps[1]).parse::<f64>() {
            Ok(value) => {
                let estimate = Money::new(value * rate.rate, rate.to);
                format!("{}{}{})", matched, CONVERTED_MARKER, estimate.rounded())
            }
            Err(_) => matched.to_string(),
        }
    });

    Ok(converted.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kzt_rub(rate: f64) -> ExchangeRate {
        ExchangeRate::new(CurrencyCode::Kzt, CurrencyCode::Rub, rate).unwrap()
    }

    #[test]
    fn test_parse_tenge_with_decimal_comma() {
        let money = parse_price("1 234,56 ₸").unwrap();
        assert_eq!(money.amount, 1234.56);
        assert_eq!(money.currency, CurrencyCode::Kzt);
    }

    #[test]
    fn test_parse_space_thousands_separator() {
        assert_eq!(parse_price("1 200 ₸").unwrap().amount, 1200.0);
        assert_eq!(parse_price("1\u{00A0}200 ₸").unwrap().amount, 1200.0);
        assert_eq!(parse_price("12\u{202F}345 ₸").unwrap().amount, 12345.0);
        assert_eq!(parse_price("1 200 руб.").unwrap().amount, 1200.0);
    }

    #[test]
    fn test_parse_ruble_variants() {
        assert_eq!(parse_price("₽1999").unwrap(), Money::new(1999.0, CurrencyCode::Rub));
        assert_eq!(parse_price("1,200 руб.").unwrap(), Money::new(1200.0, CurrencyCode::Rub));
        assert_eq!(parse_price("599 р.").unwrap(), Money::new(599.0, CurrencyCode::Rub));
        assert_eq!(parse_price("349 RUB").unwrap(), Money::new(349.0, CurrencyCode::Rub));
        assert_eq!(parse_price("1 249,50 ₽").unwrap(), Money::new(1249.5, CurrencyCode::Rub));
    }

    #[test]
    fn test_parse_tenge_abbreviations() {
        assert_eq!(parse_price("4 500 тг").unwrap(), Money::new(4500.0, CurrencyCode::Kzt));
        assert_eq!(parse_price("4500 KZT").unwrap(), Money::new(4500.0, CurrencyCode::Kzt));
    }

    #[test]
    fn test_parse_dollars_and_euros() {
        assert_eq!(parse_price("$1,234.56").unwrap(), Money::new(1234.56, CurrencyCode::Usd));
        assert_eq!(parse_price("59.99 USD").unwrap(), Money::new(59.99, CurrencyCode::Usd));
        assert_eq!(parse_price("1.234,56€").unwrap(), Money::new(1234.56, CurrencyCode::Eur));
        assert_eq!(parse_price("29,99 EUR").unwrap(), Money::new(29.99, CurrencyCode::Eur));
    }

    #[test]
    fn test_marker_priority() {
        // Tenge wins over a stray dollar sign
        assert_eq!(detect_currency("$ 5 000 ₸"), Some(CurrencyCode::Kzt));
        assert_eq!(detect_currency("₽ / $"), Some(CurrencyCode::Rub));
        assert_eq!(detect_currency("Free to Play"), None);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(parse_price(""), Err(PriceError::UnrecognizedPrice(_))));
        assert!(matches!(parse_price("Free to Play"), Err(PriceError::UnrecognizedPrice(_))));
        // Digits but no currency
        assert!(parse_price("1 200").is_err());
        // Currency but no digits
        assert!(parse_price("₸").is_err());
        assert!(parse_price("руб.").is_err());
    }

    #[test]
    fn test_first_numeric_run_stops_at_gap() {
        assert_eq!(first_numeric_run("1 234,56 ₸ 99").as_deref(), Some("1 234,56"));
        assert_eq!(first_numeric_run("-20% 1 999 ₸").as_deref(), Some("20"));
        assert_eq!(first_numeric_run("no digits"), None);
    }

    #[test]
    fn test_space_joins_only_thousands_groups() {
        assert_eq!(parse_amount("Dota 2 1 999 ₸"), Some(2.0));
        assert_eq!(parse_amount("1 234,56 ₸"), Some(1234.56));
        assert_eq!(parse_amount("1 000 000 ₸"), Some(1_000_000.0));
        assert_eq!(parse_amount("1\u{00A0}999\u{00A0}₸"), Some(1999.0));
        assert_eq!(first_numeric_run("12 3456").as_deref(), Some("12"));
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("1 234,56"), "1234.56");
        assert_eq!(normalize_number("1,200"), "1200");
        assert_eq!(normalize_number("1.234,56"), "1234.56");
        assert_eq!(normalize_number("1,234.5"), "1234.5");
        assert_eq!(normalize_number("1999"), "1999");
    }

    #[test]
    fn test_convert_text() {
        let converted = convert_text("Цена: 1 000 ₸", &kzt_rub(0.2)).unwrap();
        assert_eq!(converted, "Цена: 1 000 ₸ (~200₽)");
    }

    #[test]
    fn test_convert_text_multiple_amounts() {
        let converted = convert_text("500₸ or 2 500,50 ₸", &kzt_rub(0.2)).unwrap();
        assert_eq!(converted, "500₸ (~100₽) or 2 500,50 ₸ (~500₽)");
    }

    #[test]
    fn test_convert_text_idempotent() {
        let rate = kzt_rub(0.2);
        let once = convert_text("1 000 ₸", &rate).unwrap();
        let twice = convert_text(&once, &rate).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_convert_text_without_tenge() {
        let text = "1 000 ₽";
        assert_eq!(convert_text(text, &kzt_rub(0.2)).unwrap(), text);
    }

    #[test]
    fn test_convert_text_rejects_wrong_rate() {
        let rate = ExchangeRate::new(CurrencyCode::Rub, CurrencyCode::Kzt, 5.0).unwrap();
        assert!(convert_text("1 000 ₸", &rate).is_err());
    }
}
