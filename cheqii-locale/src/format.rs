use crate::{
    CurrencyDescriptor, Locale, SymbolPosition,
    locale::NO_BREAK_SPACE,
};

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len_utf8());
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}

/// Formats a whole number with the locale's grouping separator.
pub fn format_integer(locale: &Locale, value: i64) -> String {
    let grouped = group_digits(value.unsigned_abs(), locale.grouping_separator);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats minor units as display money, e.g. `123456` as `$1,234.56` in
/// `en-CA` or `1 234,56 $` in `fr-CA`.
pub fn format_currency(locale: &Locale, currency: &CurrencyDescriptor, minor_units: i64) -> String {
    let per_major = currency
        .minor_units_per_major()
        .and_then(|value| u64::try_from(value).ok())
        .filter(|value| *value > 0)
        .unwrap_or(1);
    let magnitude = minor_units.unsigned_abs();
    let digits = currency.fraction_digits();

    let mut number = group_digits(magnitude / per_major, locale.grouping_separator);
    if digits > 0 {
        let minor = magnitude % per_major;
        number.push(locale.decimal_separator);
        number.push_str(&format!("{minor:0digits$}"));
    }

    let sign = if minor_units < 0 { "-" } else { "" };
    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{}{number}", currency.symbol),
        SymbolPosition::Suffix => format!("{sign}{number}{NO_BREAK_SPACE}{}", currency.symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::small("en-CA", 7, "7")]
    #[case::thousands("en-CA", 1234567, "1,234,567")]
    #[case::exact_group("en-CA", 100000, "100,000")]
    #[case::negative("de-DE", -1000, "-1.000")]
    #[case::french("fr-CA", 25000, "25\u{a0}000")]
    fn integers(#[case] tag: &str, #[case] value: i64, #[case] expected: &str) {
        let locale = Locale::from_tag(tag).expect("known locale");
        assert_eq!(format_integer(&locale, value), expected);
    }

    #[rstest]
    #[case::prefix("en-CA", "CAD", 123456, "$1,234.56")]
    #[case::padded_cents("en-US", "USD", 5, "$0.05")]
    #[case::negative_prefix("en-CA", "CAD", -500, "-$5.00")]
    #[case::suffix("fr-CA", "CAD", 123456, "1\u{a0}234,56\u{a0}$")]
    #[case::narrow_grouping("fr-FR", "EUR", 123450, "1\u{202f}234,50\u{a0}€")]
    #[case::euro_suffix("de-DE", "EUR", 100, "1,00\u{a0}€")]
    #[case::no_minor_units("ja-JP", "JPY", 1235, "¥1,235")]
    #[case::extreme("en-CA", "CAD", i64::MIN, "-$92,233,720,368,547,758.08")]
    fn currency(
        #[case] tag: &str,
        #[case] code: &str,
        #[case] minor_units: i64,
        #[case] expected: &str,
    ) {
        let locale = Locale::from_tag(tag).expect("known locale");
        let currency = CurrencyDescriptor::from_code(code).expect("known currency");
        assert_eq!(format_currency(&locale, &currency, minor_units), expected);
    }
}
