use crate::{AmountParseError, CurrencyDescriptor, Locale, locale::is_space_like};
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of, satisfy},
    combinator::{all_consuming, opt, recognize},
    multi::many0,
    sequence::preceded,
};

// Enough precision for any realistic input while keeping the rounding
// arithmetic inside u128.
const MAX_FRACTION_DIGITS: usize = 18;

fn sign(input: &str) -> IResult<&str, bool> {
    opt(one_of("+-"))
        .map(|sign| sign == Some('-'))
        .parse(input)
}

// A space-like grouping separator accepts any space the user typed.
fn is_grouping(grouping: char, c: char) -> bool {
    c == grouping || (is_space_like(grouping) && is_space_like(c))
}

// 1,234,567 -> "1234567"
fn grouped_digits<'a>(grouping: char) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input| {
        let separator = satisfy(move |c| is_grouping(grouping, c));
        recognize((digit1, many0((opt(separator), digit1))))
            .map(|digits: &str| digits.chars().filter(char::is_ascii_digit).collect())
            .parse(input)
    }
}

// (integer digits, fraction digits); either side may be empty but not both
fn unsigned_decimal<'a>(
    locale: &Locale,
) -> impl FnMut(&'a str) -> IResult<&'a str, (String, &'a str)> {
    let grouping = locale.grouping_separator;
    let decimal = locale.decimal_separator;
    move |input| {
        alt((
            (grouped_digits(grouping), opt(preceded(char(decimal), digit0)))
                .map(|(integer, fraction)| (integer, fraction.unwrap_or_default())),
            preceded(char(decimal), digit1).map(|fraction| (String::new(), fraction)),
        ))
        .parse(input)
    }
}

fn currency_marks(currency: &CurrencyDescriptor) -> impl Iterator<Item = &'static str> {
    [currency.symbol, currency.code]
        .into_iter()
        .filter(|mark| !mark.is_empty())
}

fn strip_leading_mark<'a>(text: &'a str, currency: &CurrencyDescriptor) -> &'a str {
    let rest = currency_marks(currency).find_map(|mark| {
        let head = text.get(..mark.len())?;
        head.eq_ignore_ascii_case(mark).then(|| &text[mark.len()..])
    });
    rest.unwrap_or(text).trim_start_matches(is_space_like)
}

fn strip_trailing_mark<'a>(text: &'a str, currency: &CurrencyDescriptor) -> &'a str {
    let rest = currency_marks(currency).find_map(|mark| {
        let split = text.len().checked_sub(mark.len())?;
        let tail = text.get(split..)?;
        tail.eq_ignore_ascii_case(mark).then(|| &text[..split])
    });
    rest.unwrap_or(text).trim_end_matches(is_space_like)
}

fn take_sign(text: &str) -> (Option<char>, &str) {
    match text.chars().next() {
        Some(sign @ ('-' | '+')) => (Some(sign), text[1..].trim_start_matches(is_space_like)),
        _ => (None, text),
    }
}

// "-$ 5.25" -> "-5.25", "$-5" -> "-5", "1 234,56 $" -> "1 234,56"
fn strip_currency_marks(text: &str, currency: &CurrencyDescriptor) -> String {
    let (sign, rest) = take_sign(text.trim_matches(is_space_like));
    let rest = strip_leading_mark(rest, currency);
    let (sign, rest) = match sign {
        Some(_) => (sign, rest),
        None => take_sign(rest),
    };
    let body = strip_trailing_mark(rest, currency);
    sign.into_iter().chain(body.chars()).collect()
}

fn to_minor_units(
    negative: bool,
    integer: &str,
    fraction: &str,
    currency: &CurrencyDescriptor,
) -> Option<i64> {
    let per_major = u128::try_from(currency.minor_units_per_major()?).ok()?;
    let major: u128 = if integer.is_empty() {
        0
    } else {
        integer.parse().ok()?
    };

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let scale = 10_u128.pow(fraction.len() as u32);
    let numerator: u128 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().ok()?
    };
    // round half away from zero on the magnitude
    let fraction_units = (numerator * per_major * 2 + scale) / (scale * 2);

    let magnitude = major.checked_mul(per_major)?.checked_add(fraction_units)?;
    let magnitude = i64::try_from(magnitude).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses user-typed money into minor units, e.g. `"$1,234.56"` into `123456`.
///
/// Surrounding whitespace is ignored, as is the currency symbol or code at
/// either end of the number. Grouping and decimal separators follow `locale`.
/// Extra fraction digits are rounded half away from zero.
pub fn try_parse_currency_amount(
    locale: &Locale,
    currency: &CurrencyDescriptor,
    text: &str,
) -> Result<i64, AmountParseError> {
    let cleaned = strip_currency_marks(text, currency);
    if cleaned.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let (_, (negative, (integer, fraction))) = all_consuming((sign, unsigned_decimal(locale)))
        .parse(cleaned.as_str())
        .map_err(|_| AmountParseError::Invalid {
            input: text.to_string(),
        })?;

    to_minor_units(negative, &integer, fraction, currency).ok_or_else(|| {
        AmountParseError::Overflow {
            input: text.to_string(),
        }
    })
}

/// Lenient form of [`try_parse_currency_amount`]: anything unparseable is `0`.
pub fn parse_currency_amount(locale: &Locale, currency: &CurrencyDescriptor, text: &str) -> i64 {
    try_parse_currency_amount(locale, currency, text).unwrap_or_else(|err| {
        tracing::debug!(error = %err, locale = locale.tag, "Currency amount treated as zero");
        0
    })
}

/// Parses a non-negative integer split weight using the locale's grouping.
pub fn try_parse_ratio_amount(locale: &Locale, text: &str) -> Result<u64, AmountParseError> {
    let cleaned = text.trim_matches(is_space_like);
    if cleaned.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let (_, digits) = all_consuming(grouped_digits(locale.grouping_separator))
        .parse(cleaned)
        .map_err(|_| AmountParseError::Invalid {
            input: text.to_string(),
        })?;

    digits.parse().map_err(|_| AmountParseError::Overflow {
        input: text.to_string(),
    })
}

/// Lenient form of [`try_parse_ratio_amount`]: anything unparseable is `0`.
pub fn parse_ratio_amount(locale: &Locale, text: &str) -> u64 {
    try_parse_ratio_amount(locale, text).unwrap_or_else(|err| {
        tracing::debug!(error = %err, locale = locale.tag, "Ratio amount treated as zero");
        0
    })
}
