use crate::LocaleError;

pub(crate) const NO_BREAK_SPACE: char = '\u{00A0}';
pub(crate) const NARROW_NO_BREAK_SPACE: char = '\u{202F}';

/// Where the currency symbol goes relative to the number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1,234.56`
    Prefix,
    /// `1 234,56 $`, separated by a no-break space.
    Suffix,
}

/// Number formatting conventions of a locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub symbol_position: SymbolPosition,
}

const LOCALES: &[Locale] = &[
    Locale {
        tag: "en-CA",
        grouping_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
    },
    Locale {
        tag: "en-US",
        grouping_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
    },
    Locale {
        tag: "en-GB",
        grouping_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
    },
    Locale {
        tag: "fr-CA",
        grouping_separator: NO_BREAK_SPACE,
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
    },
    Locale {
        tag: "fr-FR",
        grouping_separator: NARROW_NO_BREAK_SPACE,
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
    },
    Locale {
        tag: "de-DE",
        grouping_separator: '.',
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
    },
    Locale {
        tag: "ja-JP",
        grouping_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
    },
];

impl Locale {
    /// Looks up a locale by BCP-47 tag (`fr-CA`, `fr_ca`), falling back to
    /// the first locale sharing the language (`fr` resolves to `fr-CA`).
    pub fn from_tag(tag: &str) -> Result<Self, LocaleError> {
        let normalized = tag.trim().replace('_', "-");
        if let Some(locale) = LOCALES
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&normalized))
        {
            return Ok(*locale);
        }

        let language = normalized.split('-').next().unwrap_or_default();
        LOCALES
            .iter()
            .find(|locale| !language.is_empty() && locale.language().eq_ignore_ascii_case(language))
            .copied()
            .ok_or_else(|| LocaleError::UnknownLocale(tag.to_string()))
    }

    pub fn language(&self) -> &'static str {
        self.tag.split('-').next().unwrap_or(self.tag)
    }
}

impl Default for Locale {
    fn default() -> Self {
        LOCALES[0]
    }
}

pub(crate) fn is_space_like(c: char) -> bool {
    c.is_whitespace() || c == NO_BREAK_SPACE || c == NARROW_NO_BREAK_SPACE
}

/// Currency with its minor-unit structure: `base ^ exponent` minor units make
/// one major unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub code: &'static str,
    pub symbol: &'static str,
    pub base: u32,
    pub exponent: u32,
}

const CURRENCIES: &[CurrencyDescriptor] = &[
    CurrencyDescriptor {
        code: "CAD",
        symbol: "$",
        base: 10,
        exponent: 2,
    },
    CurrencyDescriptor {
        code: "USD",
        symbol: "$",
        base: 10,
        exponent: 2,
    },
    CurrencyDescriptor {
        code: "EUR",
        symbol: "€",
        base: 10,
        exponent: 2,
    },
    CurrencyDescriptor {
        code: "GBP",
        symbol: "£",
        base: 10,
        exponent: 2,
    },
    CurrencyDescriptor {
        code: "JPY",
        symbol: "¥",
        base: 10,
        exponent: 0,
    },
];

impl CurrencyDescriptor {
    pub fn from_code(code: &str) -> Result<Self, LocaleError> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|currency| currency.code.eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| LocaleError::UnknownCurrency(code.to_string()))
    }

    /// Minor units per major unit, `None` if it does not fit in an `i64`.
    pub fn minor_units_per_major(&self) -> Option<i64> {
        i64::from(self.base).checked_pow(self.exponent)
    }

    /// Number of digits shown after the decimal separator.
    pub fn fraction_digits(&self) -> usize {
        match self.minor_units_per_major() {
            Some(divisor) if divisor > 1 => (divisor - 1).to_string().len(),
            _ => 0,
        }
    }
}

impl Default for CurrencyDescriptor {
    fn default() -> Self {
        CURRENCIES[0]
    }
}
