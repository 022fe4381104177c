#![warn(clippy::uninlined_format_args)]

mod format;
mod locale;
mod parse;

pub use format::{format_currency, format_integer};
pub use locale::{CurrencyDescriptor, Locale, SymbolPosition};
pub use parse::{
    parse_currency_amount, parse_ratio_amount, try_parse_currency_amount, try_parse_ratio_amount,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("Amount is empty")]
    Empty,
    #[error("'{input}' is not a valid amount")]
    Invalid { input: String },
    #[error("'{input}' is too large")]
    Overflow { input: String },
}
