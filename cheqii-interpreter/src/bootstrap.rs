use cheqii_application::{EditContext, InputPolicy};
use cheqii_locale::{CurrencyDescriptor, Locale, LocaleError};
use std::{env, path::PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Locale(#[from] LocaleError),
    #[error("CHEQII_INPUT_POLICY must be 'lenient' or 'strict' (got '{0}')")]
    InputPolicy(String),
}

/// Driver configuration, read from the environment and an optional `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub locale: Locale,
    pub currency: CurrencyDescriptor,
    pub bill_dir: PathBuf,
    pub input_policy: InputPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let locale = Locale::from_tag(&value("CHEQII_LOCALE", "en-CA"))?;
        let currency = CurrencyDescriptor::from_code(&value("CHEQII_CURRENCY", "CAD"))?;
        let bill_dir = PathBuf::from(value("CHEQII_BILL_DIR", "."));
        let input_policy = match value("CHEQII_INPUT_POLICY", "lenient")
            .to_ascii_lowercase()
            .as_str()
        {
            "lenient" => InputPolicy::TreatInvalidAsZero,
            "strict" => InputPolicy::Reject,
            other => return Err(ConfigError::InputPolicy(other.to_string())),
        };

        Ok(Self {
            locale,
            currency,
            bill_dir,
            input_policy,
        })
    }

    pub fn edit_context(&self) -> EditContext {
        EditContext {
            locale: self.locale,
            currency: self.currency,
            policy: self.input_policy,
        }
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
