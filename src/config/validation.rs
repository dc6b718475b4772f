//! Configuration validation.
//!
//! Only tuning knobs are checked here. Presence of deployment values (RPC
//! URL, key, addresses) is checked lazily by the accessors on
//! [`AppConfig`] so a missing value fails where it is first used.
//!
//! Returns all validation errors, not just the first.

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.rpc_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.network.confirmation_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "network.confirmation_timeout_secs",
            "must be greater than zero when set",
        ));
    }

    if let Some(url) = &config.network.rpc_url {
        if let Err(e) = url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                "network.rpc_url",
                format!("'{}' is not a valid URL: {}", url, e),
            ));
        }
    }

    let multiplier = config.gas.price_multiplier;
    if !multiplier.is_finite() || multiplier <= 0.0 {
        errors.push(ValidationError::new(
            "gas.price_multiplier",
            format!("must be a positive number, got {}", multiplier),
        ));
    }

    if config.gas.withdraw_gas_limit == 0 {
        errors.push(ValidationError::new("gas.withdraw_gas_limit", "must be greater than zero"));
    }
    if config.gas.forward_gas_limit == 0 {
        errors.push(ValidationError::new("gas.forward_gas_limit", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.network.rpc_timeout_secs = 0;
        config.network.rpc_url = Some("not a url".to_string());
        config.gas.price_multiplier = -1.0;
        config.gas.forward_gas_limit = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "network.rpc_timeout_secs",
                "network.rpc_url",
                "gas.price_multiplier",
                "gas.forward_gas_limit",
            ]
        );
    }

    #[test]
    fn test_missing_rpc_url_is_not_a_validation_error() {
        let config = AppConfig::default();
        assert!(config.network.rpc_url.is_none());
        assert!(validate_config(&config).is_ok());
    }
}
