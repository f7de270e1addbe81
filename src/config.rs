//! Environment configuration for the binary.
//!
//! Read from the process environment after loading an optional `.env` file:
//!
//! - `FLU_BRIDGE_LIKELIHOOD_SENTINEL`: value written for an uncomputed
//!   likelihood (`nan`/`na` or any float; default NaN)
//! - `FLU_BRIDGE_STRICT_DATES`: `true`/`false`, `1`/`0` (default false)

use crate::convert::{DecodeOptions, EncodeOptions};
use crate::error::AppError;

pub const ENV_LIKELIHOOD_SENTINEL: &str = "FLU_BRIDGE_LIKELIHOOD_SENTINEL";
pub const ENV_STRICT_DATES: &str = "FLU_BRIDGE_STRICT_DATES";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BridgeConfig {
    pub decode: DecodeOptions,
    pub encode: EncodeOptions,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = BridgeConfig::default();

        if let Some(raw) = lookup(ENV_LIKELIHOOD_SENTINEL) {
            config.encode.likelihood_sentinel = parse_sentinel(&raw).ok_or_else(|| {
                AppError::new(2, format!("Invalid {ENV_LIKELIHOOD_SENTINEL} '{raw}': expected a number or NA."))
            })?;
        }
        if let Some(raw) = lookup(ENV_STRICT_DATES) {
            config.decode.strict_calendar_dates = parse_flag(&raw).ok_or_else(|| {
                AppError::new(2, format!("Invalid {ENV_STRICT_DATES} '{raw}': expected true or false."))
            })?;
        }

        log::debug!("{config:?}");
        Ok(config)
    }
}

pub fn parse_sentinel(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    raw.parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<BridgeConfig, AppError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        BridgeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_lenient_with_nan_sentinel() {
        let c = config(&[]).unwrap();
        assert!(!c.decode.strict_calendar_dates);
        assert!(c.encode.likelihood_sentinel.is_nan());
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[(ENV_LIKELIHOOD_SENTINEL, "-1e6"), (ENV_STRICT_DATES, "TRUE")]).unwrap();
        assert_eq!(c.encode.likelihood_sentinel, -1e6);
        assert!(c.decode.strict_calendar_dates);
    }

    #[test]
    fn rejects_garbage() {
        let err = config(&[(ENV_STRICT_DATES, "maybe")]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(config(&[(ENV_LIKELIHOOD_SENTINEL, "low")]).is_err());
    }
}
