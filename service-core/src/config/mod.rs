use crate::error::AppError;
use std::env;

/// Deployment environment, selected by the `ENVIRONMENT` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("prod") => Environment::Prod,
            _ => Environment::Dev,
        }
    }

    pub fn is_prod(self) -> bool {
        self == Environment::Prod
    }
}

/// Reads `key` from the environment, falling back to `default` when unset.
/// A missing value without a default is a configuration error.
pub fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// Like [`get_env`] but parses the value, keeping the default on a parse failure.
pub fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wins_when_unset() {
        assert_eq!(
            get_env("SCAFFOLD_TEST_UNSET_VAR", Some("fallback")).unwrap(),
            "fallback"
        );
    }

    #[test]
    fn missing_without_default_is_an_error() {
        assert!(get_env("SCAFFOLD_TEST_UNSET_VAR", None).is_err());
    }

    #[test]
    fn parse_failure_keeps_default() {
        unsafe { env::set_var("SCAFFOLD_TEST_BAD_NUMBER", "not-a-number") };
        assert_eq!(get_env_parsed("SCAFFOLD_TEST_BAD_NUMBER", 10u32), 10);
        unsafe { env::remove_var("SCAFFOLD_TEST_BAD_NUMBER") };
    }
}
