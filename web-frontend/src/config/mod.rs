use service_core::config::{get_env, get_env_parsed, Environment};
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub port: u16,
    /// Base path or URL for health fetches.
    pub api_base: String,
    /// Backend origin the dev proxy forwards to, and the origin relative
    /// `api_base` values resolve against.
    pub proxy_target: String,
    pub environment: Environment,
}

impl FrontendConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(FrontendConfig {
            port: get_env_parsed("FRONTEND_PORT", 3000),
            api_base: get_env("API_BASE_URL", Some("/api"))?,
            proxy_target: get_env("PROXY_TARGET", Some("http://localhost:5000"))?,
            environment: Environment::from_env(),
        })
    }

    /// Absolute base URL for the health client. A relative `api_base`
    /// resolves against the backend origin.
    pub fn health_base(&self) -> String {
        if self.api_base.starts_with("http://") || self.api_base.starts_with("https://") {
            self.api_base.trim_end_matches('/').to_string()
        } else {
            format!(
                "{}/{}",
                self.proxy_target.trim_end_matches('/'),
                self.api_base.trim_matches('/')
            )
        }
    }

    /// The dev proxy is absent in production.
    pub fn proxy_enabled(&self) -> bool {
        !self.environment.is_prod()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> FrontendConfig {
        FrontendConfig {
            port: 3000,
            api_base: api_base.to_string(),
            proxy_target: "http://localhost:5000".to_string(),
            environment: Environment::Dev,
        }
    }

    #[test]
    fn relative_base_resolves_against_backend_origin() {
        assert_eq!(config("/api").health_base(), "http://localhost:5000/api");
    }

    #[test]
    fn absolute_base_is_used_verbatim() {
        assert_eq!(
            config("https://api.example.com/api/").health_base(),
            "https://api.example.com/api"
        );
    }
}
