//! Build-time configuration.
//!
//! Nothing here is read at runtime: the base URL and log level can only be
//! overridden when the crate is compiled.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Local storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Local storage key holding the display username.
pub const USERNAME_KEY: &str = "username";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl Config {
    /// Resolves the configuration baked in at build time.
    pub fn load() -> Self {
        Self::from_overrides(
            option_env!("EXPENSE_API_BASE_URL"),
            option_env!("EXPENSE_LOG_LEVEL"),
        )
    }

    fn from_overrides(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(normalize_base_url)
            .unwrap_or(defaults.api_base_url);
        let log_level = log_level
            .and_then(|level| level.trim().parse::<log::Level>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base_url,
            log_level,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::from_overrides(None, None);
        assert_eq!(config.api_base_url, "http://localhost:8000/api/");
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn base_url_override_gains_trailing_slash() {
        let config = Config::from_overrides(Some("https://expenses.example.com/api"), None);
        assert_eq!(config.api_base_url, "https://expenses.example.com/api/");
    }

    #[test]
    fn blank_or_unknown_overrides_fall_back() {
        let config = Config::from_overrides(Some("   "), Some("loud"));
        assert_eq!(config, Config::default());

        let config = Config::from_overrides(None, Some("debug"));
        assert_eq!(config.log_level, log::Level::Debug);
    }
}
