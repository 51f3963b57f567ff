use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// Application registration and authorization parameters.
///
/// Loaded from an optional `config.toml` (path overridable with
/// `STREAMDATA_CONFIG`) and then the process environment, where
/// `CLIENT_ID` and `REDIRECT_URI` are required.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub client_id: String,
    pub redirect_uri: String,

    /// Space-separated scope list
    #[serde(default = "default_scopes")]
    pub scopes: String,

    #[serde(default = "default_force_verify")]
    pub force_verify: bool,
}

fn default_scopes() -> String {
    "openid user:read:email user:read:follows".to_string()
}

fn default_force_verify() -> bool {
    true
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("STREAMDATA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes.split_whitespace()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.trim().is_empty() {
            return Err("CLIENT_ID is required".to_string());
        }
        let redirect = Url::parse(&self.redirect_uri)
            .map_err(|e| format!("REDIRECT_URI is not a valid URL: {}", e))?;
        if !matches!(redirect.scheme(), "http" | "https") {
            return Err("REDIRECT_URI must be an HTTP(S) URL".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::load(Environment::default().source(Some(map)))
    }

    #[test]
    fn test_loads_required_values_with_defaults() {
        let settings = from_vars(&[
            ("CLIENT_ID", "abc123"),
            ("REDIRECT_URI", "http://localhost:3000/callback"),
        ])
        .unwrap();

        assert_eq!(settings.client_id, "abc123");
        assert_eq!(settings.redirect_uri, "http://localhost:3000/callback");
        assert!(settings.force_verify);
        assert_eq!(
            settings.scopes().collect::<Vec<_>>(),
            vec!["openid", "user:read:email", "user:read:follows"]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_client_id_fails_to_load() {
        let result = from_vars(&[("REDIRECT_URI", "http://localhost:3000/callback")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_scopes_and_force_verify() {
        let settings = from_vars(&[
            ("CLIENT_ID", "abc123"),
            ("REDIRECT_URI", "http://localhost:3000/callback"),
            ("SCOPES", "user:read:email"),
            ("FORCE_VERIFY", "false"),
        ])
        .unwrap();

        assert!(!settings.force_verify);
        assert_eq!(settings.scopes().collect::<Vec<_>>(), vec!["user:read:email"]);
    }

    #[test]
    fn test_validate_rejects_bad_redirect() {
        let settings = Settings {
            client_id: "abc123".to_string(),
            redirect_uri: "stream.data://callback".to_string(),
            scopes: default_scopes(),
            force_verify: true,
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            client_id: " ".to_string(),
            redirect_uri: "http://localhost:3000".to_string(),
            scopes: default_scopes(),
            force_verify: true,
        };
        assert_eq!(settings.validate().unwrap_err(), "CLIENT_ID is required");
    }
}
