use std::time::Duration;

use serde::Deserialize;

/// CORS configuration
///
/// The relay is called straight from browser front ends, so an absent
/// `[server.cors]` section means every origin is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrArray,
    /// Allowed headers (wildcard "*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrArray,
    /// Headers to expose to the browser
    #[serde(default)]
    pub expose_headers: Vec<String>,
    /// Allow credentials
    #[serde(default)]
    pub credentials: bool,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
    /// Allow private network access (CORS-RFC1918)
    #[serde(default)]
    pub private_network: bool,
}

impl CorsConfig {
    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either a wildcard "*" or explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAnyOrArray")]
pub enum AnyOrArray {
    /// Match any value
    #[default]
    Any,
    /// Explicit list
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnyOrArray {
    One(String),
    Many(Vec<String>),
}

impl From<RawAnyOrArray> for AnyOrArray {
    fn from(raw: RawAnyOrArray) -> Self {
        let values = match raw {
            RawAnyOrArray::One(value) => vec![value],
            RawAnyOrArray::Many(values) => values,
        };

        if values.iter().any(|v| v == "*") {
            Self::Any
        } else {
            Self::List(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_string_is_any() {
        let config: CorsConfig = toml::from_str(r#"origins = "*""#).unwrap();
        assert_eq!(config.origins, AnyOrArray::Any);
    }

    #[test]
    fn single_origin_becomes_list() {
        let config: CorsConfig = toml::from_str(r#"origins = "https://cars.example""#).unwrap();
        assert_eq!(
            config.origins,
            AnyOrArray::List(vec!["https://cars.example".to_string()])
        );
    }

    #[test]
    fn wildcard_inside_list_is_any() {
        let config: CorsConfig = toml::from_str(r#"methods = ["GET", "*"]"#).unwrap();
        assert_eq!(config.methods, AnyOrArray::Any);
    }

    #[test]
    fn explicit_lists_and_max_age() {
        let toml = r#"
            origins = ["https://a.example", "https://b.example"]
            methods = ["GET", "POST"]
            max_age = 600
            credentials = true
        "#;

        let config: CorsConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.methods,
            AnyOrArray::List(vec!["GET".to_string(), "POST".to_string()])
        );
        assert_eq!(config.headers, AnyOrArray::Any);
        assert_eq!(config.max_age_duration(), Some(Duration::from_secs(600)));
        assert!(config.credentials);
    }
}
