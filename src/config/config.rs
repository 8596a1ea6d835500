use crate::error::AgentError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Namespace prepended to every object key.
    pub key_prefix: String,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

/// Source of configuration values by key. The process environment in
/// production, a map in tests.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl S3Config {
    fn from_lookup(lookup: Lookup) -> Result<Self, AgentError> {
        Ok(Self {
            region: required(lookup, "AWS_REGION")?,
            access_key_id: required(lookup, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: required(lookup, "AWS_SECRET_ACCESS_KEY")?,
            bucket: required(lookup, "S3_BUCKET_NAME")?,
            key_prefix: optional(lookup, "S3_KEY_PREFIX").unwrap_or_default(),
            endpoint: optional(lookup, "S3_ENDPOINT"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When set, local file reads are confined to this directory.
    pub local_root: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub s3: S3Config,
}

impl ServerConfig {
    /// Reads the process environment; `.env` is loaded by `main` beforehand.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(lookup: Lookup) -> Result<Self, AgentError> {
        Ok(Self {
            host: optional(lookup, "HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(lookup, "PORT", DEFAULT_PORT)?,
            local_root: optional(lookup, "LOCAL_FILE_ROOT").map(PathBuf::from),
            max_upload_bytes: parsed(lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            s3: S3Config::from_lookup(lookup)?,
        })
    }
}

fn optional(lookup: Lookup, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required(lookup: Lookup, key: &str) -> Result<String, AgentError> {
    optional(lookup, key).ok_or_else(|| AgentError::Config(format!("Missing {key}")))
}

fn parsed<T: std::str::FromStr>(lookup: Lookup, key: &str, default: T) -> Result<T, AgentError> {
    match optional(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AgentError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const S3_VARS: [(&str, &str); 4] = [
        ("AWS_REGION", "eu-west-1"),
        ("AWS_ACCESS_KEY_ID", "AKIA"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("S3_BUCKET_NAME", "reports"),
    ];

    #[test]
    fn defaults_apply_when_only_s3_is_configured() {
        let config = ServerConfig::from_lookup(&vars(&S3_VARS)).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.local_root.is_none());
        assert_eq!(config.s3.bucket, "reports");
        assert_eq!(config.s3.key_prefix, "");
        assert!(config.s3.endpoint.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = S3_VARS.to_vec();
        pairs.extend([
            ("PORT", " 8080 "),
            ("LOCAL_FILE_ROOT", "/srv/files"),
            ("S3_KEY_PREFIX", "uploads/"),
            ("S3_ENDPOINT", "http://localhost:9000"),
        ]);

        let config = ServerConfig::from_lookup(&vars(&pairs)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.local_root, Some(PathBuf::from("/srv/files")));
        assert_eq!(config.s3.key_prefix, "uploads/");
        assert_eq!(config.s3.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn malformed_number_is_a_config_error() {
        let mut pairs = S3_VARS.to_vec();
        pairs.push(("PORT", "fifty"));

        let err = ServerConfig::from_lookup(&vars(&pairs)).unwrap_err();

        assert!(matches!(err, AgentError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: PORT must be a number, got \"fifty\"");
    }

    #[test]
    fn blank_required_value_is_missing() {
        let mut pairs = S3_VARS.to_vec();
        pairs.retain(|(k, _)| *k != "S3_BUCKET_NAME");
        pairs.push(("S3_BUCKET_NAME", "  "));

        let err = S3Config::from_lookup(&vars(&pairs)).unwrap_err();

        assert_eq!(err.to_string(), "Configuration error: Missing S3_BUCKET_NAME");
    }
}
