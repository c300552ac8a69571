//! Where the remote store lives.

/// Environment variable overriding the API root.
pub const API_URL_ENV: &str = "TODO_API_URL";

/// API root used when no override is set.
pub const DEFAULT_API_ROOT: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_root: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
        }
    }

    /// Use an override read from `TODO_API_URL` or the command line, falling
    /// back to the default when it is unset or blank.
    pub fn from_override(value: Option<String>) -> Self {
        match value {
            Some(root) if !root.trim().is_empty() => Self::new(root.trim()),
            _ => Self::default(),
        }
    }

    /// The `/api` base every request path hangs off.
    pub fn base_url(&self) -> String {
        format!("{}/api", self.api_root.trim_end_matches('/'))
    }
}
