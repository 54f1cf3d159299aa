use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

impl RuntimeProfile {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(RuntimeProfile::Development),
            "production" | "prod" => Some(RuntimeProfile::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub api_base_url: Option<String>,
    pub api_timeout_ms: u64,
    pub session_path: Option<PathBuf>,
    pub dev_admin_email: String,
    pub dev_admin_password: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            api_base_url: None,
            api_timeout_ms: 15_000,
            session_path: None,
            dev_admin_email: "admin@tribute.local".to_owned(),
            dev_admin_password: "admin".to_owned(),
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(profile) = lookup("TRIBUTE_RUNTIME_PROFILE")
            .as_deref()
            .and_then(RuntimeProfile::parse)
        {
            cfg.runtime_profile = profile;
        }
        cfg.api_base_url = lookup("TRIBUTE_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty());
        if let Some(ms) = lookup("TRIBUTE_API_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
            cfg.api_timeout_ms = ms;
        }
        cfg.session_path = lookup("TRIBUTE_SESSION_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        if let Some(email) = lookup("TRIBUTE_DEV_ADMIN_EMAIL") {
            cfg.dev_admin_email = email;
        }
        if let Some(password) = lookup("TRIBUTE_DEV_ADMIN_PASSWORD") {
            cfg.dev_admin_password = password;
        }
        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{AdapterConfig, RuntimeProfile};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_development_defaults() {
        let cfg = AdapterConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.runtime_profile, RuntimeProfile::Development);
        assert!(cfg.api_base_url.is_none());
        assert_eq!(cfg.api_timeout_ms, 15_000);
        assert!(!cfg.strict_runtime_required());
    }

    #[test]
    fn values_are_read_and_normalized() {
        let cfg = AdapterConfig::from_lookup(lookup(&[
            ("TRIBUTE_RUNTIME_PROFILE", "Production"),
            ("TRIBUTE_API_BASE_URL", "https://api.example.com/"),
            ("TRIBUTE_API_TIMEOUT_MS", "2500"),
            ("TRIBUTE_SESSION_PATH", "/tmp/session.json"),
        ]));
        assert!(cfg.strict_runtime_required());
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cfg.api_timeout_ms, 2_500);
        assert!(cfg.session_path.is_some());
    }

    #[test]
    fn bad_numbers_and_profiles_fall_back() {
        let cfg = AdapterConfig::from_lookup(lookup(&[
            ("TRIBUTE_RUNTIME_PROFILE", "staging"),
            ("TRIBUTE_API_TIMEOUT_MS", "soon"),
            ("TRIBUTE_API_BASE_URL", "  "),
        ]));
        assert_eq!(cfg.runtime_profile, RuntimeProfile::Development);
        assert_eq!(cfg.api_timeout_ms, 15_000);
        assert!(cfg.api_base_url.is_none());
    }
}
