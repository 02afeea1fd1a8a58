//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Markdown document to scan
    #[serde(default)]
    pub source: SourceConfig,

    /// Seen-identifier persistence
    #[serde(default)]
    pub state: StateConfig,

    /// Novelty policy settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Outbound mail settings
    #[serde(default)]
    pub mail: MailConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Replace file settings with any values given on the command line.
    pub fn apply_overrides(
        &mut self,
        policy: Option<Policy>,
        source: Option<PathBuf>,
        state: Option<PathBuf>,
    ) {
        if let Some(policy) = policy {
            self.watch.policy = policy;
        }
        if let Some(source) = source {
            self.source.path = source;
        }
        if let Some(state) = state {
            self.state.path = state;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.path.as_os_str().is_empty() {
            return Err(AppError::validation("source.path is empty"));
        }
        if self.state.path.as_os_str().is_empty() {
            return Err(AppError::validation("state.path is empty"));
        }
        if self.watch.max_age_minutes == 0 {
            return Err(AppError::validation("watch.max_age_minutes must be > 0"));
        }
        if self.mail.smtp_host.trim().is_empty() {
            return Err(AppError::validation("mail.smtp_host is empty"));
        }
        if self.mail.sender_name.trim().is_empty() {
            return Err(AppError::validation("mail.sender_name is empty"));
        }
        Ok(())
    }
}

/// Location of the markdown listing document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "defaults::source_path")]
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: defaults::source_path(),
        }
    }
}

/// Location of the seen-identifier file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "defaults::state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: defaults::state_path(),
        }
    }
}

/// How a row is judged to be new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Rows whose Posted column is within `max_age_minutes`
    #[default]
    Recency,
    /// Rows whose content hash is not in the seen set
    Seen,
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Recency => f.write_str("recency"),
            Policy::Seen => f.write_str("seen"),
        }
    }
}

/// Novelty filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub policy: Policy,

    /// Oldest Posted age still treated as new
    #[serde(default = "defaults::max_age_minutes")]
    pub max_age_minutes: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            max_age_minutes: defaults::max_age_minutes(),
        }
    }
}

/// SMTP relay and message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host (implicit TLS)
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    /// Display name on the From header
    #[serde(default = "defaults::sender_name")]
    pub sender_name: String,

    /// Subject for the recency digest
    #[serde(default = "defaults::subject_recent")]
    pub subject_recent: String,

    /// Subject for the unseen digest. `{count}` is replaced with the row count.
    #[serde(default = "defaults::subject_unseen")]
    pub subject_unseen: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: defaults::smtp_host(),
            sender_name: defaults::sender_name(),
            subject_recent: defaults::subject_recent(),
            subject_unseen: defaults::subject_unseen(),
        }
    }
}

/// Mail account credentials, read from the environment only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
    /// Recipient; the account itself unless `EMAIL_TO` is set
    pub to: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"***")
            .field("to", &self.to)
            .finish()
    }
}

impl Credentials {
    pub const USER_VAR: &'static str = "EMAIL_USER";
    pub const PASS_VAR: &'static str = "EMAIL_PASS";
    pub const TO_VAR: &'static str = "EMAIL_TO";

    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user = get(Self::USER_VAR).ok_or(AppError::MissingCredentials(Self::USER_VAR))?;
        let pass = get(Self::PASS_VAR).ok_or(AppError::MissingCredentials(Self::PASS_VAR))?;
        let to = get(Self::TO_VAR).unwrap_or_else(|| user.clone());

        Ok(Self { user, pass, to })
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn source_path() -> PathBuf {
        PathBuf::from("NEW_GRAD_USA.md")
    }
    pub fn state_path() -> PathBuf {
        PathBuf::from(".state/seen.json")
    }
    pub fn max_age_minutes() -> u64 {
        60
    }
    pub fn smtp_host() -> String {
        "smtp.gmail.com".into()
    }
    pub fn sender_name() -> String {
        "Job Alerts".into()
    }
    pub fn subject_recent() -> String {
        "🔥 New Jobs Posted in the Last Hour".into()
    }
    pub fn subject_unseen() -> String {
        "🔥 {count} New Job Postings".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_max_age() {
        let mut config = Config::default();
        config.watch.max_age_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_smtp_host() {
        let mut config = Config::default();
        config.mail.smtp_host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [watch]
            policy = "seen"

            [source]
            path = "README.md"
            "#,
        )
        .unwrap();

        assert_eq!(config.watch.policy, Policy::Seen);
        assert_eq!(config.watch.max_age_minutes, 60);
        assert_eq!(config.source.path, PathBuf::from("README.md"));
        assert_eq!(config.state.path, PathBuf::from(".state/seen.json"));
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config: Config = toml::from_str(
            r#"
            [watch]
            policy = "recency"
            max_age_minutes = 30

            [source]
            path = "FILE.md"

            [state]
            path = "file-state.json"
            "#,
        )
        .unwrap();

        config.apply_overrides(
            Some(Policy::Seen),
            Some(PathBuf::from("CLI.md")),
            Some(PathBuf::from("cli-state.json")),
        );

        assert_eq!(config.watch.policy, Policy::Seen);
        assert_eq!(config.source.path, PathBuf::from("CLI.md"));
        assert_eq!(config.state.path, PathBuf::from("cli-state.json"));
        assert_eq!(config.watch.max_age_minutes, 30);
    }

    #[test]
    fn absent_overrides_keep_file_values() {
        let mut config = Config::default();
        config.watch.policy = Policy::Seen;
        config.source.path = PathBuf::from("FILE.md");

        config.apply_overrides(None, None, None);

        assert_eq!(config.watch.policy, Policy::Seen);
        assert_eq!(config.source.path, PathBuf::from("FILE.md"));
        assert_eq!(config.state.path, PathBuf::from(".state/seen.json"));
    }

    #[test]
    fn credentials_default_recipient_is_account() {
        let creds =
            Credentials::from_lookup(lookup(&[("EMAIL_USER", "me@x.com"), ("EMAIL_PASS", "pw")]))
                .unwrap();
        assert_eq!(creds.to, "me@x.com");
    }

    #[test]
    fn credentials_recipient_override() {
        let creds = Credentials::from_lookup(lookup(&[
            ("EMAIL_USER", "me@x.com"),
            ("EMAIL_PASS", "pw"),
            ("EMAIL_TO", "team@x.com"),
        ]))
        .unwrap();
        assert_eq!(creds.to, "team@x.com");
    }

    #[test]
    fn credentials_missing_password() {
        let err = Credentials::from_lookup(lookup(&[("EMAIL_USER", "me@x.com"), ("EMAIL_PASS", "")]))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingCredentials("EMAIL_PASS")));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::from_lookup(lookup(&[("EMAIL_USER", "u"), ("EMAIL_PASS", "secret")]))
            .unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
    }
}
