use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub smtp: SmtpConfig,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// Outbound mail settings. Credentials are only required once real sending
/// is switched on with `SMTP_SEND_ENABLED`.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub send_enabled: bool,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            smtp: SmtpConfig::from_env()?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SmtpConfig {
    fn from_env() -> Result<Self> {
        let send_enabled = parse_flag(std::env::var("SMTP_SEND_ENABLED").ok().as_deref());
        let user = optional_env("SMTP_USER");
        let pass = optional_env("SMTP_PASS");

        if send_enabled && (user.is_none() || pass.is_none()) {
            anyhow::bail!("SMTP_SEND_ENABLED is set but SMTP_USER / SMTP_PASS are missing");
        }

        Ok(SmtpConfig {
            send_enabled,
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            port: parse_env("SMTP_PORT", 587)?,
            from: optional_env("SMTP_FROM").or_else(|| user.clone()),
            user,
            pass,
        })
    }

    /// Logging-only transport settings.
    #[cfg(test)]
    pub fn disabled() -> Self {
        SmtpConfig {
            send_enabled: false,
            host: DEFAULT_SMTP_HOST.to_string(),
            port: 587,
            user: None,
            pass: None,
            from: None,
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            smtp: SmtpConfig::disabled(),
            max_upload_bytes: 64 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_truthy_values() {
        for raw in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(Some(raw)), "{raw} should enable sending");
        }
    }

    #[test]
    fn test_parse_flag_defaults_to_disabled() {
        assert!(!parse_flag(None));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(Some("nope")));
    }

    #[test]
    fn test_disabled_smtp_config_has_no_credentials() {
        let smtp = SmtpConfig::disabled();
        assert!(!smtp.send_enabled);
        assert!(smtp.user.is_none());
        assert_eq!(smtp.port, 587);
    }
}
