use anyhow::{Context, Result};

const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_FAST_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_RANKING_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Application configuration loaded from environment variables.
/// Startup fails if `GROQ_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    /// Model used by every passthrough endpoint.
    pub fast_model: String,
    /// Model used for course ranking.
    pub ranking_model: String,
    pub llm_timeout_secs: u64,
    pub pdf_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: env_or("GROQ_API_URL", DEFAULT_GROQ_API_URL),
            fast_model: env_or("GROQ_MODEL", DEFAULT_FAST_MODEL),
            ranking_model: env_or("GROQ_RANKING_MODEL", DEFAULT_RANKING_MODEL),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 30)?,
            pdf_timeout_secs: parse_env("PDF_TIMEOUT_SECS", 30)?,
            port: parse_env("PORT", 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests; never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: "test-key".to_string(),
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            ranking_model: DEFAULT_RANKING_MODEL.to_string(),
            llm_timeout_secs: 5,
            pdf_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
