use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::Serialize;
use crate::error::{AppError, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Contact links surfaced verbatim by `/api/config`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactLinks {
    pub github: String,
    pub linkedin: String,
    pub instagram: String,
    pub email: String,
}

/// Wall-clock time of the daily refresh in a fixed-offset timezone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshSchedule {
    pub at: NaiveTime,
    pub offset: FixedOffset,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        // Midnight in Europe/Istanbul, which has stayed on UTC+3 since 2016.
        RefreshSchedule {
            at: NaiveTime::MIN,
            offset: FixedOffset::east_opt(3 * 3600).unwrap_or_else(|| Utc.fix()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub account_name: String,
    pub auth_token: Option<String>,
    pub api_base_url: String,
    pub contact: ContactLinks,
    pub static_dir: PathBuf,
    pub refresh: RefreshSchedule,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys fall back to
    /// their defaults; malformed ones are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = var("PORT", "3000");
        let port = port.trim().parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid PORT: {}", e)))?;
        let ip = IpAddr::from_str(host.trim()).map_err(|e| AppError::ConfigError(format!("Invalid HOST: {}", e)))?;

        let auth_token = lookup("GITHUB_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let refresh = RefreshSchedule {
            at: parse_refresh_time(&var("REFRESH_TIME", "00:00"))?,
            offset: parse_utc_offset(&var("REFRESH_UTC_OFFSET", "+03:00"))?,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            account_name: var("GITHUB_USERNAME", "octocat").trim().to_string(),
            auth_token,
            api_base_url: var("GITHUB_API_URL", DEFAULT_GITHUB_API_URL).trim_end_matches('/').to_string(),
            contact: ContactLinks {
                github: var("GITHUB_URL", ""),
                linkedin: var("LINKEDIN_URL", ""),
                instagram: var("INSTAGRAM_URL", ""),
                email: var("EMAIL", ""),
            },
            static_dir: PathBuf::from(var("STATIC_DIR", ".")),
            refresh,
        })
    }
}

fn parse_refresh_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| AppError::ConfigError(format!("Invalid REFRESH_TIME '{}': {}", value, e)))
}

/// Parses `+HH:MM` / `-HH:MM` into a fixed offset. Trailing input is rejected.
fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value.trim(), StrftimeItems::new("%:z"))
        .and_then(|()| parsed.to_fixed_offset())
        .map_err(|e| AppError::ConfigError(format!("Invalid REFRESH_UTC_OFFSET '{}': {}", value, e)))
}
