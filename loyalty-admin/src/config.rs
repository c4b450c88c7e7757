//! Server configuration

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Root directory for uploaded files (served under /uploads)
    pub upload_dir: PathBuf,
    /// UTC offset used for dashboard day boundaries, in minutes
    pub stats_utc_offset_minutes: i32,
}

/// Turkey (+03:00, no DST)
const DEFAULT_STATS_OFFSET_MINUTES: i32 = 180;

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let stats_utc_offset_minutes = match std::env::var("STATS_UTC_OFFSET_MINUTES") {
            Ok(raw) => parse_offset_minutes(&raw)?,
            Err(_) => DEFAULT_STATS_OFFSET_MINUTES,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            stats_utc_offset_minutes,
        })
    }
}

/// Parse a UTC offset in minutes; anything beyond ±14h is rejected.
fn parse_offset_minutes(raw: &str) -> Result<i32, BoxError> {
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("STATS_UTC_OFFSET_MINUTES is not an integer: {raw}"))?;
    if minutes.abs() > 14 * 60 {
        return Err(format!("STATS_UTC_OFFSET_MINUTES out of range: {minutes}").into());
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset_minutes() {
        assert_eq!(parse_offset_minutes("180").unwrap(), 180);
        assert_eq!(parse_offset_minutes(" -300 ").unwrap(), -300);
        assert!(parse_offset_minutes("+03:00").is_err());
        assert!(parse_offset_minutes("900").is_err());
    }
}
