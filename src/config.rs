//! Runtime settings loaded from the environment.
//!
//! A `.env` file is honored when present (loaded by `dotenvy` in `main`);
//! every field falls back to a default so the server starts with no
//! configuration at all.

/// Server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Human-readable application name, echoed by the root endpoint.
    pub app_name: String,
    /// Enables verbose default logging when no `RUST_LOG` is set.
    pub debug: bool,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Read settings from the environment, using defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            app_name: env_or("APP_NAME", "Image Server"),
            debug: std::env::var("DEBUG")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            host: env_or("HOST", "0.0.0.0"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("YES"));
        assert!(parse_bool(" on "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }
}
