//! Build-time settings and the names of every browser-storage key.

use log::LevelFilter;

/// Fallback API origin for local development.
const DEFAULT_API_BASE: &str = "http://localhost:7777";

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const NAME_KEY: &str = "name";
pub const THEME_KEY: &str = "theme";
pub const PROGRESS_PREFIX: &str = "progress-";

/// Origin of the REST API, set with `API_BASE_URL=… trunk build`.
pub fn api_base() -> String {
    normalize_base(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE))
}

/// Console log level, set with `APP_LOG=debug trunk build`.
pub fn log_level() -> LevelFilter {
    parse_level(option_env!("APP_LOG"))
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slashes() {
        assert_eq!(normalize_base("https://api.example.org//"), "https://api.example.org");
        assert_eq!(normalize_base(" http://localhost:7777 "), "http://localhost:7777");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("verbose")), LevelFilter::Info);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
    }
}
