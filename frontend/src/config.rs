//! 构建期配置
//!
//! 浏览器环境没有运行时环境变量，配置在编译时通过 `option_env!` 注入：
//! - `SCHOLARS_API_ORIGIN`: 后端地址，默认 `http://localhost:5000`
//! - `SCHOLARS_LOG_LEVEL`: 日志级别，debug 构建默认 `debug`，release 默认 `info`

use log::LevelFilter;

pub const DEFAULT_API_ORIGIN: &str = "http://localhost:5000";
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 例如 `http://localhost:5000/api`，不带尾部斜杠
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SCHOLARS_API_ORIGIN"),
            option_env!("SCHOLARS_LOG_LEVEL"),
        )
    }

    pub fn from_values(origin: Option<&str>, level: Option<&str>) -> Self {
        let origin = origin
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(DEFAULT_API_ORIGIN)
            .trim_end_matches('/');

        let log_level = level
            .and_then(|l| l.trim().parse::<LevelFilter>().ok())
            .unwrap_or(if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            });

        Self {
            api_base_url: format!("{origin}{API_PREFIX}"),
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let config = AppConfig::from_values(Some("https://scholars.example.org/"), None);
        assert_eq!(config.api_base_url, "https://scholars.example.org/api");
    }

    #[test]
    fn blank_origin_falls_back() {
        let config = AppConfig::from_values(Some("  "), None);
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        let config = AppConfig::from_values(None, Some("WARN"));
        assert_eq!(config.log_level, LevelFilter::Warn);

        let config = AppConfig::from_values(None, Some("chatty"));
        assert!(matches!(
            config.log_level,
            LevelFilter::Debug | LevelFilter::Info
        ));
    }
}
