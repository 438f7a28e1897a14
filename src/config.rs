//! 服务配置
//!
//! 加载顺序：默认值 → 配置文件（`config.toml` / `config/config.toml`）→ `.env` 与环境变量。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];
const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(StoreBackend::Supabase),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Validation(format!("未知的存储后端: {}", other))),
        }
    }
}

/// 外部存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// 项目地址，如 `https://xyz.supabase.co`
    pub url: String,
    pub key: String,
    pub table: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 为空时只输出到控制台
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Supabase,
            url: String::new(),
            key: String::new(),
            table: "produtos".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "produtos-api".to_string(),
        }
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("缺少必需的环境变量: {0}")]
    Missing(&'static str),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 加载并验证最终配置，失败时服务拒绝启动
    pub fn load() -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv())?;

        let mut config = match CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// 用环境变量覆盖配置项
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.store.url = url;
        }
        if let Some(key) = lookup("SUPABASE_KEY") {
            self.store.key = key;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的端口: {}", port)))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = normalize_level(&level);
        }
        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Supabase {
            if self.store.url.trim().is_empty() {
                return Err(ConfigError::Missing("SUPABASE_URL"));
            }
            if self.store.key.trim().is_empty() {
                return Err(ConfigError::Missing("SUPABASE_KEY"));
            }
        }
        if self.store.table.trim().is_empty() {
            return Err(ConfigError::Validation("表名不能为空".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        // 与 Logger::init 使用同一套解析，`produtos_api=debug` 这类指令也合法
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {} ({})，可用级别: {:?}",
                self.logging.level, e, VALID_LEVELS
            )));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 单独的级别名统一成小写，过滤指令原样保留（目标名区分大小写）
fn normalize_level(level: &str) -> String {
    let level = level.trim();
    let lower = level.to_ascii_lowercase();
    if VALID_LEVELS.contains(&lower.as_str()) {
        lower
    } else {
        level.to_string()
    }
}

/// `.env` 不存在时忽略，内容有误时报错
fn env_file_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Parse(format!(".env: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn refuses_to_start_without_store_credentials() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("SUPABASE_URL"))
        ));

        let mut config = Config::default();
        config
            .apply_env(env(&[("SUPABASE_URL", "https://abc.supabase.co")]))
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("SUPABASE_KEY"))
        ));

        config.apply_env(env(&[("SUPABASE_KEY", "anon")])).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn memory_backend_needs_no_credentials() {
        let mut config = Config::default();
        config.apply_env(env(&[("STORE_BACKEND", "memory")])).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_server_and_logging() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("PORT", "8081"), ("HOST", "127.0.0.1"), ("LOG_LEVEL", "debug")]))
            .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8081");
        assert_eq!(config.logging.level, "debug");

        assert!(config.apply_env(env(&[("PORT", "http")])).is_err());
        assert!(config.apply_env(env(&[("STORE_BACKEND", "mongo")])).is_err());
    }

    #[test]
    fn log_level_accepts_case_and_filter_directives() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;

        config.apply_env(env(&[("LOG_LEVEL", "INFO")])).unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());

        config
            .apply_env(env(&[("LOG_LEVEL", "produtos_api=debug,tower_http=warn")]))
            .unwrap();
        assert_eq!(config.logging.level, "produtos_api=debug,tower_http=warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_log_directive_is_rejected() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        config.logging.level = "produtos_api=loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_env_file_is_ignored_but_malformed_one_fails() {
        let dir = tempdir().unwrap();
        assert!(env_file_loaded(dotenvy::from_path(dir.path().join("absent.env"))).is_ok());

        let path = dir.path().join(".env");
        fs::write(&path, "SUPABASE_URL=\"https://abc.supabase.co\n").unwrap();
        assert!(matches!(
            env_file_loaded(dotenvy::from_path(&path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[store]\nurl = \"https://abc.supabase.co\"\nkey = \"anon\"\n\n[server]\nport = 4000\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.table, "produtos");
        assert!(config.validate().is_ok());
    }
}
