//! 服务器配置
//!
//! 所有配置均可通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |---------|--------|------|
//! | `WORK_DIR` | `./kirana_data` | 工作目录（数据库、日志） |
//! | `HTTP_PORT` | `3000` | HTTP 监听端口 |
//! | `ENVIRONMENT` | `development` | 运行环境 (development/production) |
//! | `JWT_SECRET` | 内置开发密钥 | JWT 签名密钥（生产环境必须设置） |
//! | `JWT_EXPIRATION_MINUTES` | `43200` | 令牌有效期（默认 30 天） |
//! | `OSRM_BASE_URL` | `http://router.project-osrm.org` | OSRM 路由服务地址 |
//! | `ROUTING_TIMEOUT_SECS` | `30` | 路由服务请求超时（秒） |
//! | `STORE_LATITUDE` | `12.9716` | 门店纬度（配送时长估算起点） |
//! | `STORE_LONGITUDE` | `77.5946` | 门店经度 |

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP 端口
    pub http_port: u16,
    /// 运行环境
    pub environment: String,
    /// JWT 配置
    pub jwt: JwtConfig,
    /// OSRM 路由服务基地址
    pub osrm_base_url: String,
    /// 路由服务请求超时（秒）
    pub routing_timeout_secs: u64,
    /// 门店纬度
    pub store_latitude: f64,
    /// 门店经度
    pub store_longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "./kirana_data".to_string(),
            http_port: 3000,
            environment: "development".to_string(),
            jwt: JwtConfig::default(),
            osrm_base_url: "http://router.project-osrm.org".to_string(),
            routing_timeout_secs: 30,
            store_latitude: 12.9716,
            store_longitude: 77.5946,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or(defaults.work_dir),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            jwt: JwtConfig::from_env(),
            osrm_base_url: std::env::var("OSRM_BASE_URL").unwrap_or(defaults.osrm_base_url),
            routing_timeout_secs: std::env::var("ROUTING_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.routing_timeout_secs),
            store_latitude: std::env::var("STORE_LATITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_latitude),
            store_longitude: std::env::var("STORE_LONGITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_longitude),
        }
    }

    /// 测试用：覆盖工作目录与端口
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            ..Config::default()
        }
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.database_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        !self.is_production()
    }
}
