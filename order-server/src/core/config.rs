use std::str::FromStr;
use std::time::Duration;

/// 服务器配置 - 订单服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | order-server.db | SQLite 数据库文件 |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | PRODUCT_SERVICE_URL | http://localhost:8081 | 商品服务地址 |
/// | PRODUCT_TIMEOUT_MS | 5000 | 商品查询超时(毫秒) |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | DB_BUSY_TIMEOUT_MS | 5000 | 写锁等待时间(毫秒) |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | (none) | 日志目录, 设置后按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/orders.db HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    /// Base URL of the product authority, without trailing slash
    pub product_service_url: String,
    pub product_timeout_ms: u64,
    pub db_max_connections: u32,
    pub db_busy_timeout_ms: u64,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置或无法解析的变量回落到默认值
    pub fn from_env() -> Self {
        Self {
            database_path: env_or("DATABASE_PATH", "order-server.db".to_string()),
            http_port: env_or("HTTP_PORT", 8080),
            product_service_url: env_or(
                "PRODUCT_SERVICE_URL",
                "http://localhost:8081".to_string(),
            )
            .trim_end_matches('/')
            .to_string(),
            product_timeout_ms: env_or("PRODUCT_TIMEOUT_MS", 5000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            db_busy_timeout_ms: env_or("DB_BUSY_TIMEOUT_MS", 5000),
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: env_or("ENVIRONMENT", "development".to_string()),
        }
    }

    /// 使用指定数据库文件覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_database(database_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config
    }

    pub fn product_timeout(&self) -> Duration {
        Duration::from_millis(self.product_timeout_ms)
    }

    pub fn db_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.db_busy_timeout_ms)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
