use std::sync::Arc;

use shared::error::{AppError, ErrorCode};

use crate::authority::{HttpProductAuthority, ProductAuthority};
use crate::core::Config;
use crate::db::DbService;
use crate::orders::{OrderEngine, OrderValidator};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池和 Arc)，每个请求处理器拿到一份拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | engine | OrderEngine | 订单准入引擎 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub engine: OrderEngine,
}

impl ServerState {
    /// 按配置初始化: 打开数据库、运行迁移、连接商品服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(config).await?;

        let authority =
            HttpProductAuthority::new(&config.product_service_url, config.product_timeout())
                .map_err(|e| {
                    AppError::with_message(
                        ErrorCode::ConfigError,
                        format!("Failed to build product service client: {e}"),
                    )
                })?;
        tracing::info!(url = %config.product_service_url, "Product authority configured");

        Ok(Self::new(config.clone(), db, Arc::new(authority)))
    }

    /// 使用给定的数据库和商品服务组装状态 (测试可注入内存实现)
    pub fn new(config: Config, db: DbService, authority: Arc<dyn ProductAuthority>) -> Self {
        let engine = OrderEngine::new(db.pool.clone(), OrderValidator::new(authority));
        Self { config, db, engine }
    }
}
