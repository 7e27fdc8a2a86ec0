//! Order Server - 订单准入服务
//!
//! # 架构概述
//!
//! 接收订单提交，逐行向商品服务核对价格，按租户和营业日分配排队号，
//! 并在单个事务中持久化订单。
//!
//! - **准入** (`orders`): 并发价格核对、总额校验、创建/编辑/查询
//! - **商品服务** (`authority`): 外部商品数据的查询接口与 HTTP 实现
//! - **数据库** (`db`): SQLite 连接池、迁移、订单仓储和排队号分配
//! - **HTTP API** (`api`): 路由、凭证提取、错误映射
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── authority/     # 商品服务客户端
//! ├── orders/        # 校验器、准入引擎、错误
//! ├── db/            # 数据库层
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod authority;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use authority::{HttpProductAuthority, LookupError, ProductAuthority};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use orders::{OrderEngine, OrderError, OrderValidator};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
