// ==========================================
// 产品目录导入系统 - 配置层
// ==========================================
// 职责: 运行配置，启动时构造一次，显式传入各组件
// ==========================================

pub mod import_config;

pub use import_config::{default_db_path, ImportConfig};
