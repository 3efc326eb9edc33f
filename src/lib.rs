// ==========================================
// 产品目录导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 一次性批量导入工具（串行、首错即停）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 对象存储层 - 数据访问
pub mod repository;

// 导入层 - 校验与编排
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::product::{
    AttributeStore, BrandRef, CategoryRef, ImageRef, Product, ProductRecord, ProductStatus,
    Quantity, UnitRef,
};

// 导入层
pub use importer::{
    CatalogImporter, FieldError, ImportError, RowOutcome, RowProcessor, RunOutcome,
    UniversalSheetSource,
};

// 存储层
pub use repository::{
    ProductRepository, ProductStore, ReferenceLookup, ReferenceRepository, StoreError,
};

// 配置
pub use config::ImportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品目录导入系统";
