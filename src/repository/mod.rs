// ==========================================
// 产品目录导入系统 - 对象存储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 产品对象与引用数据的查找/落库
// ==========================================

pub mod error;
pub mod product_repo;
pub mod reference_repo;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use product_repo::{ProductRepository, ProductStore};
pub use reference_repo::{ReferenceLookup, ReferenceRepository};
