// ==========================================
// 产品目录导入系统 - 导入层
// ==========================================
// 职责: 外部目录文件 → 校验记录 → 对象存储
// 流程: 读取 → 行校验（列分发 + 属性解析）→ Upsert
// ==========================================

// 模块声明
pub mod attributes;
pub mod columns;
pub mod error;
pub mod orchestrator;
pub mod product_upsert;
pub mod row_processor;
pub mod sheet_source;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心类型
pub use columns::{ColumnSpec, FieldValue, ValidationContext, COLUMNS};
pub use error::{FieldError, ImportError, ImportResult};
pub use orchestrator::{CatalogImporter, RunOutcome};
pub use product_upsert::{valid_key, ProductUpsert, UpsertOutcome};
pub use row_processor::{RowOutcome, RowProcessor};
pub use sheet_source::{CsvSheetSource, ExcelSheetSource, SheetSource, UniversalSheetSource};
