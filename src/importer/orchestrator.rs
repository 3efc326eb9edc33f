// ==========================================
// 产品目录导入系统 - 导入编排器
// ==========================================
// 流程: 读取文件 → 逐行校验 → 逐行落库
// 红线: 严格串行——一行完整落库后才读下一行
// 红线: 任何错误立即中止整个运行；已落库的行不回滚
// ==========================================

use crate::config::ImportConfig;
use crate::importer::error::ImportError;
use crate::importer::product_upsert::ProductUpsert;
use crate::importer::row_processor::{RowOutcome, RowProcessor};
use crate::importer::sheet_source::SheetSource;
use crate::repository::product_repo::ProductStore;
use crate::repository::reference_repo::ReferenceLookup;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// 运行级结果
///
/// 中止不是事务回滚：失败行之前已落库的产品保持落库
#[derive(Debug)]
pub enum RunOutcome {
    /// 全部行处理完成
    Completed { rows_imported: usize },
    /// 在 last_row 行遇到第一个错误并停止
    Halted { error: ImportError, last_row: usize },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

// ==========================================
// CatalogImporter - 导入编排器
// ==========================================
pub struct CatalogImporter<R, P>
where
    R: ReferenceLookup,
    P: ProductStore,
{
    refs: R,
    products: P,
    source: Box<dyn SheetSource>,
    config: ImportConfig,
}

impl<R, P> CatalogImporter<R, P>
where
    R: ReferenceLookup,
    P: ProductStore,
{
    /// 创建导入编排器
    ///
    /// # 参数
    /// - refs: 引用数据边界（分类/品牌/图片/单位/属性配置）
    /// - products: 产品存储边界
    /// - source: 表格输入读取器
    /// - config: 运行配置（输入路径、父目录、属性集作用域）
    pub fn new(refs: R, products: P, source: Box<dyn SheetSource>, config: ImportConfig) -> Self {
        Self {
            refs,
            products,
            source,
            config,
        }
    }

    /// 执行一次完整导入运行
    ///
    /// # 返回
    /// - RunOutcome::Completed: 所有行处理并落库完成
    /// - RunOutcome::Halted: 在第一个错误处停止（文件级错误记 last_row = 0）
    #[instrument(skip(self), fields(batch_id))]
    pub fn run(&self) -> RunOutcome {
        let batch_id = Uuid::new_v4().to_string();
        info!(
            batch_id = %batch_id,
            file = %self.config.input_path.display(),
            "开始导入产品目录"
        );

        // === 步骤 1: 读取输入文件 ===
        let rows = match self.source.read_rows(&self.config.input_path) {
            Ok(rows) => rows,
            Err(error) => return RunOutcome::Halted { error, last_row: 0 },
        };
        info!(total_rows = rows.len(), "文件读取完成");

        // === 步骤 2: 构造行处理器与 Upsert ===
        let processor = match RowProcessor::new(&self.refs, &self.config.attribute_set_name) {
            Ok(processor) => processor,
            Err(error) => return RunOutcome::Halted { error, last_row: 0 },
        };
        let upsert = ProductUpsert::new(&self.products, self.config.parent_folder_id);

        // === 步骤 3: 逐行校验并落库 ===
        let mut rows_imported = 0usize;
        for (row_index, cells) in rows.iter().enumerate() {
            match processor.process(row_index, cells) {
                Ok(RowOutcome::Header) => {
                    debug!(row = row_index, "表头校验通过");
                }
                Ok(RowOutcome::Record(record)) => match upsert.upsert(&record) {
                    Ok(outcome) => {
                        rows_imported += 1;
                        debug!(
                            row = row_index,
                            sku = %record.sku,
                            outcome = %outcome,
                            "产品已保存"
                        );
                    }
                    Err(error) => {
                        return RunOutcome::Halted {
                            error,
                            last_row: row_index,
                        }
                    }
                },
                Err(error) => {
                    return RunOutcome::Halted {
                        error,
                        last_row: row_index,
                    }
                }
            }
        }

        info!(batch_id = %batch_id, rows_imported, "产品目录导入完成");
        RunOutcome::Completed { rows_imported }
    }
}
