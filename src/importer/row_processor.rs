// ==========================================
// 产品目录导入系统 - 行处理器
// ==========================================
// 职责: 按固定列顺序逐格消费一行
// 契约:
// - 单元格数必须与列数严格相等
// - 第 0 行为表头，逐格与列名逐字比对，通过后整行跳过
// - 数据行按位置分发校验器，第一个无效单元格即失败
// ==========================================

use crate::domain::product::{
    AttributeStore, BrandRef, CategoryRef, ImageRef, ProductRecord, ProductStatus,
};
use crate::importer::columns::{FieldValue, ValidationContext, COLUMNS};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::reference_repo::ReferenceLookup;

/// 单行处理结果：表头行不产出记录
#[derive(Debug)]
pub enum RowOutcome {
    Header,
    Record(ProductRecord),
}

// ==========================================
// RowProcessor
// ==========================================
pub struct RowProcessor<'a> {
    ctx: ValidationContext<'a>,
}

impl<'a> RowProcessor<'a> {
    pub fn new(refs: &'a dyn ReferenceLookup, attribute_set: &'a str) -> ImportResult<Self> {
        Ok(Self {
            ctx: ValidationContext::new(refs, attribute_set)?,
        })
    }

    /// 处理一行
    ///
    /// # 参数
    /// - row_index: 行号（0 为表头）
    /// - cells: 按位置排列的单元格文本（空串视为缺值）
    ///
    /// # 返回
    /// - Ok(RowOutcome::Header): 表头行校验通过
    /// - Ok(RowOutcome::Record): 数据行校验通过
    /// - Err: 第一个检测到的结构/字段错误（带行列上下文）
    pub fn process(&self, row_index: usize, cells: &[String]) -> ImportResult<RowOutcome> {
        let expected = COLUMNS.len();
        if cells.len() > expected {
            return Err(ImportError::TooManyValues {
                row: row_index,
                expected,
                actual: cells.len(),
            });
        }
        if cells.len() < expected {
            return Err(ImportError::NotEnoughValues {
                row: row_index,
                expected,
                actual: cells.len(),
            });
        }

        // 表头契约：逐格逐字比对
        if row_index == 0 {
            for (cell_index, (cell, column)) in cells.iter().zip(COLUMNS.iter()).enumerate() {
                if cell != column.name {
                    return Err(ImportError::HeaderMismatch {
                        cell: cell_index,
                        expected: column.name,
                        actual: cell.clone(),
                    });
                }
            }
            return Ok(RowOutcome::Header);
        }

        // 数据行：按位置分发校验器，快速失败
        let mut draft = RecordDraft::default();
        for (cell_index, (cell, column)) in cells.iter().zip(COLUMNS.iter()).enumerate() {
            let raw = if cell.is_empty() {
                None
            } else {
                Some(cell.as_str())
            };
            let value = (column.validate)(&self.ctx, raw).map_err(|source| {
                ImportError::InvalidField {
                    row: row_index,
                    cell: cell_index,
                    source,
                }
            })?;
            draft.apply(value);
        }

        // 十个校验器各回填一个字段，缺失只可能是编程错误
        let record = draft
            .finish()
            .ok_or_else(|| ImportError::Internal("产品记录字段不完整".to_string()))?;
        Ok(RowOutcome::Record(record))
    }
}

// ==========================================
// RecordDraft - 记录装配中间体
// ==========================================
#[derive(Default)]
struct RecordDraft {
    name: Option<String>,
    description: Option<String>,
    image: Option<Option<ImageRef>>,
    categories: Option<Vec<CategoryRef>>,
    brand: Option<BrandRef>,
    sku: Option<String>,
    price: Option<Option<f64>>,
    stock: Option<Option<i64>>,
    status: Option<ProductStatus>,
    attributes: Option<Option<AttributeStore>>,
}

impl RecordDraft {
    fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Name(v) => self.name = Some(v),
            FieldValue::Description(v) => self.description = Some(v),
            FieldValue::Image(v) => self.image = Some(v),
            FieldValue::Categories(v) => self.categories = Some(v),
            FieldValue::Brand(v) => self.brand = Some(v),
            FieldValue::Sku(v) => self.sku = Some(v),
            FieldValue::Price(v) => self.price = Some(v),
            FieldValue::Stock(v) => self.stock = Some(v),
            FieldValue::Status(v) => self.status = Some(v),
            FieldValue::Attributes(v) => self.attributes = Some(v),
        }
    }

    fn finish(self) -> Option<ProductRecord> {
        Some(ProductRecord {
            name: self.name?,
            description: self.description?,
            image: self.image?,
            categories: self.categories?,
            brand: self.brand?,
            sku: self.sku?,
            price: self.price?,
            stock: self.stock?,
            status: self.status?,
            attributes: self.attributes?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::FieldError;
    use crate::importer::test_support::FakeRefs;

    fn header_cells() -> Vec<String> {
        COLUMNS.iter().map(|c| c.name.to_string()).collect()
    }

    fn valid_cells(sku: &str) -> Vec<String> {
        vec![
            "跑步鞋".to_string(),
            "轻量缓震跑步鞋".to_string(),
            "/catalog/shoes/sneaker.png".to_string(),
            "Shoes,Accessories".to_string(),
            "Acme".to_string(),
            sku.to_string(),
            "59.9".to_string(),
            "20".to_string(),
            "active".to_string(),
            String::new(),
        ]
    }

    #[test]
    fn test_header_row_passes_and_produces_no_record() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        let outcome = processor.process(0, &header_cells()).unwrap();
        assert!(matches!(outcome, RowOutcome::Header));
    }

    #[test]
    fn test_header_order_is_exact_not_permutation() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        // 交换前两列：第 0 格即报错
        let mut cells = header_cells();
        cells.swap(0, 5); // sku 在前
        match processor.process(0, &cells) {
            Err(ImportError::HeaderMismatch {
                cell,
                expected,
                actual,
            }) => {
                assert_eq!(cell, 0);
                assert_eq!(expected, "name");
                assert_eq!(actual, "sku");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_header_mismatch_names_cell_position() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        let mut cells = header_cells();
        cells[4] = "manufacturer".to_string();
        match processor.process(0, &cells) {
            Err(ImportError::HeaderMismatch { cell, expected, .. }) => {
                assert_eq!(cell, 4);
                assert_eq!(expected, "brand");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_cell_count_contract() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        let mut short = valid_cells("PROD-100");
        short.pop();
        match processor.process(3, &short) {
            Err(ImportError::NotEnoughValues { row, expected, actual }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 10);
                assert_eq!(actual, 9);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let mut long = valid_cells("PROD-100");
        long.push("extra".to_string());
        match processor.process(7, &long) {
            Err(ImportError::TooManyValues { row, actual, .. }) => {
                assert_eq!(row, 7);
                assert_eq!(actual, 11);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_valid_data_row_builds_record() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        let outcome = processor.process(1, &valid_cells("PROD-100")).unwrap();
        let RowOutcome::Record(record) = outcome else {
            panic!("expected record");
        };

        assert_eq!(record.name, "跑步鞋");
        assert_eq!(record.sku, "PROD-100");
        assert_eq!(record.price, Some(59.9));
        assert_eq!(record.stock, Some(20));
        assert_eq!(record.status, ProductStatus::Active);
        assert_eq!(record.categories.len(), 2);
        assert!(record.image.is_some());
        assert!(record.attributes.is_none());
    }

    #[test]
    fn test_data_row_fails_fast_at_first_invalid_cell() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        // name 与 price 同时无效：只报第 0 格
        let mut cells = valid_cells("PROD-100");
        cells[0] = String::new();
        cells[6] = "abc".to_string();
        match processor.process(2, &cells) {
            Err(ImportError::InvalidField {
                row,
                cell,
                source: FieldError::NameRequired,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(cell, 0);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_data_row_error_carries_row_and_cell() {
        let refs = FakeRefs::seeded();
        let processor = RowProcessor::new(&refs, "ProductAttributes").unwrap();

        let mut cells = valid_cells("PROD-12"); // SKU 位数不足
        cells[9] = String::new();
        match processor.process(5, &cells) {
            Err(ImportError::InvalidField {
                row,
                cell,
                source: FieldError::SkuFormat(_),
            }) => {
                assert_eq!(row, 5);
                assert_eq!(cell, 5);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
