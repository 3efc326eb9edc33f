// ==========================================
// 产品目录导入系统 - 产品 Upsert
// ==========================================
// 职责: 按自然键 (父目录, SKU) 找到或创建产品，
//       整体覆盖业务字段后落库
// 红线: 已存在的产品保留 id / object_key / created_at
// ==========================================

use crate::domain::product::{Product, ProductRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::product_repo::ProductStore;
use chrono::Utc;
use std::fmt;

/// 单次 Upsert 的落库方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Updated => write!(f, "updated"),
        }
    }
}

// ==========================================
// ProductUpsert
// ==========================================
pub struct ProductUpsert<'a, P: ProductStore> {
    products: &'a P,
    parent_folder_id: i64,
}

impl<'a, P: ProductStore> ProductUpsert<'a, P> {
    pub fn new(products: &'a P, parent_folder_id: i64) -> Self {
        Self {
            products,
            parent_folder_id,
        }
    }

    /// 落库一条校验通过的产品记录
    ///
    /// # 流程
    /// - 按 SKU 在父目录作用域内查找
    /// - 未找到则新建：挂到父目录，object_key 由 SKU 派生
    /// - 两种情况都整体覆盖业务字段，published 强制为 true
    ///
    /// # 错误
    /// - 存储层任何故障包装为 PersistFailed（带 SKU），对整个运行致命
    pub fn upsert(&self, record: &ProductRecord) -> ImportResult<UpsertOutcome> {
        let existing = self
            .products
            .find_by_sku(self.parent_folder_id, &record.sku)
            .map_err(|source| ImportError::PersistFailed {
                sku: record.sku.clone(),
                source,
            })?;

        let now = Utc::now();
        let (id, object_key, created_at, outcome) = match existing {
            Some(found) => (found.id, found.object_key, found.created_at, UpsertOutcome::Updated),
            None => (None, valid_key(&record.sku), now, UpsertOutcome::Created),
        };

        let product = Product {
            id,
            parent_id: self.parent_folder_id,
            object_key,
            published: true, // 每次导入强制上架
            name: record.name.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
            categories: record.categories.clone(),
            brand: record.brand.clone(),
            sku: record.sku.clone(),
            price: record.price,
            stock: record.stock,
            status: record.status,
            attributes: record.attributes.clone(),
            created_at,
            updated_at: now,
        };

        self.products
            .save(&product)
            .map_err(|source| ImportError::PersistFailed {
                sku: record.sku.clone(),
                source,
            })?;

        Ok(outcome)
    }
}

/// 由文本标识派生路径安全的对象键
///
/// 规则: 保留字母数字与 `-` `_` `.`，其余字符替换为 `-`，
///       再去掉首尾的分隔符
pub fn valid_key(input: &str) -> String {
    let key: String = input
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    key.trim_matches(|c| c == '-' || c == '.').to_string()
}
