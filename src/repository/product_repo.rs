// ==========================================
// 产品目录导入系统 - 产品对象仓储
// ==========================================
// 职责: 产品实体的自然键查找与落库
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{
    AttributeStore, BrandRef, CategoryRef, ImageRef, Product, ProductStatus,
};
use crate::repository::error::{StoreError, StoreResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductStore Trait
// ==========================================
// 用途: Upsert 组件面向的产品存储边界
// 实现者: ProductRepository
pub trait ProductStore {
    /// 在父目录作用域内按 SKU 查找产品（完整水合，含分类与属性）
    fn find_by_sku(&self, parent_id: i64, sku: &str) -> StoreResult<Option<Product>>;

    /// 保存产品（id 为 None 时插入，否则按 id 更新）
    ///
    /// # 返回
    /// - Ok(i64): 产品行 id
    /// - Err: 数据库错误
    ///
    /// # 说明
    /// - 产品行与分类关联在同一事务内写入
    fn save(&self, product: &Product) -> StoreResult<i64>;
}

// ==========================================
// ProductRepository - SQLite 实现
// ==========================================
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

/// 查询行的原始投影（状态/属性在闭包外再做类型转换）
struct RawProductRow {
    id: i64,
    parent_id: i64,
    object_key: String,
    published: bool,
    name: String,
    description: String,
    image_id: Option<i64>,
    image_path: Option<String>,
    brand_id: i64,
    brand_name: String,
    sku: String,
    price: Option<f64>,
    stock: Option<i64>,
    status: String,
    attributes_json: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProductRepository {
    /// 创建新的 ProductRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| StoreError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }
}

impl ProductStore for ProductRepository {
    fn find_by_sku(&self, parent_id: i64, sku: &str) -> StoreResult<Option<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                p.id, p.parent_id, p.object_key, p.published,
                p.name, p.description,
                p.image_id, i.path,
                p.brand_id, b.name,
                p.sku, p.price, p.stock, p.status, p.attributes_json,
                p.created_at, p.updated_at
            FROM products p
            LEFT JOIN assets_image i ON i.id = p.image_id
            JOIN brands b ON b.id = p.brand_id
            WHERE p.parent_id = ?1 AND p.sku = ?2
            "#,
        )?;

        let raw = stmt
            .query_row(params![parent_id, sku], |row| {
                Ok(RawProductRow {
                    id: row.get(0)?,
                    parent_id: row.get(1)?,
                    object_key: row.get(2)?,
                    published: row.get(3)?,
                    name: row.get(4)?,
                    description: row.get(5)?,
                    image_id: row.get(6)?,
                    image_path: row.get(7)?,
                    brand_id: row.get(8)?,
                    brand_name: row.get(9)?,
                    sku: row.get(10)?,
                    price: row.get(11)?,
                    stock: row.get(12)?,
                    status: row.get(13)?,
                    attributes_json: row.get(14)?,
                    created_at: row.get(15)?,
                    updated_at: row.get(16)?,
                })
            })
            .optional()?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        // 状态列取值校验
        let status = ProductStatus::parse(&raw.status).ok_or_else(|| {
            StoreError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知状态 '{}'", raw.status),
            }
        })?;

        // 属性列反序列化
        let attributes: Option<AttributeStore> = raw
            .attributes_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| StoreError::FieldValueError {
                field: "attributes_json".to_string(),
                message: e.to_string(),
            })?;

        let image = match (raw.image_id, raw.image_path) {
            (Some(id), Some(path)) => Some(ImageRef { id, path }),
            _ => None,
        };

        // 分类按导入顺序回读
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, c.name
            FROM product_categories pc
            JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id = ?1
            ORDER BY pc.position
            "#,
        )?;
        let categories = stmt
            .query_map(params![raw.id], |row| {
                Ok(CategoryRef {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Product {
            id: Some(raw.id),
            parent_id: raw.parent_id,
            object_key: raw.object_key,
            published: raw.published,
            name: raw.name,
            description: raw.description,
            image,
            categories,
            brand: BrandRef {
                id: raw.brand_id,
                name: raw.brand_name,
            },
            sku: raw.sku,
            price: raw.price,
            stock: raw.stock,
            status,
            attributes,
            created_at: raw
                .created_at
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
            updated_at: raw
                .updated_at
                .parse::<chrono::DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        }))
    }

    fn save(&self, product: &Product) -> StoreResult<i64> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::DatabaseTransactionError(e.to_string()))?;

        let attributes_json = product
            .attributes
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::FieldValueError {
                field: "attributes_json".to_string(),
                message: e.to_string(),
            })?;

        let id = match product.id {
            Some(id) => {
                tx.execute(
                    r#"
                    UPDATE products SET
                        parent_id = ?1, object_key = ?2, published = ?3,
                        name = ?4, description = ?5, image_id = ?6, brand_id = ?7,
                        sku = ?8, price = ?9, stock = ?10, status = ?11,
                        attributes_json = ?12, updated_at = ?13
                    WHERE id = ?14
                    "#,
                    params![
                        product.parent_id,
                        product.object_key,
                        product.published,
                        product.name,
                        product.description,
                        product.image.as_ref().map(|image| image.id),
                        product.brand.id,
                        product.sku,
                        product.price,
                        product.stock,
                        product.status.as_str(),
                        attributes_json,
                        product.updated_at.to_rfc3339(),
                        id,
                    ],
                )?;
                id
            }
            None => {
                tx.execute(
                    r#"
                    INSERT INTO products (
                        parent_id, object_key, published,
                        name, description, image_id, brand_id,
                        sku, price, stock, status, attributes_json,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                    "#,
                    params![
                        product.parent_id,
                        product.object_key,
                        product.published,
                        product.name,
                        product.description,
                        product.image.as_ref().map(|image| image.id),
                        product.brand.id,
                        product.sku,
                        product.price,
                        product.stock,
                        product.status.as_str(),
                        attributes_json,
                        product.created_at.to_rfc3339(),
                        product.updated_at.to_rfc3339(),
                    ],
                )?;
                tx.last_insert_rowid()
            }
        };

        // 分类关联整体重建
        tx.execute(
            "DELETE FROM product_categories WHERE product_id = ?1",
            params![id],
        )?;
        for (position, category) in product.categories.iter().enumerate() {
            tx.execute(
                r#"
                INSERT INTO product_categories (product_id, category_id, position)
                VALUES (?1, ?2, ?3)
                "#,
                params![id, category.id, position as i64],
            )?;
        }

        tx.commit()
            .map_err(|e| StoreError::DatabaseTransactionError(e.to_string()))?;
        Ok(id)
    }
}
