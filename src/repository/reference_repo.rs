// ==========================================
// 产品目录导入系统 - 引用数据仓储
// ==========================================
// 职责: 校验阶段的引用数据查找（只读）
// 红线: 查不到是数据（Ok(None)），查询故障才是错误
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{AttributeSetRef, BrandRef, CategoryRef, ImageRef, UnitRef};
use crate::repository::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ReferenceLookup Trait
// ==========================================
// 用途: 校验器面向的引用数据边界
// 实现者: ReferenceRepository
pub trait ReferenceLookup {
    /// 按名称查找分类
    fn category_by_name(&self, name: &str) -> StoreResult<Option<CategoryRef>>;

    /// 按名称查找品牌
    fn brand_by_name(&self, name: &str) -> StoreResult<Option<BrandRef>>;

    /// 按路径查找图片资源
    fn image_by_path(&self, path: &str) -> StoreResult<Option<ImageRef>>;

    /// 按缩写查找计量单位
    fn unit_by_abbreviation(&self, abbreviation: &str) -> StoreResult<Option<UnitRef>>;

    /// 按名称查找属性集（group/key 查找的作用域）
    fn attribute_set_by_name(&self, name: &str) -> StoreResult<Option<AttributeSetRef>>;

    /// 在属性集作用域内按名称查找分组
    fn attribute_group_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>>;

    /// 在属性集作用域内按名称查找键
    fn attribute_key_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>>;
}

// ==========================================
// ReferenceRepository - SQLite 实现
// ==========================================
pub struct ReferenceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReferenceRepository {
    /// 创建新的 ReferenceRepository 实例
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

impl ReferenceLookup for ReferenceRepository {
    fn category_by_name(&self, name: &str) -> StoreResult<Option<CategoryRef>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1",
                params![name],
                |row| {
                    Ok(CategoryRef {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn brand_by_name(&self, name: &str) -> StoreResult<Option<BrandRef>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id, name FROM brands WHERE name = ?1",
                params![name],
                |row| {
                    Ok(BrandRef {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn image_by_path(&self, path: &str) -> StoreResult<Option<ImageRef>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id, path FROM assets_image WHERE path = ?1",
                params![path],
                |row| {
                    Ok(ImageRef {
                        id: row.get(0)?,
                        path: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn unit_by_abbreviation(&self, abbreviation: &str) -> StoreResult<Option<UnitRef>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id, abbreviation FROM units WHERE abbreviation = ?1",
                params![abbreviation],
                |row| {
                    Ok(UnitRef {
                        id: row.get(0)?,
                        abbreviation: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn attribute_set_by_name(&self, name: &str) -> StoreResult<Option<AttributeSetRef>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id, name FROM attribute_sets WHERE name = ?1",
                params![name],
                |row| {
                    Ok(AttributeSetRef {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn attribute_group_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id FROM attribute_groups WHERE set_id = ?1 AND name = ?2",
                params![set_id, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(row)
    }

    fn attribute_key_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                "SELECT id FROM attribute_keys WHERE set_id = ?1 AND name = ?2",
                params![set_id, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(row)
    }
}
