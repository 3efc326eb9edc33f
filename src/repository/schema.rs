// ==========================================
// 产品目录导入系统 - 存储 schema 初始化
// ==========================================
// 职责: 建表（幂等）与产品目录兜底
// 说明: 引用数据（分类/品牌/单位/属性配置）由运维侧预先配置，
//       本工具只负责表结构存在
// ==========================================

use crate::repository::error::StoreResult;
use rusqlite::{params, Connection};

/// 初始化存储 schema（幂等）
pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    // 对象目录
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
        [],
    )?;

    // 图片资源（按路径查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS assets_image (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL UNIQUE
        )
        "#,
        [],
    )?;

    // 产品分类（按名称查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        [],
    )?;

    // 品牌（按名称查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS brands (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        [],
    )?;

    // 计量单位（按缩写查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS units (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            abbreviation TEXT NOT NULL UNIQUE
        )
        "#,
        [],
    )?;

    // 属性集（group/key 查找的作用域）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS attribute_sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        [],
    )?;

    // 属性分组（作用域内按名称查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS attribute_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            set_id INTEGER NOT NULL REFERENCES attribute_sets(id),
            name TEXT NOT NULL,
            UNIQUE(set_id, name)
        )
        "#,
        [],
    )?;

    // 属性键（作用域内按名称查找）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS attribute_keys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            set_id INTEGER NOT NULL REFERENCES attribute_sets(id),
            name TEXT NOT NULL,
            UNIQUE(set_id, name)
        )
        "#,
        [],
    )?;

    // 产品主表
    // 自然键: (parent_id, sku)
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL REFERENCES folders(id),
            object_key TEXT NOT NULL,
            published INTEGER NOT NULL DEFAULT 0,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            image_id INTEGER REFERENCES assets_image(id),
            brand_id INTEGER NOT NULL REFERENCES brands(id),
            sku TEXT NOT NULL,
            price REAL,
            stock INTEGER,
            status TEXT NOT NULL,
            attributes_json TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(parent_id, sku),
            UNIQUE(parent_id, object_key)
        )
        "#,
        [],
    )?;

    // 产品-分类关联（position 保留导入顺序）
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS product_categories (
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id),
            position INTEGER NOT NULL,
            PRIMARY KEY (product_id, category_id)
        )
        "#,
        [],
    )?;

    Ok(())
}

/// 确保产品父目录存在（幂等）
pub fn ensure_folder(conn: &Connection, folder_id: i64, name: &str) -> StoreResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO folders (id, name) VALUES (?1, ?2)",
        params![folder_id, name],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='products'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ensure_folder_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        ensure_folder(&conn, 51, "products").unwrap();
        ensure_folder(&conn, 51, "products").unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM folders WHERE id = 51", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
