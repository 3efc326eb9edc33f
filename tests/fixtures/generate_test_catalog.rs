// 生成产品目录演示数据（引用数据库 + CSV 目录文件）
use catalog_import::repository::schema::{ensure_folder, init_schema};
use rusqlite::Connection;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    println!("生成产品目录测试数据...");

    // 引用数据库（幂等）
    let db_path = "catalog.db";
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    ensure_folder(&conn, 51, "products")?;
    conn.execute_batch(
        r#"
        INSERT OR IGNORE INTO categories (name) VALUES ('Shoes');
        INSERT OR IGNORE INTO categories (name) VALUES ('Accessories');
        INSERT OR IGNORE INTO categories (name) VALUES ('Outdoor');
        INSERT OR IGNORE INTO brands (name) VALUES ('Acme');
        INSERT OR IGNORE INTO brands (name) VALUES ('Summit');
        INSERT OR IGNORE INTO assets_image (path) VALUES ('/catalog/shoes/sneaker.png');
        INSERT OR IGNORE INTO units (abbreviation) VALUES ('mm');
        INSERT OR IGNORE INTO units (abbreviation) VALUES ('kg');
        INSERT OR IGNORE INTO attribute_sets (name) VALUES ('ProductAttributes');
        INSERT OR IGNORE INTO attribute_groups (set_id, name)
            SELECT id, 'Dimensions' FROM attribute_sets WHERE name = 'ProductAttributes';
        INSERT OR IGNORE INTO attribute_groups (set_id, name)
            SELECT id, 'Weight' FROM attribute_sets WHERE name = 'ProductAttributes';
        INSERT OR IGNORE INTO attribute_keys (set_id, name)
            SELECT id, 'width' FROM attribute_sets WHERE name = 'ProductAttributes';
        INSERT OR IGNORE INTO attribute_keys (set_id, name)
            SELECT id, 'net_weight' FROM attribute_sets WHERE name = 'ProductAttributes';
        "#,
    )?;
    println!("引用数据已写入 {}", db_path);

    // CSV 目录文件
    fs::create_dir_all("var/import")?;
    let csv_path = "var/import/products_import.csv";
    let mut writer = csv::Writer::from_path(csv_path)?;
    writer.write_record([
        "name",
        "description",
        "image",
        "categories",
        "brand",
        "sku",
        "price",
        "stock",
        "status",
        "attributes",
    ])?;

    println!("生成 20 条产品行...");
    for i in 1..=20 {
        let sku = format!("PROD-{:03}", 100 + i);
        let brand = if i % 2 == 0 { "Acme" } else { "Summit" };
        let categories = if i % 3 == 0 {
            "Shoes,Outdoor"
        } else {
            "Shoes,Accessories"
        };
        let status = if i % 7 == 0 { "inactive" } else { "active" };
        // 每 5 条带一份技术属性载荷
        let attributes = if i % 5 == 0 {
            format!(
                r#"{{\"Dimensions\":{{\"width\":{{\"value\":{},\"unit\":\"mm\"}}}},\"Weight\":{{\"net_weight\":{{\"value\":{:.1},\"unit\":\"kg\"}}}}}}"#,
                200 + i,
                0.5 + (i as f64) * 0.1,
            )
        } else {
            String::new()
        };

        let record = vec![
            format!("演示产品 {}", i),
            "批量导入演示数据".to_string(),
            "/catalog/shoes/sneaker.png".to_string(),
            categories.to_string(),
            brand.to_string(),
            sku,
            format!("{:.1}", 29.9 + (i as f64) * 2.0),
            format!("{}", i * 3),
            status.to_string(),
            attributes,
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;
    println!("目录文件已写入 {}", csv_path);

    println!();
    println!("运行导入:");
    println!(
        "  CATALOG_IMPORT_DB_PATH={} CATALOG_IMPORT_FILE={} cargo run --bin catalog-import",
        db_path, csv_path
    );

    Ok(())
}
