// ==========================================
// 产品目录导入系统 - 导入运行配置
// ==========================================
// 红线: 父目录 id / 属性集名 / 输入路径不做环境全局量，
//       启动时构造一次后显式传入编排器与 Upsert
// ==========================================

use std::path::PathBuf;

/// 默认父目录 id（与运维侧目录配置一致）
pub const DEFAULT_PARENT_FOLDER_ID: i64 = 51;

/// 默认属性集名（group/key 查找作用域）
pub const DEFAULT_ATTRIBUTE_SET: &str = "ProductAttributes";

/// 默认输入文件位置
pub const DEFAULT_INPUT_PATH: &str = "var/import/products_import.xlsx";

/// 一次导入运行的全部配置
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// 对象存储数据库路径
    pub db_path: String,
    /// 输入目录文件路径（.xlsx/.xls/.csv）
    pub input_path: PathBuf,
    /// 产品挂载的父目录 id
    pub parent_folder_id: i64,
    /// 属性集作用域名
    pub attribute_set_name: String,
}

impl ImportConfig {
    /// 从默认值 + 环境变量覆盖构造配置
    ///
    /// # 环境变量
    /// - CATALOG_IMPORT_DB_PATH: 数据库路径
    /// - CATALOG_IMPORT_FILE: 输入文件路径
    /// - CATALOG_IMPORT_FOLDER_ID: 父目录 id
    /// - CATALOG_IMPORT_ATTRIBUTE_SET: 属性集名
    pub fn from_env() -> Self {
        let input_path = std::env::var("CATALOG_IMPORT_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

        let parent_folder_id = std::env::var("CATALOG_IMPORT_FOLDER_ID")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PARENT_FOLDER_ID);

        let attribute_set_name = std::env::var("CATALOG_IMPORT_ATTRIBUTE_SET")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ATTRIBUTE_SET.to_string());

        Self {
            db_path: default_db_path(),
            input_path,
            parent_folder_id,
            attribute_set_name,
        }
    }
}

/// 解析数据库文件默认位置
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("CATALOG_IMPORT_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./catalog.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("catalog-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog.db");
        }
    }

    path.to_string_lossy().to_string()
}
