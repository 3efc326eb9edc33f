// ==========================================
// 产品目录导入系统 - 批量导入入口
// ==========================================
// 用法: catalog-import
// 行为: 读取配置的目录文件，逐行校验落库；
//       首错即停，进程退出码报告成败
// ==========================================

use anyhow::Context;
use catalog_import::config::ImportConfig;
use catalog_import::db::open_sqlite_connection;
use catalog_import::importer::{CatalogImporter, RunOutcome, UniversalSheetSource};
use catalog_import::logging;
use catalog_import::repository::{schema, ProductRepository, ReferenceRepository};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    info!("==================================================");
    info!("{} - 批量导入工具", catalog_import::APP_NAME);
    info!("系统版本: {}", catalog_import::VERSION);
    info!("==================================================");

    let config = ImportConfig::from_env();
    info!("使用数据库: {}", config.db_path);
    info!("导入文件: {}", config.input_path.display());

    let importer = match bootstrap(&config) {
        Ok(importer) => importer,
        Err(e) => {
            error!(error = %format!("{e:#}"), "初始化失败");
            return ExitCode::FAILURE;
        }
    };

    // 运行结果只有两种：成功信号，或失败信号 + 一条诊断日志
    match importer.run() {
        RunOutcome::Completed { rows_imported } => {
            info!(rows_imported, "导入成功");
            ExitCode::SUCCESS
        }
        RunOutcome::Halted { error, last_row } => {
            error!(kind = error.kind(), last_row, error = %error, "导入中止");
            ExitCode::FAILURE
        }
    }
}

/// 打开存储并装配导入编排器
fn bootstrap(
    config: &ImportConfig,
) -> anyhow::Result<CatalogImporter<ReferenceRepository, ProductRepository>> {
    let conn = open_sqlite_connection(&config.db_path)
        .with_context(|| format!("无法打开数据库 {}", config.db_path))?;
    schema::init_schema(&conn).context("初始化存储 schema 失败")?;
    schema::ensure_folder(&conn, config.parent_folder_id, "products")
        .context("初始化产品目录失败")?;

    let conn = Arc::new(Mutex::new(conn));
    let refs = ReferenceRepository::from_connection(conn.clone());
    let products = ProductRepository::from_connection(conn);

    Ok(CatalogImporter::new(
        refs,
        products,
        Box::new(UniversalSheetSource),
        config.clone(),
    ))
}
