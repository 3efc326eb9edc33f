// ==========================================
// 产品目录导入系统 - 输入文件读取
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 红线: 读取器不解释表头——表头契约由行处理器校验，
//       因此所有行（含第 0 行）按位置原样返回
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// SheetSource Trait
// ==========================================
// 用途: 表格输入边界——只进式行流，单元格为标量文本
// 实现者: CsvSheetSource, ExcelSheetSource, UniversalSheetSource
pub trait SheetSource {
    /// 读取全部行（含表头行），每行为按位置排列的单元格文本
    fn read_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>>;
}

// ==========================================
// CSV 实现
// ==========================================
pub struct CsvSheetSource;

impl SheetSource for CsvSheetSource {
    fn read_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // 打开 CSV 文件
        // has_headers(false): 表头行也按普通行返回
        // flexible(true): 行长度不一致交给行处理器判定
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳过完全空白的行
            if cells.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(cells);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel 实现
// ==========================================
pub struct ExcelSheetSource;

impl SheetSource for ExcelSheetSource {
    fn read_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        // 检查扩展名
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = Vec::new();
        for data_row in range.rows() {
            let cells: Vec<String> = data_row
                .iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string().trim().to_string(),
                })
                .collect();

            // 跳过完全空白的行
            if cells.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(cells);
        }

        Ok(rows)
    }
}

// ==========================================
// 通用读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetSource;

impl SheetSource for UniversalSheetSource {
    fn read_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetSource.read_rows(file_path),
            "xlsx" | "xls" => ExcelSheetSource.read_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_csv_source_keeps_header_row() {
        let temp_file = write_csv("name,sku\n跑步鞋,PROD-100\n");

        let rows = CsvSheetSource.read_rows(temp_file.path()).unwrap();

        // 第 0 行是表头，原样返回
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["name", "sku"]);
        assert_eq!(rows[1], vec!["跑步鞋", "PROD-100"]);
    }

    #[test]
    fn test_csv_source_file_not_found() {
        let result = CsvSheetSource.read_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_source_skips_blank_rows() {
        let temp_file = write_csv("name,sku\n跑步鞋,PROD-100\n,\n帆布包,PROD-101\n");

        let rows = CsvSheetSource.read_rows(temp_file.path()).unwrap();

        // 空行被跳过
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_csv_source_preserves_uneven_row_length() {
        let temp_file = write_csv("a,b,c\n1,2\n1,2,3,4\n");

        let rows = CsvSheetSource.read_rows(temp_file.path()).unwrap();

        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_universal_source_rejects_unknown_extension() {
        let result = UniversalSheetSource.read_rows(Path::new("catalog.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
