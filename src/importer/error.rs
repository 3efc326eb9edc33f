// ==========================================
// 产品目录导入系统 - 导入模块错误类型
// ==========================================
// 错误分级: 文件 / 结构 / 字段 / 持久化
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::StoreError;
use thiserror::Error;

/// 导入运行错误类型
///
/// 所有错误都不可恢复：任何一个都会中止整个导入运行
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("表头第 {cell} 列应为 '{expected}'，实际为 '{actual}'")]
    HeaderMismatch {
        cell: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("行 {row} 取值不足（期望 {expected} 列，实际 {actual} 列）")]
    NotEnoughValues {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("行 {row} 取值过多（期望 {expected} 列，实际 {actual} 列）")]
    TooManyValues {
        row: usize,
        expected: usize,
        actual: usize,
    },

    // ===== 字段校验错误 =====
    #[error("行 {row} 第 {cell} 列取值无效: {source}")]
    InvalidField {
        row: usize,
        cell: usize,
        #[source]
        source: FieldError,
    },

    // ===== 持久化错误 =====
    #[error("产品 {sku} 保存失败: {source}")]
    PersistFailed {
        sku: String,
        #[source]
        source: StoreError,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ImportError {
    /// 错误分类标签（用于中止日志）
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_) => "source",
            ImportError::HeaderMismatch { .. }
            | ImportError::NotEnoughValues { .. }
            | ImportError::TooManyValues { .. } => "structural",
            ImportError::InvalidField { .. } => "field",
            ImportError::PersistFailed { .. } => "persistence",
            ImportError::Internal(_) => "internal",
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// 单元格级校验失败原因
///
/// 引用解析失败（分类/品牌/分组/键/单位）也属于字段错误，
/// 由行处理器包上行/列上下文后上抛
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("产品名称不能为空")]
    NameRequired,

    #[error("产品描述不能为空")]
    DescriptionRequired,

    #[error("至少需要一个产品分类")]
    CategoriesRequired,

    #[error("无效分类 '{0}'")]
    UnknownCategory(String),

    #[error("品牌不能为空")]
    BrandRequired,

    #[error("无效品牌 '{0}'")]
    UnknownBrand(String),

    #[error("SKU 不能为空")]
    SkuRequired,

    #[error("SKU 格式无效: '{0}'（期望 PROD- 后接 3~4 位数字）")]
    SkuFormat(String),

    #[error("价格必须为数字: '{0}'")]
    PriceNotNumeric(String),

    #[error("价格不能为负数: {0}")]
    PriceNegative(f64),

    #[error("库存必须为整数: '{0}'")]
    StockNotNumeric(String),

    #[error("库存不能为负数: {0}")]
    StockNegative(i64),

    #[error("状态不能为空")]
    StatusRequired,

    #[error("无效状态 '{0}'（仅支持 active/inactive）")]
    UnknownStatus(String),

    #[error("attributes 格式无效")]
    AttributesFormat,

    #[error("属性集 '{0}' 未配置")]
    UnknownAttributeSet(String),

    #[error("无效属性分组 '{0}'")]
    UnknownGroup(String),

    #[error("无效属性键 '{0}'")]
    UnknownKey(String),

    #[error("无效单位 '{0}'")]
    UnknownUnit(String),

    #[error("引用数据查询失败: {0}")]
    Lookup(#[from] StoreError),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
