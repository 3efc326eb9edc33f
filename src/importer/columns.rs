// ==========================================
// 产品目录导入系统 - 列校验器注册表
// ==========================================
// 设计: 静态有序分发表（列名 + 类型化校验函数），
//       而非按名字动态查找
// 红线: 校验器无行内状态；仅分类/品牌/图片/属性做只读引用查找
// ==========================================

use crate::domain::product::{
    AttributeStore, BrandRef, CategoryRef, ImageRef, ProductStatus,
};
use crate::importer::attributes::resolve_attributes;
use crate::importer::error::{FieldError, ImportError, ImportResult};
use crate::repository::reference_repo::ReferenceLookup;
use regex::Regex;

/// SKU 格式: PROD- 后接 3~4 位数字（全匹配）
pub const SKU_PATTERN: &str = r"^PROD-\d{3,4}$";

// ==========================================
// ValidationContext - 校验上下文
// ==========================================
/// 一次运行内所有校验器共享的上下文：
/// 引用数据边界、属性集作用域名、预编译的 SKU 正则
pub struct ValidationContext<'a> {
    pub refs: &'a dyn ReferenceLookup,
    pub attribute_set: &'a str,
    sku_pattern: Regex,
}

impl<'a> ValidationContext<'a> {
    pub fn new(refs: &'a dyn ReferenceLookup, attribute_set: &'a str) -> ImportResult<Self> {
        let sku_pattern = Regex::new(SKU_PATTERN)
            .map_err(|e| ImportError::Internal(format!("SKU 正则编译失败: {}", e)))?;
        Ok(Self {
            refs,
            attribute_set,
            sku_pattern,
        })
    }
}

// ==========================================
// FieldValue - 单元格校验产物
// ==========================================
/// 每个校验器返回与其列对应的类型化取值
#[derive(Debug)]
pub enum FieldValue {
    Name(String),
    Description(String),
    Image(Option<ImageRef>),
    Categories(Vec<CategoryRef>),
    Brand(BrandRef),
    Sku(String),
    Price(Option<f64>),
    Stock(Option<i64>),
    Status(ProductStatus),
    Attributes(Option<AttributeStore>),
}

// ==========================================
// ColumnSpec / COLUMNS - 分发表
// ==========================================
/// 列描述符：列名 + 校验函数
pub struct ColumnSpec {
    pub name: &'static str,
    pub validate: fn(&ValidationContext<'_>, Option<&str>) -> Result<FieldValue, FieldError>,
}

/// 固定列集合：顺序即表头契约，长度即每行单元格数契约
pub const COLUMNS: [ColumnSpec; 10] = [
    ColumnSpec {
        name: "name",
        validate: validate_name,
    },
    ColumnSpec {
        name: "description",
        validate: validate_description,
    },
    ColumnSpec {
        name: "image",
        validate: validate_image,
    },
    ColumnSpec {
        name: "categories",
        validate: validate_categories,
    },
    ColumnSpec {
        name: "brand",
        validate: validate_brand,
    },
    ColumnSpec {
        name: "sku",
        validate: validate_sku,
    },
    ColumnSpec {
        name: "price",
        validate: validate_price,
    },
    ColumnSpec {
        name: "stock",
        validate: validate_stock,
    },
    ColumnSpec {
        name: "status",
        validate: validate_status,
    },
    ColumnSpec {
        name: "attributes",
        validate: validate_attributes,
    },
];

// ==========================================
// 字段校验器
// ==========================================

/// name: 必填，非空
fn validate_name(
    _ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    match raw {
        Some(name) => Ok(FieldValue::Name(name.to_string())),
        None => Err(FieldError::NameRequired),
    }
}

/// description: 必填，非空
fn validate_description(
    _ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    match raw {
        Some(description) => Ok(FieldValue::Description(description.to_string())),
        None => Err(FieldError::DescriptionRequired),
    }
}

/// image: 可选；按路径解析。未解析的路径按无图处理，不报错
/// （与分类/品牌的严格处理不一致，行为按原始契约保留，见 DESIGN.md）
fn validate_image(
    ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(path) = raw else {
        return Ok(FieldValue::Image(None));
    };
    Ok(FieldValue::Image(ctx.refs.image_by_path(path)?))
}

/// categories: 必填；逗号分隔，逐个按名称解析，遇到第一个未解析即失败
fn validate_categories(
    ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(list) = raw else {
        return Err(FieldError::CategoriesRequired);
    };

    let mut categories = Vec::new();
    for name in list.split(',') {
        let name = name.trim();
        let category = ctx
            .refs
            .category_by_name(name)?
            .ok_or_else(|| FieldError::UnknownCategory(name.to_string()))?;
        categories.push(category);
    }

    Ok(FieldValue::Categories(categories))
}

/// brand: 必填；按名称解析
fn validate_brand(
    ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(name) = raw else {
        return Err(FieldError::BrandRequired);
    };

    let brand = ctx
        .refs
        .brand_by_name(name)?
        .ok_or_else(|| FieldError::UnknownBrand(name.to_string()))?;

    Ok(FieldValue::Brand(brand))
}

/// sku: 必填；格式 PROD-### / PROD-####
fn validate_sku(
    ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(sku) = raw else {
        return Err(FieldError::SkuRequired);
    };

    if !ctx.sku_pattern.is_match(sku) {
        return Err(FieldError::SkuFormat(sku.to_string()));
    }

    Ok(FieldValue::Sku(sku.to_string()))
}

/// price: 可选；数字且非负
fn validate_price(
    _ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(text) = raw else {
        return Ok(FieldValue::Price(None));
    };

    let value: f64 = text
        .parse()
        .map_err(|_| FieldError::PriceNotNumeric(text.to_string()))?;
    if !value.is_finite() {
        return Err(FieldError::PriceNotNumeric(text.to_string()));
    }
    if value < 0.0 {
        return Err(FieldError::PriceNegative(value));
    }

    Ok(FieldValue::Price(Some(value)))
}

/// stock: 可选；整数且非负
fn validate_stock(
    _ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(text) = raw else {
        return Ok(FieldValue::Stock(None));
    };

    let value: i64 = text
        .parse()
        .map_err(|_| FieldError::StockNotNumeric(text.to_string()))?;
    if value < 0 {
        return Err(FieldError::StockNegative(value));
    }

    Ok(FieldValue::Stock(Some(value)))
}

/// status: 必填；取值集合 {active, inactive}
fn validate_status(
    _ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(text) = raw else {
        return Err(FieldError::StatusRequired);
    };

    let status =
        ProductStatus::parse(text).ok_or_else(|| FieldError::UnknownStatus(text.to_string()))?;

    Ok(FieldValue::Status(status))
}

/// attributes: 可选；层级属性载荷，见 attributes.rs
fn validate_attributes(
    ctx: &ValidationContext<'_>,
    raw: Option<&str>,
) -> Result<FieldValue, FieldError> {
    let Some(payload) = raw else {
        return Ok(FieldValue::Attributes(None));
    };
    Ok(FieldValue::Attributes(Some(resolve_attributes(
        ctx, payload,
    )?)))
}
