// ==========================================
// 产品目录导入系统 - 产品领域模型
// ==========================================
// 用途: 导入管道的校验产物与持久化实体
// 对齐: repository/schema.rs products 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// 引用数据句柄
// ==========================================
// 校验阶段解析出的引用数据（分类/品牌/图片/单位），
// 只携带落库所需的 id 与展示名

/// 图片资源引用（按路径解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: i64,
    pub path: String,
}

/// 产品分类引用（按名称解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// 品牌引用（按名称解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    pub id: i64,
    pub name: String,
}

/// 计量单位引用（按缩写解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: i64,
    pub abbreviation: String,
}

/// 属性集引用（group/key 查找的作用域）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSetRef {
    pub id: i64,
    pub name: String,
}

// ==========================================
// 产品状态 (Product Status)
// ==========================================
// 序列化格式: 小写（与导入文件取值一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,   // 在售
    Inactive, // 停售
}

impl ProductStatus {
    /// 解析导入文件取值；不在取值集合内返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 技术属性 (Attribute Store)
// ==========================================
// 层级结构: 分组名 → 键名 → 数量值
// 所有名称均已在固定属性集作用域内解析通过

/// 带单位的数量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: UnitRef,
}

/// 产品技术属性集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeStore {
    groups: BTreeMap<String, BTreeMap<String, Quantity>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 (分组, 键) 下写入数量值
    pub fn insert(&mut self, group: &str, key: &str, quantity: Quantity) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), quantity);
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&Quantity> {
        self.groups.get(group).and_then(|entries| entries.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 遍历所有 (分组, 键, 数量值)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Quantity)> {
        self.groups.iter().flat_map(|(group, entries)| {
            entries
                .iter()
                .map(move |(key, quantity)| (group.as_str(), key.as_str(), quantity))
        })
    }
}

// ==========================================
// ProductRecord - 单行校验产物
// ==========================================
// 用途: 行处理器输出，Upsert 输入
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,                       // 产品名称（必填）
    pub description: String,                // 产品描述（必填）
    pub image: Option<ImageRef>,            // 主图（可选；未解析路径按无图处理）
    pub categories: Vec<CategoryRef>,       // 分类（至少一个，全部解析通过）
    pub brand: BrandRef,                    // 品牌（必填，解析通过）
    pub sku: String,                        // 自然键，格式 PROD-### / PROD-####
    pub price: Option<f64>,                 // 价格（可选，非负）
    pub stock: Option<i64>,                 // 库存（可选，非负整数）
    pub status: ProductStatus,              // 状态
    pub attributes: Option<AttributeStore>, // 技术属性（可选）
}

// ==========================================
// Product - 持久化实体
// ==========================================
// 自然键: (parent_id, sku)
// 红线: 已存在的产品在导入时保留 id 与 object_key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,       // 存储 id（未落库为 None）
    pub parent_id: i64,        // 所属目录（进程级配置，不随行变化）
    pub object_key: String,    // 路径安全键（创建时由 SKU 派生）
    pub published: bool,       // 每次导入强制为 true

    // ===== 业务字段（每次导入整体覆盖）=====
    pub name: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub categories: Vec<CategoryRef>,
    pub brand: BrandRef,
    pub sku: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: ProductStatus,
    pub attributes: Option<AttributeStore>,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
