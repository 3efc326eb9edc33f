// ==========================================
// 产品目录导入系统 - 领域层
// ==========================================

pub mod product;

pub use product::{
    AttributeSetRef, AttributeStore, BrandRef, CategoryRef, ImageRef, Product, ProductRecord,
    ProductStatus, Quantity, UnitRef,
};
