// ==========================================
// 导入模块单元测试辅助
// ==========================================
// 职责: 内存版引用数据边界，免去单元测试建库
// ==========================================

use crate::domain::product::{AttributeSetRef, BrandRef, CategoryRef, ImageRef, UnitRef};
use crate::repository::error::StoreResult;
use crate::repository::reference_repo::ReferenceLookup;
use std::collections::HashMap;

/// 内存版引用数据，种子内容与集成测试保持一致
#[derive(Default)]
pub(crate) struct FakeRefs {
    categories: HashMap<String, i64>,
    brands: HashMap<String, i64>,
    images: HashMap<String, i64>,
    units: HashMap<String, i64>,
    sets: HashMap<String, i64>,
    groups: HashMap<(i64, String), i64>,
    keys: HashMap<(i64, String), i64>,
}

impl FakeRefs {
    pub(crate) fn seeded() -> Self {
        let mut refs = Self::default();
        refs.categories.insert("Shoes".to_string(), 1);
        refs.categories.insert("Accessories".to_string(), 2);
        refs.brands.insert("Acme".to_string(), 1);
        refs.images.insert("/catalog/shoes/sneaker.png".to_string(), 1);
        refs.units.insert("mm".to_string(), 1);
        refs.units.insert("kg".to_string(), 2);
        refs.sets.insert("ProductAttributes".to_string(), 1);
        refs.groups.insert((1, "Dimensions".to_string()), 1);
        refs.groups.insert((1, "Weight".to_string()), 2);
        refs.keys.insert((1, "width".to_string()), 1);
        refs.keys.insert((1, "height".to_string()), 2);
        refs.keys.insert((1, "net_weight".to_string()), 3);
        refs
    }
}

impl ReferenceLookup for FakeRefs {
    fn category_by_name(&self, name: &str) -> StoreResult<Option<CategoryRef>> {
        Ok(self.categories.get(name).map(|&id| CategoryRef {
            id,
            name: name.to_string(),
        }))
    }

    fn brand_by_name(&self, name: &str) -> StoreResult<Option<BrandRef>> {
        Ok(self.brands.get(name).map(|&id| BrandRef {
            id,
            name: name.to_string(),
        }))
    }

    fn image_by_path(&self, path: &str) -> StoreResult<Option<ImageRef>> {
        Ok(self.images.get(path).map(|&id| ImageRef {
            id,
            path: path.to_string(),
        }))
    }

    fn unit_by_abbreviation(&self, abbreviation: &str) -> StoreResult<Option<UnitRef>> {
        Ok(self.units.get(abbreviation).map(|&id| UnitRef {
            id,
            abbreviation: abbreviation.to_string(),
        }))
    }

    fn attribute_set_by_name(&self, name: &str) -> StoreResult<Option<AttributeSetRef>> {
        Ok(self.sets.get(name).map(|&id| AttributeSetRef {
            id,
            name: name.to_string(),
        }))
    }

    fn attribute_group_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.groups.get(&(set_id, name.to_string())).copied())
    }

    fn attribute_key_by_name(&self, set_id: i64, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.keys.get(&(set_id, name.to_string())).copied())
    }
}
