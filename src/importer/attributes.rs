// ==========================================
// 产品目录导入系统 - 技术属性解析器
// ==========================================
// 输入: 单元格内的转义 JSON 载荷
//       { 分组: { 键: { value: 数值, unit: 单位缩写 } } }
// 红线: 快速失败——第一个解析/解析失败即中止，不做多错误收集
// ==========================================

use crate::domain::product::{AttributeStore, Quantity};
use crate::importer::columns::ValidationContext;
use crate::importer::error::FieldError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// 载荷中的原始数量值
#[derive(Debug, Deserialize)]
struct RawQuantity {
    value: f64,
    unit: String,
}

/// 解析并逐级校验技术属性载荷
///
/// # 流程
/// 1. 去转义 + JSON 解析；失败或空载荷 → 格式错误
/// 2. 解析一次属性集作用域
/// 3. 逐分组/键/单位解析，任一未配置即失败并指名
pub fn resolve_attributes(
    ctx: &ValidationContext<'_>,
    raw: &str,
) -> Result<AttributeStore, FieldError> {
    let unescaped = strip_escapes(raw);
    let parsed: BTreeMap<String, BTreeMap<String, RawQuantity>> =
        serde_json::from_str(&unescaped).map_err(|_| FieldError::AttributesFormat)?;
    if parsed.is_empty() {
        return Err(FieldError::AttributesFormat);
    }

    // 作用域只解析一次，限定后续所有分组/键查找
    let set = ctx
        .refs
        .attribute_set_by_name(ctx.attribute_set)?
        .ok_or_else(|| FieldError::UnknownAttributeSet(ctx.attribute_set.to_string()))?;

    let mut store = AttributeStore::new();
    for (group_name, entries) in parsed {
        ctx.refs
            .attribute_group_by_name(set.id, &group_name)?
            .ok_or_else(|| FieldError::UnknownGroup(group_name.clone()))?;

        for (key_name, quantity) in entries {
            ctx.refs
                .attribute_key_by_name(set.id, &key_name)?
                .ok_or_else(|| FieldError::UnknownKey(key_name.clone()))?;

            let unit = ctx
                .refs
                .unit_by_abbreviation(&quantity.unit)?
                .ok_or_else(|| FieldError::UnknownUnit(quantity.unit.clone()))?;

            store.insert(
                &group_name,
                &key_name,
                Quantity {
                    value: quantity.value,
                    unit,
                },
            );
        }
    }

    Ok(store)
}

/// 去除单元格文本中的反斜杠转义（`\"` → `"` 等）
pub(crate) fn strip_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
