//! Lighthouse 审计结果的类型化视图
//!
//! 只声明汇总需要的字段，其余字段保留在原始 JSON 中交给渲染器。
//! 字段缺失与值为 0 是两回事：缺失统一表示为 `None`。

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

pub const PERFORMANCE: &str = "performance";
pub const ACCESSIBILITY: &str = "accessibility";
pub const BEST_PRACTICES: &str = "best-practices";
pub const SEO: &str = "seo";

pub const TOTAL_BYTE_WEIGHT: &str = "total-byte-weight";
pub const INTERACTIVE: &str = "interactive";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub requested_url: Option<String>,
    #[serde(default, alias = "finalDisplayedUrl")]
    pub final_url: Option<String>,
    #[serde(default)]
    pub fetch_time: Option<String>,
    #[serde(default)]
    pub lighthouse_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: BTreeMap<String, Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audits: BTreeMap<String, AuditEntry>,
}

/// 分类得分，取值 [0, 1]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Category {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub numeric_unit: Option<String>,
    #[serde(default)]
    pub display_value: Option<String>,
}

impl AuditResult {
    /// 从原始 JSON 中提取类型化视图
    pub fn from_value(value: &JsonValue) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }

    /// 分类得分，分类缺失或得分为 null 时返回 None
    pub fn category_score(&self, id: &str) -> Option<f64> {
        self.categories.get(id).and_then(|c| c.score)
    }

    pub fn audit(&self, id: &str) -> Option<&AuditEntry> {
        self.audits.get(id)
    }

    /// 页面地址，优先使用最终地址
    pub fn display_url(&self) -> Option<&str> {
        self.final_url.as_deref().or(self.requested_url.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_scores_are_none() {
        let value = json!({
            "requestedUrl": "https://example.com",
            "categories": {
                "performance": { "score": 0.87 },
                "seo": { "score": null }
            },
            "audits": {
                "interactive": { "numericValue": 1234.5, "displayValue": "1.2 s" }
            }
        });
        let result = AuditResult::from_value(&value).unwrap();
        assert_eq!(result.category_score(PERFORMANCE), Some(0.87));
        assert_eq!(result.category_score(SEO), None);
        assert_eq!(result.category_score(ACCESSIBILITY), None);
        assert_eq!(result.audit(INTERACTIVE).and_then(|a| a.numeric_value), Some(1234.5));
        assert!(result.audit(TOTAL_BYTE_WEIGHT).is_none());
    }

    #[test]
    fn test_zero_score_is_distinct_from_absent() {
        let value = json!({ "categories": { "accessibility": { "score": 0 } } });
        let result = AuditResult::from_value(&value).unwrap();
        assert_eq!(result.category_score(ACCESSIBILITY), Some(0.0));
    }

    #[test]
    fn test_null_sections_default_to_empty() {
        let value = json!({ "categories": null, "audits": null });
        let result = AuditResult::from_value(&value).unwrap();
        assert!(result.categories.is_empty());
        assert!(result.audits.is_empty());
    }

    #[test]
    fn test_final_displayed_url_alias() {
        let value = json!({
            "requestedUrl": "https://example.com",
            "finalDisplayedUrl": "https://example.com/"
        });
        let result = AuditResult::from_value(&value).unwrap();
        assert_eq!(result.display_url(), Some("https://example.com/"));
    }
}
