//! 内置的单页详细报告
//!
//! 没有 node / Lighthouse 报告生成器时使用，只展示分类得分和审计项列表

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::{AppResult, AuditError};
use crate::infrastructure::ReportRenderer;
use crate::models::audit_result::{ACCESSIBILITY, BEST_PRACTICES, PERFORMANCE, SEO};
use crate::models::{AuditResult, ScoreBands};
use crate::services::index_page::html_escape;
use crate::services::summary_service::{percentage, NOT_AVAILABLE};

const CATEGORY_ORDER: [&str; 4] = [PERFORMANCE, ACCESSIBILITY, BEST_PRACTICES, SEO];

#[derive(Debug, Clone, Default)]
pub struct BuiltinRenderer {
    bands: ScoreBands,
}

impl BuiltinRenderer {
    pub fn new(bands: ScoreBands) -> Self {
        Self { bands }
    }

    pub fn render_result(&self, result: &AuditResult) -> String {
        let url = html_escape(result.display_url().unwrap_or(NOT_AVAILABLE));
        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lighthouse 报告 - {url}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        table {{ width: 100%; border-collapse: collapse; margin-bottom: 24px; }}
        th, td {{ border: 1px solid #ccc; padding: 8px; text-align: left; }}
        th {{ background-color: #f4f4f4; }}
        .good {{ color: green; }}
        .average {{ color: orange; }}
        .poor {{ color: red; }}
    </style>
</head>
<body>
    <h1>{url}</h1>
    <p>抓取时间: {fetch_time} | Lighthouse {version}</p>
    <h2>分类得分</h2>
    <table>
        <thead><tr><th>分类</th><th>得分</th></tr></thead>
        <tbody>
{categories}        </tbody>
    </table>
    <h2>审计项</h2>
    <table>
        <thead><tr><th>审计项</th><th>得分</th><th>结果</th></tr></thead>
        <tbody>
{audits}        </tbody>
    </table>
</body>
</html>
"#,
            url = url,
            fetch_time = html_escape(result.fetch_time.as_deref().unwrap_or(NOT_AVAILABLE)),
            version = html_escape(result.lighthouse_version.as_deref().unwrap_or(NOT_AVAILABLE)),
            categories = self.render_categories(result),
            audits = render_audits(result),
        )
    }

    fn render_categories(&self, result: &AuditResult) -> String {
        CATEGORY_ORDER
            .iter()
            .map(|id| {
                let title = result
                    .categories
                    .get(*id)
                    .and_then(|c| c.title.as_deref())
                    .unwrap_or(*id);
                let score = percentage(result.category_score(id));
                format!(
                    "            <tr><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                    html_escape(title),
                    self.bands.classify(score).css_class(),
                    score
                )
            })
            .collect()
    }
}

fn render_audits(result: &AuditResult) -> String {
    result
        .audits
        .iter()
        .map(|(id, audit)| {
            let score = audit
                .score
                .map(|s| percentage(Some(s)).to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "            <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(audit.title.as_deref().unwrap_or(id.as_str())),
                score,
                html_escape(audit.display_value.as_deref().unwrap_or("")),
            )
        })
        .collect()
}

#[async_trait]
impl ReportRenderer for BuiltinRenderer {
    async fn render(&self, result: &JsonValue) -> AppResult<String> {
        let typed = AuditResult::from_value(result).map_err(|e| AuditError::RenderFailed {
            reason: format!("审计结果结构不符合预期: {}", e),
        })?;
        Ok(self.render_result(&typed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_render_contains_categories_and_audits() {
        let renderer = BuiltinRenderer::default();
        let html = renderer
            .render(&json!({
                "requestedUrl": "https://example.com/?a=1&b=2",
                "fetchTime": "2025-01-23T11:26:32.100Z",
                "categories": {
                    "performance": { "title": "Performance", "score": 0.93 },
                    "seo": { "title": "SEO", "score": 0.42 }
                },
                "audits": {
                    "interactive": { "title": "Time to Interactive", "score": 0.8, "displayValue": "3.5 s" }
                }
            }))
            .await
            .unwrap();

        assert!(html.contains("https://example.com/?a=1&amp;b=2"));
        assert!(html.contains(r#"<td>Performance</td><td class="good">93</td>"#));
        assert!(html.contains(r#"<td>SEO</td><td class="poor">42</td>"#));
        assert!(html.contains(r#"<td>accessibility</td><td class="poor">0</td>"#));
        assert!(html.contains("<td>Time to Interactive</td><td>80</td><td>3.5 s</td>"));
    }

    #[tokio::test]
    async fn test_render_rejects_wrong_shape() {
        let renderer = BuiltinRenderer::default();
        assert!(renderer.render(&json!({ "categories": [1, 2] })).await.is_err());
    }
}
