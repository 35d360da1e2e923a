//! 单页报告渲染器 - 基础设施层
//!
//! 审计结果 → HTML 文档，视为纯函数

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{AppResult, AuditError};

/// 把一份审计结果渲染成独立的 HTML 文档
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, result: &JsonValue) -> AppResult<String>;
}

/// 从 stdin 读入审计结果，用 Lighthouse 的 ReportGenerator 输出到 stdout
const GENERATOR_SCRIPT: &str = r#"
let data = '';
process.stdin.setEncoding('utf8');
process.stdin.on('data', (chunk) => { data += chunk; });
process.stdin.on('end', async () => {
  try {
    const mod = await import('lighthouse/report/generator/report-generator.js');
    const generator = mod.ReportGenerator || mod.default;
    process.stdout.write(generator.generateReport(JSON.parse(data), process.argv[1]));
  } catch (err) {
    console.error(err && err.stack ? err.stack : String(err));
    process.exit(1);
  }
});
"#;

/// 通过 node 调用 Lighthouse 的报告生成器
#[derive(Debug, Clone)]
pub struct NodeReportRenderer {
    node_bin: String,
    format: String,
}

impl NodeReportRenderer {
    pub fn new(node_bin: impl Into<String>) -> Self {
        Self {
            node_bin: node_bin.into(),
            format: "html".to_string(),
        }
    }
}

#[async_trait]
impl ReportRenderer for NodeReportRenderer {
    async fn render(&self, result: &JsonValue) -> AppResult<String> {
        let payload = serde_json::to_vec(result).map_err(|e| AuditError::RenderFailed {
            reason: format!("序列化审计结果失败: {}", e),
        })?;

        let mut child = Command::new(&self.node_bin)
            .arg("-e")
            .arg(GENERATOR_SCRIPT)
            .arg(&self.format)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AuditError::SpawnFailed {
                program: self.node_bin.clone(),
                source: e,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| AuditError::RenderFailed {
            reason: "无法获取渲染进程的 stdin".to_string(),
        })?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AuditError::RenderFailed {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AuditError::RenderFailed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(AuditError::RenderFailed {
                    reason: format!("写入渲染进程失败: {}", e),
                }
                .into())
            }
            Err(e) => {
                return Err(AuditError::RenderFailed {
                    reason: e.to_string(),
                }
                .into())
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_node_is_spawn_error() {
        let renderer = NodeReportRenderer::new("node-binary-that-does-not-exist");
        let err = renderer.render(&json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Audit(AuditError::SpawnFailed { .. })
        ));
    }

    #[tokio::test]
    #[ignore] // 需要 node 和 lighthouse: cargo test -- --ignored
    async fn test_render_with_lighthouse() {
        let renderer = NodeReportRenderer::new("node");
        let html = renderer
            .render(&json!({ "lighthouseVersion": "12.0.0", "categories": {}, "audits": {} }))
            .await
            .expect("渲染失败");
        assert!(html.contains("<html"));
    }
}
