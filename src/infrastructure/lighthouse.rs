//! Lighthouse 审计引擎 - 基础设施层
//!
//! 只负责"对一个 URL 跑一次审计并拿回 JSON"，不关心结果存到哪里

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::browser::BrowserEndpoint;
use crate::config::{AuditOptions, FormFactor};
use crate::error::{AppResult, AuditError};

/// 外部审计引擎
#[async_trait]
pub trait AuditEngine: Send + Sync {
    /// 审计单个页面，返回原始的结构化结果文本
    async fn audit(
        &self,
        url: &str,
        endpoint: &BrowserEndpoint,
        options: &AuditOptions,
    ) -> AppResult<String>;
}

/// 以子进程方式调用 lighthouse CLI
#[derive(Debug, Clone)]
pub struct LighthouseCli {
    program: String,
}

impl LighthouseCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 构造命令行参数，结果写到 stdout
    pub fn args(url: &str, endpoint: &BrowserEndpoint, options: &AuditOptions) -> Vec<String> {
        let mobile = options.form_factor == FormFactor::Mobile;
        vec![
            url.to_string(),
            format!("--port={}", endpoint.port),
            format!("--output={}", options.output_format.as_str()),
            "--output-path=stdout".to_string(),
            format!("--form-factor={}", options.form_factor),
            format!("--screenEmulation.mobile={}", mobile),
            format!("--screenEmulation.width={}", options.viewport_width),
            format!("--screenEmulation.height={}", options.viewport_height),
            "--screenEmulation.deviceScaleFactor=1".to_string(),
            "--screenEmulation.disabled=false".to_string(),
            format!("--max-wait-for-load={}", options.max_wait_for_load_ms),
            "--no-enable-error-reporting".to_string(),
            "--quiet".to_string(),
        ]
    }
}

impl Default for LighthouseCli {
    fn default() -> Self {
        Self::new("lighthouse")
    }
}

#[async_trait]
impl AuditEngine for LighthouseCli {
    async fn audit(
        &self,
        url: &str,
        endpoint: &BrowserEndpoint,
        options: &AuditOptions,
    ) -> AppResult<String> {
        let args = Self::args(url, endpoint, options);
        debug!("执行: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AuditError::SpawnFailed {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(AuditError::EngineFailed {
                url: url.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let raw = String::from_utf8_lossy(&output.stdout).into_owned();
        serde_json::from_str::<JsonValue>(&raw).map_err(|e| AuditError::MalformedOutput {
            url: url.to_string(),
            source: e,
        })?;

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn endpoint() -> BrowserEndpoint {
        BrowserEndpoint {
            port: 9222,
            websocket_url: "ws://127.0.0.1:9222/devtools/browser/x".to_string(),
        }
    }

    #[test]
    fn test_desktop_args() {
        let options = Config::default().audit_options();
        let args = LighthouseCli::args("https://example.com", &endpoint(), &options);
        assert_eq!(args[0], "https://example.com");
        for expected in [
            "--port=9222",
            "--output=json",
            "--output-path=stdout",
            "--form-factor=desktop",
            "--screenEmulation.mobile=false",
            "--screenEmulation.width=1920",
            "--screenEmulation.height=1080",
            "--max-wait-for-load=120000",
        ] {
            assert!(args.iter().any(|a| a == expected), "缺少参数 {}", expected);
        }
    }

    #[test]
    fn test_mobile_args() {
        let options = AuditOptions {
            form_factor: FormFactor::Mobile,
            viewport_width: 412,
            viewport_height: 823,
            ..Config::default().audit_options()
        };
        let args = LighthouseCli::args("https://example.com", &endpoint(), &options);
        assert!(args.iter().any(|a| a == "--screenEmulation.mobile=true"));
        assert!(args.iter().any(|a| a == "--form-factor=mobile"));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let engine = LighthouseCli::new("lighthouse-binary-that-does-not-exist");
        let err = engine
            .audit("https://example.com", &endpoint(), &Config::default().audit_options())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Audit(AuditError::SpawnFailed { .. })
        ));
    }
}
