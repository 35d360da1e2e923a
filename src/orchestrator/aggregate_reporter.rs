//! 汇总报告生成器 - 编排层
//!
//! 扫描 json/ 目录，逐个渲染详细报告并计算汇总行，最后写出 index.html。
//! 不做重试；任何读写或解析错误都会中止本次汇总，且不会写出 index.html。

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{Config, MetricDisplay, RendererKind};
use crate::error::{AppError, AppResult, ReportError};
use crate::infrastructure::{NodeReportRenderer, ReportRenderer};
use crate::models::{AuditResult, ReportFolder, ScoreBands, SummaryRow};
use crate::services::{render_index, summarize, BuiltinRenderer};
use crate::utils::{ensure_dir, write_file};

pub struct AggregateReporter {
    reports_root: PathBuf,
    renderer: Arc<dyn ReportRenderer>,
    bands: ScoreBands,
    metric_display: MetricDisplay,
}

impl AggregateReporter {
    pub fn new(
        reports_root: impl AsRef<Path>,
        renderer: Arc<dyn ReportRenderer>,
        bands: ScoreBands,
        metric_display: MetricDisplay,
    ) -> Self {
        Self {
            reports_root: reports_root.as_ref().to_path_buf(),
            renderer,
            bands,
            metric_display,
        }
    }

    /// 按配置选择渲染器
    pub fn from_config(config: &Config) -> Self {
        let renderer: Arc<dyn ReportRenderer> = match config.renderer {
            RendererKind::Lighthouse => Arc::new(NodeReportRenderer::new(config.node_bin.clone())),
            RendererKind::Builtin => Arc::new(BuiltinRenderer::new(config.score_bands)),
        };
        Self::new(
            &config.reports_root,
            renderer,
            config.score_bands,
            config.metric_display,
        )
    }

    /// 汇总 `<reports_root>/<folder_id>`，返回写入索引页的各行
    pub async fn aggregate(&self, folder_id: &str) -> AppResult<Vec<SummaryRow>> {
        let folder = ReportFolder::new(&self.reports_root, folder_id);
        let json_dir = folder.json_dir();
        if !json_dir.is_dir() {
            return Err(ReportError::FolderNotFound { path: json_dir }.into());
        }

        ensure_dir(&folder.html_dir()).await?;

        let files = list_json_files(&json_dir).await?;
        info!("📁 找到 {} 个审计结果: {}", files.len(), json_dir.display());

        let mut rows = Vec::with_capacity(files.len());
        for file_name in &files {
            rows.push(self.process_file(&folder, file_name).await?);
        }

        let index_path = folder.index_path();
        write_file(&index_path, render_index(&rows, &self.bands)).await?;
        info!("✅ 汇总报告已生成: {}", index_path.display());

        Ok(rows)
    }

    async fn process_file(
        &self,
        folder: &ReportFolder,
        file_name: &OsStr,
    ) -> AppResult<SummaryRow> {
        let json_path = folder.json_dir().join(file_name);
        let raw = fs::read_to_string(&json_path)
            .await
            .map_err(|e| AppError::file_read_failed(&json_path, e))?;

        let value: JsonValue =
            serde_json::from_str(&raw).map_err(|e| AppError::parse_failed(&json_path, e))?;
        let result =
            AuditResult::from_value(&value).map_err(|e| AppError::parse_failed(&json_path, e))?;

        let html_name = ReportFolder::html_file_name(file_name);
        let html_path = folder.html_dir().join(&html_name);
        let html = self.renderer.render(&value).await?;
        write_file(&html_path, html).await?;
        info!("✅ HTML 已生成: {}", html_path.display());

        let row = summarize(&html_name.to_string_lossy(), &result, self.metric_display);
        debug!(
            "{}: 性能 {} 无障碍 {} 最佳实践 {} SEO {} 大小 {} 时间 {}",
            row.file_name,
            row.performance,
            row.accessibility,
            row.best_practices,
            row.seo,
            row.page_size,
            row.load_time
        );
        Ok(row)
    }
}

/// 列出目录中的 .json 文件，保持目录返回的顺序
///
/// # 参数
/// - `dir`: json/ 目录
///
/// # 返回
/// 原始文件名 (不做 UTF-8 转换)，符号链接按其指向的文件判断
async fn list_json_files(dir: &Path) -> AppResult<Vec<OsString>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| AppError::file_read_failed(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(dir, e))?
    {
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(".json") {
            continue;
        }
        match fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => files.push(name),
            Ok(_) => debug!("跳过非文件条目: {}", entry.path().display()),
            // 断开的链接留给读取步骤报错
            Err(_) => files.push(name),
        }
    }
    Ok(files)
}
