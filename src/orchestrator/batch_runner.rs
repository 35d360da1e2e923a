//! 批量审计器 - 编排层
//!
//! ## 职责
//!
//! 1. **顺序审计**：按页面列表顺序逐个审计，同一时间只持有一个浏览器
//! 2. **失败隔离**：单个页面失败只记录，不影响后续页面
//! 3. **汇总**：全部页面结束后调用一次汇总报告生成器
//!
//! 不并发：外部审计引擎和浏览器是否支持多实例并行没有验证过。

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::browser::{BrowserLauncher, ChromeLauncher};
use crate::config::{AuditOptions, Config};
use crate::error::{AppError, AppResult, ReportError};
use crate::infrastructure::{AuditEngine, LighthouseCli};
use crate::models::{PageDescriptor, ReportFolder, SummaryRow};
use crate::orchestrator::AggregateReporter;
use crate::utils::logging::{log_page_start, log_startup, print_final_stats};
use crate::workflow::{PageCtx, PageFlow};

/// 单个页面的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page_name: String,
    pub url: String,
    pub reason: String,
}

/// 一次批量运行的结果
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub folder: ReportFolder,
    /// 成功保存的 json 文件
    pub succeeded: Vec<PathBuf>,
    pub failures: Vec<PageFailure>,
    /// 汇总成功时的索引行
    pub summary: Vec<SummaryRow>,
    pub aggregation_error: Option<String>,
}

impl BatchOutcome {
    /// 所有页面都审计成功且汇总成功
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.aggregation_error.is_none()
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    audit_options: AuditOptions,
    launcher: Arc<dyn BrowserLauncher>,
    engine: Arc<dyn AuditEngine>,
    reporter: AggregateReporter,
}

impl App {
    /// 使用真实的 Chrome 和 lighthouse 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let launcher = ChromeLauncher::new(config.chrome_executable.as_deref())
            .with_window_size(config.viewport_width, config.viewport_height);
        let engine = LighthouseCli::new(config.lighthouse_bin.clone());
        let reporter = AggregateReporter::from_config(&config);
        Ok(Self::with_components(
            config,
            Arc::new(launcher),
            Arc::new(engine),
            reporter,
        ))
    }

    /// 注入浏览器启动器、审计引擎和汇总器
    pub fn with_components(
        config: Config,
        launcher: Arc<dyn BrowserLauncher>,
        engine: Arc<dyn AuditEngine>,
        reporter: AggregateReporter,
    ) -> Self {
        let audit_options = config.audit_options();
        Self {
            config,
            audit_options,
            launcher,
            engine,
            reporter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 在新的时间戳目录下运行整批审计
    pub async fn run(&self, pages: &[PageDescriptor]) -> BatchOutcome {
        let folder = ReportFolder::timestamped(&self.config.reports_root);
        self.run_in(folder, pages).await
    }

    /// 在指定目录下运行整批审计
    pub async fn run_in(&self, folder: ReportFolder, pages: &[PageDescriptor]) -> BatchOutcome {
        log_startup(&self.config, pages.len());
        info!("📁 报告目录: {}", folder.path().display());

        let mut outcome = BatchOutcome {
            folder,
            succeeded: Vec::new(),
            failures: Vec::new(),
            summary: Vec::new(),
            aggregation_error: None,
        };

        if pages.is_empty() {
            warn!("⚠️ 页面列表为空，没有需要审计的页面");
        }

        let flow = PageFlow::new(
            self.launcher.as_ref(),
            self.engine.as_ref(),
            &self.audit_options,
        );

        for (idx, page) in pages.iter().enumerate() {
            let ctx = PageCtx::new(idx + 1, pages.len(), page.file_stem());
            log_page_start(&ctx, &page.url);

            match flow.run(&outcome.folder, page, &ctx).await {
                Ok(path) => outcome.succeeded.push(path),
                Err(e) => {
                    error!("{} ❌ 审计失败: {}", ctx, e);
                    outcome.failures.push(PageFailure {
                        page_name: ctx.page_name.clone(),
                        url: page.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // 汇总总是执行一次；空批次下没有 json/ 目录属于正常情况
        match self.reporter.aggregate(outcome.folder.id()).await {
            Ok(rows) => outcome.summary = rows,
            Err(AppError::Report(ReportError::FolderNotFound { path })) if pages.is_empty() => {
                info!("📭 没有审计结果 ({})，跳过汇总报告", path.display());
            }
            Err(e) => {
                error!("❌ 汇总报告生成失败: {}", e);
                outcome.aggregation_error = Some(e.to_string());
            }
        }

        print_final_stats(&outcome);
        outcome
    }

    /// 只汇总已有的报告目录
    pub async fn aggregate(&self, folder_id: &str) -> AppResult<Vec<SummaryRow>> {
        self.reporter.aggregate(folder_id).await
    }
}
