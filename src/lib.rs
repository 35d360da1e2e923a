//! # Lighthouse Batch
//!
//! 批量运行 Lighthouse 并生成汇总报告
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Browser）
//! - `browser/` - 启动和关闭无头 Chrome，每个页面一个新实例
//! - `infrastructure/` - 调用 lighthouse CLI 审计、调用 node 渲染详细报告
//!
//! ### ② 业务能力层（Services）
//! - `summary_service` - 得分归一化、指标格式化
//! - `index_page` - 渲染汇总索引页
//! - `detail_page` - 内置的单页详细报告
//!
//! ### ③ 流程层（Workflow）
//! - `PageFlow` - 单个页面：建目录 → 启动浏览器 → 审计 → 保存 → 关闭浏览器
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_runner` - 顺序处理整批页面，记录失败
//! - `orchestrator/aggregate_reporter` - 扫描 json/，生成 html/ 和 index.html
//!
//! ## 输出目录
//!
//! ```text
//! reports/<ISO 时间戳>/
//! ├── json/<pageName>.json
//! ├── html/<pageName>.html
//! └── index.html
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{BrowserEndpoint, BrowserHandle, BrowserLauncher};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{AuditEngine, ReportRenderer};
pub use models::{PageDescriptor, ReportFolder, ScoreBand, ScoreBands, SummaryRow};
pub use orchestrator::{AggregateReporter, App, BatchOutcome, PageFailure};
pub use workflow::{PageCtx, PageFlow};
