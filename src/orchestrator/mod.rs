//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_runner` - 批量审计器
//! - 按顺序遍历页面列表（Vec<PageDescriptor>）
//! - 每个页面交给 workflow::PageFlow，失败只记录不中断
//! - 全部结束后调用一次汇总
//!
//! ### `aggregate_reporter` - 汇总报告生成器
//! - 扫描 json/，渲染 html/ 下的详细报告
//! - 计算汇总行并写出 index.html
//!
//! ## 层次关系
//!
//! ```text
//! batch_runner (处理 Vec<PageDescriptor>)
//!     ↓
//! workflow::PageFlow (处理单个页面)
//!     ↓
//! browser / infrastructure (Chrome、lighthouse、node)
//!
//! aggregate_reporter
//!     ↓
//! services (汇总计算、索引页、内置渲染器)
//! ```

pub mod aggregate_reporter;
pub mod batch_runner;

pub use aggregate_reporter::AggregateReporter;
pub use batch_runner::{App, BatchOutcome, PageFailure};
