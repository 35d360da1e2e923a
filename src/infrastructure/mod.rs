//! 基础设施层：外部进程 (lighthouse、node) 的调用能力

pub mod lighthouse;
pub mod renderer;

pub use lighthouse::{AuditEngine, LighthouseCli};
pub use renderer::{NodeReportRenderer, ReportRenderer};
