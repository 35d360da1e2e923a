pub mod audit_result;
pub mod loaders;
pub mod page;
pub mod report_folder;
pub mod summary;

pub use audit_result::{AuditEntry, AuditResult, Category};
pub use loaders::{load_pages, parse_pages};
pub use page::PageDescriptor;
pub use report_folder::ReportFolder;
pub use summary::{ScoreBand, ScoreBands, SummaryRow};
