pub mod detail_page;
pub mod index_page;
pub mod summary_service;

pub use detail_page::BuiltinRenderer;
pub use index_page::render_index;
pub use summary_service::summarize;
