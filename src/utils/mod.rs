pub mod fs_utils;
pub mod logging;

pub use fs_utils::{ensure_dir, write_file};
