//! 页面处理上下文
//!
//! 封装"我正在处理第几个页面"这一信息

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 页面序号（从1开始，仅用于日志显示）
    pub page_index: usize,
    /// 页面总数
    pub total: usize,
    /// 去除空白后的页面名称
    pub page_name: String,
}

impl PageCtx {
    pub fn new(page_index: usize, total: usize, page_name: impl Into<String>) -> Self {
        Self {
            page_index,
            total,
            page_name: page_name.into(),
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[页面 {}/{} {}]", self.page_index, self.total, self.page_name)
    }
}
