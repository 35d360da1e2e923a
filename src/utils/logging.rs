//! 日志工具模块
//!
//! 批量审计过程中的横幅和统计输出

use tracing::{error, info, warn};

use crate::config::Config;
use crate::orchestrator::BatchOutcome;
use crate::workflow::PageCtx;

const BANNER_WIDTH: usize = 60;
/// 失败原因在汇总中最多显示的字符数
const REASON_PREVIEW_CHARS: usize = 200;

fn heavy_rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn light_rule() -> String {
    "─".repeat(BANNER_WIDTH)
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 本次运行的配置，只展示设备和视口
/// - `total_pages`: 页面列表长度
pub fn log_startup(config: &Config, total_pages: usize) {
    info!("{}", heavy_rule());
    info!("🚀 Lighthouse 批量审计启动");
    info!(
        "🖥️ 设备: {} | 视口: {}x{}",
        config.form_factor, config.viewport_width, config.viewport_height
    );
    info!("📋 待审计页面: {} 个 (逐个顺序执行)", total_pages);
    info!("{}", heavy_rule());
}

/// 记录单个页面开始
pub fn log_page_start(ctx: &PageCtx, url: &str) {
    info!("\n{}", light_rule());
    info!("{} 🔍 开始审计: {}", ctx, url);
}

/// 打印批量审计结束后的统计
///
/// # 参数
/// - `outcome`: 批量运行结果，包含失败列表和汇总状态
pub fn print_final_stats(outcome: &BatchOutcome) {
    let succeeded = outcome.succeeded.len();
    let failed = outcome.failures.len();

    info!("\n{}", heavy_rule());
    info!(
        "📊 批量审计结束 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", succeeded, succeeded + failed);
    if failed == 0 {
        info!("❌ 失败: 0");
    } else {
        warn!("❌ 失败: {}", failed);
        for failure in &outcome.failures {
            warn!(
                "   - {} ({}): {}",
                failure.page_name,
                failure.url,
                truncate_text(&failure.reason, REASON_PREVIEW_CHARS)
            );
        }
    }
    match &outcome.aggregation_error {
        Some(reason) => error!("📄 汇总报告生成失败: {}", reason),
        None if outcome.folder.index_path().is_file() => {
            info!("📄 汇总报告: {}", outcome.folder.index_path().display())
        }
        None => info!("📄 未生成汇总报告"),
    }
    info!("{}", heavy_rule());
}

/// 按字符数截断文本，超出部分用 "..." 表示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_chars`: 保留的最大字符数 (不是字节数)
///
/// # 返回
/// 未超出时原样返回
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
