//! 汇总计算 - 业务能力层
//!
//! 把一份审计结果归一化为索引页中的一行

use crate::config::MetricDisplay;
use crate::models::audit_result::{
    AuditResult, ACCESSIBILITY, BEST_PRACTICES, INTERACTIVE, PERFORMANCE, SEO, TOTAL_BYTE_WEIGHT,
};
use crate::models::SummaryRow;

pub const NOT_AVAILABLE: &str = "N/A";

/// 分类得分转百分制: round(score * 100)，缺失视为 0
pub fn percentage(score: Option<f64>) -> u8 {
    (score.unwrap_or(0.0) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 页面大小: 字节数 / 1024 / 1000，保留 3 位小数
///
/// # 参数
/// - `bytes`: total-byte-weight 的 numericValue，缺失视为 0
///
/// # 返回
/// 例如 `64000.0` → `"0.063"`
pub fn format_page_size(bytes: Option<f64>) -> String {
    to_fixed(finite_or_zero(bytes) / 1024.0 / 1000.0, 3)
}

/// 加载时间: 毫秒转秒，保留 1 位小数
///
/// # 参数
/// - `millis`: interactive 的 numericValue，缺失视为 0
///
/// # 返回
/// 例如 `1250.0` → `"1.3"`
pub fn format_load_time(millis: Option<f64>) -> String {
    to_fixed(finite_or_zero(millis) / 1000.0, 1)
}

/// 保留 `digits` 位小数，恰好落在中点时远离 0 进位
///
/// `format!` 对精确的中点采用银行家舍入 (1.25 → "1.2")，这里改为 "1.3"。
/// 是否为中点按 f64 的精确十进制展开判断，所以 1.005 这类本身略小于中点的值不进位。
fn to_fixed(value: f64, digits: usize) -> String {
    let rounded = format!("{:.*}", digits, value);

    // f64 的十进制展开最多 1074 位小数，1100 位足以精确表示
    let exact = format!("{:.1100}", value.abs());
    let exact = exact.trim_end_matches('0');
    let (int_part, frac_part) = match exact.split_once('.') {
        Some(parts) => parts,
        None => return rounded,
    };
    if frac_part.len() != digits + 1 || !frac_part.ends_with('5') {
        return rounded;
    }

    // 截掉末位的 5 后整体加 1
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..digits].bytes())
        .map(|b| b - b'0')
        .collect();
    let mut carry = true;
    for digit in kept.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        kept.insert(0, 1);
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|d| char::from(b'0' + d)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// 计算单个页面的汇总行
pub fn summarize(file_name: &str, result: &AuditResult, display: MetricDisplay) -> SummaryRow {
    let byte_weight = result.audit(TOTAL_BYTE_WEIGHT);
    let interactive = result.audit(INTERACTIVE);

    let (page_size, load_time) = match display {
        MetricDisplay::Recomputed => (
            format_page_size(byte_weight.and_then(|a| a.numeric_value)),
            format_load_time(interactive.and_then(|a| a.numeric_value)),
        ),
        MetricDisplay::Engine => (
            engine_display(byte_weight.and_then(|a| a.display_value.as_deref())),
            engine_display(interactive.and_then(|a| a.display_value.as_deref())),
        ),
    };

    SummaryRow {
        file_name: file_name.to_string(),
        performance: percentage(result.category_score(PERFORMANCE)),
        accessibility: percentage(result.category_score(ACCESSIBILITY)),
        best_practices: percentage(result.category_score(BEST_PRACTICES)),
        seo: percentage(result.category_score(SEO)),
        page_size,
        load_time,
    }
}

fn engine_display(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
