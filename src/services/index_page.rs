//! 索引页渲染 - 业务能力层
//!
//! 输出只依赖汇总行，同样的输入总是得到同样的字节

use crate::models::{ScoreBands, SummaryRow};

/// 渲染汇总索引页
///
/// # 参数
/// - `rows`: 汇总行，按给定顺序输出
/// - `bands`: 得分等级阈值，决定每个得分单元格的 class
///
/// # 返回
/// 完整的 HTML 文档，相同输入输出完全一致
pub fn render_index(rows: &[SummaryRow], bands: &ScoreBands) -> String {
    let body: String = rows.iter().map(|row| render_row(row, bands)).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lighthouse 汇总报告</title>
    <style>{css}</style>
</head>
<body>
    <header>Lighthouse 汇总报告</header>
    <main>
        <table>
            <thead>
                <tr>
                    <th>页面</th>
                    <th>性能</th>
                    <th>无障碍</th>
                    <th>最佳实践</th>
                    <th>SEO</th>
                    <th>页面大小 (MB)</th>
                    <th>可交互时间 (秒)</th>
                </tr>
            </thead>
            <tbody>
{body}            </tbody>
        </table>
    </main>
    <footer>共 {count} 个页面 - Powered by Lighthouse</footer>
</body>
</html>
"#,
        css = inline_css(),
        body = body,
        count = rows.len(),
    )
}

fn render_row(row: &SummaryRow, bands: &ScoreBands) -> String {
    let name = html_escape(&row.file_name);
    format!(
        r#"                <tr>
                    <td><a href="html/{name}">{name}</a></td>
                    {performance}
                    {accessibility}
                    {best_practices}
                    {seo}
                    <td class="numeric">{page_size}</td>
                    <td class="numeric">{load_time}</td>
                </tr>
"#,
        name = name,
        performance = score_cell(row.performance, bands),
        accessibility = score_cell(row.accessibility, bands),
        best_practices = score_cell(row.best_practices, bands),
        seo = score_cell(row.seo, bands),
        page_size = html_escape(&row.page_size),
        load_time = html_escape(&row.load_time),
    )
}

fn score_cell(score: u8, bands: &ScoreBands) -> String {
    format!(
        r#"<td class="numeric {}">{}</td>"#,
        bands.classify(score).css_class(),
        score
    )
}

fn inline_css() -> &'static str {
    r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        header { font-size: 1.5rem; font-weight: bold; margin-bottom: 16px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { border: 1px solid #ccc; padding: 10px; text-align: left; }
        th { background-color: #f4f4f4; }
        tr:nth-child(even) { background-color: #f9f9f9; }
        td.numeric { text-align: right; }
        .good { color: green; }
        .average { color: orange; }
        .poor { color: red; }
        footer { margin-top: 16px; color: #777; font-size: 0.9rem; }
    "#
}

/// 转义 HTML 特殊字符
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
