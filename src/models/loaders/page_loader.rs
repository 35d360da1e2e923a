use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::page::PageDescriptor;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 页面列表: `[[pages]]`
#[derive(Debug, Deserialize)]
struct PageList {
    #[serde(default)]
    pages: Vec<PageDescriptor>,
}

/// 从 .json 或 .toml 文件加载页面列表
///
/// # 参数
/// - `path`: 页面列表文件路径
///
/// # 返回
/// 按文件中的顺序返回页面，任何一项不合法都会返回错误
pub async fn load_pages(path: &Path) -> AppResult<Vec<PageDescriptor>> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    let pages = parse_pages(path, &content)?;
    tracing::info!(
        "成功加载 {} 个页面: {}",
        pages.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(pages)
}

/// 按扩展名解析页面列表并校验每一项
pub fn parse_pages(path: &Path, content: &str) -> AppResult<Vec<PageDescriptor>> {
    let pages: Vec<PageDescriptor> = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content).map_err(|e| FileError::JsonParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?,
        Some("toml") => {
            toml::from_str::<PageList>(content)
                .map_err(|e| FileError::TomlParseFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .pages
        }
        _ => {
            return Err(FileError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
            .into())
        }
    };

    for (idx, page) in pages.iter().enumerate() {
        page.check().map_err(|reason| ConfigError::InvalidPage {
            index: idx + 1,
            reason,
        })?;
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_list() {
        let content = r#"[
            {"url": "https://example.com", "pageName": "home "},
            {"url": "https://example.com/about", "pageName": "about"}
        ]"#;
        let pages = parse_pages(Path::new("urls.json"), content).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].file_stem(), "home");
        assert_eq!(pages[1].url, "https://example.com/about");
    }

    #[test]
    fn test_parse_toml_list() {
        let content = r#"
            [[pages]]
            url = "https://example.com"
            page_name = "home"

            [[pages]]
            url = "https://example.com/about"
            pageName = "about"
        "#;
        let pages = parse_pages(Path::new("pages.toml"), content).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_name, "about");
    }

    #[test]
    fn test_invalid_entry_reports_index() {
        let content = r#"[{"url": "https://example.com", "pageName": "  "}]"#;
        let err = parse_pages(Path::new("urls.json"), content).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::InvalidPage { index: 1, .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_pages(Path::new("urls.yaml"), "").unwrap_err();
        assert!(matches!(err, AppError::File(FileError::UnsupportedFormat { .. })));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_pages(Path::new("does/not/exist.json")).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
