use serde::{Deserialize, Serialize};

/// 待审计的页面
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageDescriptor {
    /// 页面地址
    pub url: String,
    /// 页面名称，同时作为报告文件名
    #[serde(rename = "pageName", alias = "page_name")]
    pub page_name: String,
}

impl PageDescriptor {
    pub fn new(url: impl Into<String>, page_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_name: page_name.into(),
        }
    }

    /// 去除首尾空白后的文件名
    pub fn file_stem(&self) -> &str {
        self.page_name.trim()
    }

    /// 校验页面描述，返回不合法的原因
    pub fn check(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("url 为空".to_string());
        }
        let stem = self.file_stem();
        if stem.is_empty() {
            return Err(format!("{} 的 pageName 为空", self.url));
        }
        if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
            return Err(format!("pageName '{}' 不能作为文件名", stem));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_is_trimmed() {
        let page = PageDescriptor::new("https://example.com", "home ");
        assert_eq!(page.file_stem(), "home");
        assert!(page.check().is_ok());
    }

    #[test]
    fn test_check_rejects_bad_names() {
        assert!(PageDescriptor::new("https://example.com", "   ").check().is_err());
        assert!(PageDescriptor::new("https://example.com", "a/b").check().is_err());
        assert!(PageDescriptor::new("https://example.com", "..").check().is_err());
        assert!(PageDescriptor::new("", "home").check().is_err());
    }

    #[test]
    fn test_accepts_both_name_spellings() {
        let camel: PageDescriptor =
            serde_json::from_str(r#"{"url":"https://example.com","pageName":"home"}"#).unwrap();
        let snake: PageDescriptor =
            serde_json::from_str(r#"{"url":"https://example.com","page_name":"home"}"#).unwrap();
        assert_eq!(camel, snake);
    }
}
