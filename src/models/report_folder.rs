use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

pub const JSON_DIR: &str = "json";
pub const HTML_DIR: &str = "html";
pub const INDEX_FILE: &str = "index.html";

/// 一次运行的报告目录: `<root>/<id>/{json,html,index.html}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFolder {
    id: String,
    path: PathBuf,
}

impl ReportFolder {
    pub fn new(reports_root: impl AsRef<Path>, id: impl Into<String>) -> Self {
        let id = id.into();
        let path = reports_root.as_ref().join(&id);
        Self { id, path }
    }

    /// 以当前 UTC 时间 (ISO 8601，毫秒精度) 命名的新目录
    pub fn timestamped(reports_root: impl AsRef<Path>) -> Self {
        let id = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self::new(reports_root, id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn json_dir(&self) -> PathBuf {
        self.path.join(JSON_DIR)
    }

    pub fn html_dir(&self) -> PathBuf {
        self.path.join(HTML_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.path.join(INDEX_FILE)
    }

    /// `json/<name>.json`
    pub fn json_path(&self, file_stem: &str) -> PathBuf {
        self.json_dir().join(format!("{}.json", file_stem))
    }

    /// 与 json 文件同名的 html 文件名
    ///
    /// # 参数
    /// - `json_file_name`: json/ 下的文件名，可能不是合法 UTF-8
    ///
    /// # 返回
    /// 去掉结尾的 `.json` 后加上 `.html`，其余字节保持不变
    pub fn html_file_name(json_file_name: impl AsRef<OsStr>) -> OsString {
        let name = json_file_name.as_ref();
        match name.to_str() {
            Some(text) => {
                let stem = text.strip_suffix(".json").unwrap_or(text);
                OsString::from(format!("{}.html", stem))
            }
            // 非 UTF-8 的名字不会是 ".json" 本身，按扩展名替换即可
            None => Path::new(name).with_extension("html").into_os_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let folder = ReportFolder::new("reports", "2025-01-23T11:26:32.100Z");
        assert_eq!(folder.path(), Path::new("reports/2025-01-23T11:26:32.100Z"));
        assert_eq!(folder.json_path("home"), folder.path().join("json").join("home.json"));
        assert_eq!(folder.html_dir(), folder.path().join("html"));
        assert_eq!(folder.index_path(), folder.path().join("index.html"));
    }

    #[test]
    fn test_timestamped_id_is_iso() {
        let folder = ReportFolder::timestamped("reports");
        assert!(folder.id().ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(folder.id()).is_ok());
    }

    #[test]
    fn test_html_file_name_replaces_suffix_only() {
        assert_eq!(ReportFolder::html_file_name("home.json"), "home.html");
        assert_eq!(ReportFolder::html_file_name("my.json.page.json"), "my.json.page.html");
    }

    #[test]
    fn test_bare_json_name_maps_to_bare_html() {
        assert_eq!(ReportFolder::html_file_name(".json"), ".html");
        assert_eq!(ReportFolder::html_file_name("a.b.json"), "a.b.html");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_keeps_its_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let html = ReportFolder::html_file_name(OsStr::from_bytes(b"caf\xe9.json"));
        assert_eq!(html.as_bytes(), b"caf\xe9.html");
    }
}
