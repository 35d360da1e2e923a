use std::path::{Path, PathBuf};

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 审计引擎错误
    #[error("审计错误: {0}")]
    Audit(#[from] AuditError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 汇总报告错误
    #[error("报告错误: {0}")]
    Report(#[from] ReportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {reason}")]
    ConfigurationFailed { reason: String },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 无法从 websocket 地址中解析调试端口
    #[error("无法解析浏览器调试地址: {address}")]
    EndpointUnresolved { address: String },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {source}")]
    CloseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 审计引擎错误
#[derive(Debug, Error)]
pub enum AuditError {
    /// 无法启动审计进程
    #[error("无法启动 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 审计进程以非零状态退出
    #[error("Lighthouse 审计 {url} 失败 (状态: {status}): {stderr}")]
    EngineFailed {
        url: String,
        status: String,
        stderr: String,
    },
    /// 审计输出不是合法的 JSON
    #[error("Lighthouse 对 {url} 的输出不是合法 JSON: {source}")]
    MalformedOutput {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// 渲染器失败
    #[error("渲染详细报告失败: {reason}")]
    RenderFailed { reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({}): {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 页面列表 JSON 解析失败
    #[error("JSON解析失败 ({}): {source}", path.display())]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// 不支持的页面列表格式
    #[error("不支持的页面列表格式: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
    /// 其他 IO 错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 汇总报告错误
#[derive(Debug, Error)]
pub enum ReportError {
    /// 审计结果文件内容不合法
    #[error("审计结果解析失败 ({}): {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// 报告目录不存在
    #[error("报告目录不存在: {}", path.display())]
    FolderNotFound { path: PathBuf },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置取值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
    /// 页面描述不合法
    #[error("第 {index} 个页面描述不合法: {reason}")]
    InvalidPage { index: usize, reason: String },
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::Io(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建目录失败错误
    pub fn create_dir_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建审计结果解析错误
    pub fn parse_failed(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        AppError::Report(ReportError::ParseFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 是否为审计结果解析错误
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AppError::Report(ReportError::ParseFailed { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_detected() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = AppError::parse_failed("reports/x/json/home.json", source);
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("home.json"));
    }

    #[test]
    fn test_io_error_converts_to_file_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "磁盘已满").into();
        assert!(matches!(err, AppError::File(FileError::Io(_))));
        assert!(!err.is_parse_error());
    }
}
