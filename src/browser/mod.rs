//! 浏览器资源
//!
//! 每个页面使用一个全新的浏览器实例，审计结束 (无论成功与否) 后必须关闭。

pub mod headless;

use async_trait::async_trait;

use crate::error::{AppResult, BrowserError};

pub use headless::{ChromeLauncher, ChromeSession};

/// 浏览器调试端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEndpoint {
    /// DevTools 调试端口
    pub port: u16,
    /// DevTools websocket 地址
    pub websocket_url: String,
}

impl BrowserEndpoint {
    /// 从 `ws://127.0.0.1:9222/devtools/browser/<id>` 中解析端口
    pub fn from_websocket_url(url: &str) -> Result<Self, BrowserError> {
        let unresolved = || BrowserError::EndpointUnresolved {
            address: url.to_string(),
        };
        let rest = url
            .strip_prefix("ws://")
            .or_else(|| url.strip_prefix("wss://"))
            .ok_or_else(unresolved)?;
        let authority = rest.split('/').next().ok_or_else(unresolved)?;
        let port = authority
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse::<u16>().ok())
            .ok_or_else(unresolved)?;
        Ok(Self {
            port,
            websocket_url: url.to_string(),
        })
    }
}

/// 已启动的浏览器实例
#[async_trait]
pub trait BrowserHandle: Send {
    fn endpoint(&self) -> &BrowserEndpoint;

    /// 关闭浏览器并回收进程
    async fn close(self: Box<Self>) -> AppResult<()>;
}

/// 浏览器启动器
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> AppResult<Box<dyn BrowserHandle>>;
}
