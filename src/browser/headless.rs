use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{BrowserEndpoint, BrowserHandle, BrowserLauncher};
use crate::error::{AppResult, BrowserError};

/// 通过 chromiumoxide 启动无头 Chrome
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    chrome_executable: Option<PathBuf>,
    window_size: Option<(u32, u32)>,
}

impl ChromeLauncher {
    pub fn new(chrome_executable: Option<impl Into<PathBuf>>) -> Self {
        Self {
            chrome_executable: chrome_executable.map(Into::into),
            window_size: None,
        }
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    fn browser_config(&self) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
            "--no-sandbox",            // 容器内运行时需要
            "--disable-gpu",
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);

        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if let Some((width, height)) = self.window_size {
            builder = builder.window_size(width, height);
        }

        builder.build().map_err(|reason| {
            error!("配置无头浏览器失败: {}", reason);
            BrowserError::ConfigurationFailed { reason }
        })
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> AppResult<Box<dyn BrowserHandle>> {
        debug!("🚀 启动无头浏览器...");
        let config = self.browser_config()?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("启动无头浏览器失败: {}", e);
            BrowserError::LaunchFailed {
                source: Box::new(e),
            }
        })?;

        // 在后台处理浏览器事件
        let events = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let endpoint = match BrowserEndpoint::from_websocket_url(browser.websocket_address()) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                // 端口拿不到时浏览器也不能留着
                let mut session = ChromeSession {
                    browser,
                    events,
                    endpoint: BrowserEndpoint {
                        port: 0,
                        websocket_url: String::new(),
                    },
                };
                let _ = session.shutdown().await;
                return Err(e.into());
            }
        };

        info!("✓ 无头浏览器已启动 (调试端口 {})", endpoint.port);
        Ok(Box::new(ChromeSession {
            browser,
            events,
            endpoint,
        }))
    }
}

/// 一个已启动的 Chrome 实例，drop 时 chromiumoxide 会杀掉子进程
pub struct ChromeSession {
    browser: Browser,
    events: JoinHandle<()>,
    endpoint: BrowserEndpoint,
}

impl ChromeSession {
    async fn shutdown(&mut self) -> Option<BrowserError> {
        let mut failure = None;
        if let Err(e) = self.browser.close().await {
            warn!("正常关闭浏览器失败，改为强制结束: {}", e);
            failure = Some(BrowserError::CloseFailed {
                source: Box::new(e),
            });
            if let Some(Err(e)) = self.browser.kill().await {
                error!("强制结束浏览器失败: {}", e);
            }
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器进程退出失败: {}", e);
        }
        self.events.abort();
        failure
    }
}

#[async_trait]
impl BrowserHandle for ChromeSession {
    fn endpoint(&self) -> &BrowserEndpoint {
        &self.endpoint
    }

    async fn close(self: Box<Self>) -> AppResult<()> {
        let mut session = *self;
        match session.shutdown().await {
            Some(e) => Err(e.into()),
            None => {
                debug!("浏览器已关闭 (端口 {})", session.endpoint.port);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_settings() {
        let launcher = ChromeLauncher::new(None::<PathBuf>).with_window_size(1920, 1080);
        assert_eq!(launcher.window_size, Some((1920, 1080)));
        assert!(launcher.chrome_executable.is_none());
    }

    #[tokio::test]
    #[ignore] // 需要本机安装 Chrome: cargo test -- --ignored
    async fn test_launch_and_close() {
        let _ = tracing_subscriber::fmt::try_init();

        let launcher = ChromeLauncher::default();
        let handle = launcher.launch().await.expect("启动浏览器失败");
        assert!(handle.endpoint().port > 0);
        handle.close().await.expect("关闭浏览器失败");
    }
}
