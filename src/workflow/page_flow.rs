//! 单个页面的审计流程 - 流程层
//!
//! 流程顺序：
//! 1. 确保报告目录存在（失败只记日志）
//! 2. 启动全新的浏览器
//! 3. 调用 Lighthouse 审计
//! 4. 保存 json/<pageName>.json
//! 5. 关闭浏览器（无论前面是否失败）

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::browser::{BrowserHandle, BrowserLauncher};
use crate::config::AuditOptions;
use crate::error::AppResult;
use crate::infrastructure::AuditEngine;
use crate::models::{PageDescriptor, ReportFolder};
use crate::utils::{ensure_dir, write_file};
use crate::workflow::page_ctx::PageCtx;

/// 单页审计流程
///
/// - 不持有浏览器，每次运行都向启动器要一个新的
/// - 浏览器在本流程内获取，也在本流程内释放
pub struct PageFlow<'a> {
    launcher: &'a dyn BrowserLauncher,
    engine: &'a dyn AuditEngine,
    options: &'a AuditOptions,
}

impl<'a> PageFlow<'a> {
    pub fn new(
        launcher: &'a dyn BrowserLauncher,
        engine: &'a dyn AuditEngine,
        options: &'a AuditOptions,
    ) -> Self {
        Self {
            launcher,
            engine,
            options,
        }
    }

    /// 审计一个页面
    ///
    /// # 参数
    /// - `folder`: 本次运行的报告目录
    /// - `page`: 待审计页面
    /// - `ctx`: 日志上下文
    ///
    /// # 返回
    /// 保存的 `json/<pageName>.json` 路径；失败时浏览器同样已被关闭
    pub async fn run(
        &self,
        folder: &ReportFolder,
        page: &PageDescriptor,
        ctx: &PageCtx,
    ) -> AppResult<PathBuf> {
        prepare_folder(folder, ctx).await;

        let handle = self.launcher.launch().await?;
        let audited = self.audit_and_save(handle.as_ref(), folder, page, ctx).await;

        if let Err(e) = handle.close().await {
            warn!("{} ⚠️ 关闭浏览器失败: {}", ctx, e);
        }

        audited
    }

    async fn audit_and_save(
        &self,
        handle: &dyn BrowserHandle,
        folder: &ReportFolder,
        page: &PageDescriptor,
        ctx: &PageCtx,
    ) -> AppResult<PathBuf> {
        debug!("{} 连接端口 {}", ctx, handle.endpoint().port);
        let raw = self
            .engine
            .audit(&page.url, handle.endpoint(), self.options)
            .await?;

        let json_path = folder.json_path(page.file_stem());
        write_file(&json_path, raw).await?;
        info!("{} ✅ 审计结果已保存: {}", ctx, json_path.display());
        Ok(json_path)
    }
}

/// 目录创建失败不中断流程，后续写文件时自然会失败
async fn prepare_folder(folder: &ReportFolder, ctx: &PageCtx) {
    if let Err(e) = ensure_dir(&folder.json_dir()).await {
        warn!("{} ⚠️ 创建报告目录失败: {}", ctx, e);
    }
}
