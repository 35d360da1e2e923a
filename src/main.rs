use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use lighthouse_batch::{logger, models, App, Config};

#[derive(Parser, Debug)]
#[command(name = "lighthouse_batch", version, about = "批量运行 Lighthouse 并生成汇总报告")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 审计页面列表中的所有页面并生成汇总报告（默认）
    Run {
        /// 页面列表文件 (.json / .toml)，默认读取 PAGES_FILE
        #[arg(short, long)]
        pages: Option<PathBuf>,
    },
    /// 只为已有的报告目录重新生成 html/ 和 index.html
    Aggregate {
        /// reports/ 下的目录名（时间戳）
        folder_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    let pages_file = PathBuf::from(&config.pages_file);
    let app = App::initialize(config)?;

    match cli.command.unwrap_or(Command::Run { pages: None }) {
        Command::Run { pages } => {
            let pages_path = pages.unwrap_or(pages_file);
            let pages = models::load_pages(&pages_path).await?;
            let outcome = app.run(&pages).await;
            if !outcome.is_success() {
                bail!(
                    "批量审计未完全成功: {} 个页面失败{}",
                    outcome.failures.len(),
                    if outcome.aggregation_error.is_some() { "，汇总失败" } else { "" }
                );
            }
        }
        Command::Aggregate { folder_id } => {
            let rows = app.aggregate(&folder_id).await?;
            tracing::info!("✓ 共汇总 {} 个页面", rows.len());
        }
    }

    Ok(())
}
