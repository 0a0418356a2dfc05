use anyhow::Result;
use clap::Parser;

use score_recorder::cli::Cli;
use score_recorder::config::Config;
use score_recorder::logger;
use score_recorder::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 解析并校验命令行参数
    let options = Cli::parse().into_run_options()?;

    // 加载配置
    let config = Config::load()?;

    // 初始化并运行应用
    App::initialize(config, options)?.run().await?;

    Ok(())
}
