use anyhow::Result;
use bloom_classify::config::Config;
use bloom_classify::orchestrator::App;
use bloom_classify::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
