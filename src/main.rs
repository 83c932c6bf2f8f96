use anyhow::Result;
use tile_quiz::utils::logging;
use tile_quiz::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：第一个参数为 TOML 文件路径，否则读取环境变量
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_toml_file(&path).await?,
        None => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let _report = App::initialize(config)?.run().await?;

    Ok(())
}
