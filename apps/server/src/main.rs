use anyhow::Context;
use evreg::domain::config::ApiConfig;
use evreg::kernel::config::load_config;
use evreg_logger::{LevelFilter, Logger};
use evreg_server::Server;

#[evreg_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let level: LevelFilter = cfg.logging.level.parse().context("Invalid logging.level")?;
    let _log = match &cfg.logging.directory {
        Some(directory) => Logger::builder(env!("CARGO_PKG_NAME"))
            .level(level)
            .directory(directory)
            .json(cfg.logging.json)
            .init()?,
        None => Logger::builder(env!("CARGO_PKG_NAME")).level(level).init()?,
    };

    Server::builder().config(cfg).build().await?.run().await
}
