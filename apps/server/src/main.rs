use anyhow::Context;
use hhub::domain::config::ApiConfig;
use hhub::kernel::config::load_config;
use hhub_logger::{LogFormat, Logger};
use hhub_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let logging = &cfg.logging;
    let mut logger = Logger::builder(env!("CARGO_PKG_NAME"))
        .level_name(&logging.level)?
        .rotation_name(&logging.rotation)?
        .max_files(logging.max_files)
        .console(logging.console)
        .format(if logging.json { LogFormat::Json } else { LogFormat::Compact });
    if let Some(filter) = &logging.filter {
        logger = logger.env_filter(filter);
    }
    if let Some(path) = &logging.path {
        logger = logger.path(path);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
