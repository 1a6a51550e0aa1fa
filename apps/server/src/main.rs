use anyhow::Context;
use ncss::domain::config::ApiConfig;
use ncss::kernel::config::load_config;
use ncss_logger::Logger;
use ncss_server::Server;

#[ncss_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg: ApiConfig = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build()?.run().await
}
