use anyhow::Result;
use lotwatch::services::{forwarder, SharedOptions};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Forwards redis pattern subscription messages as lot state notifications.")]
struct MainOptions {
    #[structopt(flatten)]
    shared_options: SharedOptions,

    #[structopt(flatten)]
    forwarder_options: forwarder::Options,
}

#[tokio::main]
async fn main() -> Result<()> {
    let main_options = MainOptions::from_args();
    let shared_options = main_options.shared_options;

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&shared_options.log)
        .init();

    log::info!("lotwatch {}", env!("CARGO_PKG_VERSION"));

    forwarder::run(shared_options, main_options.forwarder_options).await
}
