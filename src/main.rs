use clap::Parser;

use catroom::config::SimConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("catroom starting up");

    let config = SimConfig::parse();
    if let Err(e) = catroom::app::run(config) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
