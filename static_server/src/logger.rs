//! `env_logger` with a default filter when `RUST_LOG` is unset.

use env_logger::Env;

const DEFAULT_FILTER: &str = "info,actix_web=info";

pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)).init();
}
