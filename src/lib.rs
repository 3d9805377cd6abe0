pub mod config;
pub mod dispatcher;
pub mod error;
pub mod prelude;
pub mod server;
pub mod status_relay;
pub mod types;
pub mod validator;

pub use prelude::*;

use tracing_subscriber::filter::LevelFilter;

pub fn init_tracing_subscriber(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .without_time()
        .with_ansi(false)
        .init();
}
