pub use crate::config::{ServiceConfig, recv_service_config};
pub use crate::dispatcher::{Dispatcher, Launcher, ProcessLauncher, SpawnError, build_invocation};
pub use crate::error::ControlError;
pub use crate::init_tracing_subscriber;
pub use crate::server::{AppState, router, start_server};
pub use crate::status_relay::{RelayError, StatusRelay, WRITER_NOT_RUNNING};
pub use crate::types::*;
pub use crate::validator::validate;
