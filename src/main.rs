use anyhow::Result;
use writer_control::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = recv_service_config(std::env::args().collect())?;

    init_tracing_subscriber(config.debug);

    let state = AppState::from_config(&config)?;
    start_server(router(state), config.listen_addr).await
}
