use std::process;
use std::sync::Arc;

use tink_gateway::config::{AppState, Config};
use tink_gateway::{logger, server};

fn main() {
    // Refuses to start without the upstream OAuth credentials.
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main(cfg)) {
        eprintln!("{e}");
        process::exit(1);
    }
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(AppState::new(cfg));

    logger::log_server_start(&addr, &state.config);
    server::serve(listener, state).await;
    Ok(())
}
