use std::process::ExitCode;

use configs::AppConfig;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};
use uuid::Uuid;

/// Multi-thread runtime sized by `[server] worker_threads`, else `TOKIO_WORKER_THREADS`.
fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let threads = cfg.server.worker_threads.or_else(|| {
        std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok())
    });
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("product-stats-worker");
    if let Some(n) = threads.filter(|n| *n > 0) {
        builder.worker_threads(n);
    }
    builder.build()
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        error!(service = "product_stats", event = "panic", %instance, message = %panic, "panic in worker");
    }));

    // Read once; the same config drives the runtime and the server.
    let cfg = server::startup::load_config();
    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "product_stats", event = "runtime_build_failed", error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "product_stats",
        event = "start",
        %instance,
        version = env!("CARGO_PKG_VERSION"),
        addr = %format!("{}:{}", cfg.server.host, cfg.server.port),
        "starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "product_stats", event = "stop", %instance, "stopped cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "product_stats", event = "run_failed", %instance, error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
