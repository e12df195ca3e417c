use std::{env, future::Future, net::SocketAddr};

use axum::Router;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::{AppConfig, ServerConfig};
use models::db::DatabaseConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file if present, else defaults with `SERVER_HOST`/`SERVER_PORT` overrides.
pub fn load_config() -> AppConfig {
    match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config file unavailable; using env and defaults");
            let mut server = ServerConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                server.port = port;
            }
            AppConfig { server, ..AppConfig::default() }
        }
    }
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {}", e)))
}

fn pool_config(cfg: &AppConfig) -> DatabaseConfig {
    if cfg.database.url.trim().is_empty() {
        DatabaseConfig::from_env()
    } else {
        cfg.database.clone().into()
    }
}

/// Resolves on Ctrl+C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; shutdown only via process exit");
        std::future::pending::<()>().await;
    }
    info!(service = "product_stats", event = "shutdown_signal", "draining connections");
}

/// Serve `app` until `shutdown` resolves, letting in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Connect, migrate and serve with the given config until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, ctrl_c()).await
}

pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&cfg.server)?;

    let db = models::db::connect_with_config(&pool_config(&cfg))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::ping(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations: {}", e)))?;

    let state = AppState::new(db, cfg.populate.clone());
    let app = routes::build_router(state, build_cors());

    let listener = TcpListener::bind(addr).await?;
    info!(service = "product_stats", event = "listen", %addr, populate_count = cfg.populate.count, "http server ready");
    serve(listener, app, shutdown).await?;
    info!(service = "product_stats", event = "drained", "http server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use sea_orm::DatabaseConnection;
    use tokio::sync::oneshot;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let s = ServerConfig { host: "not a host".into(), port: 80, worker_threads: None };
        assert!(matches!(bind_addr(&s), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_from_defaults() {
        let addr = bind_addr(&ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn pool_settings_follow_the_loaded_file() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://u:p@db:5432/stats".into();
        cfg.database.max_connections = 3;
        let pool = pool_config(&cfg);
        assert_eq!(pool.url, "postgres://u:p@db:5432/stats");
        assert_eq!(pool.max_connections, 3);
    }

    #[tokio::test]
    async fn serve_returns_once_shutdown_fires() {
        let state = AppState::new(DatabaseConnection::default(), configs::PopulateConfig::default());
        let app = routes::build_router(state, build_cors());
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve(listener, app, async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();

        let res = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(res, Ok(Ok(Ok(())))));
    }
}
