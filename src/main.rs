//! emp-cache service binary.
//!
//! Wires config, cache backend, entity stores, and the HTTP router. The
//! backend is chosen at compile time: in-memory by default, Redis with the
//! `redis` feature.

use std::net::SocketAddr;

use emp_cache::api::{create_router, AppState};
use emp_cache::config::Config;
use emp_cache::model::{Department, Employee};
use emp_cache::observability::TtlPolicy;
use emp_cache::policy::CachePolicy;
use emp_cache::service::{DeptService, EmployeeService};
use emp_cache::store::{EmployeeStore, InMemoryDepartmentStore, InMemoryEmployeeStore};
use log::info;
use tokio::signal;

#[cfg(not(feature = "redis"))]
use emp_cache::backend::InMemoryBackend;
#[cfg(feature = "redis")]
use emp_cache::backend::RedisBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .ok();

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, store_timeout={:?}, cache_timeout={:?}, ttl={:?}",
        config.server_port, config.store_timeout, config.cache_timeout, config.cache_ttl
    );

    #[cfg(feature = "redis")]
    let backend = RedisBackend::from_url(config.redis_url.clone())?;
    #[cfg(not(feature = "redis"))]
    let backend = InMemoryBackend::new();

    let emp_store = InMemoryEmployeeStore::new();
    let dept_store = InMemoryDepartmentStore::new();
    seed_demo_data(&emp_store, &dept_store).await?;

    let ttl_policy = match config.cache_ttl {
        Some(d) => TtlPolicy::Fixed(d),
        None => TtlPolicy::None,
    };

    let policy = CachePolicy::new(backend.clone(), emp_store)
        .with_ttl_policy(ttl_policy)
        .with_timeouts(config.store_timeout, config.cache_timeout);

    let state = AppState::new(
        EmployeeService::new(policy),
        DeptService::new(backend, dept_store)
            .with_timeouts(config.store_timeout, config.cache_timeout),
    );

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// A few rows so the endpoints answer out of the box.
async fn seed_demo_data(
    emp_store: &InMemoryEmployeeStore,
    dept_store: &InMemoryDepartmentStore,
) -> emp_cache::Result<()> {
    dept_store.insert(Department {
        id: 1,
        name: "engineering".to_string(),
    });
    dept_store.insert(Department {
        id: 2,
        name: "sales".to_string(),
    });

    emp_store
        .insert(Employee {
            id: 1001,
            last_name: "Zhang".to_string(),
            email: "zhang@example.com".to_string(),
            gender: 1,
            department_id: 1,
        })
        .await?;
    emp_store
        .insert(Employee {
            id: 1002,
            last_name: "Li".to_string(),
            email: "li@example.com".to_string(),
            gender: 0,
            department_id: 2,
        })
        .await?;

    info!("Seeded {} employees", emp_store.len());
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
