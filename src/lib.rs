//! # emp-cache
//!
//! A cache-aside employee directory service: a relational-style entity store
//! fronted by a distributed cache, with the consistency contract between
//! read, update, and delete expressed as an explicit policy layer.
//!
//! ## What lives where
//!
//! - **Policy layer** ([`CachePolicy`]): per-operation hit/miss branching,
//!   key computation, write-through ordering, post-invocation eviction.
//!   This is the only component with design content; everything else is glue.
//! - **Cache backends** ([`backend`]): in-memory (default) and Redis
//!   (feature `redis`), behind one `CacheBackend` trait.
//! - **Entity stores** ([`store`]): point-query traits plus in-memory
//!   reference implementations.
//! - **HTTP surface** ([`api`]): thin axum handlers mapping request
//!   parameters to service calls.
//!
//! ## Quick Start
//!
//! ```ignore
//! use emp_cache::{
//!     backend::InMemoryBackend, store::InMemoryEmployeeStore, CachePolicy,
//! };
//!
//! let policy = CachePolicy::new(InMemoryBackend::new(), InMemoryEmployeeStore::new());
//! let employee = policy.get_by_id(1001).await?;
//! ```

#[macro_use]
extern crate log;

pub mod api;
pub mod backend;
pub mod config;
pub mod entity;
pub mod error;
pub mod key;
pub mod model;
pub mod observability;
pub mod policy;
pub mod serialization;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use api::{create_router, AppState};
pub use backend::CacheBackend;
pub use config::Config;
pub use entity::CacheEntity;
pub use error::{Error, Result};
pub use model::{Department, Employee};
pub use policy::CachePolicy;
pub use service::{DeptService, EmployeeService};
pub use store::{DepartmentStore, EmployeeStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
