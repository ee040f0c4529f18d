//! Thin entity services over the cache policy layer.

use crate::backend::CacheBackend;
use crate::entity::CacheEntity;
use crate::error::{Error, Result};
use crate::key::CacheKeyBuilder;
use crate::model::{Department, Employee};
use crate::policy::CachePolicy;
use crate::store::{DepartmentStore, EmployeeStore};
use std::time::Duration;
use tokio::time::timeout;

/// Employee service. Pure delegation to the cache policy.
pub struct EmployeeService<B: CacheBackend, S: EmployeeStore> {
    policy: CachePolicy<B, S>,
}

impl<B: CacheBackend, S: EmployeeStore> EmployeeService<B, S> {
    pub fn new(policy: CachePolicy<B, S>) -> Self {
        EmployeeService { policy }
    }

    pub async fn get_employee(&self, id: i32) -> Result<Option<Employee>> {
        self.policy.get_by_id(id).await
    }

    pub async fn update_employee(&self, employee: Employee) -> Result<Employee> {
        self.policy.update(employee).await
    }

    pub async fn delete_employee(&self, id: i32) -> Result<()> {
        self.policy.delete(id).await
    }

    pub async fn get_employee_by_last_name(&self, last_name: &str) -> Result<Option<Employee>> {
        self.policy.get_by_last_name(last_name).await
    }

    pub async fn insert_employee(&self, employee: Employee) -> Result<Employee> {
        self.policy.insert(employee).await
    }

    /// Probe cache backend reachability. Failures read as "down".
    pub async fn cache_healthy(&self) -> bool {
        self.policy
            .backend()
            .health_check()
            .await
            .unwrap_or(false)
    }
}

/// Department service.
///
/// Demonstrates direct backend usage rather than the policy layer: every
/// call queries the store, then manually puts the row under `dept:{id}`.
/// There is no read-check, so this path never serves from cache itself;
/// the entry exists for other consumers of the backend.
pub struct DeptService<B: CacheBackend, D: DepartmentStore> {
    backend: B,
    store: D,
    store_timeout: Duration,
    cache_timeout: Duration,
}

impl<B: CacheBackend, D: DepartmentStore> DeptService<B, D> {
    pub fn new(backend: B, store: D) -> Self {
        DeptService {
            backend,
            store,
            store_timeout: Duration::from_secs(5),
            cache_timeout: Duration::from_secs(2),
        }
    }

    /// Set per-call budgets for store and cache operations. Expiry surfaces
    /// as `StoreUnavailable` / `CacheUnavailable` respectively.
    pub fn with_timeouts(mut self, store_timeout: Duration, cache_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self.cache_timeout = cache_timeout;
        self
    }

    /// Fetch a department from the store, populating `dept:{id}` on the way
    /// out. Absent rows are not cached.
    pub async fn get_dept(&self, id: i32) -> Result<Option<Department>> {
        let fetched = timeout(self.store_timeout, self.store.get_by_id(id))
            .await
            .map_err(|_| {
                Error::StoreUnavailable(format!(
                    "store call timed out after {:?}",
                    self.store_timeout
                ))
            })??;

        if let Some(department) = &fetched {
            let cache_key = CacheKeyBuilder::build::<Department>(&department.id);
            let bytes = department.serialize_for_cache()?;
            timeout(self.cache_timeout, self.backend.set(&cache_key, bytes, None))
                .await
                .map_err(|_| {
                    Error::CacheUnavailable(format!(
                        "cache SET {} timed out after {:?}",
                        cache_key, self.cache_timeout
                    ))
                })??;
            debug!("✓ Populated {} from store", cache_key);
        }

        Ok(fetched)
    }
}
