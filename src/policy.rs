//! Cache policy layer - the consistency contract between reads, updates,
//! and deletes on cached entities.
//!
//! Each operation wraps one entity-store call with explicit pre/post cache
//! calls. The rules, per operation:
//!
//! - `get_by_id`: cache-aside. A hit is authoritative within the call; a
//!   miss queries the store and populates `emp:{id}`. Absent rows are never
//!   cached.
//! - `update`: store write first, cache write second. The cache key is
//!   computed from the value the store returned, not from caller input. If
//!   the store write fails the cache is never touched.
//! - `delete`: post-invocation eviction. `emp:{id}` is evicted only after
//!   the store delete completes without error.
//! - `get_by_last_name`: cache-aside on `emp:{lastName}`, with a
//!   denormalized write-through that also populates `emp:{id}` and
//!   `emp:{email}` from the single result.
//!
//! Known staleness gap, kept on purpose: update and delete clean only the
//! id-keyed entry. lastName- and email-keyed entries written by
//! `get_by_last_name` stay behind until a later lookup overwrites them.
//!
//! Concurrent misses for the same key are not coalesced; both callers query
//! the store and the last cache write wins.

use crate::backend::CacheBackend;
use crate::entity::CacheEntity;
use crate::error::{Error, Result};
use crate::key::CacheKeyBuilder;
use crate::model::Employee;
use crate::observability::{CacheMetrics, NoOpMetrics, TtlPolicy};
use crate::store::EmployeeStore;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Default budget for a single entity-store call.
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default budget for a single cache-backend call.
const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(2);

/// Cache policy over an employee store and a cache backend.
///
/// Both collaborators are injected; the policy holds no global state.
///
/// # Example
///
/// ```ignore
/// use emp_cache::{backend::InMemoryBackend, store::InMemoryEmployeeStore, CachePolicy};
///
/// let policy = CachePolicy::new(InMemoryBackend::new(), InMemoryEmployeeStore::new());
/// let employee = policy.get_by_id(1001).await?;
/// ```
pub struct CachePolicy<B: CacheBackend, S: EmployeeStore> {
    backend: B,
    store: S,
    metrics: Box<dyn CacheMetrics>,
    ttl_policy: TtlPolicy,
    store_timeout: Duration,
    cache_timeout: Duration,
}

impl<B: CacheBackend, S: EmployeeStore> CachePolicy<B, S> {
    /// Create a new policy with default timeouts, no TTL, and no metrics.
    pub fn new(backend: B, store: S) -> Self {
        CachePolicy {
            backend,
            store,
            metrics: Box::new(NoOpMetrics),
            ttl_policy: TtlPolicy::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn CacheMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set custom TTL policy for cache writes.
    pub fn with_ttl_policy(mut self, policy: TtlPolicy) -> Self {
        self.ttl_policy = policy;
        self
    }

    /// Set per-call budgets for store and cache operations. Expiry surfaces
    /// as `StoreUnavailable` / `CacheUnavailable` respectively.
    pub fn with_timeouts(mut self, store_timeout: Duration, cache_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self.cache_timeout = cache_timeout;
        self
    }

    /// Get backend reference (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Look up an employee by id, cache first.
    ///
    /// On a hit the store is not touched. On a miss the store result is
    /// written to `emp:{id}` before returning; absent rows are not cached.
    ///
    /// # Errors
    ///
    /// - `Error::StoreUnavailable`: store query failed or timed out
    /// - `Error::CacheUnavailable`: cache read/write failed or timed out
    /// - `Error::DeserializationError` and friends: corrupted cache entry
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Employee>> {
        let timer = Instant::now();
        let cache_key = CacheKeyBuilder::build::<Employee>(&id);

        debug!("» get_by_id for key: {}", cache_key);

        if let Some(employee) = self.cache_read(&cache_key).await? {
            self.metrics.record_hit(&cache_key, timer.elapsed());
            debug!("✓ Cache hit for {}", cache_key);
            return Ok(Some(employee));
        }

        debug!("Cache miss for {}, falling back to store", cache_key);

        let fetched = match self.store_call(self.store.get_by_id(id)).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.metrics.record_error(&cache_key, &e.to_string());
                return Err(e);
            }
        };

        match fetched {
            Some(employee) => {
                self.cache_write(&cache_key, &employee).await?;
                self.metrics.record_miss(&cache_key, timer.elapsed());
                Ok(Some(employee))
            }
            None => {
                // Absent rows are never cached.
                self.metrics.record_miss(&cache_key, timer.elapsed());
                debug!("Entity not found in store for {}", cache_key);
                Ok(None)
            }
        }
    }

    /// Update an employee, write-through.
    ///
    /// The store write always runs first and is never short-circuited by
    /// the cache. Only after it succeeds is `emp:{id}` overwritten, with the
    /// id taken from the store's result rather than the caller-supplied
    /// value. A failed store write leaves the cache exactly as it was.
    ///
    /// The entry for the employee's previous lastName (if any) is not
    /// invalidated.
    pub async fn update(&self, employee: Employee) -> Result<Employee> {
        let updated = self.store_call(self.store.update(employee)).await?;

        let cache_key = CacheKeyBuilder::build::<Employee>(&updated.id);
        self.cache_write(&cache_key, &updated).await?;
        debug!("✓ Updated store and cache for {}", cache_key);

        Ok(updated)
    }

    /// Delete an employee, post-invocation eviction.
    ///
    /// `emp:{id}` is evicted unconditionally once the store delete returns
    /// without error, whether or not a row was affected. If the store
    /// delete fails, the cache entry is left in place and the failure
    /// propagates.
    ///
    /// lastName- and email-keyed entries for the deleted row are not
    /// evicted.
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.store_call(self.store.delete(id)).await?;

        let cache_key = CacheKeyBuilder::build::<Employee>(&id);
        self.cache_evict(&cache_key).await?;
        debug!("✓ Deleted from store and evicted {}", cache_key);

        Ok(())
    }

    /// Look up an employee by lastName, cache first, with denormalized
    /// population.
    ///
    /// On a miss the single store result populates three keys:
    /// `emp:{lastName}` (so the next lookup on this dimension hits),
    /// `emp:{id}`, and `emp:{email}`. Later id-based reads then hit cache
    /// without ever having gone through `get_by_id`.
    pub async fn get_by_last_name(&self, last_name: &str) -> Result<Option<Employee>> {
        let timer = Instant::now();
        let name_key = CacheKeyBuilder::build::<Employee>(&last_name);

        debug!("» get_by_last_name for key: {}", name_key);

        if let Some(employee) = self.cache_read(&name_key).await? {
            self.metrics.record_hit(&name_key, timer.elapsed());
            return Ok(Some(employee));
        }

        let fetched = match self.store_call(self.store.get_by_last_name(last_name)).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.metrics.record_error(&name_key, &e.to_string());
                return Err(e);
            }
        };

        match fetched {
            Some(employee) => {
                let id_key = CacheKeyBuilder::build::<Employee>(&employee.id);
                let email_key = CacheKeyBuilder::build::<Employee>(&employee.email);

                self.cache_write(&name_key, &employee).await?;
                self.cache_write(&id_key, &employee).await?;
                self.cache_write(&email_key, &employee).await?;

                self.metrics.record_miss(&name_key, timer.elapsed());
                debug!(
                    "✓ Populated {}, {} and {} from one store row",
                    name_key, id_key, email_key
                );
                Ok(Some(employee))
            }
            None => {
                self.metrics.record_miss(&name_key, timer.elapsed());
                Ok(None)
            }
        }
    }

    /// Insert a new employee. Pass-through: the cache is not consulted or
    /// populated on insert.
    pub async fn insert(&self, employee: Employee) -> Result<Employee> {
        self.store_call(self.store.insert(employee)).await
    }

    /// Read and decode one cache entry.
    async fn cache_read(&self, cache_key: &str) -> Result<Option<Employee>> {
        let bytes = timeout(self.cache_timeout, self.backend.get(cache_key))
            .await
            .map_err(|_| {
                Error::CacheUnavailable(format!(
                    "cache GET {} timed out after {:?}",
                    cache_key, self.cache_timeout
                ))
            })??;

        match bytes {
            Some(bytes) => Employee::deserialize_from_cache(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and write one cache entry.
    async fn cache_write(&self, cache_key: &str, employee: &Employee) -> Result<()> {
        let bytes = employee.serialize_for_cache()?;
        let ttl = self.ttl_policy.get_ttl();

        timeout(self.cache_timeout, self.backend.set(cache_key, bytes, ttl))
            .await
            .map_err(|_| {
                Error::CacheUnavailable(format!(
                    "cache SET {} timed out after {:?}",
                    cache_key, self.cache_timeout
                ))
            })?
    }

    async fn cache_evict(&self, cache_key: &str) -> Result<()> {
        timeout(self.cache_timeout, self.backend.delete(cache_key))
            .await
            .map_err(|_| {
                Error::CacheUnavailable(format!(
                    "cache DELETE {} timed out after {:?}",
                    cache_key, self.cache_timeout
                ))
            })?
    }

    /// Run one store call under the configured budget.
    async fn store_call<T>(&self, fut: impl Future<Output = Result<T>> + Send) -> Result<T> {
        timeout(self.store_timeout, fut)
            .await
            .map_err(|_| {
                Error::StoreUnavailable(format!(
                    "store call timed out after {:?}",
                    self.store_timeout
                ))
            })?
    }
}
