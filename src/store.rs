//! Entity store interfaces and in-memory reference implementations.
//!
//! The relational store is an external collaborator: the policy layer only
//! depends on these traits. All operations are synchronous point queries
//! returning a single record or nothing; absent rows are `Ok(None)`, never
//! an error. Connectivity failures surface as `Error::StoreUnavailable`.

use crate::error::Result;
use crate::model::{Department, Employee};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Point-query interface over the employee table.
pub trait EmployeeStore: Send + Sync {
    fn get_by_id(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Employee>>> + Send;

    /// `last_name` is a non-unique secondary attribute; like the underlying
    /// single-row query this returns the first match.
    fn get_by_last_name(
        &self,
        last_name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Employee>>> + Send;

    /// Insert a new row. An id of 0 means "assign the next id"; the stored
    /// row is returned either way.
    fn insert(
        &self,
        employee: Employee,
    ) -> impl std::future::Future<Output = Result<Employee>> + Send;

    /// Update the row matching `employee.id`. An absent id leaves the store
    /// unchanged; the employee is returned as written either way.
    fn update(
        &self,
        employee: Employee,
    ) -> impl std::future::Future<Output = Result<Employee>> + Send;

    /// Delete by id. Deleting an absent row is not an error.
    fn delete(&self, id: i32) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Point-query interface over the department table.
pub trait DepartmentStore: Send + Sync {
    fn get_by_id(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Department>>> + Send;
}

/// In-memory employee store used by the demo binary and tests.
#[derive(Clone)]
pub struct InMemoryEmployeeStore {
    rows: Arc<DashMap<i32, Employee>>,
    next_id: Arc<AtomicI32>,
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        InMemoryEmployeeStore {
            rows: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<Employee>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn get_by_last_name(&self, last_name: &str) -> Result<Option<Employee>> {
        // First match by the smallest id, so repeated lookups are stable.
        let mut found: Option<Employee> = None;
        for row in self.rows.iter() {
            if row.value().last_name == last_name
                && found.as_ref().map_or(true, |f| row.value().id < f.id)
            {
                found = Some(row.value().clone());
            }
        }
        Ok(found)
    }

    async fn insert(&self, mut employee: Employee) -> Result<Employee> {
        if employee.id == 0 {
            employee.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        } else {
            // Keep the sequence ahead of explicitly supplied ids.
            self.next_id
                .fetch_max(employee.id + 1, Ordering::SeqCst);
        }
        self.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: Employee) -> Result<Employee> {
        // An update of an absent id touches no rows; the result still
        // echoes the employee as written.
        if let Some(mut row) = self.rows.get_mut(&employee.id) {
            *row = employee.clone();
        }
        Ok(employee)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }
}

/// In-memory department store used by the demo binary and tests.
#[derive(Clone, Default)]
pub struct InMemoryDepartmentStore {
    rows: Arc<DashMap<i32, Department>>,
}

impl InMemoryDepartmentStore {
    pub fn new() -> Self {
        InMemoryDepartmentStore {
            rows: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, department: Department) {
        self.rows.insert(department.id, department);
    }
}

impl DepartmentStore for InMemoryDepartmentStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<Department>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }
}
