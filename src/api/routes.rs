//! Router wiring for the HTTP surface.

use axum::{routing::get, Router};

use super::handlers::{
    delete_employee, get_department, get_employee, get_employee_by_last_name, health,
    update_employee, AppState,
};
use crate::backend::CacheBackend;
use crate::store::{DepartmentStore, EmployeeStore};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /emp/{id}` - Employee by id
/// - `GET /emp` - Update from query params, returns the updated row
/// - `GET /delemp?id={id}` - Delete by id, returns `"success"`
/// - `GET /emp/lastName/{lastName}` - Employee by lastName
/// - `GET /dept/{id}` - Department by id
/// - `GET /health` - Liveness probe
///
/// Updates and deletes ride on GET for wire compatibility with the original
/// surface.
pub fn create_router<B, S, D>(state: AppState<B, S, D>) -> Router
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    Router::new()
        .route("/emp/{id}", get(get_employee))
        .route("/emp", get(update_employee))
        .route("/delemp", get(delete_employee))
        .route("/emp/lastName/{lastName}", get(get_employee_by_last_name))
        .route("/dept/{id}", get(get_department))
        .route("/health", get(health))
        .with_state(state)
}
