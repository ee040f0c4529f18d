//! HTTP request handlers.
//!
//! The API layer is a thin pass-through: request parameters map directly to
//! service calls. Store and cache failures surface as a generic 500 with no
//! structured body; absent records surface as an empty 404 body.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::backend::CacheBackend;
use crate::error::Error;
use crate::model::Employee;
use crate::service::{DeptService, EmployeeService};
use crate::store::{DepartmentStore, EmployeeStore};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Application state shared across all handlers.
pub struct AppState<B, S, D>
where
    B: CacheBackend,
    S: EmployeeStore,
    D: DepartmentStore,
{
    pub employees: Arc<EmployeeService<B, S>>,
    pub depts: Arc<DeptService<B, D>>,
}

impl<B, S, D> Clone for AppState<B, S, D>
where
    B: CacheBackend,
    S: EmployeeStore,
    D: DepartmentStore,
{
    fn clone(&self) -> Self {
        AppState {
            employees: Arc::clone(&self.employees),
            depts: Arc::clone(&self.depts),
        }
    }
}

impl<B, S, D> AppState<B, S, D>
where
    B: CacheBackend,
    S: EmployeeStore,
    D: DepartmentStore,
{
    pub fn new(employees: EmployeeService<B, S>, depts: DeptService<B, D>) -> Self {
        AppState {
            employees: Arc::new(employees),
            depts: Arc::new(depts),
        }
    }
}

/// Handler for `GET /emp/{id}`.
///
/// Returns the Employee JSON, or an empty 404 body when no row exists.
pub async fn get_employee<B, S, D>(
    Path(id): Path<i32>,
    State(state): State<AppState<B, S, D>>,
) -> Result<Response, Error>
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    match state.employees.get_employee(id).await? {
        Some(employee) => Ok(Json(employee).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Handler for `GET /emp?id=..&lastName=..&email=..&gender=..&dId=..`.
///
/// Applies an update from the supplied fields and returns the updated
/// Employee JSON.
pub async fn update_employee<B, S, D>(
    State(state): State<AppState<B, S, D>>,
    Query(employee): Query<Employee>,
) -> Result<Json<Employee>, Error>
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    let updated = state.employees.update_employee(employee).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub id: i32,
}

/// Handler for `GET /delemp?id={id}`.
///
/// Returns the literal string `"success"`.
pub async fn delete_employee<B, S, D>(
    State(state): State<AppState<B, S, D>>,
    Query(params): Query<DeleteParams>,
) -> Result<&'static str, Error>
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    state.employees.delete_employee(params.id).await?;
    Ok("success")
}

/// Handler for `GET /emp/lastName/{lastName}`.
pub async fn get_employee_by_last_name<B, S, D>(
    Path(last_name): Path<String>,
    State(state): State<AppState<B, S, D>>,
) -> Result<Response, Error>
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    match state.employees.get_employee_by_last_name(&last_name).await? {
        Some(employee) => Ok(Json(employee).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Handler for `GET /dept/{id}`.
pub async fn get_department<B, S, D>(
    Path(id): Path<i32>,
    State(state): State<AppState<B, S, D>>,
) -> Result<Response, Error>
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    match state.depts.get_dept(id).await? {
        Some(department) => Ok(Json(department).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Handler for `GET /health`.
///
/// Always 200 while the process is serving; the body reports cache backend
/// reachability.
pub async fn health<B, S, D>(State(state): State<AppState<B, S, D>>) -> Response
where
    B: CacheBackend + 'static,
    S: EmployeeStore + 'static,
    D: DepartmentStore + 'static,
{
    let cache_up = state.employees.cache_healthy().await;
    let body = if cache_up { "OK" } else { "DEGRADED" };
    (StatusCode::OK, body).into_response()
}
