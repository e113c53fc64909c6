//! Handlers for the `/projects` resource.

use agrega_core::error::CoreError;
use agrega_core::project::{CreateProject, Project, UpdateProject, PROJECT_ENTITY};
use agrega_core::query::ProjectList;
use agrega_core::types::{system_clock, ProjectId};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::ProjectListParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProjectListParams>,
) -> AppResult<Json<ProjectList>> {
    let query = params.into_query();
    let projects = state.projects.list().await?;
    Ok(Json(query.run(projects, system_clock())))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project_id = parse_id(&id)?;
    let project = state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project_id = parse_id(&id)?;
    let project = state
        .projects
        .update(project_id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Soft delete: the record stays retrievable with status `deleted`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    let project_id = parse_id(&id)?;
    if state.projects.soft_delete(project_id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(not_found(id))
    }
}

/// An id that is not a UUID cannot name any project, so it is a 404 rather
/// than a 400.
fn parse_id(raw: &str) -> AppResult<ProjectId> {
    ProjectId::parse_str(raw).map_err(|_| not_found(raw.to_string()))
}

fn not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: PROJECT_ENTITY,
        id,
    })
}
