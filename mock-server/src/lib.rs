use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const PERMISSIONS: [&str; 4] = ["delete", "change", "add", "view"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub tasks: Vec<u64>,
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectList {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Project>,
}

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct Store {
    last_id: u64,
    projects: BTreeMap<u64, Project>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/projects/", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}/",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not found.")
}

async fn require_token(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("JWT "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return detail(
            StatusCode::UNAUTHORIZED,
            "Authentication credentials were not provided.",
        );
    }
    next.run(request).await
}

async fn list_projects(State(db): State<Db>) -> Json<ProjectList> {
    let store = db.read().await;
    let results: Vec<Project> = store.projects.values().cloned().collect();
    Json(ProjectList {
        count: results.len(),
        next: None,
        previous: None,
        results,
    })
}

async fn create_project(State(db): State<Db>, Json(input): Json<CreateProject>) -> Json<Project> {
    let mut store = db.write().await;
    store.last_id += 1;
    let project = Project {
        id: store.last_id,
        name: input.name,
        description: input.description,
        created_at: Utc::now(),
        tasks: Vec::new(),
        permissions: PERMISSIONS.iter().map(|p| p.to_string()).collect(),
    };
    store.projects.insert(project.id, project.clone());
    tracing::debug!(id = project.id, "project created");
    Json(project)
}

async fn get_project(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Project>, Response> {
    let store = db.read().await;
    store.projects.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_project(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<Project>, Response> {
    let mut store = db.write().await;
    let project = store.projects.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        project.name = name;
    }
    if let Some(description) = input.description {
        project.description = description;
    }
    Ok(Json(project.clone()))
}

async fn delete_project(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, Response> {
    let mut store = db.write().await;
    store
        .projects
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}
