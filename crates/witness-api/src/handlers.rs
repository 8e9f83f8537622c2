//! API request handlers for the Witness backend

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drive_client::HierarchyConnector;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    dates::list_dates,
    models::{
        CompareParams, CompareResponse, DatesResponse, ErrorBody, HealthResponse, Lookup,
        PhotoOfDayParams, PhotoOfDayResponse, ProjectsResponse, StatusResponse,
    },
    resolver::{resolve_date, resolve_project, ResolveError},
    selector::{list_images, select_nearest_to_midday},
};

pub const NO_IMAGES_FOUND: &str = "No images found";

/// Body sent for provider and credential failures; details stay in the logs
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Shared application state
pub struct AppState {
    /// Opens one hierarchy session per request
    pub connector: Arc<dyn HierarchyConnector>,

    /// Container holding the project folders
    pub root_folder_id: String,

    /// Static list served by `GET /projects`
    pub projects: Vec<String>,
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<witness_common::Error> for ApiError {
    fn from(err: witness_common::Error) -> Self {
        error!("Storage provider failure: {}", err);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR.to_string(),
        }
    }
}

/// Turn a resolution failure into a 200 not-found body, or a 500 for remote errors
fn lookup_miss<T>(err: ResolveError) -> Result<Json<Lookup<T>>, ApiError> {
    match err {
        ResolveError::Remote(e) => Err(e.into()),
        missing => Ok(Json(Lookup::NotFound(ErrorBody::new(missing.to_string())))),
    }
}

/// Service banner
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Witness backend running".to_string(),
    })
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// List the configured projects
pub async fn list_projects_handler(State(state): State<Arc<AppState>>) -> Json<ProjectsResponse> {
    Json(ProjectsResponse {
        projects: state.projects.clone(),
    })
}

/// List the date folders of a project
pub async fn list_dates_handler(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
) -> Result<Json<Lookup<DatesResponse>>, ApiError> {
    info!("Listing dates for project: {}", project);

    let client = state.connector.connect().await?;

    let project_folder = match resolve_project(&*client, &state.root_folder_id, &project).await {
        Ok(folder) => folder,
        Err(e) => return lookup_miss(e),
    };

    let available_dates = list_dates(&*client, &project_folder).await?;

    Ok(Json(Lookup::Found(DatesResponse {
        project,
        available_dates,
    })))
}

/// Select the image captured closest to midday for a project and date
pub async fn photo_of_day_handler(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
    Query(params): Query<PhotoOfDayParams>,
) -> Result<Json<Lookup<PhotoOfDayResponse>>, ApiError> {
    info!("Selecting photo of the day: {}/{}", project, params.date);

    let client = state.connector.connect().await?;

    let project_folder = match resolve_project(&*client, &state.root_folder_id, &project).await {
        Ok(folder) => folder,
        Err(e) => return lookup_miss(e),
    };

    let date_folder = match resolve_date(&*client, &project_folder, &params.date).await {
        Ok(folder) => folder,
        Err(e) => return lookup_miss(e),
    };

    let images = list_images(&*client, &date_folder).await?;

    match select_nearest_to_midday(&images) {
        Some(image) => {
            info!("Selected {} of {} images", image.name, images.len());
            Ok(Json(Lookup::Found(PhotoOfDayResponse {
                project,
                date: params.date,
                selected_image: image.clone(),
            })))
        }
        None => {
            warn!(
                "No usable images in {}/{} ({} listed)",
                project,
                params.date,
                images.len()
            );
            Ok(Json(Lookup::NotFound(ErrorBody::new(NO_IMAGES_FOUND))))
        }
    }
}

/// Placeholder for comparing two dates of a project
pub async fn compare_handler(
    Path(project): Path<String>,
    Query(params): Query<CompareParams>,
) -> Json<CompareResponse> {
    info!(
        "Compare requested for {}: {} vs {}",
        project, params.date1, params.date2
    );

    Json(CompareResponse {
        project,
        date1: params.date1,
        date2: params.date2,
        status: "comparison endpoint ready".to_string(),
    })
}
