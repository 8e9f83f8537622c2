//! Request and response bodies for the Witness API

use serde::{Deserialize, Serialize};
use witness_common::ContainerRef;

/// Body returned when a lookup misses
///
/// Sent with a 200 status; the `error` field is the only signal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Either a found payload or a not-found error body, serialized flat
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    NotFound(ErrorBody),
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub project: String,
    pub available_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoOfDayParams {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoOfDayResponse {
    pub project: String,
    pub date: String,
    pub selected_image: ContainerRef,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub date1: String,
    pub date2: String,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub project: String,
    pub date1: String,
    pub date2: String,
    pub status: String,
}
