//! Metadata endpoint handler

use axum::Json;
use serde::Serialize;
use triage_core::Department;

/// Service description
#[derive(Serialize)]
pub struct Metadata {
    title: &'static str,
    description: &'static str,
    version: &'static str,
    departments: Vec<&'static str>,
}

/// GET /metadata - Describe the service and the departments it can recommend
pub async fn get() -> Json<Metadata> {
    Json(Metadata {
        title: "Hospital Triage System",
        description: "Recommends a medical department from patient symptoms using an LLM",
        version: env!("CARGO_PKG_VERSION"),
        departments: Department::ALL.iter().map(Department::as_str).collect(),
    })
}
