//! Department recommendation endpoint

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use triage_core::{PatientInput, TriageRequest, TriageResponse};

use crate::AppState;
use crate::error::AppError;

/// Header telling the caller whether the model or the rule table answered
pub const SOURCE_HEADER: &str = "X-Recommendation-Source";

/// POST /recommend - Recommend a hospital department for a patient
///
/// Validates the body, asks the resolver and returns
/// `{"recommended_department": ...}`. Invalid input never reaches the
/// resolver.
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let request = TriageRequest::try_from(input)?;

    tracing::info!(
        gender = %request.gender(),
        age = request.age(),
        symptoms = request.symptoms().len(),
        "Triage request"
    );

    let recommendation = state.resolver.resolve(&request).await;
    let department = recommendation.department();

    metrics::counter!(
        "triage_recommendations_total",
        "source" => recommendation.source(),
        "department" => department.as_str()
    )
    .increment(1);

    tracing::info!(
        department = %department,
        source = recommendation.source(),
        "Department recommended"
    );

    Ok((
        [(SOURCE_HEADER, recommendation.source())],
        Json(TriageResponse {
            recommended_department: department,
        }),
    ))
}
