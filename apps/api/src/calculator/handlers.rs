use axum::Json;
use serde::Deserialize;

use crate::calculator::{manual_assessment, ManualAssessment};
use crate::models::applicant::{ApplicantCategory, Language};

#[derive(Debug, Deserialize)]
pub struct DtiRequest {
    #[serde(default)]
    pub income: String,
    #[serde(default)]
    pub debt: String,
    #[serde(default)]
    pub lang: Language,
    pub category: Option<ApplicantCategory>,
}

/// POST /api/v1/dti
/// Stateless quick calculation; no session required.
pub async fn handle_dti(Json(req): Json<DtiRequest>) -> Json<ManualAssessment> {
    Json(manual_assessment(
        &req.income,
        &req.debt,
        req.lang,
        req.category,
    ))
}
