use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::catalog::required_documents;
use crate::models::applicant::{ApplicantCategory, Language};
use crate::models::document::DocumentDescriptor;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub lang: Language,
    pub category: Option<ApplicantCategory>,
}

/// GET /api/v1/catalog?lang=th&category=Salaried
pub async fn handle_get_catalog(Query(q): Query<CatalogQuery>) -> Json<Vec<DocumentDescriptor>> {
    Json(required_documents(q.lang, q.category))
}
