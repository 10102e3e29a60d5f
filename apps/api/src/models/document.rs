use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentCategory {
    Identity,
    Income,
    Banking,
    Additional,
    Spouse,
    Business,
    Tax,
    Contract,
    Agriculture,
    Asset,
    Land,
    Investment,
    Professional,
}

/// A document the applicant is asked to provide. Static per category and language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: DocumentCategory,
    pub optional: bool,
    pub multiple: bool,
}
