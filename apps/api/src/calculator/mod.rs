// Quick calculator: DTI arithmetic and the advice line shown next to it.

pub mod advice;
pub mod dti;
pub mod handlers;

use serde::Serialize;

use crate::calculator::dti::{assess, DtiStatus};
use crate::models::applicant::{ApplicantCategory, Language};

/// DTI result plus the advice text, as shown by the calculator view.
#[derive(Debug, Clone, Serialize)]
pub struct ManualAssessment {
    pub ratio: f64,
    pub status: DtiStatus,
    pub advice: &'static str,
}

pub fn manual_assessment(
    income: &str,
    debt: &str,
    lang: Language,
    category: Option<ApplicantCategory>,
) -> ManualAssessment {
    let dti = assess(income, debt);
    ManualAssessment {
        ratio: dti.ratio,
        status: dti.status,
        advice: advice::advice(lang, category, dti.status),
    }
}
