//! Debt-to-income arithmetic for the quick calculator.

use serde::{Deserialize, Serialize};

/// Upper bound of the "good" band (inclusive), in percent.
pub const GOOD_MAX: f64 = 35.0;
/// Upper bound of the "fair" band (inclusive), in percent.
pub const FAIR_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtiStatus {
    /// Nothing entered yet.
    Neutral,
    Good,
    Fair,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DtiAssessment {
    pub ratio: f64,
    pub status: DtiStatus,
}

/// Parses a user-typed amount, ignoring thousands separators. Only finite
/// numbers count; "inf" and "NaN" read as unparsable.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// debt / income × 100, clamped to [0, 100]. Zero or unparsable income gives 0.
pub fn dti_ratio(income: &str, debt: &str) -> f64 {
    let income = match parse_amount(income) {
        Some(v) if v != 0.0 => v,
        _ => return 0.0,
    };
    let debt = parse_amount(debt).unwrap_or(0.0);

    let ratio = debt / income * 100.0;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 100.0)
}

/// Classifies a ratio. `Neutral` only applies while the income text is still empty,
/// so a positive income with zero debt reads as `Good`.
pub fn classify(ratio: f64, income_text: &str) -> DtiStatus {
    if ratio == 0.0 && income_text.is_empty() {
        return DtiStatus::Neutral;
    }
    if ratio <= GOOD_MAX {
        DtiStatus::Good
    } else if ratio <= FAIR_MAX {
        DtiStatus::Fair
    } else {
        DtiStatus::Risk
    }
}

pub fn assess(income: &str, debt: &str) -> DtiAssessment {
    let ratio = dti_ratio(income, debt);
    DtiAssessment {
        ratio,
        status: classify(ratio, income),
    }
}
