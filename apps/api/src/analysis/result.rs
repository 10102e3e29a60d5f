//! Result Presentation Model: the oracle's structured answer, checked at the boundary.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStability {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationStatus {
    Recommended,
    Possible,
    Unlikely,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub base_income: f64,
    /// OT, bonus, commission.
    pub variable_income: f64,
    /// Amount removed for risk.
    pub haircut_applied: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtBreakdown {
    pub total_existing_debt: f64,
    pub detected_debts: Vec<String>,
    pub estimated_home_installment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub estimated_monthly_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_breakdown: Option<IncomeBreakdown>,
    pub debt_service_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_breakdown: Option<DebtBreakdown>,
    pub employment_stability: EmploymentStability,
    pub applicant_type: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecommendation {
    pub bank_name: String,
    pub product_name: String,
    pub match_score: f64,
    pub status: RecommendationStatus,
    pub reason: String,
    pub interest_rate_highlight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub creditworthiness_score: f64,
    pub profile: FinancialProfile,
    pub recommendations: Vec<BankRecommendation>,
    pub summary: String,
}

fn check_percent(field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Oracle(format!(
            "{field} out of range [0, 100]: {value}"
        )))
    }
}

impl AnalysisResult {
    /// Parses and validates the oracle's response text. Empty or malformed
    /// bodies are analysis failures, never defaulted.
    pub fn from_oracle_text(text: &str) -> Result<Self, AppError> {
        let text = strip_json_fences(text);
        if text.is_empty() {
            return Err(AppError::Oracle("No response from AI".to_string()));
        }

        let result: AnalysisResult = serde_json::from_str(text)
            .map_err(|e| AppError::Oracle(format!("Malformed analysis response: {e}")))?;
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        check_percent("creditworthinessScore", self.creditworthiness_score)?;
        check_percent("profile.debtServiceRatio", self.profile.debt_service_ratio)?;
        if !self.profile.estimated_monthly_income.is_finite() {
            return Err(AppError::Oracle(
                "profile.estimatedMonthlyIncome is not a number".to_string(),
            ));
        }
        for rec in &self.recommendations {
            check_percent("recommendations[].matchScore", rec.match_score)?;
        }
        Ok(())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim()),
        None => text,
    }
}
