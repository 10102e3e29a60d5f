use serde::{Deserialize, Serialize};

/// Declared occupation class. Drives the document catalog and the income
/// model the oracle applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicantCategory {
    Salaried,
    BusinessOwner,
    Freelance,
    Farmer,
    Investor,
}

impl ApplicantCategory {
    pub const ALL: [ApplicantCategory; 5] = [
        ApplicantCategory::Salaried,
        ApplicantCategory::BusinessOwner,
        ApplicantCategory::Freelance,
        ApplicantCategory::Farmer,
        ApplicantCategory::Investor,
    ];

    /// Name used inside oracle prompts and in the `applicantType` field.
    pub fn display_name(self) -> &'static str {
        match self {
            ApplicantCategory::Salaried => "Salaried",
            ApplicantCategory::BusinessOwner => "Business Owner",
            ApplicantCategory::Freelance => "Freelance",
            ApplicantCategory::Farmer => "Farmer",
            ApplicantCategory::Investor => "Investor",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    /// Picks the Thai or English variant of a bilingual string pair.
    pub fn pick(self, th: &'static str, en: &'static str) -> &'static str {
        match self {
            Language::Th => th,
            Language::En => en,
        }
    }
}

/// Wizard sub-view after a category is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    #[default]
    Manual,
    Ai,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_uses_variant_tag() {
        let json = serde_json::to_string(&ApplicantCategory::BusinessOwner).unwrap();
        assert_eq!(json, r#""BusinessOwner""#);
        let parsed: ApplicantCategory = serde_json::from_str(r#""Farmer""#).unwrap();
        assert_eq!(parsed, ApplicantCategory::Farmer);
    }

    #[test]
    fn test_display_name_spaces_business_owner() {
        assert_eq!(ApplicantCategory::BusinessOwner.display_name(), "Business Owner");
    }

    #[test]
    fn test_language_defaults_to_thai() {
        assert_eq!(Language::default(), Language::Th);
        let parsed: Language = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(parsed, Language::En);
    }
}
