use crate::calculator::dti::DtiStatus;
use crate::models::applicant::{ApplicantCategory, Language};

const SALARIED_ADVICE: (&str, &str) = (
    "ธนาคารมองว่า DTI ที่ดีควรต่ำกว่า 35% แต่หากคุณสมบัติดีอาจหยวนได้ถึง 50%",
    "Banks consider DTI <= 35% as good. Up to 50% is acceptable with strong profile.",
);

const RISK_ADVICE: (&str, &str) = (
    "ควรพยายามรักษา DTI ให้ต่ำกว่า 35% เพื่อความปลอดภัยสูงสุดในการยื่นกู้บ้าน",
    "Aim to keep DTI below 35% for the best chance of mortgage approval.",
);

/// Advice line shown under the calculator.
pub fn advice(
    lang: Language,
    category: Option<ApplicantCategory>,
    status: DtiStatus,
) -> &'static str {
    let (th, en) = match (category, status) {
        (Some(ApplicantCategory::Salaried), s) if s != DtiStatus::Risk => SALARIED_ADVICE,
        _ => RISK_ADVICE,
    };
    lang.pick(th, en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salaried_non_risk_gets_salaried_advice() {
        let text = advice(Language::En, Some(ApplicantCategory::Salaried), DtiStatus::Fair);
        assert!(text.starts_with("Banks consider"));
    }

    #[test]
    fn test_salaried_risk_gets_risk_advice() {
        let text = advice(Language::En, Some(ApplicantCategory::Salaried), DtiStatus::Risk);
        assert!(text.starts_with("Aim to keep"));
    }

    #[test]
    fn test_other_categories_get_risk_advice() {
        let text = advice(Language::Th, Some(ApplicantCategory::Farmer), DtiStatus::Good);
        assert_eq!(text, RISK_ADVICE.0);
        assert_eq!(advice(Language::En, None, DtiStatus::Neutral), RISK_ADVICE.1);
    }
}
