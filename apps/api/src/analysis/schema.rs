//! Response schema declared to the oracle (OpenAPI subset accepted by Gemini).

use serde_json::{json, Value};

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "creditworthinessScore": { "type": "NUMBER", "description": "Score from 0 to 100" },
            "profile": {
                "type": "OBJECT",
                "properties": {
                    "estimatedMonthlyIncome": { "type": "NUMBER" },
                    "incomeBreakdown": {
                        "type": "OBJECT",
                        "properties": {
                            "baseIncome": { "type": "NUMBER", "description": "Base salary/income before cuts" },
                            "variableIncome": { "type": "NUMBER", "description": "OT, Bonus, Commission" },
                            "haircutApplied": { "type": "NUMBER", "description": "Total amount removed due to risk/haircut" },
                            "explanation": { "type": "STRING", "description": "Brief explanation of calculation, e.g. 'OT counted at 70%'" }
                        },
                        "required": ["baseIncome", "variableIncome", "haircutApplied", "explanation"]
                    },
                    "debtServiceRatio": { "type": "NUMBER", "description": "Estimated percentage 0-100" },
                    "debtBreakdown": {
                        "type": "OBJECT",
                        "properties": {
                            "totalExistingDebt": { "type": "NUMBER", "description": "Sum of current monthly obligations" },
                            "detectedDebts": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" },
                                "description": "List of detected debts e.g. 'Co-op Loan', 'Car Installment'"
                            },
                            "estimatedHomeInstallment": { "type": "NUMBER", "description": "Estimated installment for the new home loan" }
                        },
                        "required": ["totalExistingDebt", "detectedDebts", "estimatedHomeInstallment"]
                    },
                    "employmentStability": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
                    "applicantType": {
                        "type": "STRING",
                        "enum": ["Salaried", "Business Owner", "Freelance", "Farmer", "Investor"]
                    },
                    "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": [
                    "estimatedMonthlyIncome",
                    "debtServiceRatio",
                    "employmentStability",
                    "applicantType",
                    "strengths",
                    "weaknesses"
                ]
            },
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "bankName": { "type": "STRING" },
                        "productName": { "type": "STRING" },
                        "matchScore": { "type": "NUMBER" },
                        "status": { "type": "STRING", "enum": ["Recommended", "Possible", "Unlikely"] },
                        "reason": { "type": "STRING" },
                        "interestRateHighlight": { "type": "STRING" }
                    },
                    "required": ["bankName", "productName", "matchScore", "status", "reason", "interestRateHighlight"]
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["creditworthinessScore", "profile", "recommendations", "summary"]
    })
}
