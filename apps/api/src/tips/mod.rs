//! "7 tips for loan approval" shown beside the category picker.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::models::applicant::Language;

struct TipRow {
    icon: &'static str,
    title: (&'static str, &'static str),
    content: (&'static str, &'static str),
    highlight: Option<(&'static str, &'static str)>,
}

const LOAN_TIPS: &[TipRow] = &[
    TipRow {
        icon: "calculator",
        title: ("รู้ความสามารถการกู้", "Know Your Borrowing Capacity"),
        content: (
            "คำนวณง่ายๆ: รายได้ต่อเดือน x 60 = ราคาบ้านที่กู้ซื้อได้ (โดยประมาณ) เพื่อประเมินว่าเรามีความสามารถในการผ่อนชำระหรือไม่ก่อนยื่นกู้",
            "Simple formula: Monthly Income x 60 = Estimated Home Price. Assess your ability to pay before applying.",
        ),
        highlight: Some(("สูตร: รายได้ x 60 เท่า", "Formula: Income x 60")),
    },
    TipRow {
        icon: "piggy",
        title: ("เก็บออมเงินดาวน์", "Save for Down Payment"),
        content: (
            "ธนาคารมักปล่อยกู้สูงสุด 90% การมีเงินดาวน์ 10% ไว้ก่อนจะช่วยให้กู้ผ่านง่ายขึ้นมาก",
            "Banks usually lend up to 90%. Having a 10% down payment ready makes approval much easier.",
        ),
        highlight: None,
    },
    TipRow {
        icon: "statement",
        title: ("เดินบัญชีให้สวย", "Maintain Good Bank Statement"),
        content: (
            "ควรมีเงินติดบัญชีบ้าง ไม่ถอนจนหมด และมีรายการเดินบัญชีสม่ำเสมออย่างน้อย 6 เดือนย้อนหลัง",
            "Keep some balance, avoid emptying the account, and ensure consistent transactions for at least 6 months.",
        ),
        highlight: None,
    },
    TipRow {
        icon: "clock",
        title: ("ชำระหนี้ตรงเวลา", "Pay Debts on Time"),
        content: (
            "เครดิตบูโรสำคัญมาก ห้ามค้างชำระ ห้ามจ่ายล่าช้า เพราะธนาคารจะมองว่าเป็นความเสี่ยง",
            "Credit Bureau is crucial. Never miss or delay payments as banks view this as high risk.",
        ),
        highlight: None,
    },
    TipRow {
        icon: "debt",
        title: ("ปิดหนี้ก่อนยื่นกู้", "Clear Debts Before Applying"),
        content: (
            "หากมีหนี้สินเกิน 30-40% ของรายได้ ธนาคารอาจไม่ปล่อยกู้ ควรปิดหนี้ก้อนเล็กๆ ให้หมดก่อน",
            "If debt exceeds 30-40% of income, approval is unlikely. Clear smaller debts first.",
        ),
        highlight: None,
    },
    TipRow {
        icon: "card",
        title: ("ยกเลิกบัตรเครดิตที่ไม่จำเป็น", "Cancel Unused Credit Cards"),
        content: (
            "การถือบัตรหลายใบคือความเสี่ยงในการสร้างหนี้ ธนาคารอาจมองว่าภาระแฝงเยอะเกินไป",
            "Holding too many cards is a risk. Banks may view this as excessive potential debt.",
        ),
        highlight: None,
    },
    TipRow {
        icon: "docs",
        title: ("เตรียมเอกสารให้ครบ", "Prepare Complete Documents"),
        content: (
            "สลิปเงินเดือน ใบรับรองการทำงาน และหลักฐานรายได้พิเศษ ถ้าครบถ้วนจะอนุมัติไวขึ้นมาก",
            "Payslips, employment certificates, and proof of extra income. Complete docs mean faster approval.",
        ),
        highlight: None,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct LoanTip {
    pub icon: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<&'static str>,
}

pub fn loan_tips(lang: Language) -> Vec<LoanTip> {
    LOAN_TIPS
        .iter()
        .map(|t| LoanTip {
            icon: t.icon,
            title: lang.pick(t.title.0, t.title.1),
            content: lang.pick(t.content.0, t.content.1),
            highlight: t.highlight.map(|(th, en)| lang.pick(th, en)),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    #[serde(default)]
    pub lang: Language,
}

/// GET /api/v1/tips?lang=en
pub async fn handle_get_tips(Query(q): Query<TipsQuery>) -> Json<Vec<LoanTip>> {
    Json(loan_tips(q.lang))
}
