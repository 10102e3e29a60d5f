//! Document Requirement Catalog: which documents each applicant category is asked for.
//!
//! Pure lookup. The identity pair always leads, followed by the category-specific
//! entries in display order.

pub mod handlers;

use crate::models::applicant::{ApplicantCategory, Language};
use crate::models::document::{DocumentCategory, DocumentDescriptor};

/// Compact source row: id, (th, en) label, (th, en) description, category, optional, multiple.
struct Row {
    id: &'static str,
    label: (&'static str, &'static str),
    description: (&'static str, &'static str),
    category: DocumentCategory,
    optional: bool,
    multiple: bool,
}

impl Row {
    fn localize(&self, lang: Language) -> DocumentDescriptor {
        DocumentDescriptor {
            id: self.id,
            label: lang.pick(self.label.0, self.label.1),
            description: lang.pick(self.description.0, self.description.1),
            category: self.category,
            optional: self.optional,
            multiple: self.multiple,
        }
    }
}

const IDENTITY_DOCS: &[Row] = &[
    Row {
        id: "id_card",
        label: ("สำเนาบัตรประชาชน (หน้า-หลัง)", "National ID Card (Front-Back)"),
        description: ("เพื่อยืนยันตัวตน", "For identity verification"),
        category: DocumentCategory::Identity,
        optional: false,
        multiple: false,
    },
    Row {
        id: "house_reg",
        label: ("สำเนาทะเบียนบ้าน (ทุกหน้า)", "House Registration (Tabien Baan)"),
        description: ("ของผู้กู้และคู่สมรส (ถ้ามี)", "Borrower and Spouse"),
        category: DocumentCategory::Identity,
        optional: true,
        multiple: false,
    },
];

const SALARIED_DOCS: &[Row] = &[
    Row {
        id: "salary_slip",
        label: ("สลิปเงินเดือน (ย้อนหลัง 3-6 เดือน)", "Salary Slips (3-6 Months)"),
        description: (
            "สำคัญมาก! AI จะเช็คยอดสุทธิและรายการหัก",
            "Critical for income verification",
        ),
        category: DocumentCategory::Income,
        optional: false,
        multiple: true,
    },
    Row {
        id: "bank_statement_salary",
        label: ("รายการเดินบัญชี (บัญชีเงินเดือน)", "Bank Statement (Payroll Account)"),
        description: ("ย้อนหลัง 6 เดือน (ต้องมี Code เงินเดือน)", "Last 6 months (Salary Code)"),
        category: DocumentCategory::Banking,
        optional: false,
        multiple: true,
    },
    Row {
        id: "employment_cert",
        label: ("หนังสือรับรองเงินเดือน", "Employment Certificate"),
        description: ("อายุไม่เกิน 30-60 วัน", "Not older than 60 days"),
        category: DocumentCategory::Income,
        optional: true,
        multiple: false,
    },
];

const BUSINESS_OWNER_DOCS: &[Row] = &[
    Row {
        id: "dbd_cert",
        label: ("หนังสือรับรองบริษัท (DBD)", "DBD Company Certificate"),
        description: ("อายุไม่เกิน 3-6 เดือน", "Not older than 3-6 months"),
        category: DocumentCategory::Business,
        optional: false,
        multiple: false,
    },
    Row {
        id: "shareholder_list",
        label: ("บัญชีรายชื่อผู้ถือหุ้น (บอจ.5)", "Shareholder List (BorOrJor.5)"),
        description: ("เพื่อดูสัดส่วนความเป็นเจ้าของ (>20%)", "To verify ownership >20%"),
        category: DocumentCategory::Business,
        optional: false,
        multiple: false,
    },
    Row {
        id: "bank_statement_biz",
        label: ("Statement (บัญชีธุรกิจ)", "Bank Statement (Business)"),
        description: ("ย้อนหลัง 6-12 เดือน (หมุนเวียน)", "Last 6-12 months (Cash Flow)"),
        category: DocumentCategory::Banking,
        optional: false,
        multiple: true,
    },
    Row {
        id: "pp30_pp20",
        label: ("ภพ.20 / ภพ.30 (ถ้ามี)", "VAT Cert (PP20/30)"),
        description: ("หลักฐานภาษี เพิ่มความน่าเชื่อถือสูง", "Tax evidence increases score"),
        category: DocumentCategory::Tax,
        optional: true,
        multiple: false,
    },
    Row {
        id: "biz_photos",
        label: ("รูปถ่ายกิจการ / แผนที่", "Business Photos & Map"),
        description: ("4-5 รูป (หน้าร้าน, ป้ายชื่อ, สินค้า)", "4-5 Photos (Storefront, Stock)"),
        category: DocumentCategory::Additional,
        optional: false,
        multiple: true,
    },
];

const FREELANCE_DOCS: &[Row] = &[
    Row {
        id: "50bis",
        label: ("หนังสือรับรองหัก ณ ที่จ่าย (ทวิ 50)", "Withholding Tax Cert (50 Bis)"),
        description: ("สำคัญที่สุด! ใช้แทนสลิปเงินเดือน", "Most important! Replaces payslip"),
        category: DocumentCategory::Tax,
        optional: false,
        multiple: true,
    },
    Row {
        id: "bank_statement",
        label: ("Statement (ย้อนหลัง 6-12 เดือน)", "Bank Statement (6-12 Months)"),
        description: ("ดูความสม่ำเสมอของรายได้", "Check income consistency"),
        category: DocumentCategory::Banking,
        optional: false,
        multiple: true,
    },
    Row {
        id: "professional_license",
        label: ("ใบประกอบวิชาชีพ (แพทย์/วิศวะ)", "Professional License"),
        description: ("ถ้ามี ธนาคารจะพิจารณาง่ายขึ้น", "Increases approval chance"),
        category: DocumentCategory::Professional,
        optional: true,
        multiple: false,
    },
    Row {
        id: "portfolio",
        label: ("รูปถ่ายผลงาน / เพจ / สัญญาจ้าง", "Portfolio / Contracts"),
        description: ("หลักฐานว่าประกอบอาชีพจริง", "Proof of active business"),
        category: DocumentCategory::Additional,
        optional: false,
        multiple: true,
    },
];

const FARMER_DOCS: &[Row] = &[
    Row {
        id: "farmer_book",
        label: (
            "สมุดทะเบียนเกษตรกร (เล่มเขียว)",
            "Farmer Registration Book (Green Book)",
        ),
        description: ("ต้องปรับปรุงข้อมูลล่าสุด", "Must be updated"),
        category: DocumentCategory::Agriculture,
        optional: false,
        multiple: false,
    },
    Row {
        id: "land_deed",
        label: ("เอกสารสิทธิ์ที่ดิน (โฉนด/สปก.)", "Land Title Deed"),
        description: ("แสดงกรรมสิทธิ์ที่ดินทำกิน", "Ownership proof"),
        category: DocumentCategory::Land,
        optional: false,
        multiple: false,
    },
    Row {
        id: "bank_statement_baac",
        label: ("Statement (ธ.ก.ส.)", "Bank Statement (BAAC)"),
        description: ("ย้อนหลัง 12 เดือน (รายได้ฤดูกาล)", "Last 12 months (Seasonal)"),
        category: DocumentCategory::Banking,
        optional: false,
        multiple: true,
    },
];

const INVESTOR_DOCS: &[Row] = &[
    Row {
        id: "asset_deed",
        label: ("โฉนดที่ดิน/ห้องชุด (ปล่อยเช่า)", "Property Title Deed"),
        description: ("แสดงกรรมสิทธิ์ทรัพย์สิน", "Proof of ownership"),
        category: DocumentCategory::Asset,
        optional: false,
        multiple: false,
    },
    Row {
        id: "lease_agreement",
        label: ("สัญญาเช่า (ยังไม่หมดอายุ)", "Active Lease Agreement"),
        description: ("ใช้คำนวณรายได้ค่าเช่า", "To calculate rental income"),
        category: DocumentCategory::Contract,
        optional: false,
        multiple: false,
    },
    Row {
        id: "bank_statement_div",
        label: ("Statement (รับค่าเช่า/ปันผล)", "Bank Statement (Revenue)"),
        description: ("ย้อนหลัง 6-12 เดือน (ต้องตรงกับสัญญา)", "Must match contract"),
        category: DocumentCategory::Banking,
        optional: false,
        multiple: true,
    },
];

fn category_rows(category: ApplicantCategory) -> &'static [Row] {
    match category {
        ApplicantCategory::Salaried => SALARIED_DOCS,
        ApplicantCategory::BusinessOwner => BUSINESS_OWNER_DOCS,
        ApplicantCategory::Freelance => FREELANCE_DOCS,
        ApplicantCategory::Farmer => FARMER_DOCS,
        ApplicantCategory::Investor => INVESTOR_DOCS,
    }
}

/// Returns the ordered document list for a category, or nothing when no
/// category has been chosen yet.
pub fn required_documents(
    lang: Language,
    category: Option<ApplicantCategory>,
) -> Vec<DocumentDescriptor> {
    let Some(category) = category else {
        return Vec::new();
    };

    IDENTITY_DOCS
        .iter()
        .chain(category_rows(category))
        .map(|row| row.localize(lang))
        .collect()
}

/// Looks up a single descriptor by id within a category's catalog.
pub fn find_descriptor(
    lang: Language,
    category: ApplicantCategory,
    id: &str,
) -> Option<DocumentDescriptor> {
    IDENTITY_DOCS
        .iter()
        .chain(category_rows(category))
        .find(|row| row.id == id)
        .map(|row| row.localize(lang))
}
