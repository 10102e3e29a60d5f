pub mod applicant;
pub mod document;
