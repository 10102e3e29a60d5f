//! Analysis Request Builder: turns the session's uploads into a multimodal oracle request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::future::try_join_all;

use crate::analysis::prompts::{analysis_instruction, ANALYSIS_SYSTEM_PROMPT};
use crate::analysis::schema::response_schema;
use crate::errors::AppError;
use crate::llm_client::{GenerateRequest, InlineData, Part};
use crate::models::applicant::{ApplicantCategory, Language};
use crate::session::store::UploadedDocument;

pub const OCTET_STREAM: &str = "application/octet-stream";
const DEFAULT_MIME: &str = "application/pdf";

/// Reported type first, then the filename extension, then PDF.
pub fn resolve_mime_type(filename: &str, reported: &str) -> String {
    let reported = reported.trim();
    if !reported.is_empty() && reported != OCTET_STREAM {
        return reported.to_string();
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    let resolved = match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => DEFAULT_MIME,
    };
    resolved.to_string()
}

/// Reads one upload into an inline part. Zero-byte files are rejected so they
/// never reach the oracle.
async fn read_part(doc: &UploadedDocument) -> Result<InlineData, AppError> {
    if doc.data.is_empty() {
        return Err(AppError::EmptyFile(doc.filename.clone()));
    }

    let data = doc.data.clone();
    let encoded = tokio::task::spawn_blocking(move || STANDARD.encode(&data))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {e}", doc.filename))?;

    Ok(InlineData {
        mime_type: resolve_mime_type(&doc.filename, &doc.mime_type),
        data: encoded,
    })
}

/// Encodes every document concurrently and assembles the oracle request.
/// The first failing read (including a zero-byte file) fails the whole build,
/// so nothing reaches the oracle.
pub async fn build_request(
    docs: &[UploadedDocument],
    category: ApplicantCategory,
    lang: Language,
) -> Result<GenerateRequest, AppError> {
    let inline = try_join_all(docs.iter().map(read_part)).await?;

    let mut parts: Vec<Part> = inline.into_iter().map(Part::InlineData).collect();
    parts.push(Part::Text(analysis_instruction(category, lang)));

    Ok(GenerateRequest {
        parts,
        system_instruction: ANALYSIS_SYSTEM_PROMPT.to_string(),
        response_schema: response_schema(),
        temperature: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::models::document::DocumentCategory;

    fn doc(name: &str, mime: &str, data: &'static [u8]) -> UploadedDocument {
        UploadedDocument {
            id: format!("id_card-0-{name}"),
            filename: name.to_string(),
            descriptor_id: "id_card".to_string(),
            category: DocumentCategory::Identity,
            mime_type: mime.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_reported_type_wins() {
        assert_eq!(resolve_mime_type("scan.pdf", "image/png"), "image/png");
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        assert_eq!(resolve_mime_type("photo.JPEG", OCTET_STREAM), "image/jpeg");
        assert_eq!(resolve_mime_type("photo.jpg", ""), "image/jpeg");
        assert_eq!(resolve_mime_type("a.png", ""), "image/png");
        assert_eq!(resolve_mime_type("a.webp", ""), "image/webp");
        assert_eq!(resolve_mime_type("IMG_01.HEIC", ""), "image/heic");
        assert_eq!(resolve_mime_type("IMG_01.heif", ""), "image/heif");
        assert_eq!(resolve_mime_type("statement.pdf", ""), "application/pdf");
    }

    #[test]
    fn test_unknown_extension_defaults_to_pdf() {
        assert_eq!(resolve_mime_type("document", ""), "application/pdf");
        assert_eq!(resolve_mime_type("archive.xyz", OCTET_STREAM), "application/pdf");
    }

    #[tokio::test]
    async fn test_build_request_orders_parts_and_encodes() {
        let docs = vec![
            doc("id.png", "image/png", b"png-bytes"),
            doc("slip.pdf", "", b"%PDF-1.4"),
        ];
        let request = build_request(&docs, ApplicantCategory::Salaried, Language::En)
            .await
            .unwrap();

        assert_eq!(request.parts.len(), 3);
        assert_eq!(
            request.parts[0],
            Part::InlineData(InlineData {
                mime_type: "image/png".to_string(),
                data: STANDARD.encode(b"png-bytes"),
            })
        );
        assert_eq!(
            request.parts[1],
            Part::InlineData(InlineData {
                mime_type: "application/pdf".to_string(),
                data: STANDARD.encode(b"%PDF-1.4"),
            })
        );
        match &request.parts[2] {
            Part::Text(text) => assert!(text.contains("applying as a **Salaried**")),
            other => panic!("expected instruction text, got {other:?}"),
        }
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.system_instruction, ANALYSIS_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let docs = vec![doc("ok.pdf", "", b"%PDF"), doc("blank.pdf", "", b"")];
        let err = build_request(&docs, ApplicantCategory::Farmer, Language::Th)
            .await
            .unwrap_err();
        match err {
            AppError::EmptyFile(name) => assert_eq!(name, "blank.pdf"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
