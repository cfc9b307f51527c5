pub mod mocks;

use bytes::Bytes;
use scorebook_core::pdf::PdfPayload;
use scorebook_metadata::SheetRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A minimal valid PDF payload for tests.
pub fn pdf_payload(name: &str) -> PdfPayload {
    PdfPayload {
        filename: name.to_string(),
        content_type: "application/pdf".to_string(),
        data: Bytes::from_static(b"%PDF-1.4 test content"),
    }
}

/// A bare sheet row, for inserting directly through the store (e.g. without
/// an owner relation).
pub fn sheet_row(title: &str) -> SheetRow {
    let now = OffsetDateTime::now_utc();
    SheetRow {
        sheet_id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        artist: "Anonymous".to_string(),
        genre: "Classical".to_string(),
        instrument: "Piano".to_string(),
        pdf_content: b"%PDF-1.4 test content".to_vec(),
        pdf_filename: "test.pdf".to_string(),
        pdf_size: 21,
        pdf_content_type: "application/pdf".to_string(),
        is_public: true,
        created_at: now,
        updated_at: now,
    }
}
