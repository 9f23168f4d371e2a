//! # PDF Loader Integration Tests

use anyhow::Result;
use rpa_ai::{errors::LoaderError, loader::DocumentLoader};
use rpa_ai_pdf::{extract_page_texts, PdfLoader};
use rpa_ai_test_utils::helpers::{generate_cid_pdf, generate_test_pdf};

#[test]
fn test_pages_are_extracted_in_order() -> Result<()> {
    let pdf_data = generate_test_pdf(&["Page One", "", "Page Three"])?;

    let pages = extract_page_texts(&pdf_data)?;

    assert_eq!(pages, vec!["Page One", "", "Page Three"]);
    Ok(())
}

#[test]
fn test_empty_page_contributes_nothing() -> Result<()> {
    let pdf_data = generate_test_pdf(&["Page One", ""])?;

    let text = PdfLoader::new().extract_text(&pdf_data)?;

    assert_eq!(text, "Page One");
    Ok(())
}

#[test]
fn test_page_texts_are_concatenated() -> Result<()> {
    let pdf_data = generate_test_pdf(&["Budget notice", "Second page"])?;

    let text = PdfLoader::new().extract_text(&pdf_data)?;

    assert_eq!(text, "Budget noticeSecond page");
    Ok(())
}

#[test]
fn test_two_byte_font_text_is_decoded_through_its_unicode_map() -> Result<()> {
    let pdf_data = generate_cid_pdf(&["공문 제목", "", "예산 집행 안내 Page One"])?;

    let pages = extract_page_texts(&pdf_data)?;

    assert_eq!(pages, vec!["공문 제목", "", "예산 집행 안내 Page One"]);
    assert_eq!(
        PdfLoader::new().extract_text(&pdf_data)?,
        "공문 제목예산 집행 안내 Page One"
    );
    Ok(())
}

#[test]
fn test_malformed_pdf_surfaces_the_parser_error() {
    let err = PdfLoader::new()
        .extract_text(b"this is not a pdf")
        .unwrap_err();
    assert!(matches!(err, LoaderError::Parse(_)));
}

#[test]
fn test_empty_upload_is_rejected() {
    let err = PdfLoader::new().extract_text(&[]).unwrap_err();
    assert!(matches!(err, LoaderError::Empty));
}
