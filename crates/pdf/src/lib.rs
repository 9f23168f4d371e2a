//! # rpa-ai-pdf: PDF Document Loader
//!
//! Implements `rpa_ai::loader::DocumentLoader` for PDF uploads. Text is taken from
//! the text-showing operators of each page's content stream and decoded through
//! the active font's `ToUnicode` map when the font carries one. There is no OCR
//! and no layout reconstruction.

use pdf::{
    content::{Op, TextDrawAdjusted},
    file::FileOptions,
    font::{Font, ToUnicodeMap},
    object::Resolve,
    primitive::{Name, PdfString},
};
use rpa_ai::{
    errors::LoaderError,
    loader::{join_pages, DocumentLoader},
};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Turns the raw codes of a text-showing operator into Unicode for one font.
#[derive(Default)]
struct TextDecoder {
    to_unicode: Option<ToUnicodeMap>,
    two_byte: bool,
}

impl TextDecoder {
    fn for_font(font: &Font, resolve: &impl Resolve) -> Self {
        let to_unicode = match font.to_unicode(resolve) {
            Some(Ok(map)) => Some(map),
            Some(Err(e)) => {
                warn!(font = ?font.name, "Ignoring unreadable ToUnicode map: {e}");
                None
            }
            None => None,
        };
        Self {
            to_unicode,
            two_byte: font.is_cid(),
        }
    }

    fn decode(&self, text: &PdfString, out: &mut String) {
        let Some(map) = &self.to_unicode else {
            out.push_str(&text.to_string_lossy());
            return;
        };
        let bytes = text.as_bytes();
        if self.two_byte {
            for pair in bytes.chunks(2) {
                let code = match pair {
                    [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                    [single] => u16::from(*single),
                    _ => continue,
                };
                if let Some(unicode) = map.get(code) {
                    out.push_str(unicode);
                }
            }
        } else {
            for &byte in bytes {
                match map.get(u16::from(byte)) {
                    Some(unicode) => out.push_str(unicode),
                    None => out.push(char::from(byte)),
                }
            }
        }
    }
}

/// Extracts the text of every page, in page order. Pages without text yield `""`.
pub fn extract_page_texts(pdf_data: &[u8]) -> Result<Vec<String>, LoaderError> {
    if pdf_data.is_empty() {
        return Err(LoaderError::Empty);
    }

    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| LoaderError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut pages = Vec::with_capacity(file.num_pages() as usize);

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| LoaderError::Parse(e.to_string()))?;
        let resources = page.resources().ok();
        let mut decoders: HashMap<Name, TextDecoder> = HashMap::new();
        let mut current_font: Option<Name> = None;
        let plain = TextDecoder::default();

        let mut page_text = String::new();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| LoaderError::Parse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    Op::TextFont { name, .. } => {
                        if !decoders.contains_key(name) {
                            let font = resources.and_then(|r| r.fonts.get(name));
                            let decoder = match font.map(|font| font.load(&resolver)) {
                                Some(Ok(font)) => TextDecoder::for_font(&font, &resolver),
                                Some(Err(e)) => {
                                    warn!(page = page_num, %name, "Failed to load font: {e}");
                                    TextDecoder::default()
                                }
                                None => TextDecoder::default(),
                            };
                            decoders.insert(name.clone(), decoder);
                        }
                        current_font = Some(name.clone());
                    }
                    Op::TextDraw { text } => {
                        let decoder = current_font
                            .as_ref()
                            .and_then(|name| decoders.get(name))
                            .unwrap_or(&plain);
                        decoder.decode(text, &mut page_text);
                    }
                    Op::TextDrawAdjusted { array } => {
                        let decoder = current_font
                            .as_ref()
                            .and_then(|name| decoders.get(name))
                            .unwrap_or(&plain);
                        for item in array {
                            if let TextDrawAdjusted::Text(text) = item {
                                decoder.decode(text, &mut page_text);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        pages.push(page_text);
    }
    Ok(pages)
}

/// The loader used by the document analysis page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    #[instrument(skip_all, fields(bytes = data.len()))]
    fn extract_text(&self, data: &[u8]) -> Result<String, LoaderError> {
        let pages = extract_page_texts(data)?;
        let text = join_pages(&pages);
        debug!(
            pages = pages.len(),
            empty_pages = pages.iter().filter(|p| p.is_empty()).count(),
            chars = text.chars().count(),
            "Extracted PDF text"
        );
        Ok(text)
    }
}
