use rpa_ai::{
    errors::{LoaderError, PromptError},
    loader::{join_pages, DocumentLoader},
    providers::ai::AiProvider,
    types::CompletionRequest,
};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// A recorded call to [`MockAiProvider`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
    /// All message contents joined with a blank line.
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub streaming: bool,
    pub credential: String,
}

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response for every prompt containing `key`.
    /// Keys are checked in the order they were added.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PromptError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.clone(),
            model: request.settings.model.clone(),
            temperature: request.settings.temperature,
            streaming: request.settings.streaming,
            credential: request.credential.expose().to_string(),
        });

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if prompt.contains(key.as_str()) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for prompt. Got: '{prompt}'"
        )))
    }
}

/// A provider whose every call fails with the given message.
#[derive(Clone, Debug, Default)]
pub struct FailingAiProvider {
    message: String,
    calls: Arc<Mutex<usize>>,
}

impl FailingAiProvider {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl AiProvider for FailingAiProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, PromptError> {
        *self.calls.lock().unwrap() += 1;
        Err(PromptError::AiApi(self.message.clone()))
    }
}

// --- Stub Document Loader ---

/// A loader that ignores the uploaded bytes and returns fixed page texts.
#[derive(Clone, Debug)]
pub enum StubLoader {
    Pages(Vec<String>),
    Fails(String),
}

impl StubLoader {
    pub fn pages(pages: &[&str]) -> Self {
        StubLoader::Pages(pages.iter().map(|p| p.to_string()).collect())
    }
}

impl DocumentLoader for StubLoader {
    fn extract_text(&self, _data: &[u8]) -> Result<String, LoaderError> {
        match self {
            StubLoader::Pages(pages) => Ok(join_pages(pages)),
            StubLoader::Fails(message) => Err(LoaderError::Parse(message.clone())),
        }
    }
}

// --- Test-Specific Helpers ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use printpdf::{
        BuiltinFont, Layer, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem, TextMatrix,
        TextRenderingMode,
    };
    use std::collections::BTreeMap;
    use std::fmt::Write as _;

    /// Generates a PDF with one page per entry of `pages`, compatible with printpdf v0.8.2.
    ///
    /// Text is written with the built-in Helvetica font, so only characters covered by
    /// WinAnsiEncoding survive. An empty entry produces a page without any text operators.
    pub fn generate_test_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Test PDF");
        let layer_def = Layer::new("Layer 1");
        let layer_id = doc.add_layer(&layer_def);
        let font = BuiltinFont::Helvetica;

        for text in pages {
            let mut page = PdfPage::new(Mm(210.0), Mm(297.0), vec![]);
            if !text.is_empty() {
                page.ops = vec![
                    Op::BeginLayer {
                        layer_id: layer_id.clone(),
                    },
                    Op::StartTextSection,
                    Op::SetFontSizeBuiltinFont {
                        size: Pt(12.0),
                        font,
                    },
                    Op::SetTextMatrix {
                        matrix: TextMatrix::Translate(Mm(10.0).into(), Mm(280.0).into()),
                    },
                    Op::SetTextRenderingMode {
                        mode: TextRenderingMode::Fill,
                    },
                    Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(text.to_string())],
                        font,
                    },
                    Op::EndTextSection,
                    Op::EndLayer {
                        layer_id: layer_id.clone(),
                    },
                ];
            }
            doc.pages.push(page);
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            eprintln!("PDF generation warnings: {warnings:?}");
        }

        Ok(bytes)
    }

    /// Generates a PDF whose text is shown through a two-byte `Identity-H` font.
    ///
    /// Every distinct character gets its own code, and the font's `ToUnicode` map is
    /// the only way back to the original text, as in PDFs produced by office suites
    /// for Hangul documents. No glyph program is embedded.
    pub fn generate_cid_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        let mut codes: BTreeMap<char, u16> = BTreeMap::new();
        for ch in pages.iter().flat_map(|p| p.chars()) {
            let next = u16::try_from(codes.len() + 1)?;
            codes.entry(ch).or_insert(next);
        }

        let mut objects: Vec<String> = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            String::new(),
            "<< /Type /Font /Subtype /Type0 /BaseFont /TestHangul /Encoding /Identity-H \
             /DescendantFonts [4 0 R] /ToUnicode 6 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /CIDFontType2 /BaseFont /TestHangul \
             /CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> \
             /FontDescriptor 5 0 R /DW 1000 /W [] /CIDToGIDMap /Identity >>"
                .to_string(),
            "<< /Type /FontDescriptor /FontName /TestHangul /Flags 4 \
             /FontBBox [0 -200 1000 800] /ItalicAngle 0 /Ascent 800 /Descent -200 \
             /CapHeight 700 /StemV 80 >>"
                .to_string(),
            stream_object(&to_unicode_cmap(&codes)?),
        ];

        let mut kids = Vec::with_capacity(pages.len());
        for text in pages {
            let page_id = objects.len() + 1;
            kids.push(format!("{page_id} 0 R"));
            if text.is_empty() {
                objects.push(page_object(None));
                continue;
            }
            objects.push(page_object(Some(page_id + 1)));

            let mut shown = String::new();
            for ch in text.chars() {
                write!(shown, "{:04X}", codes[&ch])?;
            }
            objects.push(stream_object(&format!(
                "BT\n/F1 12 Tf\n72 720 Td\n<{shown}> Tj\nET"
            )));
        }
        objects[1] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        );

        let mut out = b"%PDF-1.7\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", index + 1).as_bytes());
        }
        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            write!(xref, "{offset:010} 00000 n \n")?;
        }
        write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )?;
        out.extend_from_slice(xref.as_bytes());
        Ok(out)
    }

    fn page_object(contents: Option<usize>) -> String {
        let contents = contents
            .map(|id| format!(" /Contents {id} 0 R"))
            .unwrap_or_default();
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
             /Resources << /Font << /F1 3 0 R >> >>{contents} >>"
        )
    }

    fn stream_object(data: &str) -> String {
        format!("<< /Length {} >>\nstream\n{data}\nendstream", data.len())
    }

    fn to_unicode_cmap(codes: &BTreeMap<char, u16>) -> Result<String> {
        let mut cmap = String::from(
            "begincmap\n/CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );
        let entries: Vec<(&char, &u16)> = codes.iter().collect();
        for chunk in entries.chunks(100) {
            writeln!(cmap, "{} beginbfchar", chunk.len())?;
            for (ch, code) in chunk {
                let mut units = [0u16; 2];
                let target: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                writeln!(cmap, "<{code:04X}> <{target}>")?;
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap");
        Ok(cmap)
    }
}
