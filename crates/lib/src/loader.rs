use crate::errors::LoaderError;
use std::fmt::Debug;

/// Turns an uploaded document into plain text for a prompt.
pub trait DocumentLoader: Send + Sync + Debug {
    fn extract_text(&self, data: &[u8]) -> Result<String, LoaderError>;
}

/// Concatenates per-page texts in page order. Empty pages contribute nothing.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .filter(|page| !page.as_ref().is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page.as_ref());
            text
        })
}

#[cfg(test)]
mod tests {
    use super::join_pages;

    #[test]
    fn empty_pages_are_skipped() {
        assert_eq!(join_pages(["Page One", ""]), "Page One");
        assert_eq!(join_pages(["", "b", "", "c"]), "bc");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }
}
