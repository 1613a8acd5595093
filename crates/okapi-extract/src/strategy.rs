use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::ExtractError;

/// Closed sum type selecting how raw UTF-8 text is pulled out of a file.
///
/// Adding a new document format means adding a variant here and an arm in
/// [`ContentStrategy::for_extension`] — this is a Strategy pattern
/// expressed as an enum rather than as a trait object hierarchy, since the
/// set of supported formats is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStrategy {
    Text,
    Xml,
    Pdf,
}

impl ContentStrategy {
    /// Resolve a strategy from a (lowercase, leading-dot) file extension.
    pub fn for_extension(ext: &str) -> Result<Self, ExtractError> {
        match ext.to_ascii_lowercase().as_str() {
            ".txt" => Ok(Self::Text),
            ".xml" | ".xhtml" => Ok(Self::Xml),
            ".pdf" => Ok(Self::Pdf),
            other => Err(ExtractError::UnsupportedExtension {
                ext: other.to_string(),
            }),
        }
    }

    /// Extract UTF-8 text from `path` according to this strategy.
    pub fn read_content(&self, path: &Path) -> Result<String, ExtractError> {
        match self {
            Self::Text => read_text(path),
            Self::Xml => read_xml(path),
            Self::Pdf => read_pdf(path),
        }
    }
}

fn fail(path: &Path, cause: impl std::fmt::Display) -> ExtractError {
    ExtractError::ExtractionFailed {
        path: path.to_path_buf(),
        cause: cause.to_string(),
    }
}

fn read_text(path: &Path) -> Result<String, ExtractError> {
    std::fs::read_to_string(path).map_err(|e| fail(path, e))
}

/// Concatenate character data of every element node, tags and attributes
/// excluded, joined with single spaces.
fn read_xml(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| fail(path, e))?;
    let mut reader = Reader::from_reader(bytes.as_slice());
    reader.config_mut().trim_text(true);

    let mut out = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Text(t)) => push_chardata(&mut out, &t.unescape().map_err(|e| fail(path, e))?),
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner());
                push_chardata(&mut out, &text);
            }
            Ok(_) => {}
            Err(e) => return Err(fail(path, e)),
        }
        buf.clear();
    }

    Ok(out)
}

fn push_chardata(out: &mut String, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(trimmed);
}

/// Extract visible text from every page, page boundaries collapsed to
/// whitespace by `pdf-extract` itself (it joins pages with newlines, which
/// the downstream tokeniser treats as ordinary whitespace).
fn read_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| fail(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolves_known_extensions() {
        assert_eq!(ContentStrategy::for_extension(".txt").unwrap(), ContentStrategy::Text);
        assert_eq!(ContentStrategy::for_extension(".xml").unwrap(), ContentStrategy::Xml);
        assert_eq!(ContentStrategy::for_extension(".xhtml").unwrap(), ContentStrategy::Xml);
        assert_eq!(ContentStrategy::for_extension(".pdf").unwrap(), ContentStrategy::Pdf);
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = ContentStrategy::for_extension(".bin").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedExtension { .. }));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(ContentStrategy::for_extension(".TXT").unwrap(), ContentStrategy::Text);
    }

    #[test]
    fn reads_plain_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello world").unwrap();
        let content = ContentStrategy::Text.read_content(&path).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn extracts_xml_character_data_excluding_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.xml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "<doc attr=\"ignored\"><title>Hello</title><body>World</body></doc>").unwrap();
        drop(f);

        let content = ContentStrategy::Xml.read_content(&path).unwrap();
        assert_eq!(content, "Hello World");
        assert!(!content.contains("ignored"));
        assert!(!content.contains("title"));
    }

    #[test]
    fn missing_file_fails_with_extraction_error() {
        let path = Path::new("/nonexistent/does-not-exist.txt");
        let err = ContentStrategy::Text.read_content(path).unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailed { .. }));
    }
}
