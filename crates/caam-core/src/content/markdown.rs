use std::path::{Path, PathBuf};

use pulldown_cmark::{html, Options, Parser};
use tracing::debug;

use crate::error::ContentError;

/// File name of the privacy policy within the content directory.
pub const PRIVACY_POLICY: &str = "privacy-policy.md";

/// File name of the terms of use within the content directory.
pub const TERMS_OF_USE: &str = "terms-of-use.md";

/// A markdown file read verbatim from the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub path: PathBuf,
    pub source: String,
}

impl MarkdownDocument {
    pub fn load(content_dir: &Path, file_name: &str) -> Result<Self, ContentError> {
        let path = content_dir.join(file_name);
        let source = std::fs::read_to_string(&path).map_err(|source| ContentError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "Loaded markdown document");
        Ok(Self { path, source })
    }

    /// First level-one heading, used as the page title.
    pub fn title(&self) -> Option<&str> {
        self.source
            .lines()
            .find_map(|line| line.trim().strip_prefix("# "))
            .map(str::trim)
    }

    /// Render to an HTML fragment. Tables, strikethrough and footnotes are enabled.
    pub fn to_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        let parser = Parser::new_ext(&self.source, options);
        let mut out = String::with_capacity(self.source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_render() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PRIVACY_POLICY),
            "# Privacy Policy\n\nWe collect **no** payment data.\n\n- email\n- name\n",
        )
        .unwrap();

        let doc = MarkdownDocument::load(dir.path(), PRIVACY_POLICY).unwrap();
        assert_eq!(doc.title(), Some("Privacy Policy"));

        let html = doc.to_html();
        assert!(html.contains("<h1>Privacy Policy</h1>"));
        assert!(html.contains("<strong>no</strong>"));
        assert!(html.contains("<li>email</li>"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = MarkdownDocument::load(dir.path(), TERMS_OF_USE).unwrap_err();
        assert!(err.to_string().contains(TERMS_OF_USE));
    }

    #[test]
    fn test_title_absent() {
        let doc = MarkdownDocument {
            path: PathBuf::from("x.md"),
            source: "Just text\n## Sub".to_string(),
        };
        assert_eq!(doc.title(), None);
    }
}
