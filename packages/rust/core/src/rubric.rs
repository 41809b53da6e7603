//! The audit rubric and prompt composition.
//!
//! The rubric is a versioned text asset, not code: scoring bands change far
//! more often than the pipeline around them. The built-in template is
//! embedded at compile time but can be overridden with any file via the
//! config's `rubric_path`.

use std::path::Path;

use webaudit_shared::{Result, WebAuditError};

/// The built-in rubric template.
const BUILTIN_RUBRIC: &str = include_str!("../templates/rubric.txt");

/// The instruction template fed to the model ahead of the page markup.
#[derive(Debug, Clone)]
pub struct Rubric {
    text: String,
}

impl Rubric {
    /// The built-in rubric shipped with this release.
    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_RUBRIC.to_string(),
        }
    }

    /// Load a rubric override from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| WebAuditError::io(path, e))?;
        if text.trim().is_empty() {
            return Err(WebAuditError::config(format!(
                "rubric file {} is empty",
                path.display()
            )));
        }
        Ok(Self { text })
    }

    /// The rubric text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compose the full prompt payload: rubric first, then the normalized markup.
///
/// No capping, truncation, or chunking — if the payload exceeds the model's
/// context window, the API's own error is the failure mode.
pub fn compose_prompt(rubric: &Rubric, markup: &str) -> String {
    format!("{}\n{markup}", rubric.text().trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rubric_has_scoring_contract() {
        let rubric = Rubric::builtin();
        let text = rubric.text();

        assert!(text.contains("SEO: 25%"));
        assert!(text.contains("90-100"));
        assert!(text.contains("70-89"));
        assert!(text.contains("OVERALL SCORE"));
        assert!(text.contains("\\033["));
        assert!(text.trim_end().ends_with("Analyze the following HTML:"));
    }

    #[test]
    fn rubric_precedes_markup() {
        let rubric = Rubric::builtin();
        let markup = "<html>\n  <head>\n  </head>\n</html>\n";
        let prompt = compose_prompt(&rubric, markup);

        let rubric_pos = prompt.find("OVERALL SCORE").unwrap();
        let markup_pos = prompt.find("<html>").unwrap();
        assert!(rubric_pos < markup_pos);
        assert!(prompt.ends_with(markup));
    }

    #[test]
    fn no_truncation_for_large_payloads() {
        let rubric = Rubric::builtin();
        // A representative 10KB page.
        let markup = "<p>\n  padding content line\n</p>\n".repeat(400);
        assert!(markup.len() > 10_000);

        let prompt = compose_prompt(&rubric, &markup);
        assert!(prompt.len() >= rubric.text().trim_end().len() + 1 + markup.len());
        assert!(prompt.ends_with(&markup));
    }

    #[test]
    fn rubric_override_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("webaudit-rubric-test.txt");
        std::fs::write(&path, "Score everything 100.\n").unwrap();

        let rubric = Rubric::from_file(&path).unwrap();
        assert_eq!(rubric.text(), "Score everything 100.\n");

        std::fs::write(&path, "   \n").unwrap();
        assert!(Rubric::from_file(&path).is_err());

        let _ = std::fs::remove_file(&path);
    }
}
