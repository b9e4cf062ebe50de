//! YAML error diagnostics rendered with source context

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("YAML error: {message}")]
#[diagnostic(code(tyredex::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = offset_of(source, line, column);
        let message = err.to_string();
        let help = hint_for(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }
}

/// Generic YAML error wrapper
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte offset of a 1-indexed line/column position
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let mut remaining = line.saturating_sub(1);
    let mut offset = 0;

    for text_line in source.split_inclusive('\n') {
        if remaining == 0 {
            let within = column.saturating_sub(1).min(text_line.len());
            return offset + within;
        }
        remaining -= 1;
        offset += text_line.len();
    }

    source.len().saturating_sub(1)
}

/// Suggest a fix for common YAML mistakes
fn hint_for(message: &str) -> Option<String> {
    let lower = message.to_lowercase();

    if lower.contains("tab") {
        return Some("YAML indentation must use spaces, not tabs.".to_string());
    }
    if lower.contains("duplicate key") {
        return Some("Each key can only appear once in a mapping.".to_string());
    }
    if lower.contains("mapping values are not allowed") {
        return Some("A ':' may be missing its following space, or the indentation is off.".to_string());
    }
    if lower.contains("expected block end") {
        return Some("Check for inconsistent indentation above this line.".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let source = "one\ntwo\nthree";
        assert_eq!(offset_of(source, 1, 1), 0);
        assert_eq!(offset_of(source, 2, 1), 4);
        assert_eq!(offset_of(source, 3, 2), 9);
        // Past the end clamps instead of panicking
        assert!(offset_of(source, 9, 9) < source.len());
    }

    #[test]
    fn test_hints() {
        assert!(hint_for("found a tab character").is_some());
        assert!(hint_for("duplicate key: id").is_some());
        assert!(hint_for("some other failure").is_none());
    }
}
