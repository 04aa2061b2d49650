//! Search terms file handling
//!
//! The collector reads its search terms from a plain text file, one term
//! per line. The same file can be handed to the analyser to restrict a run
//! to the listed terms and to make terms that never matched anything show
//! up as "no data" instead of disappearing.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use super::{IngestError, IngestResult};

/// Load search terms from a text file, one per line
///
/// Blank lines and surrounding whitespace are ignored. An empty file is an
/// error: a run restricted to zero terms would silently produce nothing.
pub fn load_search_terms(path: &Path) -> IngestResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    let terms: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if terms.is_empty() {
        return Err(IngestError::EmptyTermsFile(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), count = terms.len(), "Loaded search terms");
    Ok(terms)
}

/// Case-insensitive matcher over a set of term names
pub struct TermMatcher {
    patterns: Vec<Regex>,
}

impl TermMatcher {
    /// Compile a matcher for the given terms
    pub fn new<S: AsRef<str>>(terms: &[S]) -> IngestResult<Self> {
        let patterns = terms
            .iter()
            .map(|term| {
                let term = term.as_ref();
                RegexBuilder::new(&format!("^{}$", regex::escape(term)))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| IngestError::InvalidTerm {
                        term: term.to_string(),
                        source,
                    })
            })
            .collect::<IngestResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether a term name matches any of the loaded terms
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(term))
    }
}
