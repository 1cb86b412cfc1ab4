//! Fact corpus loading: one fact per line.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
/// Errors returned while loading a fact corpus.
pub enum CorpusError {
    /// The corpus file could not be read (missing, unreadable, or not UTF-8).
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus holds no facts after trimming.
    #[error("corpus {path} contains no facts")]
    Empty { path: PathBuf },
}

/// Reads facts from `path`: one per line, trimmed, blanks skipped, first occurrence kept.
pub fn load_facts(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let facts = parse_facts(&text);
    if facts.is_empty() {
        return Err(CorpusError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), facts = facts.len(), "Corpus loaded");
    Ok(facts)
}

/// Splits `text` into facts with the same rules as [`load_facts`].
pub fn parse_facts(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut facts = Vec::new();
    let mut duplicates = 0usize;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if seen.insert(line) {
            facts.push(line.to_string());
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        debug!(duplicates, "Dropped duplicate facts");
    }
    facts
}
