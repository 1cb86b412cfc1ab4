use std::path::Path;

use tracing::{info, warn};

use crate::corpus::load_facts;
use crate::embedding::Embedder;
use crate::index::{FactIndex, IndexError, persist};

use super::error::BootstrapError;

/// How [`bootstrap_index`] obtained the published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Restored from the persisted artifacts.
    Loaded { facts: usize },
    /// Rebuilt from the corpus and saved.
    Rebuilt { facts: usize },
}

/// Publishes an index in `index`: loads it from `base`, or rebuilds it from `corpus`.
///
/// The rebuild path runs when the artifacts are missing, corrupt or inconsistent, and when
/// they were built with an embedder of a different dimension. Any other failure is returned.
pub fn bootstrap_index<E>(
    index: &FactIndex,
    embedder: &E,
    base: &Path,
    corpus: &Path,
) -> Result<BootstrapOutcome, BootstrapError>
where
    E: Embedder + ?Sized,
{
    match persist::load(base) {
        Ok(snapshot) if snapshot.dimension() == embedder.dimension() => {
            let facts = snapshot.len();
            index.publish(snapshot);
            return Ok(BootstrapOutcome::Loaded { facts });
        }
        Ok(snapshot) => {
            warn!(
                path = %base.display(),
                stored = snapshot.dimension(),
                embedder = embedder.dimension(),
                "Persisted index dimension differs from embedder; rebuilding from corpus"
            );
        }
        Err(e) => {
            warn!(
                path = %base.display(),
                error = %e,
                "Persisted index unusable; rebuilding from corpus"
            );
        }
    }

    let facts = load_facts(corpus)?;
    let snapshot = index.build(embedder, facts)?;
    persist::save(&snapshot, base).map_err(IndexError::from)?;

    info!(facts = snapshot.len(), path = %base.display(), "Index rebuilt and saved");
    Ok(BootstrapOutcome::Rebuilt {
        facts: snapshot.len(),
    })
}
