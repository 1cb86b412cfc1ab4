//! On-disk format for an [`IndexSnapshot`].
//!
//! Two co-located artifacts share a base path:
//!
//! - `{base}.index`: format version, dimension, count, fact fingerprint, flat `f32` matrix
//! - `{base}.facts`: format version, fact fingerprint, ordered facts
//!
//! Both carry the same BLAKE3 fingerprint of the fact sequence. A loader that finds the
//! fingerprints disagree (for example after a crash between the two renames) rejects the
//! pair instead of pairing vectors with the wrong facts.

use std::path::{Path, PathBuf};

use rkyv::rancor::Error as RkyvError;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::{debug, info};

use crate::hashing::{FINGERPRINT_LEN, fingerprint_facts, short_fingerprint};
use crate::storage::{ArtifactWriter, MmapError, MmapFileHandle};

use super::error::PersistenceError;
use super::snapshot::IndexSnapshot;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Extension appended to the base path for the vector artifact.
pub const INDEX_EXTENSION: &str = "index";

/// Extension appended to the base path for the fact artifact.
pub const FACTS_EXTENSION: &str = "facts";

#[derive(Archive, Serialize, Deserialize, Debug)]
pub(crate) struct VectorArtifact {
    format_version: u32,
    dimension: u32,
    count: u64,
    fingerprint: [u8; FINGERPRINT_LEN],
    vectors: Vec<f32>,
}

#[derive(Archive, Serialize, Deserialize, Debug)]
pub(crate) struct FactArtifact {
    format_version: u32,
    fingerprint: [u8; FINGERPRINT_LEN],
    facts: Vec<String>,
}

/// Paths of the vector and fact artifacts for `base`.
pub fn artifact_paths(base: &Path) -> (PathBuf, PathBuf) {
    (with_suffix(base, INDEX_EXTENSION), with_suffix(base, FACTS_EXTENSION))
}

fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Writes both artifacts, publishing them only after both are durable.
pub fn save(snapshot: &IndexSnapshot, base: &Path) -> Result<(), PersistenceError> {
    let (index_path, facts_path) = artifact_paths(base);

    let dimension = u32::try_from(snapshot.dimension()).map_err(|_| {
        PersistenceError::Serialization(format!(
            "dimension {} does not fit the artifact format",
            snapshot.dimension()
        ))
    })?;

    let vectors = VectorArtifact {
        format_version: FORMAT_VERSION,
        dimension,
        count: snapshot.len() as u64,
        fingerprint: *snapshot.fingerprint(),
        vectors: snapshot.vectors().to_vec(),
    };
    let facts = FactArtifact {
        format_version: FORMAT_VERSION,
        fingerprint: *snapshot.fingerprint(),
        facts: snapshot.facts().to_vec(),
    };

    let vector_bytes = rkyv::to_bytes::<RkyvError>(&vectors)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
    let fact_bytes = rkyv::to_bytes::<RkyvError>(&facts)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

    let mut writer = ArtifactWriter::new();
    writer.stage(&index_path, &vector_bytes)?;
    writer.stage(&facts_path, &fact_bytes)?;
    writer.commit()?;

    info!(
        index = %index_path.display(),
        facts = snapshot.len(),
        dimension = snapshot.dimension(),
        fingerprint = %short_fingerprint(snapshot.fingerprint()),
        "Index saved"
    );
    Ok(())
}

/// Restores a snapshot, verifying that both artifacts describe the same fact sequence.
pub fn load(base: &Path) -> Result<IndexSnapshot, PersistenceError> {
    let (index_path, facts_path) = artifact_paths(base);

    // Check both up front so a half-present pair never gets partially decoded.
    for path in [&index_path, &facts_path] {
        if !path.is_file() {
            return Err(PersistenceError::MissingArtifact { path: path.clone() });
        }
    }

    let vectors = read_artifact::<VectorArtifact>(&index_path)?;
    let facts = read_artifact::<FactArtifact>(&facts_path)?;

    check_version(&index_path, vectors.format_version)?;
    check_version(&facts_path, facts.format_version)?;

    let dimension = vectors.dimension as usize;
    let count = usize::try_from(vectors.count).map_err(|_| PersistenceError::Corrupt {
        path: index_path.clone(),
        reason: format!("fact count {} overflows usize", vectors.count),
    })?;

    if dimension == 0 {
        return Err(PersistenceError::Corrupt {
            path: index_path,
            reason: "dimension is zero".to_string(),
        });
    }

    if count == 0 {
        return Err(PersistenceError::Corrupt {
            path: index_path,
            reason: "index holds no facts".to_string(),
        });
    }

    if count != facts.facts.len() {
        return Err(PersistenceError::Inconsistent {
            reason: format!(
                "vector artifact holds {} facts, fact artifact holds {}",
                count,
                facts.facts.len()
            ),
        });
    }

    if count.checked_mul(dimension) != Some(vectors.vectors.len()) {
        return Err(PersistenceError::Corrupt {
            path: index_path,
            reason: format!(
                "expected {} x {} floats, found {}",
                count,
                dimension,
                vectors.vectors.len()
            ),
        });
    }

    if vectors.fingerprint != facts.fingerprint {
        return Err(PersistenceError::Inconsistent {
            reason: "artifacts were written for different fact sequences".to_string(),
        });
    }

    let actual = fingerprint_facts(&facts.facts);
    if actual != facts.fingerprint {
        return Err(PersistenceError::Corrupt {
            path: facts_path,
            reason: "fact sequence does not match its fingerprint".to_string(),
        });
    }

    info!(
        index = %index_path.display(),
        facts = count,
        dimension,
        fingerprint = %short_fingerprint(&actual),
        "Index loaded"
    );

    Ok(IndexSnapshot::from_parts(
        facts.facts,
        vectors.vectors,
        dimension,
        actual,
    ))
}

fn read_artifact<T>(path: &Path) -> Result<T, PersistenceError>
where
    T: Archive,
    T::Archived: rkyv::Portable
        + for<'a> rkyv::bytecheck::CheckBytes<rkyv::api::high::HighValidator<'a, RkyvError>>
        + Deserialize<T, rkyv::api::high::HighDeserializer<RkyvError>>,
{
    let corrupt = |reason: String| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let handle = MmapFileHandle::open(path).map_err(|e| match e {
        MmapError::Io(source) if source.kind() == std::io::ErrorKind::NotFound => {
            PersistenceError::MissingArtifact {
                path: path.to_path_buf(),
            }
        }
        other => corrupt(other.to_string()),
    })?;
    debug!(path = %path.display(), bytes = handle.len(), "Mapped index artifact");

    let archived = handle
        .access_archived::<T::Archived>()
        .map_err(|e| corrupt(e.to_string()))?;

    rkyv::deserialize::<T, RkyvError>(archived).map_err(|e| corrupt(e.to_string()))
}

fn check_version(path: &Path, found: u32) -> Result<(), PersistenceError> {
    if found != FORMAT_VERSION {
        return Err(PersistenceError::VersionMismatch {
            path: path.to_path_buf(),
            found,
            expected: FORMAT_VERSION,
        });
    }
    Ok(())
}
