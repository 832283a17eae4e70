//! Bundle directory persistence: write/read/verify `ArtifactBundleV1` on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   bundle_manifest.json         canonical JSON, full artifact listing
//!   bundle_digest_basis.json     canonical JSON, normative projection only
//!   bundle_digest.txt            ASCII digest string ("sha256:...")
//!   run_config.json              artifact (normative)
//!   explore_report.json          artifact (normative)
//!   summary.txt                  artifact (observational)
//! ```
//!
//! The directory path is never part of any hash surface. The manifest's
//! declared list is the source of truth, not directory order.
//!
//! # Fail-closed semantics
//!
//! - Missing metadata file → error
//! - Missing declared artifact → error
//! - Extra undeclared entry (file or subdirectory) → error
//! - Stored digest differs from the recomputed one → error

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use moo_kernel::proof::hash::{canonical_hash, ContentHash};

use crate::bundle::{
    verify_bundle, ArtifactBundleV1, BundleArtifact, BundleVerifyError, DOMAIN_BUNDLE_DIGEST,
    MANIFEST_SCHEMA_VERSION,
};

const MANIFEST_FILENAME: &str = "bundle_manifest.json";
const DIGEST_BASIS_FILENAME: &str = "bundle_digest_basis.json";
const DIGEST_FILENAME: &str = "bundle_digest.txt";

const METADATA_FILENAMES: [&str; 3] = [MANIFEST_FILENAME, DIGEST_BASIS_FILENAME, DIGEST_FILENAME];

/// Prefix of in-flight files written by [`write_bundle_dir`].
const TEMP_PREFIX: &str = ".tmp_";

/// Error writing a bundle directory.
#[derive(Debug)]
pub enum BundleDirWriteError {
    Io { detail: String },
    /// An artifact name would escape the directory or clash with metadata.
    InvalidArtifactName { name: String },
    /// The target directory holds an entry the bundle would not own.
    ForeignEntry { name: String },
}

impl std::fmt::Display for BundleDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::InvalidArtifactName { name } => write!(f, "invalid artifact name: {name:?}"),
            Self::ForeignEntry { name } => {
                write!(f, "target directory holds a non-bundle entry: {name:?}")
            }
        }
    }
}

impl std::error::Error for BundleDirWriteError {}

/// Error reading a bundle directory.
#[derive(Debug)]
pub enum BundleDirReadError {
    Io { detail: String },
    /// A required metadata file is missing.
    MissingMetadata { filename: String },
    /// A declared artifact file is missing.
    MissingArtifact { name: String },
    /// An undeclared entry exists in the directory.
    ExtraFile { name: String },
    /// `bundle_manifest.json` is not valid JSON or has the wrong shape.
    ManifestParseError { detail: String },
    /// Manifest `schema_version` is not recognized.
    ManifestVersionMismatch { found: String },
    /// An artifact entry in the manifest is malformed.
    ManifestEntryInvalid { detail: String },
    /// `bundle_digest.txt` differs from the digest recomputed from the basis.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for BundleDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingMetadata { filename } => write!(f, "missing metadata file: {filename}"),
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra entry: {name}"),
            Self::ManifestParseError { detail } => write!(f, "manifest parse error: {detail}"),
            Self::ManifestVersionMismatch { found } => {
                write!(f, "manifest version mismatch: {found:?}")
            }
            Self::ManifestEntryInvalid { detail } => write!(f, "manifest entry invalid: {detail}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for BundleDirReadError {}

/// Error verifying a bundle directory.
#[derive(Debug)]
pub enum BundleDirVerifyError {
    ReadError(BundleDirReadError),
    VerifyError(BundleVerifyError),
}

impl std::fmt::Display for BundleDirVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadError(e) => write!(f, "read error: {e}"),
            Self::VerifyError(e) => write!(f, "verify error: {e}"),
        }
    }
}

impl std::error::Error for BundleDirVerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadError(e) => Some(e),
            Self::VerifyError(e) => Some(e),
        }
    }
}

/// Write `bundle` into `dir`, creating it if needed.
///
/// Each file goes through a temp file plus rename. The directory may be new
/// or hold a previous bundle's files; any other entry is refused before
/// anything is written.
///
/// # Errors
///
/// Returns [`BundleDirWriteError`] on I/O failure, an artifact name that
/// is not a plain filename, or a foreign entry in `dir`.
pub fn write_bundle_dir(bundle: &ArtifactBundleV1, dir: &Path) -> Result<(), BundleDirWriteError> {
    for name in bundle.artifacts.keys() {
        if !is_plain_filename(name) || METADATA_FILENAMES.contains(&name.as_str()) {
            return Err(BundleDirWriteError::InvalidArtifactName { name: name.clone() });
        }
    }

    std::fs::create_dir_all(dir).map_err(|e| BundleDirWriteError::Io {
        detail: format!("create_dir_all {}: {e}", dir.display()),
    })?;

    let existing = list_entries(dir).map_err(|e| BundleDirWriteError::Io {
        detail: e.to_string(),
    })?;
    for name in existing {
        if !bundle.artifacts.contains_key(&name) && !METADATA_FILENAMES.contains(&name.as_str()) {
            return Err(BundleDirWriteError::ForeignEntry { name });
        }
    }

    for artifact in bundle.artifacts.values() {
        write_atomic(dir, &artifact.name, &artifact.content)?;
    }
    write_atomic(dir, MANIFEST_FILENAME, &bundle.manifest)?;
    write_atomic(dir, DIGEST_BASIS_FILENAME, &bundle.digest_basis)?;
    write_atomic(dir, DIGEST_FILENAME, bundle.digest.as_str().as_bytes())?;
    Ok(())
}

/// Read a bundle directory back into memory.
///
/// Checks layout and the stored digest. Artifact hashes are taken from the
/// manifest as declared; [`verify_bundle_dir`] recomputes them.
///
/// # Errors
///
/// Returns [`BundleDirReadError`] on any fail-closed condition.
pub fn read_bundle_dir(dir: &Path) -> Result<ArtifactBundleV1, BundleDirReadError> {
    let manifest = read_metadata(dir, MANIFEST_FILENAME)?;
    let digest_basis = read_metadata(dir, DIGEST_BASIS_FILENAME)?;
    let stored_digest = read_metadata(dir, DIGEST_FILENAME)?;

    let declared = parse_manifest(&manifest)?;

    let mut artifacts = BTreeMap::new();
    for entry in declared {
        let content = std::fs::read(dir.join(&entry.name)).map_err(|_| {
            BundleDirReadError::MissingArtifact {
                name: entry.name.clone(),
            }
        })?;
        artifacts.insert(
            entry.name.clone(),
            BundleArtifact {
                name: entry.name,
                content,
                content_hash: entry.content_hash,
                normative: entry.normative,
            },
        );
    }

    for name in list_entries(dir)? {
        if !artifacts.contains_key(&name) && !METADATA_FILENAMES.contains(&name.as_str()) {
            return Err(BundleDirReadError::ExtraFile { name });
        }
    }

    let recomputed = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis);
    let stored = String::from_utf8_lossy(&stored_digest).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(BundleDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(ArtifactBundleV1 {
        artifacts,
        manifest,
        digest_basis,
        digest: recomputed,
    })
}

/// Read `dir`, then run [`verify_bundle`] on the result.
///
/// This is the offline verification entry point.
///
/// # Errors
///
/// Returns [`BundleDirVerifyError`] on read failure or integrity mismatch.
pub fn verify_bundle_dir(dir: &Path) -> Result<ArtifactBundleV1, BundleDirVerifyError> {
    let bundle = read_bundle_dir(dir).map_err(BundleDirVerifyError::ReadError)?;
    verify_bundle(&bundle).map_err(BundleDirVerifyError::VerifyError)?;
    Ok(bundle)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct ManifestEntry {
    name: String,
    content_hash: ContentHash,
    normative: bool,
}

fn parse_manifest(bytes: &[u8]) -> Result<Vec<ManifestEntry>, BundleDirReadError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| BundleDirReadError::ManifestParseError {
            detail: e.to_string(),
        })?;

    let version = value["schema_version"].as_str().unwrap_or_default();
    if version != MANIFEST_SCHEMA_VERSION {
        return Err(BundleDirReadError::ManifestVersionMismatch {
            found: version.to_string(),
        });
    }

    let entries = value["artifacts"]
        .as_array()
        .ok_or_else(|| BundleDirReadError::ManifestParseError {
            detail: "\"artifacts\" is not an array".into(),
        })?;

    let mut seen = BTreeSet::new();
    let mut declared = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry["name"]
            .as_str()
            .ok_or_else(|| BundleDirReadError::ManifestEntryInvalid {
                detail: "missing \"name\"".into(),
            })?;
        if !is_plain_filename(name) || !seen.insert(name.to_string()) {
            return Err(BundleDirReadError::ManifestEntryInvalid {
                detail: format!("bad or duplicate name {name:?}"),
            });
        }
        let content_hash = entry["content_hash"]
            .as_str()
            .and_then(ContentHash::parse)
            .ok_or_else(|| BundleDirReadError::ManifestEntryInvalid {
                detail: format!("missing or malformed \"content_hash\" for {name}"),
            })?;
        let normative = entry["normative"].as_bool().ok_or_else(|| {
            BundleDirReadError::ManifestEntryInvalid {
                detail: format!("missing \"normative\" for {name}"),
            }
        })?;
        declared.push(ManifestEntry {
            name: name.to_string(),
            content_hash,
            normative,
        });
    }
    Ok(declared)
}

/// A single path component with no separators and no dot-only names.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.starts_with(TEMP_PREFIX)
        && !name.contains(['/', '\\'])
}

fn read_metadata(dir: &Path, filename: &str) -> Result<Vec<u8>, BundleDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| BundleDirReadError::MissingMetadata {
        filename: filename.to_string(),
    })
}

/// Every entry name in `dir` except in-flight temp files.
fn list_entries(dir: &Path) -> Result<BTreeSet<String>, BundleDirReadError> {
    let io = |e: std::io::Error| BundleDirReadError::Io {
        detail: format!("read_dir {}: {e}", dir.display()),
    };
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let name = entry.map_err(io)?.file_name().to_string_lossy().into_owned();
        if !name.starts_with(TEMP_PREFIX) {
            names.insert(name);
        }
    }
    Ok(names)
}

fn write_atomic(dir: &Path, filename: &str, content: &[u8]) -> Result<(), BundleDirWriteError> {
    let target = dir.join(filename);
    let temp = dir.join(format!("{TEMP_PREFIX}{filename}"));
    std::fs::write(&temp, content).map_err(|e| BundleDirWriteError::Io {
        detail: format!("write {}: {e}", temp.display()),
    })?;
    std::fs::rename(&temp, &target).map_err(|e| BundleDirWriteError::Io {
        detail: format!("rename {} -> {}: {e}", temp.display(), target.display()),
    })
}
