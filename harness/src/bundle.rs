//! In-memory artifact bundle: the output of a harness run.
//!
//! No file I/O in this module (see [`crate::bundle_dir`] for persistence).
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the bundle digest)
//! or observational (listed in the manifest, excluded from the digest).
//!
//! A run bundle carries:
//!
//! - `run_config.json` (normative): bound and exploration policy
//! - `explore_report.json` (normative): the `ExploreReportV1`
//! - `summary.txt` (observational): the human-readable `key=value` summary
//!
//! The bundle digest is computed over the **digest basis**: a canonical
//! JSON projection of normative artifact hashes only.

use std::collections::BTreeMap;

use moo_kernel::proof::canon::{canonical_json_bytes, is_canonical_json};
use moo_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain prefix for bundle artifact content hashing.
pub const DOMAIN_BUNDLE_ARTIFACT: HashDomain = HashDomain::BundleArtifact;

/// Domain prefix for bundle digest computation.
pub const DOMAIN_BUNDLE_DIGEST: HashDomain = HashDomain::BundleDigest;

/// Manifest schema tag.
pub const MANIFEST_SCHEMA_VERSION: &str = "bundle.v1";

/// Digest basis schema tag.
pub const DIGEST_BASIS_SCHEMA_VERSION: &str = "bundle_digest_basis.v1";

/// Normative run configuration artifact.
pub const RUN_CONFIG_ARTIFACT: &str = "run_config.json";

/// Normative exploration report artifact.
pub const EXPLORE_REPORT_ARTIFACT: &str = "explore_report.json";

/// Observational summary artifact.
pub const SUMMARY_ARTIFACT: &str = "summary.txt";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    /// Logical filename.
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the bundle digest.
    pub normative: bool,
}

/// The complete artifact bundle from a harness run.
#[derive(Debug, Clone)]
pub struct ArtifactBundleV1 {
    /// Artifacts indexed by logical name, in sorted order (`BTreeMap`).
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Full manifest: canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Digest basis: canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

/// Input for bundle assembly.
#[derive(Debug, Clone)]
pub struct ArtifactInput {
    pub name: String,
    pub content: Vec<u8>,
    pub normative: bool,
}

impl From<(String, Vec<u8>, bool)> for ArtifactInput {
    fn from((name, content, normative): (String, Vec<u8>, bool)) -> Self {
        Self {
            name,
            content,
            normative,
        }
    }
}

/// Error building a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleBuildError {
    /// Canonical JSON serialization failed.
    CanonError { detail: String },
    /// Two inputs share a logical name.
    DuplicateArtifact { name: String },
}

impl std::fmt::Display for BundleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::DuplicateArtifact { name } => write!(f, "duplicate artifact name: {name}"),
        }
    }
}

impl std::error::Error for BundleBuildError {}

/// Build an `ArtifactBundleV1` from artifact inputs.
///
/// Computes content hashes, builds the sorted manifest and digest basis, and
/// derives the bundle digest.
///
/// # Errors
///
/// Returns [`BundleBuildError`] on a duplicate name or a canonical JSON
/// failure.
pub fn build_bundle(
    artifacts: Vec<impl Into<ArtifactInput>>,
) -> Result<ArtifactBundleV1, BundleBuildError> {
    let mut artifact_map = BTreeMap::new();

    for input in artifacts {
        let input = input.into();
        if artifact_map.contains_key(&input.name) {
            return Err(BundleBuildError::DuplicateArtifact { name: input.name });
        }
        let content_hash = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &input.content);
        artifact_map.insert(
            input.name.clone(),
            BundleArtifact {
                name: input.name,
                content: input.content,
                content_hash,
                normative: input.normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest_basis = compute_digest_basis_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis);

    Ok(ArtifactBundleV1 {
        artifacts: artifact_map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from bundle integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// An artifact's stored `content_hash` does not match the recomputed hash.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    /// Stored manifest bytes differ from the manifest recomputed from artifacts.
    ManifestMismatch,
    /// Stored manifest bytes are not canonical JSON.
    ManifestNotCanonical,
    /// Stored digest basis differs from the recomputed normative projection.
    DigestBasisMismatch,
    /// Stored digest basis is not canonical JSON.
    DigestBasisNotCanonical,
    /// Stored digest does not match the hash of the digest basis.
    DigestMismatch { expected: String, actual: String },
    /// A normative JSON artifact is not canonical JSON.
    ArtifactNotCanonical { artifact: String },
    /// `explore_report.json` is present without `run_config.json`.
    RunConfigMissing,
    /// A bound artifact did not parse as JSON.
    ArtifactParseError { artifact: String, detail: String },
    /// A bound artifact lacks a field the binding check needs.
    FieldMissing { artifact: String, field: String },
    /// The report was produced for a different bound than configured.
    BoundMismatch { in_config: u64, in_report: u64 },
    /// The report's policy echo differs from the configured policy.
    PolicyMismatch,
    /// Canonical JSON error during verification.
    CanonError { detail: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: expected={expected}, actual={actual}"
            ),
            Self::ManifestMismatch => write!(f, "manifest does not match artifacts"),
            Self::ManifestNotCanonical => write!(f, "manifest is not canonical JSON"),
            Self::DigestBasisMismatch => write!(f, "digest basis does not match artifacts"),
            Self::DigestBasisNotCanonical => write!(f, "digest basis is not canonical JSON"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest mismatch: expected={expected}, actual={actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "normative artifact is not canonical JSON: {artifact}")
            }
            Self::RunConfigMissing => {
                write!(f, "{EXPLORE_REPORT_ARTIFACT} present without {RUN_CONFIG_ARTIFACT}")
            }
            Self::ArtifactParseError { artifact, detail } => {
                write!(f, "{artifact} is not valid JSON: {detail}")
            }
            Self::FieldMissing { artifact, field } => {
                write!(f, "{artifact} is missing field {field:?}")
            }
            Self::BoundMismatch {
                in_config,
                in_report,
            } => write!(
                f,
                "bound mismatch: run config says {in_config}, report says {in_report}"
            ),
            Self::PolicyMismatch => write!(f, "report policy echo differs from run config"),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

/// Verify the internal consistency of a bundle.
///
/// This is a pure integrity check; it does NOT re-run the exploration.
/// It proves:
///
/// 1. Each artifact's `content_hash` matches `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
/// 2. `manifest` bytes match the canonical projection recomputed from all artifacts.
/// 3. `digest_basis` bytes match the canonical projection recomputed from
///    normative artifacts only.
/// 4. `digest` matches `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
/// 5. `manifest` and `digest_basis` are canonical JSON.
/// 6. Normative JSON artifacts (`.json` extension + `normative: true`) are canonical.
/// 7. If `explore_report.json` exists, `run_config.json` exists too, and the
///    report's `bound` and `policy` equal the configuration's.
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] encountered.
pub fn verify_bundle(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    for artifact in bundle.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    let expected_manifest = compute_manifest_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_manifest != bundle.manifest {
        return Err(BundleVerifyError::ManifestMismatch);
    }
    if !is_canonical_json(&bundle.manifest) {
        return Err(BundleVerifyError::ManifestNotCanonical);
    }

    let expected_basis = compute_digest_basis_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_basis != bundle.digest_basis {
        return Err(BundleVerifyError::DigestBasisMismatch);
    }
    if !is_canonical_json(&bundle.digest_basis) {
        return Err(BundleVerifyError::DigestBasisNotCanonical);
    }

    let recomputed_digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &bundle.digest_basis);
    if recomputed_digest != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.as_str().to_string(),
            actual: recomputed_digest.as_str().to_string(),
        });
    }

    for artifact in bundle.artifacts.values() {
        let is_json = std::path::Path::new(&artifact.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if artifact.normative && is_json && !is_canonical_json(&artifact.content) {
            return Err(BundleVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_run_binding(bundle)
}

/// The report must describe the configured run.
fn verify_run_binding(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    let Some(report_artifact) = bundle.artifacts.get(EXPLORE_REPORT_ARTIFACT) else {
        return Ok(());
    };
    let config_artifact = bundle
        .artifacts
        .get(RUN_CONFIG_ARTIFACT)
        .ok_or(BundleVerifyError::RunConfigMissing)?;

    let report = parse_artifact(report_artifact)?;
    let config = parse_artifact(config_artifact)?;

    let in_report = required_u64(&report, EXPLORE_REPORT_ARTIFACT, "bound")?;
    let in_config = required_u64(&config, RUN_CONFIG_ARTIFACT, "bound")?;
    if in_report != in_config {
        return Err(BundleVerifyError::BoundMismatch {
            in_config,
            in_report,
        });
    }

    let report_policy = required_field(&report, EXPLORE_REPORT_ARTIFACT, "policy")?;
    let config_policy = required_field(&config, RUN_CONFIG_ARTIFACT, "policy")?;
    if report_policy != config_policy {
        return Err(BundleVerifyError::PolicyMismatch);
    }
    Ok(())
}

fn parse_artifact(artifact: &BundleArtifact) -> Result<serde_json::Value, BundleVerifyError> {
    serde_json::from_slice(&artifact.content).map_err(|e| BundleVerifyError::ArtifactParseError {
        artifact: artifact.name.clone(),
        detail: e.to_string(),
    })
}

fn required_field<'a>(
    value: &'a serde_json::Value,
    artifact: &str,
    field: &str,
) -> Result<&'a serde_json::Value, BundleVerifyError> {
    value.get(field).ok_or_else(|| BundleVerifyError::FieldMissing {
        artifact: artifact.to_string(),
        field: field.to_string(),
    })
}

fn required_u64(
    value: &serde_json::Value,
    artifact: &str,
    field: &str,
) -> Result<u64, BundleVerifyError> {
    required_field(value, artifact, field)?
        .as_u64()
        .ok_or_else(|| BundleVerifyError::FieldMissing {
            artifact: artifact.to_string(),
            field: field.to_string(),
        })
}

/// Recompute manifest bytes from the artifact map.
fn compute_manifest_bytes(artifacts: &BTreeMap<String, BundleArtifact>) -> Result<Vec<u8>, String> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": MANIFEST_SCHEMA_VERSION,
    }))
    .map_err(|e| e.to_string())
}

/// Recompute digest basis bytes from normative artifacts only.
fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, String> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": DIGEST_BASIS_SCHEMA_VERSION,
    }))
    .map_err(|e| e.to_string())
}
