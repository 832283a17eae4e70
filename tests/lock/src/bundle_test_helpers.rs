//! Shared test helpers for mutating and rebuilding artifact bundles.
//!
//! Rebuilding through `build_bundle` keeps every content hash, the manifest,
//! the digest basis and the digest consistent, so a negative test hits the
//! semantic check it targets instead of a hash mismatch.

use moo_harness::bundle::{build_bundle, ArtifactBundleV1, ArtifactInput};
use moo_kernel::proof::canon::canonical_json_bytes;

/// Rebuild `bundle` with the JSON artifact `name` modified by `modify`.
///
/// The modified artifact is re-serialized canonically.
///
/// # Panics
///
/// Panics if `name` is missing or not valid JSON. These are test-only
/// invariants.
pub fn rebuild_with_modified_json(
    bundle: &ArtifactBundleV1,
    name: &str,
    modify: impl FnOnce(&mut serde_json::Value),
) -> ArtifactBundleV1 {
    let artifact = bundle.artifacts.get(name).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&artifact.content).unwrap();
    modify(&mut value);
    let content = canonical_json_bytes(&value).unwrap();
    rebuild(bundle, |input| {
        if input.name == name {
            input.content.clone_from(&content);
        }
        true
    })
}

/// Rebuild `bundle` without the artifact `name`.
///
/// # Panics
///
/// Panics if rebuilding fails.
pub fn rebuild_without_artifact(bundle: &ArtifactBundleV1, name: &str) -> ArtifactBundleV1 {
    rebuild(bundle, |input| input.name != name)
}

/// Rebuild from the bundle's artifacts; `edit` may mutate each input and
/// returns whether to keep it.
fn rebuild(
    bundle: &ArtifactBundleV1,
    mut edit: impl FnMut(&mut ArtifactInput) -> bool,
) -> ArtifactBundleV1 {
    let inputs: Vec<ArtifactInput> = bundle
        .artifacts
        .values()
        .filter_map(|a| {
            let mut input = ArtifactInput {
                name: a.name.clone(),
                content: a.content.clone(),
                normative: a.normative,
            };
            edit(&mut input).then_some(input)
        })
        .collect();
    build_bundle(inputs).unwrap()
}
