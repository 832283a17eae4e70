//! Cross-process determinism test.
//!
//! Spawns the `explore_fixture` binary under several environment variants
//! and asserts that all produce identical output. Exploration results must
//! not depend on cwd, locale, time zone or unrelated environment variables.

use std::path::Path;
use std::process::Command;

/// Resolve the path to the compiled fixture binary.
///
/// `cargo test` puts test binaries in `target/<profile>/deps/`; the fixture
/// binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("explore_fixture");
    path.to_string_lossy().to_string()
}

/// Run the fixture with `args`, `work_dir` and env overrides; return stdout.
fn run_variant(args: &[&str], work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.args(args).current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "explore_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn assert_variants_agree(args: &[&str]) -> String {
    let root = workspace_root();
    let tmp = std::env::temp_dir();
    let tmp = tmp.to_string_lossy();

    let baseline = run_variant(args, &root, &[]);
    let c_locale = run_variant(args, &tmp, &[("LC_ALL", "C"), ("LANG", "C")]);
    let noisy = run_variant(
        args,
        &tmp,
        &[
            ("LC_ALL", "en_US.UTF-8"),
            ("TZ", "Pacific/Chatham"),
            ("HOME", "/nonexistent"),
            ("MOO_NOISE", "1"),
        ],
    );

    assert_eq!(baseline, c_locale, "C locale variant diverged for {args:?}");
    assert_eq!(baseline, noisy, "noisy env variant diverged for {args:?}");
    baseline
}

#[test]
fn crossproc_exhaustive_n2() {
    let out = assert_variants_agree(&["2"]);
    assert!(out.contains("longest_path=131\n"), "{out}");
    assert!(out.contains("termination_reason=frontier_exhausted\n"), "{out}");
    assert!(out.contains("artifact_count=3\n"), "{out}");
}

#[test]
fn crossproc_budgeted_n3() {
    let out = assert_variants_agree(&["3", "--max-pops", "1000"]);
    assert!(out.contains("longest_path=656\n"), "{out}");
    assert!(out.contains("termination_reason=pop_budget_exceeded\n"), "{out}");
    assert!(out.contains("pops=1000\n"), "{out}");
}

#[test]
fn crossproc_matches_in_process_digest() {
    let out = assert_variants_agree(&["1"]);
    let in_process = moo_harness::runner::run_explore(
        &moo_harness::config::RunConfig::new(1),
        &mut moo_search::observer::NoopObserver,
    )
    .unwrap();
    let expected = format!("bundle_digest={}\n", in_process.bundle.digest.as_str());
    assert!(out.starts_with(&expected), "{out}");
}
