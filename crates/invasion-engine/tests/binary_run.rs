//! End-to-end runs of the `invasion` binary.

#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GRID: &str = "\
a1 east=a2 south=b1
a2 east=a3 south=b2
a3 south=b3
b1 east=b2 south=c1
b2 east=b3 south=c2
b3 south=c3
c1 east=c2
c2 east=c3
";

/// A scratch directory holding `map.txt`, unique per test.
fn scratch(test: &str, map: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("invasion-bin-{}-{test}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("map.txt"), map).unwrap();
    dir
}

fn invasion(dir: &Path, args: &[&str], seed: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_invasion"));
    command
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("INVASION_SEED");
    if let Some(seed) = seed {
        let _ = command.env("INVASION_SEED", seed);
    }
    command.output().unwrap()
}

#[test]
fn zero_agents_prints_the_map_back() {
    let dir = scratch("zero", "Foo north=Bar\n");
    let output = invasion(&dir, &["0", "map.txt"], Some("1"));
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Bar south=Foo\nFoo north=Bar\n"
    );
}

#[test]
fn seeded_runs_print_identical_reports() {
    let dir = scratch("seeded", GRID);
    let first = invasion(&dir, &["6", "map.txt"], Some("2024"));
    let second = invasion(&dir, &["6", "map.txt"], Some("2024"));
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn pair_run_prints_events_then_surviving_map() {
    let dir = scratch("pair", "X north=Y\n");
    std::fs::write(dir.join("invasion-config.yaml"), "simulation:\n  seed: 3\n").unwrap();
    let mut command = Command::new(env!("CARGO_BIN_EXE_invasion"));
    let output = command
        .current_dir(&dir)
        .args(["2", "map.txt"])
        .env("RUST_LOG", "warn")
        .env_remove("INVASION_SEED")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    // Either the pair collides once, or the agents swap places forever.
    let events = lines.iter().filter(|l| l.contains("has been destroyed")).count();
    assert!(events <= 1);
    assert!(lines.last().is_some_and(|l| !l.contains("has been destroyed")));
    assert_eq!(lines.len(), 2);
}

#[test]
fn malformed_map_fails() {
    let dir = scratch("malformed", "Foo up=Bar\n");
    let output = invasion(&dir, &["3", "map.txt"], Some("1"));
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("MalformedLine"), "stderr: {stderr}");
}

#[test]
fn missing_map_fails() {
    let dir = scratch("missing", "");
    let output = invasion(&dir, &["3", "no-such-map.txt"], Some("1"));
    assert!(!output.status.success());
}

#[test]
fn bad_arguments_fail() {
    let dir = scratch("args", GRID);
    assert!(!invasion(&dir, &["lots", "map.txt"], None).status.success());
    assert!(!invasion(&dir, &["3"], None).status.success());
}

#[test]
fn invalid_seed_override_fails() {
    let dir = scratch("badseed", GRID);
    let output = invasion(&dir, &["3", "map.txt"], Some("not-a-number"));
    assert!(!output.status.success());
}
