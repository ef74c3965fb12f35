//! Runs the built `cctrap` binary the way a build would: arguments straight
//! from argv, configuration baked in at compile time, and a fake compiler
//! shadowing the host compiler on `PATH`.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use cctrap::baked_config;
use cctrap_testing::TestWorld;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// The baked host compiler, if it is a bare command name a fake on `PATH`
/// can stand in for.
fn shadowable_compiler() -> Option<String> {
    let config = baked_config();
    let compiler = config.host_compiler();
    if compiler.is_empty() || compiler.contains(['/', ' ']) {
        eprintln!("skipping: host compiler {compiler:?} cannot be shadowed via PATH");
        return None;
    }
    Some(compiler.to_string())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[test]
fn test_non_utf8_source_reaches_compiler_and_log_unchanged() {
    let Some(compiler) = shadowable_compiler() else {
        return;
    };
    let name = OsStr::from_bytes(b"caf\xe9.c");
    let world = TestWorld::new().with_source(name);
    let cc = world.fake_compiler(&compiler, 0).unwrap();
    let source = world.path(name).into_os_string();

    let mut cmd = cargo_bin_cmd!("cctrap");
    world
        .configure_command(&mut cmd)
        .unwrap()
        .arg("-c")
        .arg(&source)
        .assert()
        .success();

    assert_eq!(
        cc.received_raw_args().unwrap(),
        vec![b"-c".to_vec(), source.as_bytes().to_vec()]
    );

    let mut expected = source.as_bytes().to_vec();
    expected.extend_from_slice(format!("\n{compiler} -c ").as_bytes());
    expected.extend_from_slice(source.as_bytes());
    expected.extend_from_slice(b" \n\n");

    let results_path = baked_config().results_path;
    let log = std::fs::read(&results_path).unwrap();
    assert!(
        contains(&log, &expected),
        "no record for {source:?} in {}",
        results_path.display()
    );
}

#[test]
fn test_binary_exits_with_compiler_status() {
    let Some(compiler) = shadowable_compiler() else {
        return;
    };
    let world = TestWorld::new();
    let cc = world.fake_compiler(&compiler, 5).unwrap();

    let mut cmd = cargo_bin_cmd!("cctrap");
    world
        .configure_command(&mut cmd)
        .unwrap()
        .args(["-E", "-"])
        .assert()
        .code(5);

    assert_eq!(cc.received_args().unwrap(), vec!["-E", "-"]);
}
