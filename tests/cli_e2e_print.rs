//! End-to-end tests for the `--print` action
//!
//! `--print` resolves the full execution plan and renders it as pretty JSON
//! without invoking any external tool, which makes it the natural way to
//! validate resolution behavior end to end.

mod common;
use common::prelude::*;

/// Test that inherited options merge ancestor-first
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_inherited_options() {
    let fixture = TestFixture::new(catalogs::INHERITED);
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("release")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""X": "1""#))
        .stdout(predicate::str::contains(r#""Y": "2""#));
}

/// Test that a -o override wins over an inherited option value
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_cli_option_override_wins() {
    let fixture = TestFixture::new(catalogs::INHERITED);
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("-p")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("-o")
        .arg("FOO=bar")
        .arg("release")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""FOO": "bar""#))
        .stdout(predicate::str::contains("from-config").not());
}

/// Test that the default configuration is used when none is requested
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_uses_catalog_default() {
    let fixture = TestFixture::new(catalogs::INHERITED);
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Y": "2""#));
}

/// Test the derived build-directory name for multiple requested names
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_build_directory_naming() {
    let fixture = TestFixture::new(r#"{ "configurations": { "a": {}, "b": {} } }"#);
    let expected = format!(r#""build-directory": "build-{}-a-b""#, fixture.basename());
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("a")
        .arg("b")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

/// Test that an explicit -b value is used verbatim
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_explicit_build_directory() {
    let fixture = TestFixture::new(catalogs::MINIMAL);
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("-b")
        .arg("custom-out")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""build-directory": "custom-out""#));
}

/// Test that a bare-string cmake-target is printed as a one-element list
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_normalizes_single_target() {
    let fixture = TestFixture::new(
        r#"{ "configurations": { "docs": { "cmake-target": "doxygen" } } }"#,
    );
    let mut cmd = cargo_bin_cmd!("cmake-build");

    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("docs")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#""cmake-target":\s*\[\s*"doxygen"\s*\]"#).unwrap());
}

/// Test that clean-build deletes a pre-existing build directory even when
/// only printing the plan
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_print_clean_build_removes_directory() {
    let fixture = TestFixture::new(catalogs::MINIMAL);
    let build_dir = fixture.path().join("stale");
    std::fs::create_dir_all(&build_dir).unwrap();
    std::fs::write(build_dir.join("CMakeCache.txt"), "stale").unwrap();

    let mut cmd = cargo_bin_cmd!("cmake-build");
    cmd.arg("--print")
        .arg("-c")
        .arg(fixture.catalog_path())
        .arg("-C")
        .arg("true")
        .arg("-b")
        .arg(&build_dir)
        .assert()
        .success();

    assert!(!build_dir.exists());
}
