//! End-to-end tests for the reflector binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_reflector(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reflector"))
        .current_dir(dir)
        .env_remove("REFLECTOR_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute reflector binary")
}

fn write_source(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_reflector(temp_dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("generate"), "stdout: {}", stdout);
    assert!(stdout.contains("list"), "stdout: {}", stdout);
    assert!(stdout.contains("init"), "stdout: {}", stdout);
}

#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_reflector(temp_dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("reflector"));
}

#[test]
fn test_invalid_subcommand_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_reflector(temp_dir.path(), &["explode"]);
    assert!(!output.status.success());
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_default_command_generates_into_meta() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Color.h", "enum class Color : uint8_t { Red, Green, Blue = 5 };");

    let output = run_reflector(temp_dir.path(), &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = fs::read_to_string(temp_dir.path().join("Meta/Color_EnumMappings.cpp")).unwrap();
    assert!(text.contains("{ Color::Blue, \"Blue\" },"));
}

#[test]
fn test_generate_with_path_overrides() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "engine/Axis.h", "enum class Axis : int { X, Y, Z };");

    let output = run_reflector(
        temp_dir.path(),
        &["generate", "--source", "engine", "--output", "gen"],
    );

    assert!(output.status.success());
    assert!(temp_dir.path().join("gen/Axis_EnumMappings.cpp").exists());
    assert!(!temp_dir.path().join("Meta").exists());
}

#[test]
fn test_unreadable_file_exits_non_zero_but_writes_others() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Good.h", "enum class Good : int { Yes };");
    fs::write(temp_dir.path().join("Bad.h"), [0xff, 0xff, 0xff]).unwrap();

    let output = run_reflector(temp_dir.path(), &["generate", "-q"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(temp_dir.path().join("Meta/Good_EnumMappings.cpp").exists());
}

#[test]
fn test_fail_policy_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "a/Dir.h", "enum class Dir : int { Up };");
    write_source(temp_dir.path(), "b/Dir.h", "enum class Dir : int { Down };");

    let output = run_reflector(temp_dir.path(), &["generate", "--on-duplicate", "fail"]);

    assert_eq!(output.status.code(), Some(1));
    let text = fs::read_to_string(temp_dir.path().join("Meta/Dir_EnumMappings.cpp")).unwrap();
    assert!(text.contains("Dir::Up"));
}

#[test]
fn test_prune_flag_removes_stale_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Live.h", "enum class Live : int { On };");
    write_source(temp_dir.path(), "Meta/Old_EnumMappings.cpp", "// stale");

    let output = run_reflector(temp_dir.path(), &["generate", "--prune"]);

    assert!(output.status.success());
    assert!(!temp_dir.path().join("Meta/Old_EnumMappings.cpp").exists());
    assert!(temp_dir.path().join("Meta/Live_EnumMappings.cpp").exists());
}

#[test]
fn test_config_file_is_discovered() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "src/Tone.h", "enum class Tone : int { Low, High };");
    fs::write(
        temp_dir.path().join("reflector.toml"),
        "[paths]\nsource_root = \"src\"\noutput_root = \"reflection\"\n",
    )
    .unwrap();

    let output = run_reflector(temp_dir.path(), &["generate"]);

    assert!(output.status.success());
    assert!(temp_dir.path().join("reflection/Tone_EnumMappings.cpp").exists());
}

#[test]
fn test_invalid_config_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("reflector.toml"), "[generate]\non_duplicate = \"explode\"\n").unwrap();

    let output = run_reflector(temp_dir.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// List and Init
// ============================================================================

#[test]
fn test_list_json_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_source(temp_dir.path(), "Shape.h", "enum class Shape : int { Circle, Square };");

    let output = run_reflector(temp_dir.path(), &["list", "--format", "json"]);

    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed[0]["path"], "Shape.h");
    assert_eq!(listed[0]["declarations"][0]["name"], "Shape");
    assert_eq!(
        listed[0]["declarations"][0]["enumerators"],
        serde_json::json!(["Circle", "Square"])
    );
    assert!(!temp_dir.path().join("Meta").exists());
}

#[test]
fn test_init_creates_config_and_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();

    let first = run_reflector(temp_dir.path(), &["init"]);
    assert!(first.status.success());
    let config = fs::read_to_string(temp_dir.path().join("reflector.toml")).unwrap();
    assert!(config.contains("[paths]"));

    let second = run_reflector(temp_dir.path(), &["init"]);
    assert!(!second.status.success());

    let forced = run_reflector(temp_dir.path(), &["init", "--force"]);
    assert!(forced.status.success());
}
