use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GALSIM: &str = env!("CARGO_BIN_EXE_galsim");
const GALGEN: &str = env!("CARGO_BIN_EXE_galgen");
const GALCMP: &str = env!("CARGO_BIN_EXE_galcmp");

/// Fresh per-test scratch directory.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("galsim_cli_{}_{}", std::process::id(), name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

fn run(bin: &str, args: &[&str], dir: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to launch binary")
}

fn generate(dir: &Path, n: usize, name: &str) -> PathBuf {
    let path = dir.join(name);
    let n = n.to_string();
    let out = run(GALGEN, &[&n, path.to_str().expect("utf8 path"), "--seed", "5"], dir);
    assert!(out.status.success(), "galgen failed: {}", String::from_utf8_lossy(&out.stderr));
    path
}

#[test]
fn test_wrong_argument_count_exits_with_usage_error() {
    let dir = scratch_dir("arg_count");
    let out = run(GALSIM, &["10", "input.gal", "5", "1e-5", "0.5", "0"], &dir);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Input error: Expected 7 input arguments"), "stderr: {}", stderr);
    assert!(!dir.join("result.gal").exists());

    let out = run(GALSIM, &["10", "input.gal", "5", "1e-5", "0.5", "0", "2", "extra"], &dir);
    assert_eq!(out.status.code(), Some(1));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_mismatched_input_size_exits_with_failure() {
    let dir = scratch_dir("size_mismatch");
    let input = generate(&dir, 10, "input.gal");
    let out = run(GALSIM, &["12", input.to_str().expect("utf8 path"), "5", "1e-5", "0.5", "0", "2"], &dir);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Input file size is not as expected"), "stderr: {}", stderr);
    assert!(!dir.join("result.gal").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_input_file_exits_with_failure() {
    let dir = scratch_dir("missing_input");
    let out = run(GALSIM, &["10", "nowhere.gal", "5", "1e-5", "0.5", "0", "2"], &dir);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("ERROR:"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_successful_run_writes_result_gal() {
    let dir = scratch_dir("default_output");
    let input = generate(&dir, 20, "input.gal");
    let out = run(GALSIM, &["20", input.to_str().expect("utf8 path"), "5", "1e-5", "0.5", "0", "2"], &dir);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let result = dir.join("result.gal");
    assert_eq!(fs::metadata(&result).expect("result.gal written").len(), 6 * 20 * 8);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_output_flag_and_single_thread_match_parallel_run() {
    let dir = scratch_dir("output_flag");
    let input = generate(&dir, 64, "input.gal");
    let input = input.to_str().expect("utf8 path");

    let serial = run(GALSIM, &["64", input, "10", "1e-5", "0.3", "0", "1", "--output", "serial.gal"], &dir);
    let parallel = run(GALSIM, &["64", input, "10", "1e-5", "0.3", "0", "4", "--output", "parallel.gal"], &dir);
    assert_eq!(serial.status.code(), Some(0));
    assert_eq!(parallel.status.code(), Some(0));
    assert!(!dir.join("result.gal").exists());

    let serial_bytes = fs::read(dir.join("serial.gal")).expect("serial.gal written");
    let parallel_bytes = fs::read(dir.join("parallel.gal")).expect("parallel.gal written");
    assert_eq!(serial_bytes.len(), 6 * 64 * 8);
    assert_eq!(serial_bytes, parallel_bytes);

    let cmp = run(GALCMP, &["64", "serial.gal", "parallel.gal"], &dir);
    assert_eq!(cmp.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&cmp.stdout).starts_with("pos_maxdiff = 0"));
    fs::remove_dir_all(&dir).ok();
}
