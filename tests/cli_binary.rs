use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Run the binary with HOME/XDG pointed at `home` so no user config is picked up.
fn run(home: &Path, args: &[&std::ffi::OsStr]) -> Output {
    let me = cargo::cargo_bin!("dircleaner");
    Command::new(&me)
        .env_remove("DIRCLEANER_CONFIG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .args(args)
        .output()
        .expect("spawn binary")
}

fn os(s: &str) -> &std::ffi::OsStr {
    std::ffi::OsStr::new(s)
}

#[test]
fn harvest_moves_files_and_exits_zero() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("library");
    fs::create_dir_all(root.join("Show/S01")).unwrap();
    fs::write(root.join("Show/S01/ep1.mkv"), b"1").unwrap();
    fs::write(root.join("Show/S01/ep1.srt"), b"s").unwrap();
    fs::write(root.join("Show/S01/info.nfo"), b"n").unwrap();

    let out = run(&base, &[os("harvest"), root.as_os_str()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(root.join("ep1.mkv").exists());
    assert!(root.join("ep1.srt").exists());
    assert!(root.join("Show/S01/info.nfo").exists());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("harvested 2 file(s)"), "stdout: {stdout}");
}

#[test]
fn ext_and_clean_flags_are_honored() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("r");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub/a.avi"), b"a").unwrap();
    fs::write(root.join("sub/b.flac"), b"b").unwrap();

    let out = run(
        &base,
        &[os("harvest"), os("--ext"), os("flac"), os("--clean"), root.as_os_str()],
    );

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(root.join("b.flac").exists());
    assert!(!root.join("a.avi").exists(), "avi is not in --ext");
    assert!(!root.join("sub").exists(), "clean removes sub including a.avi");
}

#[test]
fn missing_root_argument_is_a_usage_error() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[os("harvest")]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ROOT") || stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn nonexistent_root_fails_with_message() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let missing = base.join("nope");
    let out = run(&base, &[os("harvest"), missing.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn file_root_fails_with_message() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let file = base.join("movie.avi");
    fs::write(&file, b"x").unwrap();
    let out = run(&base, &[os("harvest"), file.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("is not a directory"), "stderr: {stderr}");
    assert!(file.exists());
}

#[test]
fn json_logs_are_parseable() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("r");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub/a.mp4"), b"a").unwrap();

    let out = run(&base, &[os("--json"), os("harvest"), root.as_os_str()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| l.trim_start().starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("valid json log line"))
        .collect();
    let moved = events
        .iter()
        .find(|e| e["fields"]["message"] == "Moved file")
        .unwrap_or_else(|| panic!("no 'Moved file' event in: {stdout}"));
    assert_eq!(moved["level"], "INFO");
    assert!(moved["fields"]["dest"].as_str().unwrap().ends_with("a.mp4"));
}

#[test]
fn log_file_receives_events() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("r");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub/a.srt"), b"a").unwrap();
    let log = base.join("logs/run.log");

    let out = run(
        &base,
        &[os("--log-file"), log.as_os_str(), os("harvest"), root.as_os_str()],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let contents = fs::read_to_string(&log).expect("log file written");
    assert!(contents.contains("Moved file"), "log: {contents}");
}

#[test]
fn init_then_print_config() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("cfg/config.xml");
    let me = cargo::cargo_bin!("dircleaner");

    let out = Command::new(&me)
        .env("DIRCLEANER_CONFIG", &cfg_path)
        .arg("--init-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(cfg_path.exists());

    let out = Command::new(&me)
        .env("DIRCLEANER_CONFIG", &cfg_path)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&cfg_path.display().to_string()), "stdout: {stdout}");

    // A second init must not clobber the file.
    let out = Command::new(&me)
        .env("DIRCLEANER_CONFIG", &cfg_path)
        .arg("--init-config")
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
}
