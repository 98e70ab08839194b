use std::io::Write;
use std::process::{Command, Stdio};

fn loom_bin() -> &'static str {
    env!("CARGO_BIN_EXE_loom")
}

#[test]
fn runs_a_script_passed_as_an_argument() {
    let dir = std::env::temp_dir().join(format!("loom-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let script = dir.join("hello.loom");
    std::fs::write(&script, "print('hello!')\n").expect("write script");

    let output = Command::new(loom_bin()).arg(&script).output().expect("run loom");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello!\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn reads_from_stdin_when_no_path_is_given() {
    let mut child = Command::new(loom_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn loom");

    child.stdin.as_mut().expect("stdin").write_all(b"print(1 + 1)\n").expect("write stdin");
    let output = child.wait_with_output().expect("wait for loom");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n");
}

#[test]
fn missing_file_reports_the_exact_error_message_and_exit_code() {
    let output = Command::new(loom_bin()).arg("/nonexistent/path/to/script.loom").output().expect("run loom");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to open file: '/nonexistent/path/to/script.loom'"));
}

#[test]
fn imports_resolve_against_the_working_directory_not_the_scripts_folder() {
    let dir = std::env::temp_dir().join(format!("loom-cli-test-cwd-{}", std::process::id()));
    let subdir = dir.join("subdir");
    std::fs::create_dir_all(&subdir).expect("create temp dirs");

    // `helper.loom` lives next to the CWD, not next to `subdir/script.loom`.
    std::fs::write(dir.join("helper.loom"), "value = 42\n").expect("write helper module");
    std::fs::write(subdir.join("script.loom"), "import helper\nprint(helper.value)\n").expect("write script");

    let output = Command::new(loom_bin())
        .arg("subdir/script.loom")
        .current_dir(&dir)
        .output()
        .expect("run loom");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "42\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn runtime_error_exits_nonzero_and_prints_to_stderr() {
    let dir = std::env::temp_dir().join(format!("loom-cli-test-err-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let script = dir.join("fails.loom");
    std::fs::write(&script, "x = 1 / 0\n").expect("write script");

    let output = Command::new(loom_bin()).arg(&script).output().expect("run loom");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ZeroDivisionError"));

    std::fs::remove_dir_all(&dir).ok();
}
