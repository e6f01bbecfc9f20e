use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_shell(args: &[&str], input: &str) -> Output {
    run_shell_bytes(args, input.as_bytes())
}

fn run_shell_bytes(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_osh"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start osh");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input)
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
#[cfg(unix)]
fn test_history_then_exit() {
    let output = run_shell(&[], "true\nfalse\nhistory\nexit\nhistory\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "osh> osh> osh> 1- true\n2- false\n3- history\nosh> Exiting shell...\n"
    );
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_eof_exits_cleanly() {
    let output = run_shell(&[], "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "osh> ");
}

#[test]
fn test_missing_program_keeps_shell_alive() {
    let output = run_shell(&[], "not_a_real_binary_xyz\nhistory\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "osh> osh> 1- not_a_real_binary_xyz\n2- history\nosh> "
    );
    let err = stderr(&output);
    assert!(err.starts_with("osh: not_a_real_binary_xyz: "), "{}", err);
    assert_eq!(err.lines().count(), 1);
}

#[test]
#[cfg(unix)]
fn test_external_output_is_inherited() {
    let output = run_shell(&[], "echo  hello   world\n");
    assert_eq!(stdout(&output), "osh> hello world\nosh> ");
}

#[test]
fn test_options_are_applied() {
    let output = run_shell(
        &["--prompt", "$ ", "--history-size", "2", "--max-tokens", "2"],
        "a b c\nhistory\nhistory\n",
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "$ $ 1- a b c\n2- history\n$ 1- history\n2- history\n$ "
    );
    assert_eq!(
        stderr(&output),
        "osh: too many arguments (limit 2, got 3)\n"
    );
}

#[test]
fn test_invalid_options_are_rejected() {
    let output = run_shell(&["--history-size", "0"], "");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "osh: history size must be at least 1\n");
}

#[test]
fn test_invalid_utf8_line_does_not_stop_shell() {
    let output = run_shell_bytes(&[], b"caf\xe9\nhistory\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "osh> osh> 1- caf\u{fffd}\n2- history\nosh> "
    );
    assert!(stderr(&output).starts_with("osh: caf\u{fffd}: "));
}

#[test]
fn test_exit_with_dash_argument_still_exits() {
    let output = run_shell(&[], "exit -1\nhistory\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "osh> Exiting shell...\n");
    assert_eq!(stderr(&output), "");
}
