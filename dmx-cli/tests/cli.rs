//! Tests driving the `dmx` binary through stdin and stdout

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn dmx(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dmx"))
        .args(args)
        .env_remove("DMX_MAX_STEPS")
        .env("DMX_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

const SUM: &str = "ldi R0,5\nldi R1,3\nadd R2,R0,R1\nprr R2\nhlt\n";
const SUM_WORDS: &str = "00050003\n00030103\n01000207\n0000020e\n00000001\n";

#[test]
fn test_asm_from_stdin() {
    let out = dmx(&["asm", "-"], SUM);
    assert!(out.status.success());
    assert_eq!(stdout(&out), SUM_WORDS);
}

#[test]
fn test_asm_error_exits_nonzero() {
    let out = dmx(&["asm", "-"], "nop\nfrob R1\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("line 2"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn test_run_prints_console() {
    let out = dmx(&["run", "-"], SUM_WORDS);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "8\n");
}

#[test]
fn test_run_dump_to_stdout() {
    let out = dmx(&["run", "-", "--dump", "-"], SUM_WORDS);
    let text = stdout(&out);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "8");
    assert_eq!(lines[3], "R2 = 00000008");
    assert_eq!(lines.last(), Some(&"04: 00000001 00000000 00000000 00000000"));
}

#[test]
fn test_run_unknown_opcode_exits_nonzero() {
    let out = dmx(&["run", "-"], "0000020e\n000000ee\n");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "0\n");
    assert!(stderr(&out).contains("Invalid opcode 0xee"));
}

#[test]
fn test_run_max_steps() {
    // jmp 0
    let out = dmx(&["run", "-", "--max-steps", "100"], "0000000b\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Step budget of 100"));
}

#[test]
fn test_run_trace_goes_to_stderr() {
    let out = dmx(&["run", "-", "--trace"], SUM_WORDS);
    assert_eq!(stdout(&out), "8\n");
    assert!(stderr(&out).contains("add R2, R0, R1"));
}

#[test]
fn test_run_malformed_stream() {
    let out = dmx(&["run", "-"], "00000001\nxyz\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("line 2"));
}

#[test]
fn test_disasm() {
    let out = dmx(&["disasm", "-"], SUM_WORDS);
    assert!(out.status.success());
    assert_eq!(stdout(&out).lines().nth(2), Some("02: 01000207  add R2, R0, R1"));
}

#[test]
fn test_asm_to_file_then_run() {
    let dir = std::env::temp_dir().join(format!("dmx-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let source = dir.join("count.dasm");
    let image = dir.join("count.dmx");
    std::fs::write(&source, "ldi R0, 2\nldi R1, 1\ntop: prr R0\nsub R0, R0, R1\njnz R0, top\nhlt\n")
        .unwrap();

    let out = dmx(
        &["asm", source.to_str().unwrap(), "-o", image.to_str().unwrap()],
        "",
    );
    assert!(out.status.success());

    let out = dmx(&["run", image.to_str().unwrap()], "");
    assert_eq!(stdout(&out), "2\n1\n");

    std::fs::remove_dir_all(&dir).unwrap();
}
