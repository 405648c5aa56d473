//! Integration tests for file-usage


use harness::{TestInput, breakdown, listing, run_file_usage, run_on_file};

const SCENARIO_A: &str = "1G u1 /a/x\n2G u2 /a/y\n";

#[test]
fn test_basic_report() {
    let (stdout, _stderr, success) = run_file_usage(&["--thresh", "0"], SCENARIO_A);
    assert!(success, "file-usage should succeed");
    assert_eq!(
        breakdown(&stdout),
        vec![
            "/a (3.0 GB, 100.0%)",
            "        y (2.0 GB, 66.7%)",
            "        x (1.0 GB, 33.3%)",
        ]
    );
}

#[test]
fn test_summary_section() {
    let (stdout, _stderr, success) = run_file_usage(&[], SCENARIO_A);
    assert!(success);
    assert!(
        stdout.starts_with("User totals:\n\nu2: 2.0 GB\nu1: 1.0 GB\n\nTotal: 3.0 GB\n"),
        "unexpected summary: {}",
        stdout
    );
}

#[test]
fn test_no_summary_flag() {
    let (stdout, _stderr, success) = run_file_usage(&["--no-summary"], SCENARIO_A);
    assert!(success);
    assert!(!stdout.contains("User totals"));
    assert!(stdout.starts_with("/a (3.0 GB, 100.0%)"), "{}", stdout);
}

#[test]
fn test_threshold_prunes() {
    let (stdout, _stderr, success) =
        run_file_usage(&["--thresh", "50", "--no-summary"], SCENARIO_A);
    assert!(success);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec!["/a (3.0 GB, 100.0%)", "        y (2.0 GB, 66.7%)"]);
}

#[test]
fn test_show_users() {
    let (stdout, _stderr, success) = run_file_usage(
        &["--thresh", "0", "--showusers", "--indent", "4", "--no-summary"],
        SCENARIO_A,
    );
    assert!(success);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "/a (3.0 GB, 100.0%)",
            "  - u2: 2.0 GB (66.7%)",
            "  - u1: 1.0 GB (33.3%)",
            "    y (2.0 GB, 66.7%)",
            "      - u2: 2.0 GB (100.0%)",
            "    x (1.0 GB, 33.3%)",
            "      - u1: 1.0 GB (100.0%)",
        ]
    );
}

#[test]
fn test_reads_input_file() {
    let input = TestInput::new();
    let path = input.write_records(
        "usage.txt",
        &[
            (3 << 30, "alice", "/home/alice/big.iso"),
            (1 << 30, "bob", "/home/bob/notes"),
        ],
    );

    let (stdout, _stderr, success) = run_on_file(&path, &["--thresh", "0", "--no-summary"]);
    assert!(success);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "/home (4.0 GB, 100.0%)",
            "        alice/big.iso (3.0 GB, 75.0%)",
            "        bob/notes (1.0 GB, 25.0%)",
        ]
    );
}

#[test]
fn test_dash_reads_stdin() {
    let (stdout, _stderr, success) =
        run_file_usage(&["-", "--thresh", "0", "--no-summary"], SCENARIO_A);
    assert!(success);
    assert!(stdout.contains("/a (3.0 GB, 100.0%)"));
}

#[test]
fn test_path_filter_roots_tree() {
    let input = listing(&[
        (1 << 30, "alice", "/home/alice/a"),
        (1 << 30, "bob", "/home/bob/b"),
        (8 << 30, "root", "/var/cache/c"),
    ]);
    let (stdout, _stderr, success) =
        run_file_usage(&["--path", "/home", "--thresh", "0"], &input);
    assert!(success);
    assert!(stdout.contains("Total: 2.0 GB"), "{}", stdout);
    let lines = breakdown(&stdout);
    assert_eq!(lines[0], "/home (2.0 GB, 100.0%)");
    assert!(!stdout.contains("var"), "{}", stdout);
}

#[test]
fn test_user_filter() {
    let input = listing(&[
        (1 << 30, "alice", "/srv/a"),
        (3 << 30, "bob", "/srv/b"),
    ]);
    let (stdout, _stderr, success) =
        run_file_usage(&["--user", "alice", "--thresh", "0", "--no-summary"], &input);
    assert!(success);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec!["/srv/a (1.0 GB, 100.0%)"]);
}

#[test]
fn test_no_collapse() {
    let (stdout, _stderr, success) = run_file_usage(
        &["--thresh", "0", "--no-collapse", "--indent", "2", "--no-summary"],
        SCENARIO_A,
    );
    assert!(success);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "/ (3.0 GB, 100.0%)",
            "  a (3.0 GB, 100.0%)",
            "    y (2.0 GB, 66.7%)",
            "    x (1.0 GB, 33.3%)",
        ]
    );
}

#[test]
fn test_precision() {
    let (stdout, _stderr, success) = run_file_usage(
        &["--precision", "3", "--no-summary"],
        "1536M u /a\n",
    );
    assert!(success);
    assert_eq!(stdout.trim_end(), "/a (1.500 GB, 100.0%)");
}

#[test]
fn test_json_output() {
    let (stdout, _stderr, success) =
        run_file_usage(&["--json", "--thresh", "0", "--showusers"], SCENARIO_A);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["total_bytes"], 3u64 << 30);
    assert_eq!(value["users"][0]["owner"], "u2");
    assert_eq!(value["entries"][0]["path"], "/a");
    assert_eq!(value["entries"][0]["users"][1]["owner"], "u1");
    assert_eq!(value["entries"].as_array().unwrap().len(), 3);
}

#[test]
fn test_color_always_emits_escapes() {
    let (stdout, _stderr, success) =
        run_file_usage(&["--color", "always", "--no-summary"], SCENARIO_A);
    assert!(success);
    assert!(stdout.contains("\x1b["), "expected ANSI escapes: {:?}", stdout);
    assert!(stdout.contains("/a"));
}

#[test]
fn test_color_never_is_plain() {
    let (stdout, _stderr, success) =
        run_file_usage(&["--color", "never", "--showusers"], SCENARIO_A);
    assert!(success);
    assert!(!stdout.contains('\x1b'));
}
