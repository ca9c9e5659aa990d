use std::path::Path;
use std::process::{Command, Output};

fn fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/tests/fixtures/{name}")
}

fn identscore_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_identscore"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> (Output, String, String) {
    let output = cmd.output().expect("failed to run identscore");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output, stdout, stderr)
}

fn analyze_java(out_dir: &Path, extra: &[&str]) -> (Output, String, String) {
    run(identscore_cmd()
        .args(["analyze", &fixture("sample-java"), "--language", "java"])
        .args(["--dictionary", &fixture("words.txt")])
        .arg("--output-dir")
        .arg(out_dir)
        .args(extra))
}

#[test]
fn test_analyze_java_writes_csv_reports() {
    let out = tempfile::tempdir().expect("failed to create temp dir");
    let (output, stdout, stderr) = analyze_java(out.path(), &[]);

    assert!(
        output.status.success(),
        "analyze failed: stdout={stdout}, stderr={stderr}"
    );
    assert!(
        stdout.contains("Average Comprehensibility Score"),
        "should print the overall score: {stdout}"
    );

    let detailed = std::fs::read_to_string(
        out.path().join("Java_Detailed_Comprehensibility_Report.csv"),
    )
    .expect("detailed report should exist");
    assert!(detailed.starts_with(
        "File Path,Entity Name,Entity Type,Comprehensibility Score,Comprehensibility Category"
    ));
    assert!(detailed.contains(",UserService,Class,"), "{detailed}");
    assert!(detailed.contains(",findActiveUsers,Method,"), "{detailed}");
    assert!(detailed.contains(",repository,Variable,1.00,Well Readable"), "{detailed}");
    assert!(detailed.contains(",java.util.Scanner,Import,1.00,Well Readable"), "{detailed}");
    assert!(detailed.contains(",xq,Variable,0.00,Non Readable"), "{detailed}");
    assert!(!detailed.contains(",i,"), "loop counters must be excluded: {detailed}");

    let summary = std::fs::read_to_string(
        out.path().join("Java_Summary_Comprehensibility_Report.csv"),
    )
    .expect("summary report should exist");
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4, "{summary}");
    assert_eq!(lines[0], "File Path,Comprehensibility Score");
    assert!(lines[1].ends_with("Empty.java,0.00"), "{summary}");
    assert!(lines[2].contains("UserService.java,"), "{summary}");
    assert!(lines[3].starts_with("Average Comprehensibility Score,"));
}

#[test]
fn test_analyze_is_deterministic() {
    let first = tempfile::tempdir().expect("failed to create temp dir");
    let second = tempfile::tempdir().expect("failed to create temp dir");
    analyze_java(first.path(), &["--quiet"]);
    analyze_java(second.path(), &["--quiet"]);

    let name = "Java_Detailed_Comprehensibility_Report.csv";
    assert_eq!(
        std::fs::read_to_string(first.path().join(name)).unwrap(),
        std::fs::read_to_string(second.path().join(name)).unwrap()
    );
}

#[test]
fn test_analyze_json_and_text_formats() {
    let out = tempfile::tempdir().expect("failed to create temp dir");
    let (output, stdout, stderr) = analyze_java(out.path(), &["--format", "json,text"]);
    assert!(output.status.success(), "stderr={stderr}");

    assert!(stdout.contains("Java Identifier Comprehensibility"), "{stdout}");
    assert!(stdout.contains("Well Readable"), "{stdout}");
    assert!(!out
        .path()
        .join("Java_Detailed_Comprehensibility_Report.csv")
        .exists());

    let json = std::fs::read_to_string(out.path().join("Java_Comprehensibility_Report.json"))
        .expect("json report should exist");
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["language"], "java");
    assert_eq!(parsed["file_results"].as_array().unwrap().len(), 2);
}

#[test]
fn test_no_matching_files_is_not_an_error() {
    let out = tempfile::tempdir().expect("failed to create temp dir");
    let (output, stdout, _) = run(identscore_cmd()
        .args(["analyze", &fixture("sample-java"), "--language", "python"])
        .arg("--output-dir")
        .arg(out.path()));

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("No valid Python files found"), "{stdout}");
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_path_exits_with_input_error() {
    let (output, _, stderr) = run(identscore_cmd().args([
        "analyze",
        "/definitely/not/here",
        "--language",
        "java",
    ]));
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error:"), "{stderr}");
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_missing_language_exits_with_input_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let (output, _, stderr) = run(identscore_cmd()
        .arg("analyze")
        .arg(dir.path())
        .current_dir(dir.path()));
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("no language given"), "{stderr}");
}

#[test]
fn test_missing_dictionary_falls_back_to_allowlist() {
    let out = tempfile::tempdir().expect("failed to create temp dir");
    let (output, _, stderr) = run(identscore_cmd()
        .args(["analyze", &fixture("sample-java"), "--language", "java"])
        .args(["--dictionary", "/no/such/words.txt"])
        .arg("--output-dir")
        .arg(out.path()));

    assert!(output.status.success(), "stderr={stderr}");
    assert!(stderr.contains("empty dictionary"), "{stderr}");
    let detailed = std::fs::read_to_string(
        out.path().join("Java_Detailed_Comprehensibility_Report.csv"),
    )
    .unwrap();
    assert!(detailed.contains(",repository,Variable,0.00,Non Readable"), "{detailed}");
}

#[test]
fn test_report_write_failure_exits_one() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let blocker = dir.path().join("reports");
    std::fs::write(&blocker, "not a directory").unwrap();

    let (output, _, stderr) = analyze_java(&blocker, &[]);
    assert_eq!(output.status.code(), Some(1), "stderr={stderr}");
    assert!(stderr.contains("Error:"), "{stderr}");
}

#[test]
fn test_language_from_config_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::copy(
        format!("{}/users.py", fixture("sample-python")),
        dir.path().join("users.py"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".identscore.toml"),
        "[project]\nlanguage = \"python\"\n\n[report]\noutput_dir = \"out\"\n",
    )
    .unwrap();

    let (output, stdout, stderr) = run(identscore_cmd()
        .arg("analyze")
        .arg(dir.path())
        .args(["--dictionary", &fixture("words.txt")])
        .current_dir(dir.path()));
    assert!(output.status.success(), "stdout={stdout}, stderr={stderr}");

    let detailed = std::fs::read_to_string(
        dir.path()
            .join("out")
            .join("Python_Detailed_Comprehensibility_Report.csv"),
    )
    .expect("python report should be written to the configured output dir");
    assert!(detailed.contains(",collections,Module,"), "{detailed}");
    assert!(detailed.contains(",OrderedDict,Imported Symbol,"), "{detailed}");
    assert!(detailed.contains(",od,Alias,"), "{detailed}");
    assert!(detailed.contains(",find_user,Method,1.00,Well Readable"), "{detailed}");
    assert!(detailed.contains(",MAX_USERS,Variable,1.00,Well Readable"), "{detailed}");
}

#[test]
fn test_score_command() {
    let (output, stdout, stderr) = run(identscore_cmd().args([
        "score",
        "userId",
        "xk1",
        "--dictionary",
        &fixture("words.txt"),
    ]));
    assert!(output.status.success(), "stderr={stderr}");
    assert!(stdout.contains("userId  1.00 (Well Readable)"), "{stdout}");
    assert!(stdout.contains("user=1.0 Id=1.0"), "{stdout}");
    assert!(stdout.contains("xk1  0.00 (Non Readable)"), "{stdout}");
}

#[test]
fn test_score_import_path() {
    let (output, stdout, _) = run(identscore_cmd().args([
        "score",
        "--import",
        "java.util.Scanner",
        "--dictionary",
        &fixture("words.txt"),
    ]));
    assert!(output.status.success());
    assert!(stdout.contains("java.util.Scanner  1.00 (Well Readable)"), "{stdout}");
    assert!(stdout.contains("  java=1.0\n  util=1.0\n  Scanner=1.0"), "{stdout}");
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let (output, _, _) = run(identscore_cmd().arg("init").current_dir(dir.path()));
    assert!(output.status.success(), "init should succeed");

    let config_path = dir.path().join(".identscore.toml");
    let content = std::fs::read_to_string(&config_path).expect(".identscore.toml should exist");
    assert!(content.contains("[vocabulary]"));
    assert!(content.contains("excluded_identifiers"));

    let (again, _, stderr) = run(identscore_cmd().arg("init").current_dir(dir.path()));
    assert_eq!(again.status.code(), Some(2));
    assert!(stderr.contains("already exists"), "{stderr}");

    let (forced, _, _) = run(identscore_cmd()
        .args(["init", "--force"])
        .current_dir(dir.path()));
    assert!(forced.status.success());
}
