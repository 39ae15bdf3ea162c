use regex::Regex;
use std::fs;
use std::process::{Command, Output};

fn vowelforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vowelforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_cli_run_writes_snapshot_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let output = vowelforge(&[
        "run",
        out.to_str().unwrap(),
        "--n-its",
        "50",
        "--store-ivl",
        "10",
        "--seed",
        "1",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("run,time,agent,vowel id,height,backness,rounding,F1,F2,F3,F4,F2prime,UseCount,SuccessCount")
    );

    let row = Regex::new(r"^1,(10|20|30|40|50),[1-5],\d+,[01](\.\d+)?,[01](\.\d+)?,[01](\.\d+)?,\d+,\d+,\d+,\d+,[\d.]+,\d+,\d+$")
        .unwrap();
    let mut rows = 0;
    for line in lines {
        assert!(row.is_match(line), "unexpected row: {}", line);
        rows += 1;
    }
    assert!(rows > 0);

    // Per-run summary table on stdout.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Success"), "stdout: {}", stdout);
}

#[test]
fn test_cli_synth_prints_reference_formants() {
    let output = vowelforge(&["synth"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["schwa", "i", "u"] {
        assert!(stdout.contains(name), "missing {}: {}", name, stdout);
    }
    // Schwa F1 and F2.
    assert!(stdout.contains("399") && stdout.contains("1352"));
}

#[test]
fn test_cli_synth_custom_articulation() {
    let output = vowelforge(&["synth", "--articulation", "1,0,0"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let f = Regex::new(r"\b252\b.*\b2202\b.*\b3242\b.*\b3938\b").unwrap();
    assert!(f.is_match(&stdout), "stdout: {}", stdout);
}

#[test]
fn test_cli_synth_rejects_out_of_range_articulation() {
    let output = vowelforge(&["synth", "-a", "1.5,0,0"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_invalid_config_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.csv");
    let output = vowelforge(&["run", out.to_str().unwrap(), "--n-agents", "1"]);

    assert!(!output.status.success());
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("n_agents"), "stderr: {}", stderr);
}

#[test]
fn test_cli_params_file_with_override() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");
    let out = dir.path().join("out.csv");
    fs::write(
        &params,
        r#"{ "game": { "n_its": 30, "store_ivl": 30, "n_agents": 3, "seed": 5 } }"#,
    )
    .unwrap();

    let output = vowelforge(&[
        "run",
        out.to_str().unwrap(),
        "--params",
        params.to_str().unwrap(),
        "--n-its",
        "20",
    ]);
    assert!(output.status.success());

    let csv = fs::read_to_string(&out).unwrap();
    let times: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    assert!(!times.is_empty());
    // n_its from the command line, agents from the file.
    assert!(times.iter().all(|&t| t == "20"));
    assert!(csv.lines().skip(1).all(|l| {
        let agent: u32 = l.split(',').nth(2).unwrap().parse().unwrap();
        (1..=3).contains(&agent)
    }));
}
