use std::process::Command;

mod support;

fn taxonomy2sql() -> Command {
    Command::new(env!("CARGO_BIN_EXE_taxonomy2sql"))
}

#[test]
fn cli_json_mode_prints_expressions_for_fixture() {
    let output = taxonomy2sql()
        .arg("--vars")
        .arg(support::fixture_dir("imaging").join("dataform.json"))
        .arg("--aliases")
        .arg(support::fixture_dir("imaging").join("aliases.json"))
        .arg("--taxonomy")
        .arg(support::fixture_dir("imaging").join("taxonomy.json"))
        .arg("--no-env")
        .arg("--json")
        .output()
        .expect("should run taxonomy2sql binary");

    assert!(output.status.success(), "status: {:?}", output.status);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["capital_price_threshold"], 50_000.0);
    assert_eq!(json["positive_regex"], r"MRI|CT|PET/CT|3\.0T");
    let report_case = json["report_category_case"]
        .as_str()
        .expect("report case should be a string");
    assert!(report_case.contains("THEN 'PET/CT'"));
}

#[test]
fn cli_writes_artifacts_with_defaults() {
    let temp = support::unique_temp_dir("taxonomy2sql_cli_out");
    let output_dir = temp.join("out");

    let status = taxonomy2sql()
        .arg("--no-env")
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--name")
        .arg("q3")
        .status()
        .expect("should run taxonomy2sql binary");
    assert!(status.success(), "status: {status:?}");

    for file in [
        "q3_manufacturer_case.sql",
        "q3_category_match.sql",
        "q3_report_category_case.sql",
        "q3_expressions.json",
        "q3_report.md",
    ] {
        assert!(output_dir.join(file).is_file(), "missing {file}");
    }
    let manufacturer = std::fs::read_to_string(output_dir.join("q3_manufacturer_case.sql"))
        .expect("manufacturer case should be readable");
    assert!(manufacturer.contains("THEN 'SAMSUNG'"));
    assert!(manufacturer.ends_with("ELSE 'OTHER'\nEND\n"));
}

#[test]
fn cli_environment_override_wins_over_vars_file() {
    let output = taxonomy2sql()
        .arg("--vars")
        .arg(support::fixture_dir("imaging").join("dataform.json"))
        .arg("--json")
        .env("TAXONOMY2SQL_VAR_CAPITAL_PRICE_THRESHOLD", "99000")
        .output()
        .expect("should run taxonomy2sql binary");

    assert!(output.status.success(), "status: {:?}", output.status);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["capital_price_threshold"], 99_000.0);
}

#[test]
fn cli_no_env_ignores_environment_overrides() {
    let output = taxonomy2sql()
        .arg("--no-env")
        .arg("--json")
        .env("TAXONOMY2SQL_VAR_CAPITAL_PRICE_THRESHOLD", "99000")
        .output()
        .expect("should run taxonomy2sql binary");

    assert!(output.status.success(), "status: {:?}", output.status);
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["capital_price_threshold"], 25_000.0);
}

#[test]
fn cli_ambiguous_alias_table_exits_with_code_2() {
    let temp = support::unique_temp_dir("taxonomy2sql_cli_bad_aliases");
    let aliases_path = temp.join("aliases.json");
    std::fs::write(
        &aliases_path,
        r#"[
          {"canonical": "CANON", "aliases": ["TOSHIBA"]},
          {"canonical": "TOSHIBA MEDICAL", "aliases": ["TOSHIBA"]}
        ]"#,
    )
    .expect("should write alias json");

    let output = taxonomy2sql()
        .arg("--aliases")
        .arg(&aliases_path)
        .arg("--no-env")
        .arg("--json")
        .output()
        .expect("should run taxonomy2sql binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error loading alias table: alias 'TOSHIBA' is listed under both 'CANON' and 'TOSHIBA MEDICAL'"),
        "unexpected stderr:\n{stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_missing_vars_file_exits_with_code_2() {
    let temp = support::unique_temp_dir("taxonomy2sql_cli_missing");
    let output = taxonomy2sql()
        .arg("--vars")
        .arg(temp.join("absent.json"))
        .arg("--no-env")
        .output()
        .expect("should run taxonomy2sql binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error loading vars: failed to read") && stderr.contains("absent.json"),
        "unexpected stderr:\n{stderr}"
    );
}
