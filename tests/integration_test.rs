use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tempfile::NamedTempFile;

fn run_binary(args: &[&str]) -> Result<(bool, String)> {
    let binary_path = env!("CARGO_BIN_EXE_fraud-rule-engine");
    let output = Command::new(binary_path).args(args).output()?;

    Ok((output.status.success(), String::from_utf8(output.stdout)?))
}

fn parse_outcome(stdout: &str) -> Result<(Vec<Value>, Vec<Value>)> {
    let outcome: Value = serde_json::from_str(stdout)?;
    let reports = outcome["reports"].as_array().ok_or_else(|| anyhow!("outcome without reports"))?.clone();
    let rejected = outcome["rejected"].as_array().ok_or_else(|| anyhow!("outcome without rejected records"))?.clone();

    Ok((reports, rejected))
}

fn flagged_rules(stdout: &str) -> Result<HashMap<String, Vec<String>>> {
    let (reports, _) = parse_outcome(stdout)?;
    let mut results = HashMap::new();

    for report in reports {
        let id = report["transaction"]["transaction_id"].as_str()
            .ok_or_else(|| anyhow!("report without transaction id"))?
            .to_string();
        let rules = report["triggered_rules"].as_array()
            .ok_or_else(|| anyhow!("report without triggered rules"))?
            .iter()
            .filter_map(|rule| rule.as_str().map(str::to_string))
            .collect();

        results.insert(id, rules);
    }

    Ok(results)
}

#[test]
fn test_cli_correctly_processes_sample() -> Result<()> {
    let sample_path = Path::new("samples").join("sample.csv").to_string_lossy().to_string();
    let (success, stdout) = run_binary(&[sample_path.as_str()])?;

    assert!(success);

    let (reports, _) = parse_outcome(&stdout)?;

    assert!(!reports.is_empty());

    for report in reports {
        let rules = report["triggered_rules"].as_array().ok_or_else(|| anyhow!("triggered_rules missing"))?;
        let reasons = report["reasons"].as_array().ok_or_else(|| anyhow!("reasons missing"))?;

        assert!(!rules.is_empty());
        assert_eq!(rules.len(), reasons.len());
        assert!(report["transaction"]["timestamp"].is_string());
        assert!(report["transaction"]["merchant_name"].is_string());
    }

    Ok(())
}

#[test]
fn test_cli_outputs_expected_flags_for_fixture() -> Result<()> {
    let fixture_path = Path::new("samples").join("fixed.csv").to_string_lossy().to_string();
    let (success, stdout) = run_binary(&[fixture_path.as_str()])?;

    assert!(success);

    let results = flagged_rules(&stdout)?;

    assert_eq!(results.len(), 7);
    assert_eq!(results["F2"], vec!["FraudulentMerchant"]);
    assert_eq!(results["F3"], vec!["HighAmount", "CreditHistory"]);

    for id in ["F4", "F5", "F6", "F7", "F8"] {
        assert_eq!(results[id], vec!["RapidFire"]);
    }

    assert!(!results.contains_key("F1"));
    assert!(!results.contains_key("F9"));
    assert!(!results.contains_key("F10"));

    Ok(())
}

#[test]
fn test_cli_reports_rejected_records_alongside_flags() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    writeln!(input, "transaction_id,user_id,merchant_name,amount,timestamp")?;
    writeln!(input, "P1,U1,Shop,-5,2024-03-01 10:00:00")?;
    writeln!(input, "P2,U1,ScamStore,5,2024-03-01 10:01:00")?;

    let input_path = input.path().to_string_lossy().to_string();
    let (success, stdout) = run_binary(&[input_path.as_str()])?;

    assert!(success);

    let (reports, rejected) = parse_outcome(&stdout)?;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["transaction"]["transaction_id"], "P2");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["position"], 0);

    let message = rejected[0]["error"].as_str().ok_or_else(|| anyhow!("rejection without message"))?;
    assert!(message.contains("[P1]"));
    assert!(message.contains("negative"));

    Ok(())
}

#[test]
fn test_cli_reports_fixture_rejection() -> Result<()> {
    let fixture_path = Path::new("samples").join("fixed.csv").to_string_lossy().to_string();
    let (success, stdout) = run_binary(&[fixture_path.as_str()])?;

    assert!(success);

    let (_, rejected) = parse_outcome(&stdout)?;

    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["position"], 9);

    Ok(())
}

#[test]
fn test_cli_applies_rule_configuration_file() -> Result<()> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, r#"{{"high_amount_threshold": 100, "rapidfire_count_limit": 6}}"#)?;

    let fixture_path = Path::new("samples").join("fixed.csv").to_string_lossy().to_string();
    let config_path = config.path().to_string_lossy().to_string();
    let (success, stdout) = run_binary(&[fixture_path.as_str(), "error", config_path.as_str()])?;

    assert!(success);

    let results = flagged_rules(&stdout)?;

    assert_eq!(results["F1"], vec!["HighAmount"]);
    assert_eq!(results["F9"], vec!["HighAmount"]);
    assert!(!results.contains_key("F4"));

    Ok(())
}

#[test]
fn test_cli_fails_on_invalid_configuration_and_missing_input() -> Result<()> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, r#"{{"rapidfire_window_secs": 0}}"#)?;

    let fixture_path = Path::new("samples").join("fixed.csv").to_string_lossy().to_string();
    let config_path = config.path().to_string_lossy().to_string();
    let (success, _) = run_binary(&[fixture_path.as_str(), "error", config_path.as_str()])?;
    assert!(!success);

    let (success, _) = run_binary(&["samples/does_not_exist.csv"])?;
    assert!(!success);

    let (success, _) = run_binary(&[])?;
    assert!(!success);

    Ok(())
}
