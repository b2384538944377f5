// End-to-end pipeline tests over real sheet files: carrier CSV bytes
// (Windows-1252, semicolon-delimited) against an internal XLSX workbook.

use statusdiff::{AppError, ComparisonRecord, StatusComparison};

const CARRIER_CSV: &[u8] = include_bytes!("data/carrier.csv");
const INTERNAL_XLSX: &[u8] = include_bytes!("data/internal.xlsx");

fn run_fixture() -> statusdiff::ComparisonReport {
    StatusComparison::default_config()
        .run(CARRIER_CSV, INTERNAL_XLSX)
        .expect("fixture sheets should load and compare")
}

#[test]
fn fixture_sheets_produce_the_expected_report() {
    let report = run_fixture();

    // 7001 agrees through the FECHADO/INSTALADO synonym, 7002 agrees
    // literally, 7004 agrees after trimming and case folding
    assert_eq!(report.equal_count, 3);
    assert_eq!(
        report.equal_records,
        vec![
            ComparisonRecord::new("7001", "FECHADO", "INSTALADO"),
            ComparisonRecord::new("7002", "PENDENTE", "PENDENTE"),
            ComparisonRecord::new("7004", "INSTALADO", "INSTALADO"),
        ]
    );

    assert_eq!(report.divergent_count, 1);
    assert_eq!(
        report.divergent_records,
        vec![ComparisonRecord::new("7003", "INSTALADO", "CANCELADO")]
    );
}

#[test]
fn unmatched_and_incomplete_protocols_fall_out_of_the_report() {
    let report = run_fixture();
    let protocols: Vec<&str> = report
        .equal_records
        .iter()
        .chain(report.divergent_records.iter())
        .map(|record| record.protocol.as_str())
        .collect();

    // 7005 exists only in the carrier sheet, 9999 only in the internal
    // one; 7006 is matched but the carrier left its status blank
    assert!(!protocols.contains(&"7005"));
    assert!(!protocols.contains(&"9999"));
    assert!(!protocols.contains(&"7006"));
}

#[test]
fn running_the_fixture_twice_yields_identical_reports() {
    assert_eq!(run_fixture(), run_fixture());
}

#[test]
fn carrier_accents_survive_the_windows_1252_decode() {
    // "EM INSTALAÇÃO" (protocol 7005) carries non-ASCII bytes; it never
    // joins, but a wrong decode would have failed the whole load
    let comparison = StatusComparison::default_config();
    let (carrier, _) = comparison
        .load_sources(CARRIER_CSV, INTERNAL_XLSX)
        .expect("fixture sheets should load");

    let status = &carrier
        .iter()
        .find(|record| record.protocol == "7005")
        .expect("protocol 7005 is in the carrier fixture")
        .status;
    assert_eq!(status, "EM INSTALAÇÃO");
}

#[test]
fn a_narrow_carrier_sheet_fails_the_whole_run() {
    let err = StatusComparison::default_config()
        .run(b"a;b;c\nd;e;f\n", INTERNAL_XLSX)
        .unwrap_err();

    match err {
        AppError::Load { message, detail } => {
            assert!(message.contains("carrier sheet"));
            assert!(!detail.is_empty());
        }
        other => panic!("expected a load error, got {:?}", other),
    }
}

#[test]
fn a_truncated_workbook_fails_the_whole_run() {
    let truncated = &INTERNAL_XLSX[..INTERNAL_XLSX.len() / 2];

    let err = StatusComparison::default_config()
        .run(CARRIER_CSV, truncated)
        .unwrap_err();

    match err {
        AppError::Load { message, .. } => assert!(message.contains("internal sheet")),
        other => panic!("expected a load error, got {:?}", other),
    }
}

#[test]
fn the_report_serializes_with_the_dashboard_field_names() {
    let value = serde_json::to_value(run_fixture()).unwrap();

    assert_eq!(value["equal_count"], 3);
    assert_eq!(value["divergent_count"], 1);
    assert_eq!(value["divergent_records"][0]["protocol"], "7003");
    assert_eq!(value["divergent_records"][0]["carrier_status"], "INSTALADO");
    assert_eq!(value["divergent_records"][0]["internal_status"], "CANCELADO");
    assert_eq!(
        value["equal_records"]
            .as_array()
            .map(|records| records.len()),
        Some(3)
    );
}
