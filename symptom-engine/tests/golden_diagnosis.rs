use std::fs;

use pretty_assertions::assert_eq;
use serde_json::Value;
use symptom_core::ScoringConfig;
use symptom_engine::generate_diagnosis_str;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn assert_matches_golden(request: &str, golden: &str) {
    let request = fs::read_to_string(fixture_path(request)).expect("Không đọc được request mẫu");

    let result = generate_diagnosis_str(&request, &ScoringConfig::default())
        .expect("Không tạo được chẩn đoán");
    let actual = serde_json::to_value(result).expect("Không serialize kết quả");

    let expected = fs::read_to_string(fixture_path(golden)).expect("Không đọc được golden");
    let expected: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");

    assert_eq!(actual, expected);
}

#[test]
fn common_cold_request_matches_golden() {
    assert_matches_golden("common_cold_request.json", "common_cold_diagnosis.json");
}

#[test]
fn chest_pain_request_matches_golden() {
    assert_matches_golden("chest_pain_request.json", "chest_pain_diagnosis.json");
}
