//! Bridge WASM <-> JavaScript cho bộ chấm điểm triệu chứng.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use symptom_core::{DiagnosisError, DiagnosisResult, ScoringConfig, ValidationOutcome};
use symptom_engine::DiagnosisEngine;
use wasm_bindgen::prelude::*;

/// Ghi đè cấu hình từ JavaScript. Khóa theo camelCase (`maxSuggestions`) như
/// mọi đối tượng JS khác; file cấu hình của CLI dùng snake_case của
/// `ScoringConfig` (`max_suggestions`).
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsScoringConfig {
    #[serde(default)]
    inclusion_threshold: Option<u8>,
    #[serde(default)]
    max_alternatives: Option<usize>,
    #[serde(default)]
    max_suggestions: Option<usize>,
}

impl From<JsScoringConfig> for ScoringConfig {
    fn from(cfg: JsScoringConfig) -> Self {
        let mut base = ScoringConfig::default();
        if let Some(threshold) = cfg.inclusion_threshold {
            base.inclusion_threshold = threshold;
        }
        if let Some(limit) = cfg.max_alternatives {
            base.max_alternatives = limit;
        }
        if let Some(limit) = cfg.max_suggestions {
            base.max_suggestions = limit;
        }
        base
    }
}

fn read_config(config: Option<JsValue>) -> Result<ScoringConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsScoringConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(ScoringConfig::from(cfg))
        }
        _ => Ok(ScoringConfig::default()),
    }
}

/// Chấm điểm yêu cầu `{symptoms, age, gender, medicalHistory, currentMedications}`.
#[wasm_bindgen(js_name = generateDiagnosis)]
pub fn generate_diagnosis(input: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let request = from_value::<serde_json::Value>(input)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được yêu cầu: {err}")))?;
    let cfg = read_config(config)?;

    let result = symptom_engine::generate_diagnosis_value(&request, &cfg)
        .map_err(|err| JsValue::from_str(&format_diagnosis_error(err)))?;

    to_value(&result).map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

/// Gợi ý triệu chứng cho ô autocomplete; `maxSuggestions` giới hạn số gợi ý.
#[wasm_bindgen(js_name = getSymptomSuggestions)]
pub fn get_symptom_suggestions(input: &str, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = read_config(config)?;
    let suggestions = DiagnosisEngine::with_config(cfg).suggestions(input);
    to_value(&suggestions)
        .map_err(|err| JsValue::from_str(&format!("Không serialize gợi ý: {err}")))
}

/// Kiểm tra danh sách triệu chứng; luôn trả về `{isValid, message}`.
#[wasm_bindgen(js_name = validateSymptoms)]
pub fn validate_symptoms(symptoms: JsValue) -> Result<JsValue, JsValue> {
    let outcome = match from_value::<serde_json::Value>(symptoms) {
        Ok(value) => symptom_engine::validate_symptoms(&value),
        Err(_) => ValidationOutcome::invalid("Symptoms must be provided as a list"),
    };
    to_value(&outcome).map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

/// Hiển thị kết quả chẩn đoán dưới dạng markdown.
#[wasm_bindgen(js_name = formatDiagnosisMarkdown)]
pub fn format_diagnosis_markdown(result: JsValue) -> Result<String, JsValue> {
    let result: DiagnosisResult = from_value(result)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được kết quả chẩn đoán: {err}")))?;
    Ok(symptom_engine::format_markdown(&result))
}

fn format_diagnosis_error(err: DiagnosisError) -> String {
    match err {
        DiagnosisError::InvalidInput(message) => format!("Invalid input: {message}"),
        other => format!("Diagnosis error: {other}"),
    }
}
