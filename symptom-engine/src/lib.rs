//! Rule-based symptom scoring: matches reported symptoms against the condition
//! catalog, adjusts confidence for patient context and builds a `DiagnosisResult`.

pub mod catalog;
mod markdown;

use std::collections::HashSet;

use serde_json::Value;
use symptom_core::{
    ConditionDefinition, ConditionScore, ConditionSummary, DiagnosisError, DiagnosisRequest,
    DiagnosisResult, PatientContext, ScoringConfig, SymptomCategory, SymptomInput,
    SymptomSeverity, UrgencyLevel, ValidationOutcome,
};
use tracing::{debug, warn};

pub use markdown::format_markdown;

pub const PLACEHOLDER_CONDITION: &str = "Symptoms Require Professional Evaluation";
pub const FALLBACK_CONDITION: &str = "Unable to Generate Diagnosis";

const GENERAL_RECOMMENDATIONS: [&str; 3] = [
    "Monitor your symptoms and note any changes",
    "Maintain good hydration",
    "Get adequate rest",
];

const EMERGENCY_ACTION: &str =
    "Seek emergency medical care immediately or call your local emergency number";
const HIGH_ACTION: &str = "Contact your healthcare provider within 24 hours";
const MEDIUM_ACTION: &str =
    "Consider scheduling an appointment with your healthcare provider within a few days";

/// Generate a diagnosis with the built-in catalog and default scoring constants.
pub fn generate_diagnosis(request: &DiagnosisRequest) -> Result<DiagnosisResult, DiagnosisError> {
    DiagnosisEngine::default().generate(request)
}

/// Generate a diagnosis from a JSON string.
pub fn generate_diagnosis_str(
    request_json: &str,
    config: &ScoringConfig,
) -> Result<DiagnosisResult, DiagnosisError> {
    let value: Value = serde_json::from_str(request_json)
        .map_err(|err| DiagnosisError::Parse(err.to_string()))?;
    generate_diagnosis_value(&value, config)
}

/// Generate a diagnosis from a `serde_json::Value`.
///
/// The raw symptom list is validated before the typed parse, so an absent or
/// empty list, a short name or an unknown category/severity is reported as
/// `InvalidInput` with the offending position.
pub fn generate_diagnosis_value(
    request: &Value,
    config: &ScoringConfig,
) -> Result<DiagnosisResult, DiagnosisError> {
    let outcome = validate_symptoms(request.get("symptoms").unwrap_or(&Value::Null));
    if !outcome.is_valid {
        return Err(DiagnosisError::InvalidInput(outcome.message));
    }

    let request: DiagnosisRequest = serde_json::from_value(request.clone())
        .map_err(|err| DiagnosisError::Parse(err.to_string()))?;
    DiagnosisEngine::with_config(config.clone()).generate(&request)
}

/// Autocomplete helper over the built-in catalog.
pub fn get_symptom_suggestions(input: &str) -> Vec<&'static str> {
    DiagnosisEngine::default().suggestions(input)
}

/// Scores requests against a condition catalog.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine<'a> {
    catalog: &'a [ConditionDefinition],
    config: ScoringConfig,
}

impl Default for DiagnosisEngine<'static> {
    fn default() -> Self {
        Self::with_config(ScoringConfig::default())
    }
}

impl DiagnosisEngine<'static> {
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            catalog: catalog::conditions(),
            config,
        }
    }
}

impl<'a> DiagnosisEngine<'a> {
    pub fn new(catalog: &'a [ConditionDefinition], config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    /// Runs the scoring pipeline. `InvalidInput` is returned to the caller;
    /// any other failure is logged and replaced by the fallback result.
    pub fn generate(&self, request: &DiagnosisRequest) -> Result<DiagnosisResult, DiagnosisError> {
        match self.compute(request) {
            Ok(result) => Ok(result),
            Err(err @ DiagnosisError::InvalidInput(_)) => Err(err),
            Err(err) => {
                warn!(error = %err, "diagnosis computation failed, returning fallback result");
                Ok(fallback_result())
            }
        }
    }

    /// Scoring pipeline without the fallback boundary.
    pub fn compute(&self, request: &DiagnosisRequest) -> Result<DiagnosisResult, DiagnosisError> {
        if request.symptoms.is_empty() {
            return Err(DiagnosisError::InvalidInput(
                "at least one symptom is required".to_string(),
            ));
        }
        self.config.validate()?;

        let scores = self
            .catalog
            .iter()
            .map(|condition| self.score_condition(condition, request))
            .collect::<Result<Vec<_>, _>>()?;

        let surviving = filter_and_rank(scores, self.config.inclusion_threshold);
        debug!(surviving = surviving.len(), "ranked catalog conditions");

        let Some(primary) = surviving.first() else {
            return Ok(placeholder_result());
        };

        let urgency = resolve_urgency(&surviving);
        let recommendations = aggregate_recommendations(primary, urgency);
        let alternative_conditions = surviving
            .iter()
            .skip(1)
            .take(self.config.max_alternatives)
            .map(ConditionSummary::from)
            .collect();

        Ok(DiagnosisResult {
            primary_condition: ConditionSummary::from(primary),
            alternative_conditions,
            recommendations,
            urgency_level: urgency,
            disclaimer_shown: true,
        })
    }

    /// Autocomplete over this engine's catalog, capped at `max_suggestions`.
    pub fn suggestions(&self, input: &str) -> Vec<&'a str> {
        symptom_suggestions(self.catalog, input, self.config.max_suggestions)
    }

    fn score_condition(
        &self,
        condition: &ConditionDefinition,
        request: &DiagnosisRequest,
    ) -> Result<ConditionScore, DiagnosisError> {
        if condition.key.trim().is_empty() || condition.symptoms.is_empty() {
            return Err(DiagnosisError::ComputationFault(format!(
                "malformed catalog entry {:?}",
                condition.key
            )));
        }

        let raw_score = match_score(&request.symptoms, condition.symptoms);
        if !raw_score.is_finite() {
            return Err(DiagnosisError::ComputationFault(format!(
                "non-finite match score for {}",
                condition.key
            )));
        }

        let confidence = adjust_confidence(raw_score, &request.patient, &self.config);
        debug!(condition = condition.key, raw_score, confidence, "scored condition");

        Ok(ConditionScore {
            name: display_name(condition.key),
            confidence,
            description: condition.description.to_string(),
            recommendations: condition
                .recommendations
                .iter()
                .map(|rec| rec.to_string())
                .collect(),
            urgency_level: condition.urgency,
            raw_score,
        })
    }
}

/// Lower-case, trim, then drop everything that is not a word character or whitespace.
pub fn normalize_symptom(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Percentage of user symptoms matched against a condition's phrases.
///
/// Every (user symptom, phrase) pair where one contains the other counts as a
/// match, so one symptom can match several phrases and push the score past 100.
pub fn match_score(user_symptoms: &[SymptomInput], condition_symptoms: &[&str]) -> f64 {
    if user_symptoms.is_empty() {
        return 0.0;
    }

    let phrases: Vec<String> = condition_symptoms
        .iter()
        .map(|phrase| normalize_symptom(phrase))
        .collect();

    let matches: usize = user_symptoms
        .iter()
        .map(|symptom| {
            let needle = normalize_symptom(symptom.name());
            phrases
                .iter()
                .filter(|phrase| {
                    phrase.contains(needle.as_str()) || needle.contains(phrase.as_str())
                })
                .count()
        })
        .sum();

    matches as f64 / user_symptoms.len() as f64 * 100.0
}

/// Apply patient-context penalties, round, and clamp into the configured bounds.
pub fn adjust_confidence(raw_score: f64, patient: &PatientContext, config: &ScoringConfig) -> u8 {
    let mut adjusted = raw_score;

    if patient.age < config.pediatric_age {
        adjusted *= config.pediatric_factor;
    } else if patient.age > config.senior_age {
        adjusted *= config.senior_factor;
    }

    if !patient.medical_history.is_empty() {
        adjusted *= config.history_factor;
    }

    if !patient.current_medications.is_empty() {
        adjusted *= config.medication_factor;
    }

    adjusted
        .round()
        .max(config.confidence_floor)
        .min(config.confidence_ceiling)
        .clamp(0.0, 100.0) as u8
}

/// Keep scores strictly above `threshold`, highest confidence first.
/// The sort is stable, so equal scores stay in catalog order.
pub fn filter_and_rank(scores: Vec<ConditionScore>, threshold: u8) -> Vec<ConditionScore> {
    let mut surviving: Vec<ConditionScore> = scores
        .into_iter()
        .filter(|score| score.confidence > threshold)
        .collect();
    surviving.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    surviving
}

/// Highest urgency among the surviving conditions, regardless of confidence.
pub fn resolve_urgency(surviving: &[ConditionScore]) -> UrgencyLevel {
    surviving
        .iter()
        .map(|score| score.urgency_level)
        .max()
        .unwrap_or(UrgencyLevel::Low)
}

/// Primary recommendations, general advice and the urgency call to action,
/// each kept once in first-seen order. Other survivors only contribute through
/// `urgency`, which is resolved over all of them.
pub fn aggregate_recommendations(primary: &ConditionScore, urgency: UrgencyLevel) -> Vec<String> {
    let action = match urgency {
        UrgencyLevel::Emergency => Some(EMERGENCY_ACTION),
        UrgencyLevel::High => Some(HIGH_ACTION),
        UrgencyLevel::Medium => Some(MEDIUM_ACTION),
        UrgencyLevel::Low => None,
    };

    let mut seen = HashSet::new();
    primary
        .recommendations
        .iter()
        .map(String::as_str)
        .chain(GENERAL_RECOMMENDATIONS)
        .chain(action)
        .filter(|rec| seen.insert(*rec))
        .map(str::to_string)
        .collect()
}

/// Distinct catalog phrases whose normalized form contains the query.
pub fn symptom_suggestions<'a>(
    catalog: &'a [ConditionDefinition],
    input: &str,
    limit: usize,
) -> Vec<&'a str> {
    let query = input.to_lowercase().trim().to_string();
    if query.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    catalog
        .iter()
        .flat_map(|condition| condition.symptoms.iter().copied())
        .filter(|phrase| normalize_symptom(phrase).contains(&query))
        .filter(|phrase| seen.insert(*phrase))
        .take(limit)
        .collect()
}

/// Check a raw symptom list as received from a client.
pub fn validate_symptoms(symptoms: &Value) -> ValidationOutcome {
    let Some(entries) = symptoms.as_array() else {
        return ValidationOutcome::invalid("Symptoms must be provided as a list");
    };

    if entries.is_empty() {
        return ValidationOutcome::invalid("At least one symptom is required");
    }

    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        let name = entry
            .as_str()
            .or_else(|| entry.get("name").and_then(Value::as_str))
            .unwrap_or_default();

        if name.trim().chars().count() < 2 {
            return ValidationOutcome::invalid(format!(
                "Symptom {position} must have a name of at least 2 characters"
            ));
        }

        if let Some(category) = entry.get("category").filter(|value| !value.is_null()) {
            if serde_json::from_value::<SymptomCategory>(category.clone()).is_err() {
                return ValidationOutcome::invalid(format!(
                    "Symptom {position} has an invalid category: {category}"
                ));
            }
        }

        if let Some(severity) = entry.get("severity").filter(|value| !value.is_null()) {
            if serde_json::from_value::<SymptomSeverity>(severity.clone()).is_err() {
                return ValidationOutcome::invalid(format!(
                    "Symptom {position} has an invalid severity: {severity}"
                ));
            }
        }
    }

    ValidationOutcome::valid("Symptoms are valid")
}

/// Check the demographic part of a request.
pub fn validate_patient(patient: &PatientContext) -> ValidationOutcome {
    if !(1..=120).contains(&patient.age) {
        return ValidationOutcome::invalid("Age must be between 1 and 120");
    }
    ValidationOutcome::valid("Patient details are valid")
}

/// Returned when no condition clears the inclusion threshold.
pub fn placeholder_result() -> DiagnosisResult {
    DiagnosisResult {
        primary_condition: ConditionSummary {
            name: PLACEHOLDER_CONDITION.to_string(),
            confidence: 0,
            description: "Your symptoms do not clearly match a specific condition in our database. A healthcare professional can provide a proper evaluation.".to_string(),
        },
        alternative_conditions: Vec::new(),
        recommendations: [
            "Consult a healthcare provider for a proper evaluation",
            "Keep a detailed record of your symptoms, including when they started",
            "Monitor your symptoms for any changes",
            "Seek immediate care if your symptoms worsen",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        urgency_level: UrgencyLevel::Medium,
        disclaimer_shown: true,
    }
}

/// Returned when scoring fails internally.
pub fn fallback_result() -> DiagnosisResult {
    DiagnosisResult {
        primary_condition: ConditionSummary {
            name: FALLBACK_CONDITION.to_string(),
            confidence: 0,
            description: "An error occurred while analyzing your symptoms. Please consult a healthcare professional.".to_string(),
        },
        alternative_conditions: Vec::new(),
        recommendations: [
            "Consult a healthcare provider about your symptoms",
            "Seek immediate medical attention if your symptoms are severe",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        urgency_level: UrgencyLevel::Medium,
        disclaimer_shown: true,
    }
}

/// `common_cold` -> `Common Cold`.
fn display_name(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use symptom_core::{MedicalHistoryEntry, Medication, SymptomReport};

    fn score(name: &str, confidence: u8, urgency: UrgencyLevel) -> ConditionScore {
        ConditionScore {
            name: name.to_string(),
            confidence,
            description: String::new(),
            recommendations: vec![format!("{name} advice")],
            urgency_level: urgency,
            raw_score: confidence as f64,
        }
    }

    fn texts(items: &[&str]) -> Vec<SymptomInput> {
        items.iter().map(|item| SymptomInput::from(*item)).collect()
    }

    fn with_history(mut patient: PatientContext) -> PatientContext {
        patient.medical_history.push(MedicalHistoryEntry {
            condition: "asthma".to_string(),
            diagnosed_on: None,
            notes: None,
        });
        patient
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_symptom("  Chest Pain! "), "chest pain");
        assert_eq!(normalize_symptom("Chest-Pain!"), "chestpain");
        assert_eq!(normalize_symptom("sore_throat"), "sore_throat");
        assert_eq!(normalize_symptom(""), "");
    }

    #[test]
    fn match_score_counts_containment_both_ways() {
        let phrases = ["chest pain when breathing", "high fever", "chills"];
        // "chest pain" is inside the first phrase, "fever" inside the second.
        let score = match_score(&texts(&["chest pain", "fever"]), &phrases);
        assert_eq!(score, 100.0);

        let score = match_score(&texts(&["very high fever today"]), &phrases);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn match_score_can_exceed_one_hundred() {
        let phrases = ["headache", "severe headache", "throbbing headache"];
        let score = match_score(&texts(&["headache"]), &phrases);
        assert_eq!(score, 300.0);
    }

    #[test]
    fn match_score_accepts_records() {
        let symptoms = vec![SymptomInput::Report(SymptomReport::new("Sneezing"))];
        assert_eq!(match_score(&symptoms, &["sneezing", "runny nose"]), 100.0);
    }

    #[test]
    fn match_score_is_zero_without_user_symptoms() {
        assert_eq!(match_score(&[], &["cough"]), 0.0);
    }

    #[test]
    fn adjust_applies_age_bands() {
        let config = ScoringConfig::default();
        assert_eq!(adjust_confidence(80.0, &PatientContext::new(30), &config), 80);
        assert_eq!(adjust_confidence(80.0, &PatientContext::new(12), &config), 72);
        assert_eq!(adjust_confidence(80.0, &PatientContext::new(70), &config), 76);
        assert_eq!(adjust_confidence(80.0, &PatientContext::new(18), &config), 80);
        assert_eq!(adjust_confidence(80.0, &PatientContext::new(65), &config), 80);
    }

    #[test]
    fn adjust_applies_history_and_medications() {
        let config = ScoringConfig::default();
        let mut patient = with_history(PatientContext::new(40));
        assert_eq!(adjust_confidence(80.0, &patient, &config), 72);

        patient.current_medications.push(Medication {
            name: "ibuprofen".to_string(),
            dosage: None,
            frequency: None,
        });
        // 80 * 0.90 * 0.95 = 68.4
        assert_eq!(adjust_confidence(80.0, &patient, &config), 68);
    }

    #[test]
    fn adjust_clamps_to_floor_and_ceiling() {
        let config = ScoringConfig::default();
        let patient = PatientContext::new(30);
        assert_eq!(adjust_confidence(0.0, &patient, &config), 10);
        assert_eq!(adjust_confidence(300.0, &patient, &config), 95);
    }

    #[test]
    fn adjust_rounds_before_threshold() {
        let config = ScoringConfig::default();
        let patient = with_history(PatientContext::new(30));
        // One match out of six symptoms with history: 16.67 * 0.9 rounds to 15.
        assert_eq!(adjust_confidence(100.0 / 6.0, &patient, &config), 15);
    }

    #[test]
    fn threshold_is_strict() {
        let ranked = filter_and_rank(
            vec![
                score("Fifteen", 15, UrgencyLevel::Low),
                score("Sixteen", 16, UrgencyLevel::Low),
            ],
            15,
        );
        let names: Vec<_> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sixteen"]);
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let ranked = filter_and_rank(
            vec![
                score("First", 50, UrgencyLevel::Low),
                score("Top", 90, UrgencyLevel::Low),
                score("Second", 50, UrgencyLevel::Low),
                score("Third", 50, UrgencyLevel::Low),
            ],
            15,
        );
        let names: Vec<_> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn urgency_takes_highest_level() {
        let surviving = vec![
            score("A", 90, UrgencyLevel::Low),
            score("B", 40, UrgencyLevel::Medium),
            score("C", 20, UrgencyLevel::Emergency),
        ];
        assert_eq!(resolve_urgency(&surviving), UrgencyLevel::Emergency);
        assert_eq!(resolve_urgency(&surviving[..2]), UrgencyLevel::Medium);
        assert_eq!(resolve_urgency(&[]), UrgencyLevel::Low);
    }

    #[test]
    fn recommendations_are_deduplicated_in_order() {
        let mut primary = score("Flu", 80, UrgencyLevel::High);
        primary.recommendations = vec![
            "Get adequate rest".to_string(),
            "Drink fluids".to_string(),
            "Drink fluids".to_string(),
        ];

        let recs = aggregate_recommendations(&primary, UrgencyLevel::High);
        assert_eq!(
            recs,
            vec![
                "Get adequate rest",
                "Drink fluids",
                "Monitor your symptoms and note any changes",
                "Maintain good hydration",
                HIGH_ACTION,
            ]
        );
    }

    #[test]
    fn low_urgency_adds_no_call_to_action() {
        let primary = score("Cold", 80, UrgencyLevel::Low);
        let recs = aggregate_recommendations(&primary, UrgencyLevel::Low);
        assert_eq!(recs.len(), 4);
        assert!(!recs.iter().any(|rec| rec == MEDIUM_ACTION));
    }

    #[test]
    fn display_name_title_cases_keys() {
        assert_eq!(display_name("common_cold"), "Common Cold");
        assert_eq!(display_name("urinary_tract_infection"), "Urinary Tract Infection");
        assert_eq!(display_name("migraine"), "Migraine");
    }

    #[test]
    fn suggestions_are_distinct_and_capped() {
        let suggestions = get_symptom_suggestions("Fever");
        assert_eq!(suggestions, vec!["mild fever", "high fever", "low grade fever"]);

        let many = symptom_suggestions(catalog::conditions(), "e", 10);
        assert_eq!(many.len(), 10);

        let engine = DiagnosisEngine::with_config(ScoringConfig {
            max_suggestions: 2,
            ..ScoringConfig::default()
        });
        assert_eq!(engine.suggestions("fever"), vec!["mild fever", "high fever"]);

        assert!(get_symptom_suggestions("   ").is_empty());
        assert!(get_symptom_suggestions("zzz").is_empty());
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        assert!(!validate_symptoms(&json!("cough")).is_valid);
        assert!(!validate_symptoms(&json!([])).is_valid);
        assert!(!validate_symptoms(&json!([{"name": " a "}])).is_valid);
        assert!(!validate_symptoms(&json!([{"category": "respiratory"}])).is_valid);

        let outcome = validate_symptoms(&json!([{"name": "cough", "category": "lungs"}]));
        assert!(!outcome.is_valid);
        assert!(outcome.message.contains("category"));

        let outcome = validate_symptoms(&json!([{"name": "cough", "severity": "extreme"}]));
        assert!(!outcome.is_valid);
        assert!(outcome.message.contains("severity"));
    }

    #[test]
    fn validate_accepts_strings_and_records() {
        let outcome = validate_symptoms(&json!([
            "headache",
            {"name": "cough", "category": "respiratory", "severity": "moderate"},
            {"name": "rash", "category": null}
        ]));
        assert!(outcome.is_valid, "{}", outcome.message);
    }

    #[test]
    fn validate_patient_checks_age_range() {
        assert!(validate_patient(&PatientContext::new(1)).is_valid);
        assert!(validate_patient(&PatientContext::new(120)).is_valid);
        assert!(!validate_patient(&PatientContext::new(0)).is_valid);
        assert!(!validate_patient(&PatientContext::new(121)).is_valid);
    }
}
