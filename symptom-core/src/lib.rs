//! Mô hình dữ liệu lõi cho bộ chấm điểm triệu chứng và đánh giá sức khỏe.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cấu hình các hằng số của thuật toán chấm điểm.
///
/// Giá trị mặc định chính là các hằng số gốc của heuristic; thay đổi chúng sẽ
/// làm thay đổi tập bệnh có thể xuất hiện trong kết quả.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Độ tin cậy phải lớn hơn hẳn ngưỡng này thì bệnh mới được giữ lại.
    pub inclusion_threshold: u8,
    /// Cận dưới của độ tin cậy sau điều chỉnh.
    pub confidence_floor: f64,
    /// Cận trên của độ tin cậy sau điều chỉnh.
    pub confidence_ceiling: f64,
    /// Số chẩn đoán thay thế tối đa.
    pub max_alternatives: usize,
    /// Số gợi ý triệu chứng tối đa cho autocomplete.
    pub max_suggestions: usize,
    /// Dưới tuổi này áp dụng hệ số nhi khoa.
    pub pediatric_age: u32,
    /// Trên tuổi này áp dụng hệ số người cao tuổi.
    pub senior_age: u32,
    pub pediatric_factor: f64,
    pub senior_factor: f64,
    /// Áp dụng khi tiền sử bệnh không rỗng.
    pub history_factor: f64,
    /// Áp dụng khi đang dùng ít nhất một loại thuốc.
    pub medication_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            inclusion_threshold: 15,
            confidence_floor: 10.0,
            confidence_ceiling: 95.0,
            max_alternatives: 3,
            max_suggestions: 10,
            pediatric_age: 18,
            senior_age: 65,
            pediatric_factor: 0.90,
            senior_factor: 0.95,
            history_factor: 0.90,
            medication_factor: 0.95,
        }
    }
}

impl ScoringConfig {
    /// Kiểm tra cấu hình trước khi chấm điểm.
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        let factors = [
            ("pediatric_factor", self.pediatric_factor),
            ("senior_factor", self.senior_factor),
            ("history_factor", self.history_factor),
            ("medication_factor", self.medication_factor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(DiagnosisError::ComputationFault(format!(
                    "Hệ số {name} không hợp lệ: {value}"
                )));
            }
        }

        if !self.confidence_floor.is_finite()
            || !self.confidence_ceiling.is_finite()
            || self.confidence_floor > self.confidence_ceiling
        {
            return Err(DiagnosisError::ComputationFault(format!(
                "Khoảng độ tin cậy không hợp lệ: [{}, {}]",
                self.confidence_floor, self.confidence_ceiling
            )));
        }

        Ok(())
    }
}

/// Mức độ khẩn cấp, sắp xếp tăng dần để `max()` trả về mức ưu tiên cao nhất.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Emergency => "Emergency",
        }
    }
}

/// Nhóm triệu chứng do người dùng chọn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SymptomCategory {
    General,
    Respiratory,
    Digestive,
    Neurological,
    Cardiovascular,
    Dermatological,
    Musculoskeletal,
    Other,
}

/// Mức độ nặng tự đánh giá của một triệu chứng.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SymptomSeverity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

/// Một triệu chứng người dùng khai báo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomReport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SymptomCategory>,
    #[serde(default)]
    pub severity: SymptomSeverity,
}

impl SymptomReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            severity: SymptomSeverity::default(),
        }
    }
}

/// Triệu chứng đầu vào: chuỗi thuần hoặc bản ghi có trường `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SymptomInput {
    Text(String),
    Report(SymptomReport),
}

impl SymptomInput {
    /// Tên triệu chứng, bất kể dạng đầu vào.
    pub fn name(&self) -> &str {
        match self {
            SymptomInput::Text(text) => text,
            SymptomInput::Report(report) => &report.name,
        }
    }
}

impl From<&str> for SymptomInput {
    fn from(value: &str) -> Self {
        SymptomInput::Text(value.to_string())
    }
}

impl From<SymptomReport> for SymptomInput {
    fn from(value: SymptomReport) -> Self {
        SymptomInput::Report(value)
    }
}

/// Một mục trong tiền sử bệnh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryEntry {
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosed_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Thuốc đang sử dụng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Bối cảnh bệnh nhân. Thuật toán chỉ dùng tuổi và số lượng tiền sử/thuốc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub medical_history: Vec<MedicalHistoryEntry>,
    #[serde(default)]
    pub current_medications: Vec<Medication>,
}

impl PatientContext {
    pub fn new(age: u32) -> Self {
        Self {
            age,
            gender: String::new(),
            medical_history: Vec::new(),
            current_medications: Vec::new(),
        }
    }
}

/// Yêu cầu chẩn đoán: danh sách triệu chứng kèm bối cảnh bệnh nhân.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub symptoms: Vec<SymptomInput>,
    #[serde(flatten)]
    pub patient: PatientContext,
}

impl DiagnosisRequest {
    pub fn new<I, S>(symptoms: I, patient: PatientContext) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SymptomInput>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            patient,
        }
    }
}

/// Hồ sơ một bệnh trong danh mục tĩnh.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ConditionDefinition {
    pub key: &'static str,
    pub symptoms: &'static [&'static str],
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
    pub urgency: UrgencyLevel,
}

/// Điểm của một bệnh cho một yêu cầu cụ thể.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionScore {
    pub name: String,
    pub confidence: u8,
    pub description: String,
    pub recommendations: Vec<String>,
    pub urgency_level: UrgencyLevel,
    /// Điểm khớp trước khi điều chỉnh, chỉ dùng để chẩn đoán lỗi.
    pub raw_score: f64,
}

/// Dạng rút gọn của một bệnh trong kết quả cuối.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionSummary {
    pub name: String,
    pub confidence: u8,
    pub description: String,
}

impl From<&ConditionScore> for ConditionSummary {
    fn from(score: &ConditionScore) -> Self {
        Self {
            name: score.name.clone(),
            confidence: score.confidence,
            description: score.description.clone(),
        }
    }
}

/// Kết quả đánh giá cuối cùng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub primary_condition: ConditionSummary,
    pub alternative_conditions: Vec<ConditionSummary>,
    pub recommendations: Vec<String>,
    pub urgency_level: UrgencyLevel,
    pub disclaimer_shown: bool,
}

/// Kết quả kiểm tra đầu vào; không bao giờ là lỗi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationOutcome {
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Lỗi khi tạo chẩn đoán.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DiagnosisError {
    #[error("Dữ liệu đầu vào không hợp lệ: {0}")]
    InvalidInput(String),
    #[error("Lỗi tính toán nội bộ: {0}")]
    ComputationFault(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}
