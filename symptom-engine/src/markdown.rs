//! Markdown rendering of a `DiagnosisResult` for chat-style display.

use std::fmt::Write;

use symptom_core::{ConditionSummary, DiagnosisResult, UrgencyLevel};

const DISCLAIMER: &str = "This assessment is for informational purposes only and is not a medical diagnosis. Always consult a qualified healthcare professional about your health.";

/// Render a result as markdown.
pub fn format_markdown(result: &DiagnosisResult) -> String {
    let mut out = String::new();

    out.push_str("## Health Assessment\n\n");
    let _ = writeln!(
        out,
        "**Most likely:** {}\n",
        condition_heading(&result.primary_condition)
    );
    let _ = writeln!(out, "{}\n", result.primary_condition.description);

    if !result.alternative_conditions.is_empty() {
        out.push_str("**Other possibilities:**\n");
        for alternative in &result.alternative_conditions {
            let _ = writeln!(out, "- {}", condition_heading(alternative));
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "**Urgency:** {} {}\n",
        urgency_marker(result.urgency_level),
        result.urgency_level.label()
    );

    if !result.recommendations.is_empty() {
        out.push_str("**Recommendations:**\n");
        for (index, recommendation) in result.recommendations.iter().enumerate() {
            let _ = writeln!(out, "{}. {recommendation}", index + 1);
        }
        out.push('\n');
    }

    if result.disclaimer_shown {
        let _ = writeln!(out, "_{DISCLAIMER}_");
    }

    out
}

fn condition_heading(condition: &ConditionSummary) -> String {
    if condition.confidence == 0 {
        condition.name.clone()
    } else {
        format!("{} ({}% match)", condition.name, condition.confidence)
    }
}

fn urgency_marker(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Emergency => "🚨",
        UrgencyLevel::High => "⚠️",
        UrgencyLevel::Medium => "ℹ️",
        UrgencyLevel::Low => "✅",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder_result;

    fn sample() -> DiagnosisResult {
        DiagnosisResult {
            primary_condition: ConditionSummary {
                name: "Common Cold".to_string(),
                confidence: 95,
                description: "A viral infection.".to_string(),
            },
            alternative_conditions: vec![ConditionSummary {
                name: "Allergic Rhinitis".to_string(),
                confidence: 67,
                description: "An allergic reaction.".to_string(),
            }],
            recommendations: vec!["Get plenty of rest".to_string(), "Drink fluids".to_string()],
            urgency_level: UrgencyLevel::Low,
            disclaimer_shown: true,
        }
    }

    #[test]
    fn renders_primary_alternatives_and_recommendations() {
        let text = format_markdown(&sample());

        assert!(text.starts_with("## Health Assessment\n"));
        assert!(text.contains("**Most likely:** Common Cold (95% match)"));
        assert!(text.contains("- Allergic Rhinitis (67% match)"));
        assert!(text.contains("**Urgency:** ✅ Low"));
        assert!(text.contains("1. Get plenty of rest\n2. Drink fluids\n"));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn placeholder_omits_percentage_and_alternatives() {
        let text = format_markdown(&placeholder_result());

        assert!(text.contains("**Most likely:** Symptoms Require Professional Evaluation\n"));
        assert!(!text.contains("% match"));
        assert!(!text.contains("Other possibilities"));
        assert!(text.contains("**Urgency:** ℹ️ Medium"));
    }
}
