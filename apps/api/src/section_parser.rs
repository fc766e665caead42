//! Section Parser — maps the model's free-form JSON response onto the fixed
//! section set.
//!
//! The mapping contract: keys are matched case-insensitively against the ten
//! canonical names; unknown keys and blank values are dropped; array values
//! are joined with newlines; anything else malformed degrades to "section
//! absent". A partially parseable response is never an error.

use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{SECTION_EXTRACT_PROMPT_TEMPLATE, SECTION_EXTRACT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::sections::{ResumeSections, SectionKind};

/// Characters the model sometimes leaves in front of bullet lines.
const BULLET_PREFIXES: &[char] = &['-', '\u{2022}', '\u{00b7}', '\u{2219}', '\u{2192}', '\u{25aa}'];

#[derive(Debug)]
pub struct ParsedSections {
    pub sections: ResumeSections,
    /// Model-reported `_warnings`, passed through to the user.
    pub warnings: Vec<String>,
}

/// One LLM round-trip: resume text in, section mapping out.
pub async fn parse_sections(
    resume_text: &str,
    api_key: &str,
    llm: &LlmClient,
) -> Result<ParsedSections, AppError> {
    let prompt = SECTION_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let raw: Value = llm
        .call_json(&prompt, SECTION_EXTRACT_SYSTEM, api_key)
        .await?;
    Ok(map_response(raw))
}

/// Pure response→sections mapping, separated from the network call so the
/// degradation rules are directly testable.
pub fn map_response(raw: Value) -> ParsedSections {
    let mut sections = ResumeSections::default();
    let mut warnings = Vec::new();

    let Value::Object(map) = raw else {
        warnings.push("model response was not a JSON object; no sections recognized".to_string());
        return ParsedSections { sections, warnings };
    };

    for (key, value) in map {
        if key == "_warnings" {
            if let Value::Array(items) = value {
                warnings.extend(
                    items
                        .into_iter()
                        .filter_map(|v| v.as_str().map(str::to_string)),
                );
            }
            continue;
        }
        let Some(kind) = SectionKind::from_heading(&key) else {
            continue; // unknown key: not part of the fixed set
        };
        if let Some(block) = coerce_block(&value) {
            sections.insert(kind, block);
        }
    }

    ParsedSections { sections, warnings }
}

/// Accepts a string or an array of strings; anything else is "absent".
/// Cleanup is limited to trimming and stripping leading bullet glyphs so the
/// content stays a verbatim copy of what the model returned.
fn coerce_block(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    let cleaned = text
        .lines()
        .map(|line| line.trim().trim_start_matches(BULLET_PREFIXES).trim_start())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_keys_map_to_sections() {
        let parsed = map_response(json!({
            "Education": "BSc Computer Science, MIT, 2019",
            "Skills": "Rust, Python, SQL"
        }));
        assert_eq!(
            parsed.sections.get(SectionKind::Education),
            Some("BSc Computer Science, MIT, 2019")
        );
        assert_eq!(
            parsed.sections.get(SectionKind::Skills),
            Some("Rust, Python, SQL")
        );
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_dropped_silently() {
        let parsed = map_response(json!({
            "Education": "BSc",
            "Hobbies": "Chess",
            "name": "Jane Doe"
        }));
        assert_eq!(parsed.sections.len(), 1);
    }

    #[test]
    fn test_key_matching_is_case_insensitive() {
        let parsed = map_response(json!({"EDUCATION": "BSc"}));
        assert_eq!(parsed.sections.get(SectionKind::Education), Some("BSc"));
    }

    #[test]
    fn test_array_values_join_with_newlines() {
        let parsed = map_response(json!({
            "Skills": ["Rust", "Python"]
        }));
        assert_eq!(parsed.sections.get(SectionKind::Skills), Some("Rust\nPython"));
    }

    #[test]
    fn test_blank_and_null_values_mean_absent() {
        let parsed = map_response(json!({
            "Education": "",
            "Skills": "   \n  ",
            "Projects": null,
            "Languages": 42
        }));
        assert!(parsed.sections.is_empty());
    }

    #[test]
    fn test_leading_bullets_are_stripped_but_text_is_verbatim() {
        let parsed = map_response(json!({
            "Professional Experience": "\u{2022} Led the platform team\n- Shipped v2"
        }));
        assert_eq!(
            parsed.sections.get(SectionKind::ProfessionalExperience),
            Some("Led the platform team\nShipped v2")
        );
    }

    /// Present values are substrings of what the model returned, modulo
    /// trimming — the client never rewords content.
    #[test]
    fn test_values_are_substrings_of_model_output() {
        let block = "Winner, ACM ICPC regional, 2018";
        let parsed = map_response(json!({"Awards & Honors": block}));
        assert!(block.contains(parsed.sections.get(SectionKind::AwardsAndHonors).unwrap()));
    }

    #[test]
    fn test_model_warnings_are_collected() {
        let parsed = map_response(json!({
            "Education": "BSc",
            "_warnings": ["Two overlapping Experience sections", 7]
        }));
        assert_eq!(
            parsed.warnings,
            vec!["Two overlapping Experience sections".to_string()]
        );
    }

    #[test]
    fn test_non_object_response_degrades_with_warning() {
        let parsed = map_response(json!(["not", "an", "object"]));
        assert!(parsed.sections.is_empty());
        assert_eq!(parsed.warnings.len(), 1);
    }
}
