// The fixed extraction prompt. This is the verbatim-preservation contract:
// the model classifies content into the closed section set and copies it,
// never rewrites it.

/// System prompt — enforces the transcription role and JSON-only output.
pub const SECTION_EXTRACT_SYSTEM: &str = "You are a meticulous resume transcriptionist. \
    You classify resume content into a fixed set of sections without rewriting it. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
pub const SECTION_EXTRACT_PROMPT_TEMPLATE: &str = r#"Classify the resume text below into the fixed section set and return ONE JSON object.

Allowed keys — use these EXACT names and no others:
  "Professional Experience"
  "Education"
  "Certifications"
  "Skills"
  "Projects"
  "Publications"
  "Awards & Honors"
  "Volunteer Experience"
  "Professional Affiliations"
  "Languages"

Rules:
- Copy content VERBATIM. Do not summarize, paraphrase, translate, or reorder anything.
- The value of each key is that section's full text block as a single string, entries separated by newlines.
- Normalize formatting only: collapse duplicate spaces and rejoin lines that split one sentence.
- OMIT the key for any section the resume does not contain. Never return null or an empty string.
- Content that fits none of the keys is left out entirely.
- If any part of the text is ambiguous or unreadable, add "_warnings": ["<specific note naming the entry>"]. Otherwise omit "_warnings".

RESUME TEXT:
---
{resume_text}
---"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sections::SectionKind;

    /// The prompt must name every section of the fixed set, quoted exactly.
    #[test]
    fn test_prompt_names_all_ten_sections() {
        for kind in SectionKind::ALL {
            let quoted = format!("\"{}\"", kind.title());
            assert!(
                SECTION_EXTRACT_PROMPT_TEMPLATE.contains(&quoted),
                "prompt is missing section {quoted}"
            );
        }
    }

    /// Verbatim preservation is enforced at the prompt level.
    #[test]
    fn test_prompt_states_verbatim_and_omission_rules() {
        assert!(SECTION_EXTRACT_PROMPT_TEMPLATE.contains("VERBATIM"));
        assert!(SECTION_EXTRACT_PROMPT_TEMPLATE.contains("Do not summarize"));
        assert!(SECTION_EXTRACT_PROMPT_TEMPLATE.contains("OMIT the key"));
        assert!(SECTION_EXTRACT_PROMPT_TEMPLATE.contains("{resume_text}"));
    }

    #[test]
    fn test_system_prompt_demands_json_only() {
        assert!(SECTION_EXTRACT_SYSTEM.contains("valid JSON only"));
    }
}
