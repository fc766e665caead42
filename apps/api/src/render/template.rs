//! Template Renderer — substitutes the section mapping into the fixed HTML
//! template.
//!
//! Rendering is deterministic: the same sections always produce byte-identical
//! HTML. Absent sections contribute nothing to the output; Tera's autoescaping
//! covers every substituted value.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

use crate::models::sections::ResumeSections;

pub const RESUME_TEMPLATE: &str = "resume.html";

#[derive(Serialize)]
struct SectionView<'a> {
    title: &'static str,
    lines: Vec<&'a str>,
}

#[derive(Clone)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// Compiles every `.html` template in the directory. Fails fast at
    /// startup if the resume template is missing or malformed.
    pub fn new(templates_dir: &Path) -> Result<Self> {
        let glob = format!("{}/*.html", templates_dir.display());
        let tera = Tera::new(&glob)
            .with_context(|| format!("failed to compile templates from {glob}"))?;
        if !tera.get_template_names().any(|n| n == RESUME_TEMPLATE) {
            anyhow::bail!(
                "template `{RESUME_TEMPLATE}` not found in {}",
                templates_dir.display()
            );
        }
        Ok(Self { tera })
    }

    pub fn render(&self, sections: &ResumeSections, document_title: &str) -> Result<String> {
        let views: Vec<SectionView<'_>> = sections
            .iter()
            .map(|(kind, block)| SectionView {
                title: kind.title(),
                lines: block.lines().filter(|l| !l.trim().is_empty()).collect(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("document_title", document_title);
        context.insert("sections", &views);

        self.tera
            .render(RESUME_TEMPLATE, &context)
            .context("failed to render resume template")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bundled_dir;
    use crate::models::sections::SectionKind;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new(&bundled_dir("templates")).unwrap()
    }

    fn education_only() -> ResumeSections {
        let mut sections = ResumeSections::default();
        sections.insert(
            SectionKind::Education,
            "BSc Computer Science, MIT, 2019".to_string(),
        );
        sections
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = renderer();
        let sections = education_only();
        let first = renderer.render(&sections, "resume.docx").unwrap();
        let second = renderer.render(&sections, "resume.docx").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_present_section_appears_with_heading_and_content() {
        let html = renderer().render(&education_only(), "resume.docx").unwrap();
        assert!(html.contains("Education"));
        assert!(html.contains("BSc Computer Science, MIT, 2019"));
    }

    #[test]
    fn test_absent_sections_leave_no_headings_or_placeholders() {
        let html = renderer().render(&education_only(), "resume.docx").unwrap();
        for kind in SectionKind::ALL {
            if kind != SectionKind::Education {
                assert!(
                    !html.contains(kind.title()),
                    "unexpected heading for absent section {}",
                    kind.title()
                );
            }
        }
        assert!(!html.contains("{{"));
        assert!(!html.contains("{%"));
    }

    #[test]
    fn test_section_content_is_html_escaped() {
        let mut sections = ResumeSections::default();
        sections.insert(
            SectionKind::Skills,
            "C++ <templates> & \"generics\"".to_string(),
        );
        let html = renderer().render(&sections, "resume.pdf").unwrap();
        assert!(html.contains("&lt;templates&gt;"));
        assert!(!html.contains("<templates>"));
    }

    #[test]
    fn test_multiline_blocks_render_every_line() {
        let mut sections = ResumeSections::default();
        sections.insert(
            SectionKind::ProfessionalExperience,
            "Staff Engineer, Acme\nLed the data platform\nShipped v2".to_string(),
        );
        let html = renderer()
            .render(&sections, "resume.pdf")
            .unwrap();
        assert!(html.contains("Staff Engineer, Acme"));
        assert!(html.contains("Led the data platform"));
        assert!(html.contains("Shipped v2"));
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let mut sections = ResumeSections::default();
        sections.insert(SectionKind::Languages, "English".to_string());
        sections.insert(SectionKind::Education, "BSc".to_string());
        let html = renderer().render(&sections, "resume.pdf").unwrap();
        let education_at = html.find("Education").unwrap();
        let languages_at = html.find("Languages").unwrap();
        assert!(education_at < languages_at);
    }
}
