//! The fixed resume section set and the per-request section mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of section categories the service recognizes.
///
/// Declaration order is render order; `Ord` on the enum gives `ResumeSections`
/// its deterministic iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SectionKind {
    #[serde(rename = "Professional Experience")]
    ProfessionalExperience,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Certifications")]
    Certifications,
    #[serde(rename = "Skills")]
    Skills,
    #[serde(rename = "Projects")]
    Projects,
    #[serde(rename = "Publications")]
    Publications,
    #[serde(rename = "Awards & Honors")]
    AwardsAndHonors,
    #[serde(rename = "Volunteer Experience")]
    VolunteerExperience,
    #[serde(rename = "Professional Affiliations")]
    ProfessionalAffiliations,
    #[serde(rename = "Languages")]
    Languages,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::ProfessionalExperience,
        SectionKind::Education,
        SectionKind::Certifications,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Publications,
        SectionKind::AwardsAndHonors,
        SectionKind::VolunteerExperience,
        SectionKind::ProfessionalAffiliations,
        SectionKind::Languages,
    ];

    /// Canonical display name, as it appears in the prompt and the template.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::ProfessionalExperience => "Professional Experience",
            SectionKind::Education => "Education",
            SectionKind::Certifications => "Certifications",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Publications => "Publications",
            SectionKind::AwardsAndHonors => "Awards & Honors",
            SectionKind::VolunteerExperience => "Volunteer Experience",
            SectionKind::ProfessionalAffiliations => "Professional Affiliations",
            SectionKind::Languages => "Languages",
        }
    }

    /// Matches a model-returned heading against the fixed set.
    ///
    /// Case-insensitive; tolerates surrounding whitespace, a trailing colon,
    /// and "and" written for "&". Anything else is not a recognized section.
    pub fn from_heading(heading: &str) -> Option<Self> {
        let wanted = normalize_heading(heading);
        Self::ALL
            .into_iter()
            .find(|kind| normalize_heading(kind.title()) == wanted)
    }
}

fn normalize_heading(heading: &str) -> String {
    heading
        .trim()
        .trim_end_matches(':')
        .to_ascii_lowercase()
        .replace(" and ", " & ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mapping from section kind to its verbatim text block.
///
/// Absent keys mean the section was not found in the source document. Built
/// once per upload, never mutated afterwards, discarded at end of request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections(BTreeMap<SectionKind, String>);

impl ResumeSections {
    pub fn insert(&mut self, kind: SectionKind, text: String) {
        self.0.insert(kind, text);
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Present sections in fixed declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
