use super::super::facts::{AnalysisFacts, HeadingInfo, ImageInfo};
use super::CriterionScore;
use serde::{Deserialize, Serialize};

/// The six weighted criteria, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TaggedStructure,
    ContainsText,
    Metadata,
    HeadingStructure,
    ImageAltText,
    PdfUaCompliance,
}

impl Criterion {
    pub const fn ordered() -> [Criterion; 6] {
        [
            Self::TaggedStructure,
            Self::ContainsText,
            Self::Metadata,
            Self::HeadingStructure,
            Self::ImageAltText,
            Self::PdfUaCompliance,
        ]
    }

    pub const fn weight(self) -> u32 {
        match self {
            Self::TaggedStructure => 15,
            Self::ContainsText => 10,
            Self::Metadata => 10,
            Self::HeadingStructure => 15,
            Self::ImageAltText => 20,
            Self::PdfUaCompliance => 30,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TaggedStructure => "Tagged structure",
            Self::ContainsText => "Contains text",
            Self::Metadata => "Document metadata",
            Self::HeadingStructure => "Heading structure",
            Self::ImageAltText => "Image alternative text",
            Self::PdfUaCompliance => "PDF/UA compliance",
        }
    }
}

const TITLE_POINTS: u32 = 5;
const LANGUAGE_POINTS: u32 = 5;
const SINGLE_H1_POINTS: u32 = 7;
const SOME_H1_POINTS: u32 = 3;
const HIERARCHY_POINTS: u32 = 8;
const PARTIAL_HIERARCHY_POINTS: u32 = 4;

pub(crate) fn score_criteria(facts: &AnalysisFacts, is_compliant: bool) -> Vec<CriterionScore> {
    Criterion::ordered()
        .into_iter()
        .map(|criterion| {
            let points = match criterion {
                Criterion::TaggedStructure => all_or_nothing(criterion, facts.is_tagged),
                Criterion::ContainsText => all_or_nothing(criterion, facts.contains_text),
                Criterion::Metadata => metadata_points(facts),
                Criterion::HeadingStructure => heading_points(facts.heading_info()),
                Criterion::ImageAltText => image_points(&facts.image_info),
                Criterion::PdfUaCompliance => all_or_nothing(criterion, is_compliant),
            };

            CriterionScore {
                criterion: criterion.label().to_string(),
                points,
                max: criterion.weight(),
            }
        })
        .collect()
}

fn all_or_nothing(criterion: Criterion, passed: bool) -> u32 {
    if passed {
        criterion.weight()
    } else {
        0
    }
}

fn metadata_points(facts: &AnalysisFacts) -> u32 {
    let mut points = 0;
    if facts.is_title_defined {
        points += TITLE_POINTS;
    }
    if facts.is_lang_defined {
        points += LANGUAGE_POINTS;
    }
    points
}

fn heading_points(info: Option<&HeadingInfo>) -> u32 {
    let Some(info) = info else {
        return 0;
    };

    let h1_points = if info.has_single_h1 {
        SINGLE_H1_POINTS
    } else if info.h1_count > 0 {
        SOME_H1_POINTS
    } else {
        0
    };

    let hierarchy_points = if !info.has_skipped_levels {
        HIERARCHY_POINTS
    } else if !info.heading_structure.is_empty() {
        PARTIAL_HIERARCHY_POINTS
    } else {
        0
    };

    h1_points + hierarchy_points
}

fn image_points(info: &ImageInfo) -> u32 {
    let weight = Criterion::ImageAltText.weight();
    if info.image_count == 0 {
        return weight;
    }

    let with_alt = info.images_with_alt.min(info.image_count);
    // Integer division floors, matching `floor(20 * with_alt / count)`.
    ((weight as u64 * with_alt as u64) / info.image_count as u64) as u32
}
