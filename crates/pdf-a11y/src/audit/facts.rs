use serde::{Deserialize, Deserializer, Serialize};

/// Structural facts extracted from a single PDF, consumed by scoring and recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFacts {
    #[serde(default)]
    pub is_tagged: bool,
    #[serde(default)]
    pub contains_text: bool,
    #[serde(default)]
    pub is_title_defined: bool,
    #[serde(default)]
    pub is_lang_defined: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_heading_info",
        skip_serializing_if = "Option::is_none"
    )]
    pub heading_info: Option<HeadingInfo>,
    #[serde(default)]
    pub image_info: ImageInfo,
}

impl AnalysisFacts {
    /// Recompute the metadata flags from the raw document properties.
    pub fn with_document_metadata(mut self, metadata: &DocumentMetadata) -> Self {
        self.is_title_defined = metadata.is_title_defined();
        self.is_lang_defined = metadata.is_lang_defined();
        self
    }

    /// Image-only documents without a text layer, typically produced by a scanner.
    pub fn looks_scanned(&self) -> bool {
        !self.contains_text && self.image_info.image_count > 0
    }

    pub fn heading_info(&self) -> Option<&HeadingInfo> {
        self.heading_info.as_ref()
    }
}

/// Heading hierarchy findings. Only present when the structure tree was inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HeadingInfoWire")]
pub struct HeadingInfo {
    pub h1_count: u32,
    pub has_single_h1: bool,
    pub has_skipped_levels: bool,
    pub heading_structure: Vec<u8>,
    pub issues: Vec<String>,
}

impl HeadingInfo {
    /// Build heading facts from the heading levels found in the structure tree.
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut heading_structure: Vec<u8> = levels.into_iter().collect();
        heading_structure.sort_unstable();

        let h1_count = heading_structure.iter().filter(|level| **level == 1).count() as u32;
        let mut issues = Vec::new();

        if h1_count == 0 {
            issues.push("No H1 heading found".to_string());
        } else if h1_count > 1 {
            issues.push(format!("Multiple H1 headings found ({h1_count})"));
        }

        let mut distinct = heading_structure.clone();
        distinct.dedup();
        let mut has_skipped_levels = false;
        for pair in distinct.windows(2) {
            if pair[1] - pair[0] > 1 {
                has_skipped_levels = true;
                issues.push(format!("Skipped heading level: H{} → H{}", pair[0], pair[1]));
            }
        }

        Self {
            h1_count,
            has_single_h1: h1_count == 1,
            has_skipped_levels,
            heading_structure,
            issues,
        }
    }
}

// `has_single_h1` always follows `h1_count`, whatever the extractor sent.
#[derive(Default, Deserialize)]
#[serde(default)]
struct HeadingInfoWire {
    h1_count: u32,
    has_skipped_levels: bool,
    heading_structure: Vec<u8>,
    issues: Vec<String>,
}

impl From<HeadingInfoWire> for HeadingInfo {
    fn from(wire: HeadingInfoWire) -> Self {
        Self {
            h1_count: wire.h1_count,
            has_single_h1: wire.h1_count == 1,
            has_skipped_levels: wire.has_skipped_levels,
            heading_structure: wire.heading_structure,
            issues: wire.issues,
        }
    }
}

/// Image and alternative-text counts. Zero-valued when the document has no images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageInfoWire")]
pub struct ImageInfo {
    pub image_count: u32,
    pub images_with_alt: u32,
    pub images_without_alt: u32,
}

impl ImageInfo {
    pub fn new(image_count: u32, images_with_alt: u32) -> Self {
        let images_with_alt = images_with_alt.min(image_count);
        Self {
            image_count,
            images_with_alt,
            images_without_alt: image_count - images_with_alt,
        }
    }
}

#[derive(Deserialize)]
struct ImageInfoWire {
    #[serde(default)]
    image_count: u32,
    #[serde(default)]
    images_with_alt: u32,
}

impl From<ImageInfoWire> for ImageInfo {
    fn from(wire: ImageInfoWire) -> Self {
        Self::new(wire.image_count, wire.images_with_alt)
    }
}

/// Raw document information dictionary values as reported by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

impl DocumentMetadata {
    pub fn is_title_defined(&self) -> bool {
        is_defined(self.title.as_deref())
    }

    pub fn is_lang_defined(&self) -> bool {
        is_defined(self.language.as_deref())
    }
}

/// A metadata value counts only when it is non-empty after trimming whitespace.
pub fn is_defined(value: Option<&str>) -> bool {
    value.map(|raw| !raw.trim().is_empty()).unwrap_or(false)
}

// `null`, a missing key and `{}` all mean the heading analysis did not run.
fn deserialize_heading_info<'de, D>(deserializer: D) -> Result<Option<HeadingInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;
    match raw {
        Some(map) if !map.is_empty() => {
            serde_json::from_value(serde_json::Value::Object(map))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}
