//! Annotation normalization.
//!
//! The rendering library surfaces annotations as loosely-typed objects;
//! only highlight and text notes are of interest to the viewer, and those
//! are reshaped into the fixed record the embedded consumer expects.

use serde::{Deserialize, Serialize};

use crate::date::convert_date;

/// Annotation categories the viewer processes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    Highlight,
    Text,
}

impl AnnotationKind {
    /// Map a raw PDF subtype name. All other subtypes are out of scope.
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "Highlight" => Some(AnnotationKind::Highlight),
            "Text" => Some(AnnotationKind::Text),
            _ => None,
        }
    }

    /// Wire code for the normalized `subtype` slot.
    pub fn subtype_code(&self) -> u32 {
        match self {
            AnnotationKind::Highlight => 2,
            AnnotationKind::Text => 1,
        }
    }

    /// Wire code used when the raw annotation carries no explicit
    /// `annotationType`.
    pub fn default_annotation_type(&self) -> u32 {
        match self {
            AnnotationKind::Highlight => 4,
            AnnotationKind::Text => 2,
        }
    }
}

/// Raw annotation fields as read off a rendering-library annotation object.
///
/// Every field is optional; the converter decides what each absence means.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAnnotation {
    pub subtype: Option<String>,
    pub annotation_type: Option<u32>,
    pub rect: Option<Vec<f64>>,
    pub color: Option<Vec<f64>>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub quad_points: Option<Vec<f64>>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
}

/// Normalized annotation record handed to the embedded viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub annotation_type: u32,
    pub subtype: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    pub creation_date: String,
    pub modification_date: String,
    pub page_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quad_points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Convert a raw annotation into its normalized record.
///
/// Returns `None` for annotations the viewer does not process, which drops
/// them from the output entirely.
pub fn convert(raw: &RawAnnotation, page_index: u32) -> Option<Annotation> {
    let kind = AnnotationKind::from_subtype(raw.subtype.as_deref()?)?;

    Some(Annotation {
        annotation_type: raw
            .annotation_type
            .unwrap_or_else(|| kind.default_annotation_type()),
        subtype: kind.subtype_code(),
        rect: raw.rect.clone(),
        color: raw.color.clone(),
        creation_date: convert_date(raw.creation_date.as_deref()),
        modification_date: convert_date(raw.modification_date.as_deref()),
        page_index,
        author: raw.author.clone().or_else(|| raw.title.clone()),
        quad_points: raw.quad_points.clone(),
        text: raw.content.clone(),
    })
}

/// Flatten per-page raw annotation lists into one normalized list.
///
/// Page order first, in-page order second; each page's position in the
/// slice becomes the zero-based `page_index` of its records.
pub fn convert_pages(pages: &[Vec<RawAnnotation>]) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for (page_index, raw_list) in pages.iter().enumerate() {
        for raw in raw_list {
            if let Some(converted) = convert(raw, page_index as u32) {
                annotations.push(converted);
            }
        }
    }
    annotations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight() -> RawAnnotation {
        RawAnnotation {
            subtype: Some("Highlight".to_string()),
            rect: Some(vec![10.0, 20.0, 110.0, 40.0]),
            quad_points: Some(vec![10.0, 40.0, 110.0, 40.0, 10.0, 20.0, 110.0, 20.0]),
            ..Default::default()
        }
    }

    fn text_note() -> RawAnnotation {
        RawAnnotation {
            subtype: Some("Text".to_string()),
            content: Some("a note".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unhandled_subtypes_are_dropped() {
        for subtype in ["Square", "Link", "Popup", "highlight", ""] {
            let raw = RawAnnotation {
                subtype: Some(subtype.to_string()),
                ..Default::default()
            };
            assert!(convert(&raw, 0).is_none(), "subtype {:?}", subtype);
        }
        assert!(convert(&RawAnnotation::default(), 0).is_none());
    }

    #[test]
    fn test_highlight_defaults() {
        let converted = convert(&highlight(), 0).unwrap();
        assert_eq!(converted.annotation_type, 4);
        assert_eq!(converted.subtype, 2);
    }

    #[test]
    fn test_text_defaults() {
        let converted = convert(&text_note(), 0).unwrap();
        assert_eq!(converted.annotation_type, 2);
        assert_eq!(converted.subtype, 1);
        assert_eq!(converted.text.as_deref(), Some("a note"));
    }

    #[test]
    fn test_explicit_annotation_type_wins() {
        let raw = RawAnnotation {
            annotation_type: Some(9),
            ..highlight()
        };
        assert_eq!(convert(&raw, 0).unwrap().annotation_type, 9);
    }

    #[test]
    fn test_author_falls_back_to_title() {
        let raw = RawAnnotation {
            title: Some("jdoe".to_string()),
            ..text_note()
        };
        assert_eq!(convert(&raw, 0).unwrap().author.as_deref(), Some("jdoe"));

        let raw = RawAnnotation {
            author: Some("jane".to_string()),
            title: Some("jdoe".to_string()),
            ..text_note()
        };
        assert_eq!(convert(&raw, 0).unwrap().author.as_deref(), Some("jane"));

        assert_eq!(convert(&text_note(), 0).unwrap().author, None);
    }

    #[test]
    fn test_geometry_passes_through() {
        let converted = convert(&highlight(), 3).unwrap();
        assert_eq!(converted.page_index, 3);
        assert_eq!(converted.rect, Some(vec![10.0, 20.0, 110.0, 40.0]));
        assert_eq!(
            converted.quad_points,
            Some(vec![10.0, 40.0, 110.0, 40.0, 10.0, 20.0, 110.0, 20.0])
        );
    }

    #[test]
    fn test_dates_are_normalized() {
        let raw = RawAnnotation {
            creation_date: Some("D:20231215103000+01'00'".to_string()),
            ..highlight()
        };
        let converted = convert(&raw, 0).unwrap();
        assert_eq!(converted.creation_date, "15.12.2023 10:30:00");
        assert_eq!(converted.modification_date, "01.01.1970 00:00:00");
    }

    #[test]
    fn test_convert_pages_preserves_order() {
        let pages = vec![
            vec![highlight(), text_note()],
            vec![RawAnnotation {
                subtype: Some("Link".to_string()),
                ..Default::default()
            }],
            vec![text_note()],
        ];

        let annotations = convert_pages(&pages);
        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations[0].page_index, 0);
        assert_eq!(annotations[0].subtype, 2);
        assert_eq!(annotations[1].page_index, 0);
        assert_eq!(annotations[1].subtype, 1);
        assert_eq!(annotations[2].page_index, 2);
    }

    #[test]
    fn test_serialized_field_names() {
        let converted = convert(&highlight(), 1).unwrap();
        let json = serde_json::to_value(&converted).unwrap();

        assert_eq!(json["annotationType"], 4);
        assert_eq!(json["subtype"], 2);
        assert_eq!(json["pageIndex"], 1);
        assert_eq!(json["creationDate"], "01.01.1970 00:00:00");
        // Absent optionals stay out of the record.
        assert!(json.get("text").is_none());
        assert!(json.get("author").is_none());
    }
}
