use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{
    json_field::{decode_list_or_default, decode_or_default},
    media::MediaAsset,
    option_fields::OptionField,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub tags: Value,
    pub thumbnail: Option<Value>,
    pub images: Value,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub description: String,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<MediaAsset>,
    pub images: Vec<MediaAsset>,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub description: String,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<MediaAsset>,
    pub images: Vec<MediaAsset>,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub description: String,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            slug: row.slug,
            category: row.category,
            tags: decode_list_or_default("projects.tags", row.tags),
            thumbnail: decode_or_default("projects.thumbnail", row.thumbnail),
            images: decode_list_or_default("projects.images", row.images),
            client: row.client,
            year: row.year,
            description: row.description,
            challenge: row.challenge,
            solution: row.solution,
            featured: row.featured,
            created_at: row.created_at,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,

    /// Derived from the title when omitted or blank.
    #[serde(default)]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub thumbnail: Option<MediaAsset>,

    #[serde(default)]
    pub images: Vec<MediaAsset>,

    #[serde(default)]
    pub client: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[serde(default)]
    pub challenge: Option<String>,

    #[serde(default)]
    pub solution: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

/// Partial update: required columns can only be replaced, nullable ones
/// can also be cleared with an explicit `null`. The slug is fixed at
/// creation, so a payload naming it (or any unknown field) is rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,

    pub tags: Option<Vec<String>>,
    pub thumbnail: OptionField<MediaAsset>,
    pub images: Option<Vec<MediaAsset>>,
    pub client: OptionField<String>,
    pub year: OptionField<i32>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub challenge: OptionField<String>,
    pub solution: OptionField<String>,
    pub featured: Option<bool>,
}

impl UpdateProjectRequest {
    /// True when the payload touches no column at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.thumbnail.is_unchanged()
            && self.images.is_none()
            && self.client.is_unchanged()
            && self.year.is_unchanged()
            && self.description.is_none()
            && self.challenge.is_unchanged()
            && self.solution.is_unchanged()
            && self.featured.is_none()
    }
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProject> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProject) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = match value.slug {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                let generated = slug::slugify(&value.title);
                if generated.is_empty() {
                    let mut errors = ValidationErrors::new();
                    errors.add("slug", new_validation_error(
                        "slug_empty",
                        "Slug could not be derived from the title; please provide one",
                    ));
                    return Err(errors);
                }
                generated
            }
        };

        Ok(ProjectInsert {
            id: Uuid::new_v4(),
            title: value.title,
            slug,
            category: value.category,
            tags: value.tags,
            thumbnail: value.thumbnail,
            images: value.images,
            client: value.client,
            year: value.year,
            description: value.description,
            challenge: value.challenge,
            solution: value.solution,
            featured: value.featured,
            created_at: Utc::now(),
        })
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn logo_set() -> NewProject {
        serde_json::from_value(json!({
            "title": "Logo Set",
            "slug": "logo-set",
            "category": "branding",
            "tags": ["logo", "brand"],
            "thumbnail": {"url": "a.png"},
            "images": [{"url": "a.png"}],
            "description": "..."
        }))
        .unwrap()
    }

    #[test]
    fn new_project_defaults_optional_fields() {
        let project = logo_set();
        assert!(!project.featured);
        assert!(project.client.is_none());
        assert!(project.year.is_none());
    }

    #[test]
    fn insert_keeps_submitted_slug_and_stamps_creation() {
        let before = Utc::now();
        let insert = ProjectInsert::try_from(logo_set()).unwrap();

        assert_eq!(insert.slug, "logo-set");
        assert_eq!(insert.tags, vec!["logo", "brand"]);
        assert_eq!(insert.thumbnail, Some(MediaAsset::new("a.png")));
        assert!(insert.created_at >= before);
    }

    #[test]
    fn blank_slug_is_derived_from_title() {
        let mut project = logo_set();
        project.slug = Some("  ".into());
        project.title = "Brand Refresh 2024".into();

        let insert = ProjectInsert::try_from(project).unwrap();
        assert_eq!(insert.slug, "brand-refresh-2024");
    }

    #[test]
    fn empty_required_fields_fail_validation() {
        let mut project = logo_set();
        project.description = String::new();

        let errors = ProjectInsert::try_from(project).unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn update_request_distinguishes_cleared_and_untouched_columns() {
        let patch: UpdateProjectRequest =
            serde_json::from_value(json!({"client": null, "featured": true})).unwrap();

        assert_eq!(patch.client, OptionField::SetToNull);
        assert!(patch.year.is_unchanged());
        assert_eq!(patch.featured, Some(true));
        assert!(!patch.is_empty());
        assert!(UpdateProjectRequest::default().is_empty());
    }

    #[test]
    fn update_request_refuses_slug_changes() {
        let result = serde_json::from_value::<UpdateProjectRequest>(json!({"slug": "renamed"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<UpdateProjectRequest>(
            json!({"title": "Renamed", "slug": "renamed"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn media_descriptors_come_back_as_submitted() {
        let thumbnail = json!({"url": "a.png", "publicId": "cld/123", "caption": "Cover"});
        let mut project = logo_set();
        project.thumbnail = Some(serde_json::from_value(thumbnail.clone()).unwrap());

        let insert = ProjectInsert::try_from(project).unwrap();
        let stored = serde_json::to_value(&insert.thumbnail).unwrap();
        assert_eq!(stored, thumbnail);
    }

    #[test]
    fn one_malformed_stored_image_does_not_drop_the_others() {
        let row = ProjectRow {
            id: Uuid::new_v4(),
            title: "Logo Set".into(),
            slug: "logo-set".into(),
            category: "branding".into(),
            tags: json!([]),
            thumbnail: None,
            images: json!([{"url": "a.png", "width": 640.5}, {"caption": "no url"}, {"url": "b.png"}]),
            client: None,
            year: None,
            description: "...".into(),
            challenge: None,
            solution: None,
            featured: false,
            created_at: Utc::now(),
        };

        let images = Project::from(row).images;
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].extra["width"], json!(640.5));
        assert_eq!(images[1].url, "b.png");
    }

    #[test]
    fn row_with_encoded_json_columns_is_normalized() {
        let row = ProjectRow {
            id: Uuid::new_v4(),
            title: "Logo Set".into(),
            slug: "logo-set".into(),
            category: "branding".into(),
            tags: json!(r#"["logo","brand"]"#),
            thumbnail: Some(json!(r#"{"url":"a.png"}"#)),
            images: json!([{"url": "a.png"}]),
            client: None,
            year: Some(2023),
            description: "...".into(),
            challenge: None,
            solution: None,
            featured: false,
            created_at: Utc::now(),
        };

        let project = Project::from(row);
        assert_eq!(project.tags, vec!["logo", "brand"]);
        assert_eq!(project.thumbnail.map(|t| t.url), Some("a.png".to_string()));
        assert_eq!(project.images.len(), 1);
    }

    #[test]
    fn serialized_project_uses_camel_case_and_iso_timestamps() {
        let row = ProjectRow {
            id: Uuid::nil(),
            title: "t".into(),
            slug: "t".into(),
            category: "web".into(),
            tags: json!([]),
            thumbnail: None,
            images: json!([]),
            client: None,
            year: None,
            description: "d".into(),
            challenge: None,
            solution: None,
            featured: true,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().with_timezone(&Utc),
        };

        let value = serde_json::to_value(Project::from(row)).unwrap();
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(value["featured"], true);
    }
}
