use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        experience::ExperienceEntry,
        json_field::decode_or_default,
        option_fields::OptionField,
    },
    utils::markdown::safe_markdown_to_html,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct AboutRow {
    pub id: Uuid,
    pub bio: String,
    pub skills: Value,
    pub experience: Option<Value>,
    pub hero: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AboutInsert {
    pub id: Uuid,
    pub bio: String,
    pub skills: Vec<String>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub hero: Option<Hero>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub id: Uuid,
    pub bio: String,
    pub bio_html: String,
    pub skills: Vec<String>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub hero: Option<Hero>,
    pub created_at: DateTime<Utc>,
}

impl From<AboutRow> for About {
    fn from(row: AboutRow) -> Self {
        Self {
            id: row.id,
            bio_html: safe_markdown_to_html(&row.bio),
            bio: row.bio,
            skills: decode_or_default("about.skills", row.skills),
            experience: decode_or_default("about.experience", row.experience),
            hero: decode_or_default("about.hero", row.hero),
            created_at: row.created_at,
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAbout {
    #[validate(length(min = 1, message = "Bio cannot be empty"))]
    pub bio: String,

    pub skills: Vec<String>,

    #[serde(default)]
    pub experience: Option<Vec<ExperienceEntry>>,

    #[serde(default)]
    pub hero: Option<Hero>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateAboutRequest {
    #[validate(length(min = 1, message = "Bio cannot be empty"))]
    pub bio: Option<String>,

    pub skills: Option<Vec<String>>,
    pub experience: OptionField<Vec<ExperienceEntry>>,
    pub hero: OptionField<Hero>,
}

impl UpdateAboutRequest {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.skills.is_none()
            && self.experience.is_unchanged()
            && self.hero.is_unchanged()
    }
}

impl NewAbout {
    pub fn prepare_for_insert(self) -> AboutInsert {
        AboutInsert {
            id: Uuid::new_v4(),
            bio: self.bio,
            skills: self.skills,
            experience: self.experience,
            hero: self.hero,
            created_at: Utc::now(),
        }
    }
}
