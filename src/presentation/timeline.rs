use serde::{Deserialize, Serialize};

use crate::{entities::experience::ExperienceEntry, utils::markdown::escape_text};

pub const DEFAULT_ICON: &str = "briefcase";
pub const DEFAULT_KIND: &str = "work";

/// A single milestone as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    pub date: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSide {
    Left,
    Right,
}

impl TimelineSide {
    fn for_index(index: usize) -> Self {
        if index % 2 == 0 { TimelineSide::Left } else { TimelineSide::Right }
    }

    fn as_str(self) -> &'static str {
        match self {
            TimelineSide::Left => "left",
            TimelineSide::Right => "right",
        }
    }
}

/// An entry with its defaults filled in and its side assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub title: String,
    pub subtitle: Option<String>,
    pub date: String,
    pub description: Option<String>,
    pub icon: String,
    pub kind: String,
    pub side: TimelineSide,
}

impl From<&ExperienceEntry> for TimelineEntry {
    fn from(entry: &ExperienceEntry) -> Self {
        let end = entry.end.as_deref().unwrap_or("Present");
        TimelineEntry {
            title: entry.role.clone(),
            subtitle: Some(entry.company.clone()),
            date: format!("{} – {}", entry.start, end),
            description: entry.description.clone(),
            icon: None,
            kind: None,
        }
    }
}

pub fn build_timeline(entries: &[TimelineEntry]) -> Vec<TimelineItem> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| TimelineItem {
            title: entry.title.clone(),
            subtitle: entry.subtitle.clone(),
            date: entry.date.clone(),
            description: entry.description.clone(),
            icon: entry.icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string()),
            kind: entry.kind.clone().unwrap_or_else(|| DEFAULT_KIND.to_string()),
            side: TimelineSide::for_index(index),
        })
        .collect()
}

pub fn experience_timeline(experience: &[ExperienceEntry]) -> Vec<TimelineItem> {
    let entries: Vec<TimelineEntry> = experience.iter().map(TimelineEntry::from).collect();
    build_timeline(&entries)
}

/// Renders items as an `<ol>` fragment. All text is escaped; nothing is
/// emitted for an empty timeline.
pub fn render_timeline_html(items: &[TimelineItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ol class=\"timeline\">");
    for item in items {
        html.push_str(&format!(
            "<li class=\"timeline-item timeline-{}\" data-kind=\"{}\" data-icon=\"{}\">",
            item.side.as_str(),
            escape_text(&item.kind),
            escape_text(&item.icon),
        ));
        html.push_str(&format!("<time>{}</time>", escape_text(&item.date)));
        html.push_str(&format!("<h3>{}</h3>", escape_text(&item.title)));
        if let Some(subtitle) = &item.subtitle {
            html.push_str(&format!("<h4>{}</h4>", escape_text(subtitle)));
        }
        if let Some(description) = &item.description {
            html.push_str(&format!("<p>{}</p>", escape_text(description)));
        }
        html.push_str("</li>");
    }
    html.push_str("</ol>");
    html
}
