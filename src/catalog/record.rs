use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::PercentRect;

const DEFAULT_DECOR: &str = "/src/assets/decor.svg";
const DEFAULT_MONITOR_IMG: &str = "/src/assets/monitor.svg";
const PLACEHOLDER_PHOTO: &str = "/src/assets/800x400.jpg";
const DEFAULT_MONITOR_RECT: PercentRect = PercentRect::new(37.54, 21.82, 20.70, 61.82);
const DEFAULT_SCREEN_RECT: PercentRect = PercentRect::new(25.26, 16.36, 27.02, 63.27);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeskId(pub u64);

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DeskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorLayout {
    #[serde(flatten)]
    pub rect: PercentRect,
    pub img: String,
}

impl Default for MonitorLayout {
    fn default() -> Self {
        Self {
            rect: DEFAULT_MONITOR_RECT,
            img: DEFAULT_MONITOR_IMG.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    #[serde(flatten)]
    pub rect: PercentRect,
    #[serde(rename = "firstPhoto", default, skip_serializing_if = "Option::is_none")]
    pub first_photo: Option<String>,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            rect: DEFAULT_SCREEN_RECT,
            first_photo: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl SocialLinks {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("facebook", self.facebook.as_deref()),
            ("twitter", self.twitter.as_deref()),
            ("linkedin", self.linkedin.as_deref()),
            ("website", self.website.as_deref()),
        ]
        .into_iter()
        .filter_map(|(network, url)| url.filter(|url| !url.is_empty()).map(|url| (network, url)))
    }
}

/// One submitted desk, in the shape served by the desks endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskRecord {
    pub id: DeskId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub decor: Option<String>,
    #[serde(default)]
    pub monitor: Option<MonitorLayout>,
    #[serde(default)]
    pub screen: Option<ScreenLayout>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeskStatus>,
}

impl DeskRecord {
    /// Fills in the fields the endpoint defaults when a submission left them empty.
    pub fn normalized(mut self) -> Self {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
        if self.decor.as_deref().is_none_or(str::is_empty) {
            self.decor = Some(DEFAULT_DECOR.to_string());
        }
        if self.monitor.is_none() {
            self.monitor = Some(MonitorLayout::default());
        }

        let first_photo = self
            .photos
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string());
        let screen = self.screen.get_or_insert_with(ScreenLayout::default);
        if screen.first_photo.as_deref().is_none_or(str::is_empty) {
            screen.first_photo = Some(first_photo);
        }
        self
    }

    pub fn first_photo(&self) -> Option<&str> {
        self.screen
            .as_ref()
            .and_then(|screen| screen.first_photo.as_deref())
            .or_else(|| self.photos.first().map(String::as_str))
    }

    pub fn is_visible(&self) -> bool {
        self.status.is_none_or(|status| status == DeskStatus::Approved)
    }
}

/// URL-safe slug: lowercase, whitespace runs become `-`, anything outside `[a-z0-9-]` dropped.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }
    slug
}

#[cfg(test)]
pub(crate) fn sample_desk(id: u64, name: &str) -> DeskRecord {
    DeskRecord {
        id: DeskId(id),
        name: name.to_string(),
        title: "Engineer".to_string(),
        location: "Seoul".to_string(),
        profile: Some(format!("/profiles/{id}.jpg")),
        decor: None,
        monitor: None,
        screen: None,
        photos: vec![format!("/photos/{id}-1.jpg"), format!("/photos/{id}-2.jpg")],
        social: SocialLinks::default(),
        slug: String::new(),
        status: None,
    }
    .normalized()
}
