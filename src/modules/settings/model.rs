use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Flat key/value view of the `site_settings` table.
pub type SiteSettings = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    SiteName,
    SiteLogo,
    SiteAnnouncement,
    HeroImage,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::SiteName,
        SettingKey::SiteLogo,
        SettingKey::SiteAnnouncement,
        SettingKey::HeroImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::SiteName => "site_name",
            SettingKey::SiteLogo => "site_logo",
            SettingKey::SiteAnnouncement => "site_announcement",
            SettingKey::HeroImage => "hero_image",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown setting: {}", s))
    }
}
