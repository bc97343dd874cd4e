use super::model::SettingKey;
use crate::common::response::ApiError;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Partial update: only the keys present are written. `null` clears a value.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UpdateSettingsRequest(pub BTreeMap<String, Option<String>>);

impl UpdateSettingsRequest {
    pub fn into_updates(self) -> Result<Vec<(SettingKey, Option<String>)>, ApiError> {
        if self.0.is_empty() {
            return Err(ApiError::validation("No settings provided"));
        }

        let unknown: Vec<&str> = self
            .0
            .keys()
            .filter(|k| k.parse::<SettingKey>().is_err())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(ApiError::validation(format!(
                "Unknown settings: {}",
                unknown.join(", ")
            )));
        }

        Ok(self
            .0
            .into_iter()
            .filter_map(|(k, v)| k.parse::<SettingKey>().ok().map(|key| (key, v)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, Option<&str>)]) -> UpdateSettingsRequest {
        UpdateSettingsRequest(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(String::from)))
                .collect(),
        )
    }

    #[test]
    fn known_keys_become_updates() {
        let updates = request(&[("site_name", Some("Reaper")), ("hero_image", None)])
            .into_updates()
            .unwrap();
        assert_eq!(
            updates,
            vec![
                (SettingKey::HeroImage, None),
                (SettingKey::SiteName, Some("Reaper".to_string())),
            ]
        );
    }

    #[test]
    fn unknown_or_empty_is_rejected() {
        assert!(request(&[]).into_updates().is_err());
        let err = request(&[("site_name", Some("x")), ("theme", Some("dark"))])
            .into_updates()
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown settings: theme");
    }
}
