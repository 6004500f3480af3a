//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Destination, Link, LinkUpdate, NewLink};

/// Compiled regex for rotation key validation.
static KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The public rotation key (lowercase letters, digits, hyphens).
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*KEY_REGEX", message = "Key may contain a-z, 0-9 and hyphens"))]
    pub key: String,

    /// Optional display name for the admin UI.
    pub name: Option<String>,

    /// Destination URLs in rotation order.
    #[validate(length(min = 1, message = "At least one destination is required"))]
    #[validate(nested)]
    pub destinations: Vec<DestinationItem>,
}

/// Individual destination URL in a create or update request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DestinationItem {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Request body for `PUT /api/links/{key}`.
///
/// All fields are optional. Only provided fields are changed. When
/// `destinations` is present, the destination set is replaced wholesale:
/// positions are renumbered from 0 and per-destination counters reset.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New rotation key. Renaming purges cache entries for both keys.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*KEY_REGEX", message = "Key may contain a-z, 0-9 and hyphens"))]
    pub key: Option<String>,

    pub name: Option<String>,

    /// Pause (`false`) or resume (`true`) serving of this link.
    pub is_active: Option<bool>,

    /// Replacement destination set, in rotation order.
    #[validate(length(min = 1, message = "At least one destination is required"))]
    #[validate(nested)]
    pub destinations: Option<Vec<DestinationItem>>,
}

impl CreateLinkRequest {
    pub fn into_new_link(self) -> NewLink {
        NewLink {
            key: self.key,
            name: self.name.unwrap_or_default(),
            destination_urls: self.destinations.into_iter().map(|d| d.url).collect(),
        }
    }
}

impl UpdateLinkRequest {
    pub fn into_update(self) -> LinkUpdate {
        LinkUpdate {
            key: self.key,
            name: self.name,
            is_active: self.is_active,
            destination_urls: self
                .destinations
                .map(|ds| ds.into_iter().map(|d| d.url).collect()),
        }
    }
}

/// JSON representation of a link with its rotation set.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub is_active: bool,
    pub total_clicks: i64,
    pub destinations: Vec<DestinationResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JSON representation of a single rotation destination.
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub id: i64,
    pub url: String,
    pub position: i32,
    pub click_count: i64,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            key: link.key,
            name: link.name,
            is_active: link.is_active,
            total_clicks: link.total_clicks,
            destinations: link.destinations.into_iter().map(Into::into).collect(),
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

impl From<Destination> for DestinationResponse {
    fn from(d: Destination) -> Self {
        Self {
            id: d.id,
            url: d.url,
            position: d.position,
            click_count: d.click_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateLinkRequest {
        CreateLinkRequest {
            key: "summer-sale".to_string(),
            name: Some("Summer sale".to_string()),
            destinations: vec![
                DestinationItem {
                    url: "https://a.example/landing".to_string(),
                },
                DestinationItem {
                    url: "https://b.example/landing".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_uppercase_key() {
        let mut req = valid_create();
        req.key = "Summer-Sale".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_empty_destinations() {
        let mut req = valid_create();
        req.destinations.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_invalid_destination_url() {
        let mut req = valid_create();
        req.destinations.push(DestinationItem {
            url: "not-a-url".to_string(),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_new_link_preserves_order() {
        let new_link = valid_create().into_new_link();
        assert_eq!(
            new_link.destination_urls,
            vec!["https://a.example/landing", "https://b.example/landing"]
        );
    }

    #[test]
    fn test_update_all_fields_optional() {
        let req = UpdateLinkRequest {
            key: None,
            name: None,
            is_active: None,
            destinations: None,
        };
        assert!(req.validate().is_ok());

        let update = req.into_update();
        assert!(update.destination_urls.is_none());
    }

    #[test]
    fn test_destination_errors_render_as_json() {
        let mut req = valid_create();
        req.destinations.clear();

        let errors = req.validate().unwrap_err();
        // The length validator embeds the rejected destination list in its
        // params, so the whole error tree must be serializable.
        let rendered = serde_json::to_value(&errors).unwrap();
        assert!(rendered["destinations"].is_array() || rendered["destinations"].is_object());
    }

    #[test]
    fn test_update_rejects_empty_destination_set() {
        let req = UpdateLinkRequest {
            key: None,
            name: None,
            is_active: None,
            destinations: Some(vec![]),
        };
        assert!(req.validate().is_err());
    }
}
