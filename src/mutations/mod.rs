//! Listing mutation services: the auto-renew toggle and the tags/materials
//! editor.
//!
//! Both operations validate fully before any network traffic, resolve the
//! shop id that scopes the listing path, PATCH the single field being
//! changed, and hand back whatever the upstream returned. The two
//! operations deliberately differ in how they obtain the shop id:
//!
//! - the auto-renew toggle performs a fresh shop lookup on every call,
//!   trading a request for freshness;
//! - the tags/materials editor uses the shop id cached on the session at
//!   login, trading freshness for a request.
//!
//! Each PATCH also uses the encoding the upstream demands for its fields:
//! JSON for the auto-renew flag, form-urlencoded with comma-joined arrays
//! for tags and materials. These are upstream contracts; changing either
//! breaks the call.

use serde_json::json;

use crate::auth::{resolve_shop, AuthenticatedSession};
use crate::clients::{ApiClient, ApiError, PatchBody};
use crate::resources::Listing;

/// Upstream cap on the number of tags per listing.
pub const MAX_TAGS: usize = 13;

/// Errors from the mutation services.
#[derive(thiserror::Error, Debug)]
pub enum MutationError {
    /// The input failed local validation; nothing was sent upstream.
    #[error("Invalid mutation input: {reason}")]
    Validation {
        /// Human-readable reason, suitable for direct display.
        reason: String,
    },

    /// No shop id is available to scope the listing path.
    #[error("No shop is associated with this session; log in again to re-resolve your shop")]
    MissingShopContext,

    /// The upstream request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The result of a successful mutation.
#[derive(Clone, Debug)]
pub enum MutationOutcome {
    /// The upstream returned the updated listing.
    Updated(Box<Listing>),
    /// The upstream acknowledged with no body (204).
    NoContent,
}

impl MutationOutcome {
    /// Returns the updated listing, if the upstream returned one.
    #[must_use]
    pub const fn listing(&self) -> Option<&Listing> {
        match self {
            Self::Updated(listing) => Some(listing),
            Self::NoContent => None,
        }
    }
}

/// A partial update to a listing's tags and/or materials.
///
/// `None` means "leave this field alone"; at least one field must be
/// present. An empty `Some(vec![])` is a valid request to clear the field.
#[derive(Clone, Debug, Default)]
pub struct TagsMaterialsUpdate {
    /// Replacement tag list, at most [`MAX_TAGS`] entries.
    pub tags: Option<Vec<String>>,
    /// Replacement material list.
    pub materials: Option<Vec<String>>,
}

/// Toggles a listing's auto-renew flag.
///
/// The listing id is validated as a positive integer before any traffic.
/// The shop id is looked up fresh via the user-shops endpoint on every
/// call. The PATCH body is JSON, as the upstream requires for this field.
///
/// # Errors
///
/// Returns [`MutationError::Validation`] for a malformed listing id,
/// [`MutationError::MissingShopContext`] when the lookup finds no shop,
/// and [`MutationError::Api`] for upstream failures.
pub async fn toggle_auto_renew(
    client: &ApiClient,
    session: &AuthenticatedSession,
    listing_id: &str,
    new_state: bool,
) -> Result<MutationOutcome, MutationError> {
    let listing_id = parse_listing_id(listing_id)?;

    let shop = resolve_shop(client, &session.user_id)
        .await?
        .ok_or(MutationError::MissingShopContext)?;

    let body = PatchBody::Json(json!({ "should_auto_renew": new_state }));
    send_patch(client, shop.shop_id, listing_id, &body).await
}

/// Replaces a listing's tags and/or materials.
///
/// Validation happens entirely before any traffic: at least one field must
/// be present, tags are capped at [`MAX_TAGS`], and each entry must use
/// the upstream's permitted character set (tags allow letters, digits,
/// whitespace, `-`, `'` and `.`; materials allow letters, digits, and
/// whitespace only). Empty-string entries are rejected in both fields.
///
/// The shop id comes from the session as cached at login. The PATCH body
/// is form-urlencoded with array values comma-joined, as the upstream
/// requires for these fields.
///
/// # Errors
///
/// Returns [`MutationError::Validation`] for invalid input,
/// [`MutationError::MissingShopContext`] when the session holds no shop
/// id, and [`MutationError::Api`] for upstream failures.
pub async fn update_tags_or_materials(
    client: &ApiClient,
    session: &AuthenticatedSession,
    listing_id: &str,
    update: &TagsMaterialsUpdate,
) -> Result<MutationOutcome, MutationError> {
    let listing_id = parse_listing_id(listing_id)?;
    validate_update(update)?;

    let shop_id = session.shop_id.ok_or(MutationError::MissingShopContext)?;

    let mut fields: Vec<(String, String)> = Vec::with_capacity(2);
    if let Some(tags) = &update.tags {
        fields.push(("tags".to_string(), tags.join(",")));
    }
    if let Some(materials) = &update.materials {
        fields.push(("materials".to_string(), materials.join(",")));
    }

    send_patch(client, shop_id, listing_id, &PatchBody::Form(fields)).await
}

async fn send_patch(
    client: &ApiClient,
    shop_id: u64,
    listing_id: u64,
    body: &PatchBody,
) -> Result<MutationOutcome, MutationError> {
    let path = format!("application/shops/{shop_id}/listings/{listing_id}");
    match client.patch(&path, body).await? {
        Some(value) => match serde_json::from_value::<Listing>(value) {
            Ok(listing) => Ok(MutationOutcome::Updated(Box::new(listing))),
            Err(error) => {
                tracing::warn!("Unrecognized listing payload after patch: {error}");
                Ok(MutationOutcome::NoContent)
            }
        },
        None => Ok(MutationOutcome::NoContent),
    }
}

fn parse_listing_id(listing_id: &str) -> Result<u64, MutationError> {
    match listing_id.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(MutationError::Validation {
            reason: format!("listing id '{listing_id}' is not a positive integer"),
        }),
    }
}

fn validate_update(update: &TagsMaterialsUpdate) -> Result<(), MutationError> {
    if update.tags.is_none() && update.materials.is_none() {
        return Err(MutationError::Validation {
            reason: "at least one of tags or materials must be provided".to_string(),
        });
    }

    if let Some(tags) = &update.tags {
        if tags.len() > MAX_TAGS {
            return Err(MutationError::Validation {
                reason: format!("a listing allows at most {MAX_TAGS} tags, got {}", tags.len()),
            });
        }
        for tag in tags {
            if tag.trim().is_empty() {
                return Err(MutationError::Validation {
                    reason: "tags must not be empty".to_string(),
                });
            }
            if !tag.chars().all(is_valid_tag_char) {
                return Err(MutationError::Validation {
                    reason: format!(
                        "tag '{tag}' contains characters outside letters, digits, spaces, -, ', ."
                    ),
                });
            }
        }
    }

    if let Some(materials) = &update.materials {
        for material in materials {
            if material.trim().is_empty() {
                return Err(MutationError::Validation {
                    reason: "materials must not be empty".to_string(),
                });
            }
            if !material
                .chars()
                .all(|c| c.is_alphanumeric() || c.is_whitespace())
            {
                return Err(MutationError::Validation {
                    reason: format!(
                        "material '{material}' contains characters outside letters, digits, and spaces"
                    ),
                });
            }
        }
    }

    Ok(())
}

fn is_valid_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '\'' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_id_accepts_positive_integers() {
        assert_eq!(parse_listing_id("123").unwrap(), 123);
        assert_eq!(parse_listing_id(" 456 ").unwrap(), 456);
    }

    #[test]
    fn test_parse_listing_id_rejects_garbage() {
        assert!(parse_listing_id("").is_err());
        assert!(parse_listing_id("0").is_err());
        assert!(parse_listing_id("-5").is_err());
        assert!(parse_listing_id("12abc").is_err());
        assert!(parse_listing_id("1.5").is_err());
    }

    #[test]
    fn test_update_requires_at_least_one_field() {
        let result = validate_update(&TagsMaterialsUpdate::default());
        assert!(matches!(result, Err(MutationError::Validation { .. })));
    }

    #[test]
    fn test_update_allows_clearing_with_empty_list() {
        let update = TagsMaterialsUpdate {
            tags: Some(Vec::new()),
            materials: None,
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_tags_capped_at_thirteen() {
        let update = TagsMaterialsUpdate {
            tags: Some((0..14).map(|i| format!("tag{i}")).collect()),
            materials: None,
        };
        let result = validate_update(&update);
        assert!(matches!(result, Err(MutationError::Validation { .. })));

        let update = TagsMaterialsUpdate {
            tags: Some((0..13).map(|i| format!("tag{i}")).collect()),
            materials: None,
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_tag_charset_allows_punctuation_materials_do_not() {
        let update = TagsMaterialsUpdate {
            tags: Some(vec!["hand-made".to_string(), "mother's day no. 1".to_string()]),
            materials: None,
        };
        assert!(validate_update(&update).is_ok());

        let update = TagsMaterialsUpdate {
            tags: None,
            materials: Some(vec!["hand-made".to_string()]),
        };
        assert!(matches!(
            validate_update(&update),
            Err(MutationError::Validation { .. })
        ));

        let update = TagsMaterialsUpdate {
            tags: None,
            materials: Some(vec!["sterling silver".to_string()]),
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_rejects_empty_entries_and_symbols() {
        let update = TagsMaterialsUpdate {
            tags: Some(vec!["ok".to_string(), "   ".to_string()]),
            materials: None,
        };
        assert!(validate_update(&update).is_err());

        let update = TagsMaterialsUpdate {
            tags: Some(vec!["<script>".to_string()]),
            materials: None,
        };
        assert!(validate_update(&update).is_err());
    }

    #[test]
    fn test_outcome_listing_accessor() {
        assert!(MutationOutcome::NoContent.listing().is_none());
    }
}
