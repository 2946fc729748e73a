//! Shortlink entity representing an identifier to long URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::slug;

/// A shortlink: immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortlink {
    pub id: Uuid,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Shortlink {
    /// Creates a new Shortlink instance.
    pub fn new(id: Uuid, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            long_url,
            created_at,
        }
    }

    /// The URL-safe slug identifying this shortlink.
    ///
    /// Derived from `id` on every call; never stored.
    pub fn slug(&self) -> String {
        slug::encode(self.id)
    }
}

/// Input data for storing a new shortlink.
///
/// The identifier is generated by the caller; `created_at` is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortlink {
    pub id: Uuid,
    pub long_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortlink_creation() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let shortlink = Shortlink::new(id, "https://example.com/".to_string(), now);

        assert_eq!(shortlink.id, id);
        assert_eq!(shortlink.long_url, "https://example.com/");
        assert_eq!(shortlink.created_at, now);
    }

    #[test]
    fn test_slug_is_stable_and_decodes_to_id() {
        let shortlink = Shortlink::new(
            Uuid::new_v4(),
            "https://example.com/".to_string(),
            Utc::now(),
        );

        assert_eq!(shortlink.slug(), shortlink.slug());
        assert_eq!(slug::decode(&shortlink.slug()), Ok(shortlink.id));
    }
}
