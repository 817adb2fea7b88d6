//! Zone specifications
//!
//! A [`ZoneSpec`] names the hosted zone a record lives in, either directly by
//! id or indirectly by a set of tags that the zone must carry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag key/value pairs; all pairs must match (logical AND)
pub type TagSet = BTreeMap<String, String>;

/// Hosted zone specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Explicit hosted zone id. Takes precedence over `tags` when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Tags identifying the hosted zone
    #[serde(default)]
    pub tags: TagSet,
}

impl ZoneSpec {
    /// Zone identified by id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            tags: TagSet::new(),
        }
    }

    /// Zone identified by tags
    pub fn with_tags<K, V>(tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: None,
            tags: tags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The explicit id, if one was given
    pub fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.explicit_id() {
            Some(id) => write!(f, "id={}", id),
            None => write!(f, "tags={}", render_tags(&self.tags)),
        }
    }
}

/// Render a tag set as `{k=v, k=v}`
pub fn render_tags(tags: &TagSet) -> String {
    let pairs: Vec<String> = tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{{{}}}", pairs.join(", "))
}
