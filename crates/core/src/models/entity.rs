use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::CoreError;

use super::form::FormFields;

/// Server-assigned identifier of a stored entity.
///
/// Opaque to the client: it may arrive as a JSON number or a JSON string and
/// is only ever echoed back, in route paths and in the same JSON form it
/// arrived in. The client never mints one. Equality and ordering look at the
/// text only.
#[derive(Debug, Clone)]
pub struct EntityId {
    text: String,
    numeric: bool,
}

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the id travels as a JSON number.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self {
            text: id.to_string(),
            numeric: true,
        }
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.text.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
            if let Ok(n) = self.text.parse::<u64>() {
                return serializer.serialize_u64(n);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => EntityId {
                text: n.to_string(),
                numeric: true,
            },
            Raw::Uint(n) => EntityId::from(n),
            Raw::Text(s) => EntityId::new(s),
        })
    }
}

/// A server-side collection with uniform CRUD semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Investments,
    Assets,
    Liabilities,
    Insurances,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Investments,
        Resource::Assets,
        Resource::Liabilities,
        Resource::Insurances,
    ];

    /// Collection name as it appears in routes and export file names.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Investments => "investments",
            Resource::Assets => "assets",
            Resource::Liabilities => "liabilities",
            Resource::Insurances => "insurances",
        }
    }

    /// Singular noun used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Investments => "investment",
            Resource::Assets => "asset",
            Resource::Liabilities => "liability",
            Resource::Insurances => "insurance",
        }
    }

    /// Collection route relative to the API base, e.g. `/assets`.
    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    pub fn item_path(&self, id: &EntityId) -> String {
        format!("/{}/{}", self.name(), id)
    }

    pub fn export_path(&self) -> String {
        format!("/{}/export", self.name())
    }

    /// The backend has no single-item GET for insurances.
    pub fn supports_get(&self) -> bool {
        !matches!(self, Resource::Insurances)
    }

    pub fn supports_export(&self) -> bool {
        !matches!(self, Resource::Insurances)
    }

    pub fn export_file_name(&self) -> String {
        format!("{}_export.csv", self.name())
    }

    /// Question asked before a delete is sent.
    pub fn delete_prompt(&self) -> String {
        let noun = match self {
            Resource::Insurances => "insurance policy",
            other => other.label(),
        };
        format!("Are you sure you want to delete this {noun}?")
    }

    pub fn load_error(&self) -> String {
        format!("Failed to load {}", self.name())
    }

    pub fn save_error(&self) -> String {
        format!("Failed to save {}", self.label())
    }

    pub fn delete_error(&self) -> String {
        format!("Failed to delete {}", self.label())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record of one resource collection.
///
/// Ties the wire representation to the form representation: an entity knows
/// its blank form, how to fill a form from itself, and how to turn a
/// submitted form back into the typed create/update body.
pub trait Entity: Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Create/update body: the entity without its id.
    type Payload: Clone + fmt::Debug + PartialEq + Send + Sync + Serialize;

    const RESOURCE: Resource;

    fn id(&self) -> &EntityId;

    fn to_payload(&self) -> Self::Payload;

    /// Field values of a blank "new" form.
    fn default_fields() -> FormFields;

    /// Field values of an edit form pre-filled from this entity.
    fn to_fields(&self) -> FormFields;

    /// Parse a submitted form. Fails with `CoreError::Validation`.
    fn parse_fields(fields: &FormFields) -> Result<Self::Payload, CoreError>;
}
