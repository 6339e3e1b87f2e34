//! Relations that may be embedded or referenced by id.

use serde::{Deserialize, Serialize};

use crate::{EntityId, entities::Entity};

/// A related entity as rendered by the server.
///
/// Write endpoints and shallow serializers reference related rows by primary
/// key, while read serializers embed the full object. Both forms decode into
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    /// Reference by primary key.
    Id(EntityId),
    /// Embedded object.
    Object(Box<T>),
}

impl<T> Related<T> {
    /// Embedded object. `None` when only the id was sent.
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Object(object) => Some(object),
        }
    }
}

impl<T: Entity> Related<T> {
    /// Primary key of the related entity, whichever form was sent.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Id(id) => *id,
            Self::Object(object) => object.id(),
        }
    }
}

impl<T> From<T> for Related<T> {
    fn from(object: T) -> Self {
        Self::Object(Box::new(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Company;

    #[test]
    fn decodes_bare_id() {
        let related: Related<Company> = serde_json::from_str("7").unwrap();
        assert_eq!(related, Related::Id(7));
        assert_eq!(related.id(), 7);
        assert!(related.as_object().is_none());
    }

    #[test]
    fn decodes_embedded_object() {
        let related: Related<Company> =
            serde_json::from_str(r#"{"id": 3, "name": "Phuong Trang"}"#).unwrap();
        assert_eq!(related.id(), 3);
        assert_eq!(related.as_object().map(|c| c.name.as_str()), Some("Phuong Trang"));
    }
}
