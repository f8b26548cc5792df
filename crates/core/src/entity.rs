//! Entity and record traits: identity plus a flat, serialization-ready view.

use serde::Serialize;

/// Flat mapping of field name to value, ready for any response envelope.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// A persisted entity that can be projected to its own flat field set.
///
/// The projection contains exactly the entity's stored attributes: no nested
/// objects and no computed fields. Any `Serialize` struct with scalar fields
/// gets this for free.
pub trait Record: Entity + Serialize {
    fn to_fields(&self) -> FieldMap {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => FieldMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Widget {
        id: i64,
        name: String,
        enabled: bool,
    }

    impl Entity for Widget {
        type Id = i64;

        fn id(&self) -> &i64 {
            &self.id
        }
    }

    impl Record for Widget {}

    #[test]
    fn to_fields_projects_every_attribute() {
        let widget = Widget {
            id: 7,
            name: "gadget".to_string(),
            enabled: true,
        };

        let fields = widget.to_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["id"], 7);
        assert_eq!(fields["name"], "gadget");
        assert_eq!(fields["enabled"], true);
    }
}
