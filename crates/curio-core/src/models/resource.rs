//! Resource domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;

/// A catalog entry exposed through the CRUD endpoints.
///
/// `id` and `owner_id` are server-assigned: the handlers overwrite whatever
/// the client supplied before the record reaches the store. Both default on
/// deserialization so a create payload can omit them entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Category this resource belongs to.
    pub category_id: String,
    /// Principal that created the record.
    #[serde(default)]
    pub owner_id: String,
}

impl Document for Resource {
    const ENTITY: &'static str = "resource";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn set_owner_id(&mut self, owner_id: String) {
        self.owner_id = owner_id;
    }
}

/// Projected shape returned by category-scoped listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_defaults_identity_fields() {
        let resource: Resource = serde_json::from_str(
            r#"{"name": "Widget", "description": "x", "categoryId": "c1"}"#,
        )
        .unwrap();

        assert!(resource.id.is_nil());
        assert!(resource.owner_id.is_empty());
        assert_eq!(resource.category_id, "c1");
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let resource = Resource {
            id: Uuid::new_v4(),
            name: "Widget".into(),
            description: "x".into(),
            category_id: "c1".into(),
            owner_id: "alice".into(),
        };

        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("category_id").is_none());
    }
}
