use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub category_id: ObjectId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn new(category_id: ObjectId, name: String, description: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            category_id,
            name,
            description,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
