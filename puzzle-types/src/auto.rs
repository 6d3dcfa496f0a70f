use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AutoMetaInfo {
    pub url: String,
    pub description: String,
    pub types: Vec<String>,
    pub history: String,
}

/// Catalog entry as submitted by a client, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAuto {
    pub name: String,
    pub meta_info: AutoMetaInfo,
}

/// Persisted catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AutoEntry {
    pub id: Uuid,
    pub name: String,
    pub meta_info: AutoMetaInfo,
    pub created_at: String, // ISO 8601 string
}

impl AutoEntry {
    pub fn from_new(id: Uuid, auto: NewAuto, created_at: String) -> Self {
        AutoEntry {
            id,
            name: auto.name,
            meta_info: auto.meta_info,
            created_at,
        }
    }
}
