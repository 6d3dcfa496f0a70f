use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::entities::{autos, prelude::*};
use crate::errors::StoreError;
use puzzle_types::{AutoEntry, NewAuto};

/// Catalog of autos. Names are unique, entries never change after creation.
pub struct AutoRepository {
    db: DatabaseConnection,
}

impl AutoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_entry(model: autos::Model) -> Result<AutoEntry, StoreError> {
        Ok(AutoEntry {
            id: model.id,
            name: model.name,
            meta_info: serde_json::from_value(model.meta_info)?,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    pub async fn create(&self, auto: NewAuto) -> Result<AutoEntry, StoreError> {
        let id = Uuid::new_v4();
        let created_at: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let auto_model = autos::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(auto.name.clone()),
            meta_info: ActiveValue::Set(serde_json::to_value(&auto.meta_info)?),
            created_at: ActiveValue::Set(created_at),
        };

        Autos::insert(auto_model)
            .exec(&self.db)
            .await
            .map_err(|err| StoreError::on_insert(err, "auto", &auto.name))?;

        tracing::info!("Created auto '{}' with id {}", auto.name, id);
        Ok(AutoEntry::from_new(id, auto, created_at.to_rfc3339()))
    }

    pub async fn list_all(&self) -> Result<Vec<AutoEntry>, StoreError> {
        let models = Autos::find()
            .order_by_asc(autos::Column::CreatedAt)
            .all(&self.db)
            .await?;

        tracing::debug!("Loaded {} autos", models.len());
        models.into_iter().map(Self::model_to_entry).collect()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AutoEntry, StoreError> {
        let model = Autos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("auto", id))?;

        Self::model_to_entry(model)
    }
}
