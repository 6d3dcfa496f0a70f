use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use crate::errors::StoreError;
use puzzle_core::{Leaderboard, ProgressEngine};
use puzzle_types::{LeaderboardEntry, LevelResult, LevelSubmission, UserAccount, UserRole};

/// Accounts and their level progress.
///
/// Level results are stored as one JSON document per user and rewritten as a
/// whole on every upsert. Upserts for the same user are serialized through a
/// per-user lock and run inside a transaction, so concurrent reports within
/// this process never lose an attempt. Writers in other processes are not
/// covered by the lock.
pub struct UserRepository {
    db: DatabaseConnection,
    upsert_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            upsert_locks: DashMap::new(),
        }
    }

    fn decode_results(
        level_results: Option<serde_json::Value>,
    ) -> Result<Option<Vec<LevelResult>>, StoreError> {
        Ok(level_results.map(serde_json::from_value).transpose()?)
    }

    fn model_to_account(model: users::Model) -> Result<UserAccount, StoreError> {
        Ok(UserAccount {
            id: model.id,
            login: model.login,
            password_hash: model.password_hash,
            role: UserRole::from_db(&model.role),
            level_results: Self::decode_results(model.level_results)?,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.upsert_locks.entry(user_id).or_default().clone()
    }

    pub async fn create_user(
        &self,
        login: &str,
        password_hash: String,
    ) -> Result<UserAccount, StoreError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let user_model = users::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            login: ActiveValue::Set(login.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            role: ActiveValue::Set(UserRole::default().as_str().to_string()),
            level_results: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let saved_model = Users::insert(user_model)
            .exec(&self.db)
            .await
            .map_err(|err| StoreError::on_insert(err, "user", login))?;

        // Fetch the created user
        let created_user = Users::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("user", saved_model.last_insert_id))?;

        tracing::info!("Registered user '{}' ({})", created_user.login, created_user.id);
        Self::model_to_account(created_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, StoreError> {
        Users::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Self::model_to_account)
            .transpose()
    }

    /// Id and stored password hash for a login
    pub async fn find_credentials(
        &self,
        login: &str,
    ) -> Result<Option<(Uuid, String)>, StoreError> {
        let user_model = Users::find()
            .filter(users::Column::Login.eq(login))
            .one(&self.db)
            .await?;

        Ok(user_model.map(|model| (model.id, model.password_hash)))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let count = Users::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    /// Drops the user's lock entry once no other upsert holds or awaits it
    fn release_user_lock(&self, user_id: Uuid, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.upsert_locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Merge a finished attempt into the user's results and persist the full list
    pub async fn upsert_level_result(
        &self,
        user_id: Uuid,
        submission: &LevelSubmission,
    ) -> Result<Vec<LevelResult>, StoreError> {
        let lock = self.user_lock(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.record_attempt_in_transaction(user_id, submission).await
        };
        self.release_user_lock(user_id, lock);
        result
    }

    async fn record_attempt_in_transaction(
        &self,
        user_id: Uuid,
        submission: &LevelSubmission,
    ) -> Result<Vec<LevelResult>, StoreError> {
        let txn = self.db.begin().await?;

        let user = Users::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("user", user_id))?;

        let existing = Self::decode_results(user.level_results.clone())?;
        let updated = ProgressEngine::record_attempt(existing, submission);

        let mut user_model: users::ActiveModel = user.into();
        user_model.level_results = ActiveValue::Set(Some(serde_json::to_value(&updated)?));
        user_model.updated_at = ActiveValue::Set(chrono::Utc::now().into());
        user_model.update(&txn).await?;

        txn.commit().await?;

        tracing::debug!(
            "Recorded attempt on '{}' for user {} ({} levels tracked)",
            submission.level_name,
            user_id,
            updated.len()
        );
        Ok(updated)
    }

    pub async fn get_level_results(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Vec<LevelResult>>, StoreError> {
        let user = Users::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("user", user_id))?;

        Self::decode_results(user.level_results)
    }

    /// Full scan of all users, ranked by best time on `level_name`
    pub async fn get_leaderboard(
        &self,
        level_name: &str,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let accounts = Users::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Self::model_to_account)
            .collect::<Result<Vec<_>, _>>()?;

        let leaderboard = Leaderboard::rank_level(&accounts, level_name);
        tracing::debug!(
            "Leaderboard for '{}': {} of {} users ranked",
            level_name,
            leaderboard.len(),
            accounts.len()
        );
        Ok(leaderboard)
    }
}
