use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};

/// In-process session store whose expired records are dropped by
/// [`ExpiredDeletion::delete_expired`].
#[derive(Clone, Debug, Default)]
pub struct ExpiringMemoryStore(Arc<Mutex<HashMap<Id, Record>>>);

impl ExpiringMemoryStore {
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs `delete_expired` every `period` until the task is aborted.
    pub async fn continuously_delete_expired(self, period: Duration) -> session_store::Result<()> {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            self.delete_expired().await?;
        }
    }
}

#[async_trait]
impl SessionStore for ExpiringMemoryStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for ExpiringMemoryStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        let before = records.len();
        records.retain(|_, record| is_active(record));
        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!("deleted {} expired sessions", removed);
        }
        Ok(())
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}
