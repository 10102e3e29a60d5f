use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::Language;
use crate::session::Session;

/// In-memory map of live sessions. Nothing is persisted; a restart drops all of them.
///
/// Closures passed to `with`/`with_mut` run under the lock and must not await.
/// Both refresh the session's last-touched time; `sweep_idle` drops the stale ones.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, language: Language) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.write()?.insert(id, Session::new(language));
        info!("Session {id} created");
        Ok(id)
    }

    pub fn with<T>(&self, id: Uuid, f: impl FnOnce(&Session) -> T) -> Result<T, AppError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow::anyhow!("session registry lock poisoned"))?;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.touch();
        Ok(f(session))
    }

    pub fn with_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.write()?;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.touch();
        Ok(f(session))
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.write()?
            .remove(&id)
            .map(|_| info!("Session {id} deleted"))
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub fn live_count(&self) -> Result<usize, AppError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow::anyhow!("session registry lock poisoned"))?;
        Ok(sessions.len())
    }

    /// Drops every session not touched within `max_idle`. Returns how many went.
    pub fn sweep_idle(&self, max_idle: Duration) -> Result<usize, AppError> {
        let max_idle_millis = i64::try_from(max_idle.as_millis()).unwrap_or(i64::MAX);
        let cutoff = Utc::now().timestamp_millis().saturating_sub(max_idle_millis);

        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_touched_millis() >= cutoff);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Dropped {removed} idle session(s); {} live", sessions.len());
        }
        Ok(removed)
    }

    /// Runs `sweep_idle` every `every` on the tokio runtime until the process exits.
    pub fn spawn_idle_sweeper(
        &self,
        max_idle: Duration,
        every: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match registry.sweep_idle(max_idle) {
                    Ok(_) => {
                        if let Ok(live) = registry.live_count() {
                            debug!("Idle sweep done, {live} session(s) live");
                        }
                    }
                    Err(e) => warn!("Idle session sweep failed: {e}"),
                }
            }
        })
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Session>>, AppError> {
        self.sessions
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session registry lock poisoned")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::models::applicant::ApplicantCategory;

    #[test]
    fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        let a = registry.create(Language::Th).unwrap();
        let b = registry.create(Language::En).unwrap();

        registry
            .with_mut(a, |s| s.select_category(ApplicantCategory::Farmer))
            .unwrap()
            .unwrap();

        assert_eq!(
            registry.with(a, |s| s.category).unwrap(),
            Some(ApplicantCategory::Farmer)
        );
        assert_eq!(registry.with(b, |s| s.category).unwrap(), None);
        assert_eq!(registry.with(b, |s| s.language).unwrap(), Language::En);
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let registry = SessionRegistry::new();
        let err = registry.with(Uuid::new_v4(), |_| ()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    fn age(registry: &SessionRegistry, id: Uuid, by: Duration) {
        registry
            .with(id, |s| {
                let past = s.last_touched_millis() - by.as_millis() as i64;
                s.last_touched.store(past, Ordering::Relaxed);
            })
            .unwrap();
    }

    #[test]
    fn test_sweep_drops_only_idle_sessions() {
        let registry = SessionRegistry::new();
        let stale = registry.create(Language::Th).unwrap();
        let fresh = registry.create(Language::En).unwrap();
        age(&registry, stale, Duration::from_secs(2 * 60 * 60));

        let removed = registry.sweep_idle(Duration::from_secs(60 * 60)).unwrap();

        assert_eq!(removed, 1);
        assert!(matches!(
            registry.with(stale, |_| ()),
            Err(AppError::NotFound(_))
        ));
        assert!(registry.with(fresh, |_| ()).is_ok());
        assert_eq!(registry.live_count().unwrap(), 1);
    }

    #[test]
    fn test_access_refreshes_idle_clock() {
        let registry = SessionRegistry::new();
        let id = registry.create(Language::Th).unwrap();
        age(&registry, id, Duration::from_secs(2 * 60 * 60));

        // Any later access counts as activity.
        registry.with(id, |s| s.category).unwrap();

        assert_eq!(registry.sweep_idle(Duration::from_secs(60 * 60)).unwrap(), 0);
        assert!(registry.with(id, |_| ()).is_ok());
    }

    #[tokio::test]
    async fn test_background_sweeper_evicts_idle_sessions() {
        let registry = SessionRegistry::new();
        let id = registry.create(Language::En).unwrap();
        age(&registry, id, Duration::from_secs(2 * 60 * 60));

        let handle =
            registry.spawn_idle_sweeper(Duration::from_secs(60 * 60), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(registry.live_count().unwrap(), 0);
    }

    #[test]
    fn test_delete_removes_session() {
        let registry = SessionRegistry::new();
        let id = registry.create(Language::Th).unwrap();
        registry.delete(id).unwrap();
        assert!(registry.with(id, |_| ()).is_err());
        assert!(matches!(registry.delete(id), Err(AppError::NotFound(_))));
    }
}
