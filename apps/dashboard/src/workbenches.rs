use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use coachdesk_application::Workbench;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

struct RegisteredWorkbench {
    workbench: Arc<Workbench>,
    last_seen: Instant,
}

/// Live workbenches keyed by the id stored in each admin's session.
///
/// Entries idle for longer than `max_idle` are dropped; the session cookie
/// expires after the same period of inactivity.
#[derive(Clone)]
pub struct WorkbenchRegistry {
    workbenches: Arc<RwLock<HashMap<Uuid, RegisteredWorkbench>>>,
    max_idle: Duration,
}

impl WorkbenchRegistry {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            workbenches: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
        }
    }

    pub async fn register(&self, workbench: Workbench) -> Uuid {
        let workbench_id = Uuid::new_v4();
        let now = Instant::now();
        let mut workbenches = self.workbenches.write().await;
        workbenches.retain(|_, entry| now.duration_since(entry.last_seen) <= self.max_idle);
        workbenches.insert(
            workbench_id,
            RegisteredWorkbench {
                workbench: Arc::new(workbench),
                last_seen: now,
            },
        );
        workbench_id
    }

    /// Returns the workbench and marks it as used. Idle entries are gone.
    pub async fn get(&self, workbench_id: Uuid) -> Option<Arc<Workbench>> {
        let now = Instant::now();
        let mut workbenches = self.workbenches.write().await;
        let entry = workbenches.get_mut(&workbench_id)?;
        if now.duration_since(entry.last_seen) > self.max_idle {
            workbenches.remove(&workbench_id);
            debug!(%workbench_id, "dropped idle workbench on access");
            return None;
        }

        entry.last_seen = now;
        Some(entry.workbench.clone())
    }

    pub async fn remove(&self, workbench_id: Uuid) -> Option<Arc<Workbench>> {
        self.workbenches
            .write()
            .await
            .remove(&workbench_id)
            .map(|entry| entry.workbench)
    }

    /// Drops every workbench idle for longer than `max_idle`. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut workbenches = self.workbenches.write().await;
        let before = workbenches.len();
        workbenches.retain(|_, entry| now.duration_since(entry.last_seen) <= self.max_idle);
        before - workbenches.len()
    }

    pub async fn live_count(&self) -> usize {
        self.workbenches.read().await.len()
    }
}

pub fn spawn_idle_sweeper(registry: WorkbenchRegistry, period: Duration) {
    tokio::spawn(async move {
        info!(
            period_secs = period.as_secs(),
            max_idle_secs = registry.max_idle.as_secs(),
            "workbench sweeper started"
        );

        loop {
            tokio::time::sleep(period).await;
            let evicted = registry.evict_idle().await;
            if evicted > 0 {
                let live = registry.live_count().await;
                info!(evicted, live, "evicted idle workbenches");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use coachdesk_application::{AuthSession, BackendConnector, Workbench};
    use coachdesk_core::AdminIdentity;
    use coachdesk_infrastructure::InMemoryBackend;

    use super::WorkbenchRegistry;

    fn workbench(backend: &InMemoryBackend) -> Workbench {
        let session = AuthSession {
            identity: AdminIdentity::new("admin-1", "coach@studio.example"),
            access_token: "token".to_owned(),
        };
        Workbench::new(session.identity.clone(), backend.connect(&session))
    }

    #[tokio::test(start_paused = true)]
    async fn idle_workbenches_are_evicted_and_used_ones_kept() {
        let backend = InMemoryBackend::new();
        let registry = WorkbenchRegistry::new(Duration::from_secs(30 * 60));
        let idle = registry.register(workbench(&backend)).await;
        let active = registry.register(workbench(&backend)).await;

        tokio::time::advance(Duration::from_secs(20 * 60)).await;
        assert!(registry.get(active).await.is_some());
        tokio::time::advance(Duration::from_secs(15 * 60)).await;

        assert_eq!(registry.evict_idle().await, 1);
        assert!(registry.get(idle).await.is_none());
        assert!(registry.get(active).await.is_some());
        assert_eq!(registry.live_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_does_not_resolve_before_the_sweep() {
        let backend = InMemoryBackend::new();
        let registry = WorkbenchRegistry::new(Duration::from_secs(60));
        let workbench_id = registry.register(workbench(&backend)).await;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(registry.get(workbench_id).await.is_none());
        assert_eq!(registry.live_count().await, 0);
    }
}
