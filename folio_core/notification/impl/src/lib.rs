use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use folio_core_notification_contracts::NotificationService;
use folio_models::notification::{NotificationId, NotificationItem, NotificationOptions};
use tokio::{task::AbortHandle, time::Instant};
use tracing::trace;
use uuid::Uuid;

/// In-memory notification queue. Clones share the same queue.
///
/// Every notification is removed by a tokio task once its duration has
/// elapsed, so [`NotificationService::notify`] must be called from within a
/// tokio runtime.
#[derive(Debug, Clone)]
pub struct NotificationServiceImpl {
    config: NotificationServiceConfig,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Clone)]
pub struct NotificationServiceConfig {
    pub default_duration: Duration,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    item: NotificationItem,
    created_at: Instant,
    timer: AbortHandle,
}

impl NotificationServiceImpl {
    pub fn new(config: NotificationServiceConfig) -> Self {
        Self {
            config,
            state: Default::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NotificationService for NotificationServiceImpl {
    fn notify(&self, message: String, options: NotificationOptions) -> NotificationId {
        let id = NotificationId::from(Uuid::new_v4());
        let duration = options.duration.unwrap_or(self.config.default_duration);
        let item = NotificationItem {
            id,
            message,
            variant: options.variant.unwrap_or_default(),
            duration,
        };
        trace!(%id, variant = %item.variant, "Showing notification");

        // The entry is pushed before the lock is released, so the timer can
        // never observe the queue without it.
        let mut state = self.state();
        let weak = Arc::downgrade(&self.state);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(state) = weak.upgrade() {
                lock(&state).entries.retain(|entry| entry.item.id != id);
                trace!(%id, "Notification expired");
            }
        })
        .abort_handle();

        state.entries.push(Entry {
            item,
            created_at: Instant::now(),
            timer,
        });

        id
    }

    fn dismiss(&self, id: NotificationId) {
        let mut state = self.state();
        if let Some(index) = state.entries.iter().position(|entry| entry.item.id == id) {
            state.entries.remove(index).timer.abort();
            trace!(%id, "Dismissed notification");
        }
    }

    fn clear(&self) {
        for entry in self.state().entries.drain(..) {
            entry.timer.abort();
        }
    }

    fn list(&self) -> Vec<NotificationItem> {
        self.state()
            .entries
            .iter()
            .map(|entry| entry.item.clone())
            .collect()
    }

    fn progress(&self, id: NotificationId) -> Option<f64> {
        let state = self.state();
        let entry = state.entries.iter().find(|entry| entry.item.id == id)?;

        let total = entry.item.duration.as_secs_f64();
        if total == 0.0 {
            return Some(0.0);
        }

        let elapsed = entry.created_at.elapsed().as_secs_f64();
        Some((1.0 - elapsed / total).clamp(0.0, 1.0))
    }
}

impl Drop for State {
    fn drop(&mut self) {
        for entry in &self.entries {
            entry.timer.abort();
        }
    }
}
