use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one practice session. Every mode start gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A deferred `advance` owed to a particular session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub session: SessionId,
    pub due: Instant,
}

/// Holds at most one pending auto-advance.
///
/// Polled from the UI tick; an advance only fires against the session that
/// scheduled it, so nothing left over from a previous session can touch the
/// current one.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<ScheduledAdvance>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance, replacing any earlier one.
    pub fn schedule(&mut self, session: SessionId, now: Instant, delay: Duration) {
        self.pending = Some(ScheduledAdvance {
            session,
            due: now + delay,
        });
    }

    pub fn cancel(&mut self) -> Option<ScheduledAdvance> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|p| p.due.saturating_duration_since(now))
    }

    /// Consume a due advance. Returns true only if it belongs to `active`;
    /// a due advance for any other session is dropped.
    pub fn fire(&mut self, active: Option<SessionId>, now: Instant) -> bool {
        match self.pending {
            Some(task) if task.due <= now => {
                self.pending = None;
                if active == Some(task.session) {
                    true
                } else {
                    tracing::debug!(?task.session, "dropping stale auto-advance");
                    false
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::next();
        let b = SessionId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn fires_once_when_due() {
        let id = SessionId::next();
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(id, start, Duration::from_millis(800));

        assert!(!scheduler.fire(Some(id), start + Duration::from_millis(799)));
        assert!(scheduler.is_pending());
        assert!(scheduler.fire(Some(id), start + Duration::from_millis(800)));
        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire(Some(id), start + Duration::from_secs(5)));
    }

    #[test]
    fn stale_advance_is_dropped() {
        let old = SessionId::next();
        let new = SessionId::next();
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(old, start, Duration::ZERO);

        assert!(!scheduler.fire(Some(new), start));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn no_active_session_drops_advance() {
        let id = SessionId::next();
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(id, start, Duration::ZERO);
        assert!(!scheduler.fire(None, start));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn reschedule_replaces_and_cancel_clears() {
        let id = SessionId::next();
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(id, start, Duration::from_millis(100));
        scheduler.schedule(id, start, Duration::from_millis(500));
        assert_eq!(
            scheduler.remaining(start),
            Some(Duration::from_millis(500))
        );
        assert!(scheduler.cancel().is_some());
        assert_eq!(scheduler.remaining(start), None);
    }
}
