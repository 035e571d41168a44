use std::sync::{Arc, Mutex};

use chrono::{Duration, Local, NaiveDateTime};
use tokio::sync::watch;
use tracing::{debug, info};

use salescope_core::Frequency;

use crate::countdown::Countdown;
use crate::schedule::next_fire;
use crate::types::Trigger;

/// Callback invoked on every firing. Bound to its report configuration at
/// install time; a later install rebinds a fresh callback.
pub type JobFn = Arc<dyn Fn() + Send + Sync + 'static>;

pub(crate) struct ActiveTrigger {
    pub(crate) trigger: Trigger,
    pub(crate) installed_at: NaiveDateTime,
    /// Resolved by the engine on its next tick; `None` until then.
    pub(crate) next_fire: Option<NaiveDateTime>,
    pub(crate) job: JobFn,
}

#[derive(Default)]
pub(crate) struct TriggerState {
    pub(crate) active: Option<ActiveTrigger>,
    /// Nominal interval cached at install — the countdown fallback until the
    /// engine resolves a concrete next-fire time.
    pub(crate) fallback: Option<Duration>,
}

/// Management handle: install/cancel triggers and read the next fire time
/// while the engine loop runs.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    state: Arc<Mutex<TriggerState>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any active trigger with one for `frequency`, firing `job`.
    ///
    /// The swap happens inside one critical section, so there is no window
    /// with two triggers active. Returns the nominal interval for use as a
    /// countdown fallback.
    pub fn install(&self, frequency: Frequency, job: JobFn) -> Duration {
        self.install_at(frequency, job, Local::now().naive_local())
    }

    pub(crate) fn install_at(
        &self,
        frequency: Frequency,
        job: JobFn,
        now: NaiveDateTime,
    ) -> Duration {
        let nominal = frequency.nominal_interval();
        let mut state = self.state.lock().unwrap();
        state.active = Some(ActiveTrigger {
            trigger: Trigger::from_frequency(frequency),
            installed_at: now,
            next_fire: None,
            job,
        });
        state.fallback = Some(nominal);
        info!(%frequency, "trigger installed");
        nominal
    }

    /// Remove the active trigger and the cached fallback. Idempotent.
    ///
    /// Takes effect for future firings only — a run already dispatched
    /// completes to its artifact.
    pub fn cancel_all(&self) {
        let mut state = self.state.lock().unwrap();
        if state.active.take().is_some() {
            info!("trigger cancelled");
        }
        state.fallback = None;
    }

    /// The engine's authoritative estimate of the next firing, if resolved.
    pub fn next_fire_time(&self) -> Option<NaiveDateTime> {
        self.state
            .lock()
            .unwrap()
            .active
            .as_ref()
            .and_then(|a| a.next_fire)
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().unwrap().active.is_some()
    }

    /// Countdown view sharing this handle's state.
    pub fn countdown(&self) -> Countdown {
        Countdown::new(Arc::clone(&self.state))
    }

    /// Engine loop driver sharing this handle's state.
    pub fn engine(&self) -> SchedulerEngine {
        SchedulerEngine {
            state: Arc::clone(&self.state),
        }
    }
}

/// Background driver: resolves next-fire times and dispatches due firings.
pub struct SchedulerEngine {
    state: Arc<Mutex<TriggerState>>,
}

impl SchedulerEngine {
    /// Main event loop. Ticks every second until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("scheduler engine started");
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(job) = self.tick(Local::now().naive_local()) {
                        // Report generation blocks on chart and file I/O —
                        // keep it off the async workers. A failed or slow
                        // run never unseats the trigger.
                        tokio::task::spawn_blocking(move || job());
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// One scheduling step at `now`: resolve a pending next-fire time, or
    /// hand back the job when it is due.
    pub(crate) fn tick(&self, now: NaiveDateTime) -> Option<JobFn> {
        let mut state = self.state.lock().unwrap();
        let active = state.active.as_mut()?;
        match active.next_fire {
            None => {
                // First tick after install. Interval triggers anchor at the
                // install instant, calendar triggers at their next anchor.
                let resolved = next_fire(&active.trigger, active.installed_at);
                debug!(next_fire = %resolved, "next fire time resolved");
                active.next_fire = Some(resolved);
                None
            }
            Some(due) if now >= due => {
                active.next_fire = Some(next_fire(&active.trigger, now));
                Some(Arc::clone(&active.job))
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn counting_job() -> (JobFn, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);
        let job: JobFn = Arc::new(move || {
            probe.fetch_add(1, Ordering::SeqCst);
        });
        (job, hits)
    }

    #[test]
    fn install_replaces_the_previous_trigger() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        let (job_a, hits_a) = counting_job();
        let (job_b, hits_b) = counting_job();

        let t0 = at(2026, 3, 10, 12, 0, 0);
        handle.install_at(Frequency::Minute, job_a, t0);
        handle.install_at(Frequency::Minute, job_b, t0);

        engine.tick(t0); // resolve
        if let Some(job) = engine.tick(at(2026, 3, 10, 12, 1, 0)) {
            job();
        }

        assert_eq!(hits_a.load(Ordering::SeqCst), 0);
        assert_eq!(hits_b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_all_is_idempotent() {
        let handle = SchedulerHandle::new();
        let (job, _) = counting_job();
        handle.install(Frequency::Hour, job);
        assert!(handle.is_active());

        handle.cancel_all();
        handle.cancel_all();
        assert!(!handle.is_active());
        assert_eq!(handle.next_fire_time(), None);
    }

    #[test]
    fn next_fire_is_unresolved_until_the_engine_ticks() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        let (job, _) = counting_job();

        let t0 = at(2026, 3, 10, 12, 0, 0);
        handle.install_at(Frequency::Minute, job, t0);
        assert_eq!(handle.next_fire_time(), None);

        engine.tick(t0);
        assert_eq!(handle.next_fire_time(), Some(at(2026, 3, 10, 12, 1, 0)));
    }

    #[test]
    fn interval_trigger_anchors_at_the_install_instant() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        let (job, _) = counting_job();

        let t0 = at(2026, 3, 10, 12, 0, 0);
        handle.install_at(Frequency::Hour, job, t0);
        // The engine picks the trigger up a few ticks later; the anchor is
        // still the install instant, not the resolution instant.
        engine.tick(at(2026, 3, 10, 12, 0, 3));
        assert_eq!(handle.next_fire_time(), Some(at(2026, 3, 10, 13, 0, 0)));
    }

    #[test]
    fn due_firing_dispatches_and_advances() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        let (job, hits) = counting_job();

        let t0 = at(2026, 3, 10, 12, 0, 0);
        handle.install_at(Frequency::Minute, job, t0);
        engine.tick(t0);

        assert!(engine.tick(at(2026, 3, 10, 12, 0, 59)).is_none());

        let fired = engine.tick(at(2026, 3, 10, 12, 1, 0)).unwrap();
        fired();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        // Next occurrence is computed from the fire instant.
        assert_eq!(handle.next_fire_time(), Some(at(2026, 3, 10, 12, 2, 0)));
    }

    #[test]
    fn calendar_trigger_resolves_to_the_month_anchor() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        let (job, _) = counting_job();

        handle.install_at(Frequency::Month, job, at(2026, 3, 10, 9, 30, 0));
        engine.tick(at(2026, 3, 10, 9, 30, 1));
        assert_eq!(handle.next_fire_time(), Some(at(2026, 4, 1, 0, 0, 0)));
    }

    #[test]
    fn tick_without_a_trigger_is_a_no_op() {
        let handle = SchedulerHandle::new();
        let engine = handle.engine();
        assert!(engine.tick(at(2026, 3, 10, 12, 0, 0)).is_none());
    }
}
