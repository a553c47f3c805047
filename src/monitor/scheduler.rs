//! Virtual-time timer wheel with one periodic and one one-shot slot.
//!
//! Time only moves when the owner asks it to, which keeps the feed
//! deterministic under test and lets a real-time driver map wall time onto it.

use std::time::Duration;

/// Shortest accepted period, so a periodic slot always makes progress.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Which slot fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// The recurring monitoring tick.
    Tick,
    /// The delayed completion of a manual upload.
    UploadComplete,
}

#[derive(Debug, Clone, Copy)]
struct Periodic {
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    periodic: Option<Periodic>,
    one_shot: Option<Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm the periodic slot; the first firing is one full period from now.
    ///
    /// Returns `false` and leaves the existing cadence alone when already armed.
    pub fn start_periodic(&mut self, period: Duration) -> bool {
        if self.periodic.is_some() {
            return false;
        }
        let period = period.max(MIN_PERIOD);
        self.periodic = Some(Periodic {
            period,
            next_due: self.now.saturating_add(period),
        });
        true
    }

    pub fn cancel_periodic(&mut self) -> bool {
        self.periodic.take().is_some()
    }

    pub fn is_periodic_armed(&self) -> bool {
        self.periodic.is_some()
    }

    /// Arm the one-shot slot. Returns `false` when a firing is already pending.
    pub fn schedule_once(&mut self, delay: Duration) -> bool {
        if self.one_shot.is_some() {
            return false;
        }
        self.one_shot = Some(self.now.saturating_add(delay));
        true
    }

    pub fn cancel_once(&mut self) -> bool {
        self.one_shot.take().is_some()
    }

    pub fn is_once_pending(&self) -> bool {
        self.one_shot.is_some()
    }

    pub fn cancel_all(&mut self) {
        self.periodic = None;
        self.one_shot = None;
    }

    /// Earliest pending firing time, if any slot is armed.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.one_shot, self.periodic.map(|p| p.next_due)) {
            (Some(once), Some(tick)) => Some(once.min(tick)),
            (once, tick) => once.or(tick),
        }
    }

    /// Pop the earliest firing due at or before `until`, moving the clock to it.
    ///
    /// On a tie the one-shot slot fires first. The periodic slot is re-armed
    /// one period after its own due time, so cadence never drifts.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let due = self.next_deadline().filter(|due| *due <= until)?;
        self.now = self.now.max(due);
        if self.one_shot == Some(due) {
            self.one_shot = None;
            return Some(TimerKind::UploadComplete);
        }
        // A tick whose successor lies past `Duration::MAX` is the last one.
        self.periodic = self.periodic.and_then(|periodic| {
            periodic.next_due.checked_add(periodic.period).map(|next_due| Periodic {
                next_due,
                ..periodic
            })
        });
        Some(TimerKind::Tick)
    }

    /// Move the clock forward to `until` once every due firing was popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(3000);
    const UPLOAD: Duration = Duration::from_millis(1500);

    fn drain(scheduler: &mut Scheduler, until: Duration) -> Vec<(Duration, TimerKind)> {
        let mut fired = Vec::new();
        while let Some(kind) = scheduler.pop_due(until) {
            fired.push((scheduler.now(), kind));
        }
        scheduler.settle(until);
        fired
    }

    #[test]
    fn periodic_fires_on_a_fixed_cadence() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.start_periodic(TICK));
        let fired = drain(&mut scheduler, Duration::from_millis(9_500));
        let times: Vec<u128> = fired.iter().map(|(at, _)| at.as_millis()).collect();
        assert_eq!(times, vec![3_000, 6_000, 9_000]);
        assert_eq!(scheduler.now(), Duration::from_millis(9_500));
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(12_000)));
    }

    #[test]
    fn restarting_an_armed_periodic_keeps_the_cadence() {
        let mut scheduler = Scheduler::new();
        scheduler.start_periodic(TICK);
        drain(&mut scheduler, Duration::from_millis(1_000));
        assert!(!scheduler.start_periodic(TICK));
        assert_eq!(scheduler.next_deadline(), Some(TICK));
    }

    #[test]
    fn rearming_after_cancel_starts_a_fresh_period() {
        let mut scheduler = Scheduler::new();
        scheduler.start_periodic(TICK);
        drain(&mut scheduler, Duration::from_millis(4_000));
        assert!(scheduler.cancel_periodic());
        assert!(drain(&mut scheduler, Duration::from_millis(60_000)).is_empty());
        scheduler.start_periodic(TICK);
        let fired = drain(&mut scheduler, Duration::from_millis(63_000));
        assert_eq!(fired, vec![(Duration::from_millis(63_000), TimerKind::Tick)]);
    }

    #[test]
    fn one_shot_fires_once_and_rejects_rearming_while_pending() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.schedule_once(UPLOAD));
        assert!(!scheduler.schedule_once(UPLOAD));
        let fired = drain(&mut scheduler, Duration::from_millis(10_000));
        assert_eq!(fired, vec![(UPLOAD, TimerKind::UploadComplete)]);
        assert!(!scheduler.is_once_pending());
        assert!(scheduler.schedule_once(UPLOAD));
    }

    #[test]
    fn one_shot_wins_ties_with_the_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.start_periodic(TICK);
        scheduler.settle(Duration::from_millis(1_500));
        scheduler.schedule_once(UPLOAD);
        let fired = drain(&mut scheduler, TICK);
        assert_eq!(
            fired,
            vec![(TICK, TimerKind::UploadComplete), (TICK, TimerKind::Tick)]
        );
    }

    #[test]
    fn zero_period_is_raised_to_the_minimum() {
        let mut scheduler = Scheduler::new();
        scheduler.start_periodic(Duration::ZERO);
        assert_eq!(scheduler.next_deadline(), Some(MIN_PERIOD));
    }

    #[test]
    fn cancel_all_clears_both_slots() {
        let mut scheduler = Scheduler::new();
        scheduler.start_periodic(TICK);
        scheduler.schedule_once(UPLOAD);
        scheduler.cancel_all();
        assert_eq!(scheduler.next_deadline(), None);
        assert!(drain(&mut scheduler, Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn deadlines_saturate_at_the_end_of_time() {
        let mut scheduler = Scheduler::new();
        drain(&mut scheduler, Duration::from_secs(1));
        assert!(scheduler.start_periodic(Duration::MAX));
        assert!(scheduler.schedule_once(Duration::MAX));
        assert_eq!(scheduler.next_deadline(), Some(Duration::MAX));

        let fired = drain(&mut scheduler, Duration::MAX);
        assert_eq!(
            fired,
            vec![
                (Duration::MAX, TimerKind::UploadComplete),
                (Duration::MAX, TimerKind::Tick),
            ]
        );
        assert!(!scheduler.is_periodic_armed());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
