//! Wall-clock timers
//!
//! These run on real milliseconds rather than simulation ticks: the spawn
//! interval and one-shot deferred events (Silence's ambient resume).

use super::state::GameEvent;

/// Repeating timer that reports how many periods have elapsed
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    pub period_ms: f64,
    elapsed_ms: f64,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance the clock; returns the number of times the interval fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.period_ms <= 0.0 || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let fired = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms -= fired * self.period_ms;
        fired as u32
    }

    /// Time until the next firing
    pub fn remaining_ms(&self) -> f64 {
        self.period_ms - self.elapsed_ms
    }
}

/// An event to be emitted after a delay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deferred {
    pub delay_ms: f64,
    pub event: GameEvent,
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: f64,
    event: GameEvent,
}

/// One-shot timers. Nothing is ever cancelled: every pushed event fires.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    now_ms: f64,
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deferred: Deferred) {
        self.pending.push(Pending {
            due_ms: self.now_ms + deferred.delay_ms.max(0.0),
            event: deferred.event,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and return everything that came due, earliest first
    pub fn advance(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|p| p.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_on_period() {
        let mut timer = IntervalTimer::new(2000.0);
        assert_eq!(timer.advance(1999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(1000.0), 0);
        assert!((timer.remaining_ms() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_carries_remainder() {
        let mut timer = IntervalTimer::new(2000.0);
        assert_eq!(timer.advance(4500.0), 2);
        assert_eq!(timer.advance(1500.0), 1);
    }

    #[test]
    fn test_deferred_fires_after_delay() {
        let mut queue = DeferredQueue::new();
        queue.push(Deferred {
            delay_ms: 2000.0,
            event: GameEvent::AmbientResume,
        });
        assert!(queue.advance(1999.0).is_empty());
        assert_eq!(queue.advance(1.0), vec![GameEvent::AmbientResume]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_deferred_are_not_cancelled() {
        let mut queue = DeferredQueue::new();
        let resume = Deferred {
            delay_ms: 2000.0,
            event: GameEvent::AmbientResume,
        };
        queue.push(resume);
        queue.advance(500.0);
        queue.push(resume);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.advance(1500.0), vec![GameEvent::AmbientResume]);
        assert_eq!(queue.advance(500.0), vec![GameEvent::AmbientResume]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_deferred_order_within_one_advance() {
        let mut queue = DeferredQueue::new();
        queue.push(Deferred {
            delay_ms: 300.0,
            event: GameEvent::AmbientResume,
        });
        queue.push(Deferred {
            delay_ms: 100.0,
            event: GameEvent::SilenceChime,
        });
        assert_eq!(
            queue.advance(1000.0),
            vec![GameEvent::SilenceChime, GameEvent::AmbientResume]
        );
    }
}
