//! Tick scheduling and clock abstractions.
//!
//! The engine never blocks: "waiting" between ticks is a callback scheduled
//! on a [`TickScheduler`]. Substituting the scheduler swaps the time source:
//! a real timer loop drives production, [`ManualScheduler`] drives tests with
//! a virtual clock. Everything here is single-threaded and cooperative.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// A scheduled tick callback.
pub type TickFn = Box<dyn FnOnce()>;

/// Monotonic clock reading, as elapsed time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Posts a callback to run after `delay` on the driving execution context.
///
/// A scheduler either accepts the callback or the run is stalled (observable
/// as `is_running()` staying true with no further updates); availability is
/// a construction-time precondition, not a per-tick recoverable error.
pub trait TickScheduler {
    fn schedule_after(&self, delay: Duration, tick: TickFn) -> TickHandle;
}

/// Revocation handle for a scheduled tick. Dropping the handle does NOT
/// cancel the callback; only [`TickHandle::cancel`] does.
pub struct TickHandle {
    revoke: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    pub fn new(revoke: impl FnOnce() + 'static) -> Self {
        Self {
            revoke: Some(Box::new(revoke)),
        }
    }

    /// Revoke the callback if it has not fired yet. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(revoke) = self.revoke.take() {
            revoke();
        }
    }
}

struct ManualEntry {
    due: Duration,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    tick: TickFn,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<ManualEntry>,
}

/// Virtual-clock scheduler for tests and embedders that step time manually.
///
/// Callbacks run synchronously inside [`ManualScheduler::advance`], in
/// deadline order (insertion order breaks ties), with the virtual clock set
/// to each callback's deadline while it runs. Callbacks may schedule further
/// callbacks; those run in the same `advance` call if they come due.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled, not-yet-cancelled callbacks.
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .queue
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }

    /// Move the virtual clock forward by `by`, running every callback that
    /// comes due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let entry = {
                let mut st = self.state.borrow_mut();
                let idx = (0..st.queue.len())
                    .filter(|&i| st.queue[i].due <= target)
                    .min_by_key(|&i| (st.queue[i].due, st.queue[i].seq));
                match idx {
                    Some(i) => {
                        let entry = st.queue.remove(i);
                        st.now = st.now.max(entry.due);
                        entry
                    }
                    None => break,
                }
            };
            if !entry.cancelled.get() {
                (entry.tick)();
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, tick: TickFn) -> TickHandle {
        let mut st = self.state.borrow_mut();
        let due = st.now + delay;
        let seq = st.next_seq;
        st.next_seq += 1;
        let cancelled = Rc::new(Cell::new(false));
        st.queue.push(ManualEntry {
            due,
            seq,
            cancelled: cancelled.clone(),
            tick,
        });
        TickHandle::new(move || cancelled.set(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should run callbacks in deadline order with ties in insertion order
    #[test]
    fn advance_runs_in_deadline_order() {
        let sched = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (name, delay_ms) in [("b", 20), ("a", 10), ("c", 20)] {
            let order = order.clone();
            sched.schedule_after(
                Duration::from_millis(delay_ms),
                Box::new(move || order.borrow_mut().push(name)),
            );
        }
        sched.advance(Duration::from_millis(30));
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
        assert_eq!(sched.pending(), 0);
    }

    /// it should not run callbacks that are not yet due
    #[test]
    fn advance_stops_at_target() {
        let sched = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        {
            let fired = fired.clone();
            sched.schedule_after(
                Duration::from_millis(50),
                Box::new(move || fired.set(true)),
            );
        }
        sched.advance(Duration::from_millis(49));
        assert!(!fired.get());
        assert_eq!(sched.now(), Duration::from_millis(49));
        sched.advance(Duration::from_millis(1));
        assert!(fired.get());
    }

    /// it should skip cancelled callbacks
    #[test]
    fn cancel_revokes_callback() {
        let sched = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let mut handle = {
            let fired = fired.clone();
            sched.schedule_after(
                Duration::from_millis(10),
                Box::new(move || fired.set(true)),
            )
        };
        handle.cancel();
        assert_eq!(sched.pending(), 0);
        sched.advance(Duration::from_millis(20));
        assert!(!fired.get());
    }

    /// it should run callbacks scheduled by callbacks when they come due
    #[test]
    fn reschedule_from_callback() {
        let sched = ManualScheduler::new();
        let count = Rc::new(Cell::new(0u32));
        fn chain(sched: &ManualScheduler, count: &Rc<Cell<u32>>) {
            if count.get() >= 3 {
                return;
            }
            let sched2 = sched.clone();
            let count2 = count.clone();
            sched.schedule_after(
                Duration::from_millis(10),
                Box::new(move || {
                    count2.set(count2.get() + 1);
                    chain(&sched2, &count2);
                }),
            );
        }
        chain(&sched, &count);
        sched.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 3);
    }
}
