//! A blocking single-threaded timer loop for pacer.
//!
//! [`TimerLoop`] implements the core's `TickScheduler` + `Clock` pair over
//! `std::time::Instant` and `std::thread::sleep`. Everything runs on the
//! calling thread: scheduled callbacks fire inside [`TimerLoop::run_until_idle`],
//! in deadline order, after sleeping out whatever delay remains. Hosts with
//! their own event loop should implement the core traits against that loop
//! instead; this driver is for plain binaries and tests against real time.

use log::trace;
use pacer_core::{Clock, TickFn, TickHandle, TickScheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

struct Entry {
    due: Duration,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    tick: TickFn,
}

#[derive(Default)]
struct LoopState {
    next_seq: u64,
    queue: Vec<Entry>,
}

/// Single-threaded blocking timer loop. Clones share one queue and origin.
#[derive(Clone)]
pub struct TimerLoop {
    origin: Instant,
    state: Rc<RefCell<LoopState>>,
}

impl TimerLoop {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Rc::new(RefCell::new(LoopState::default())),
        }
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

    /// Run callbacks in deadline order, sleeping between them, until the
    /// queue drains. Callbacks may schedule more work; an animation keeps
    /// the loop alive by rescheduling its next tick from the current one.
    pub fn run_until_idle(&self) {
        loop {
            let entry = {
                let mut st = self.state.borrow_mut();
                let idx = (0..st.queue.len())
                    .min_by_key(|&i| (st.queue[i].due, st.queue[i].seq));
                match idx {
                    Some(i) => st.queue.remove(i),
                    None => break,
                }
            };
            if entry.cancelled.get() {
                continue;
            }
            let now = self.origin.elapsed();
            if entry.due > now {
                thread::sleep(entry.due - now);
            }
            trace!("firing tick due at {:?}", entry.due);
            (entry.tick)();
        }
    }
}

impl Default for TimerLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TimerLoop {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl TickScheduler for TimerLoop {
    fn schedule_after(&self, delay: Duration, tick: TickFn) -> TickHandle {
        let due = self.origin.elapsed() + delay;
        let mut st = self.state.borrow_mut();
        let seq = st.next_seq;
        st.next_seq += 1;
        let cancelled = Rc::new(Cell::new(false));
        st.queue.push(Entry {
            due,
            seq,
            cancelled: cancelled.clone(),
            tick,
        });
        TickHandle::new(move || cancelled.set(true))
    }
}
