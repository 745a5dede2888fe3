//! The polling engine: a timer-driven animation state machine.
//!
//! Model:
//! - `start()` resets the fraction to 0, captures the clock, dispatches one
//!   update (so observers see the initial frame) and then the start
//!   notification, then schedules the first tick after the configured delay.
//! - Each tick recomputes linear progress as `clamp(elapsed / duration, 0, 1)`,
//!   applies the interpolator, dispatches an update, and reschedules until
//!   `elapsed >= duration`, at which point it dispatches the end notification.
//! - `cancel()` dispatches cancel then end; `end()` jumps the fraction to 1,
//!   dispatches a final update, then end.
//!
//! Reentrancy: listeners may call `start`/`cancel`/`end`/setters on the same
//! engine from inside a callback. The engine re-reads `running` after every
//! dispatch instead of trusting a snapshot, so e.g. a cancel issued during
//! `start()`'s initial update suppresses the first tick. The one guard Rust
//! forces on us: a listener is never re-entered recursively, so a nested
//! dispatch skips the entries that are currently executing.

use crate::animator::{AnimatorBackend, LifecycleProxy};
use crate::config::Config;
use crate::easing::{Easing, Interpolator};
use crate::interp::{constrain, lerp_f32, lerp_i32};
use crate::scheduler::{Clock, TickHandle, TickScheduler};
use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

type UpdateEntry = Rc<RefCell<Box<dyn FnMut()>>>;
type ListenerEntry = Rc<RefCell<Box<dyn LifecycleProxy>>>;

/// The polling backend. Cheap to clone; clones share one animation state.
#[derive(Clone)]
pub struct PollingEngine {
    state: Rc<EngineState>,
}

struct EngineState {
    scheduler: Rc<dyn TickScheduler>,
    clock: Rc<dyn Clock>,
    tick_interval: Duration,
    default_easing: Easing,

    running: Cell<bool>,
    start_time: Cell<Duration>,
    fraction: Cell<f32>,
    duration: Cell<Duration>,
    int_values: Cell<(i32, i32)>,
    float_values: Cell<(f32, f32)>,

    interpolator: RefCell<Option<Rc<dyn Interpolator>>>,
    update_listeners: RefCell<Vec<UpdateEntry>>,
    listeners: RefCell<Vec<ListenerEntry>>,
    // At most one outstanding scheduled tick per engine instance.
    pending_tick: RefCell<Option<TickHandle>>,
}

impl PollingEngine {
    pub fn new(scheduler: Rc<dyn TickScheduler>, clock: Rc<dyn Clock>, config: &Config) -> Self {
        Self {
            state: Rc::new(EngineState {
                scheduler,
                clock,
                tick_interval: config.tick_interval,
                default_easing: config.default_easing,
                running: Cell::new(false),
                start_time: Cell::new(Duration::ZERO),
                fraction: Cell::new(0.0),
                duration: Cell::new(config.default_duration),
                int_values: Cell::new((0, 0)),
                float_values: Cell::new((0.0, 0.0)),
                interpolator: RefCell::new(None),
                update_listeners: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                pending_tick: RefCell::new(None),
            }),
        }
    }

    /// Begin a run. No-op while already running: the start time is kept and
    /// the start notification is not re-fired.
    pub fn start(&self) {
        let st = &self.state;
        if st.running.get() {
            // If we're already running, ignore
            return;
        }
        if st.interpolator.borrow().is_none() {
            *st.interpolator.borrow_mut() = Some(Rc::new(st.default_easing));
        }
        st.running.set(true);
        st.fraction.set(0.0);
        st.start_time.set(st.clock.now());
        debug!("animation started, duration {:?}", st.duration.get());

        // Initial frame goes out on the update channel before the start
        // notification; observers treating "start" as "first visible value"
        // still see fraction 0 via updates.
        st.dispatch_update();
        st.dispatch_start();
        // A listener may have cancelled or ended us synchronously.
        if st.running.get() {
            EngineState::schedule_tick(st);
        }
    }

    /// Abort the run. Dispatches cancel then end unconditionally, even when
    /// not running; callers that need double-termination protection must
    /// guard themselves. No update notification is sent.
    pub fn cancel(&self) {
        let st = &self.state;
        st.running.set(false);
        st.cancel_pending_tick();
        debug!("animation cancelled at fraction {}", st.fraction.get());
        st.dispatch_cancel();
        st.dispatch_end();
    }

    /// Jump to the terminal state. Only takes effect while running: forces
    /// the fraction to 1, dispatches one last update, then end (no cancel).
    pub fn end(&self) {
        let st = &self.state;
        if !st.running.get() {
            return;
        }
        st.running.set(false);
        st.cancel_pending_tick();
        st.fraction.set(1.0);
        debug!("animation ended early");
        st.dispatch_update();
        st.dispatch_end();
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Mutable before or during a run; ticks always read the current value.
    pub fn set_duration(&self, duration: Duration) {
        self.state.duration.set(duration);
    }

    pub fn duration(&self) -> Duration {
        self.state.duration.get()
    }

    pub fn set_interpolator(&self, interpolator: Rc<dyn Interpolator>) {
        *self.state.interpolator.borrow_mut() = Some(interpolator);
    }

    pub fn set_int_values(&self, from: i32, to: i32) {
        self.state.int_values.set((from, to));
    }

    /// Interpolates whatever int range was last set, (0, 0) if none ever was.
    pub fn animated_int_value(&self) -> i32 {
        let (from, to) = self.state.int_values.get();
        lerp_i32(from, to, self.state.fraction.get())
    }

    pub fn set_float_values(&self, from: f32, to: f32) {
        self.state.float_values.set((from, to));
    }

    /// Interpolates whatever float range was last set, (0, 0) if none ever was.
    pub fn animated_float_value(&self) -> f32 {
        let (from, to) = self.state.float_values.get();
        lerp_f32(from, to, self.state.fraction.get())
    }

    /// Last computed eased fraction: 0 after `start()`, 1 after natural
    /// completion or `end()`, unchanged by `cancel()`.
    pub fn animated_fraction(&self) -> f32 {
        self.state.fraction.get()
    }

    /// Append an update callback. Registration order is dispatch order;
    /// duplicates notify twice.
    pub fn add_update_listener(&self, listener: Box<dyn FnMut()>) {
        self.state
            .update_listeners
            .borrow_mut()
            .push(Rc::new(RefCell::new(listener)));
    }

    /// Append a lifecycle listener. Same ordering rules as updates.
    pub fn add_listener(&self, listener: Box<dyn LifecycleProxy>) {
        self.state
            .listeners
            .borrow_mut()
            .push(Rc::new(RefCell::new(listener)));
    }
}

impl EngineState {
    fn schedule_tick(state: &Rc<EngineState>) {
        // Enforce the single-pending-tick invariant before posting.
        state.cancel_pending_tick();
        let weak = Rc::downgrade(state);
        let handle = state.scheduler.schedule_after(
            state.tick_interval,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    EngineState::tick(&state);
                }
            }),
        );
        *state.pending_tick.borrow_mut() = Some(handle);
    }

    fn tick(state: &Rc<EngineState>) {
        // The handle we hold refers to this very callback; drop it.
        state.pending_tick.borrow_mut().take();

        if state.running.get() {
            let elapsed = state.clock.now().saturating_sub(state.start_time.get());
            let duration = state.duration.get();
            // A zero duration completes on this tick; sidestep 0/0 -> NaN.
            let linear = if duration.is_zero() {
                1.0
            } else {
                constrain(
                    elapsed.as_millis() as f32 / duration.as_millis() as f32,
                    0.0,
                    1.0,
                )
            };
            let interpolator = state.interpolator.borrow().clone();
            let eased = match interpolator {
                Some(curve) => curve.interpolate(linear),
                // Missing curve at tick time falls back to linear.
                None => linear,
            };
            state.fraction.set(eased);
            trace!("tick: elapsed {:?} linear {} eased {}", elapsed, linear, eased);

            state.dispatch_update();

            if elapsed >= duration {
                state.running.set(false);
                debug!("animation completed");
                state.dispatch_end();
            }
        }

        // Re-read: a listener above may have cancelled or ended the run.
        if state.running.get() {
            EngineState::schedule_tick(state);
        }
    }

    fn cancel_pending_tick(&self) {
        if let Some(mut handle) = self.pending_tick.borrow_mut().take() {
            handle.cancel();
        }
    }

    // Dispatch walks the sequence by index up to the length observed at
    // entry: entries appended mid-dispatch wait for the next pass, and an
    // entry that is already executing is skipped rather than re-entered.

    fn dispatch_update(&self) {
        let count = self.update_listeners.borrow().len();
        for i in 0..count {
            let entry = self.update_listeners.borrow().get(i).cloned();
            if let Some(entry) = entry {
                if let Ok(mut listener) = entry.try_borrow_mut() {
                    (*listener)();
                }
            }
        }
    }

    fn dispatch_start(&self) {
        let count = self.listeners.borrow().len();
        for i in 0..count {
            let entry = self.listeners.borrow().get(i).cloned();
            if let Some(entry) = entry {
                if let Ok(mut listener) = entry.try_borrow_mut() {
                    listener.on_start();
                }
            }
        }
    }

    fn dispatch_cancel(&self) {
        let count = self.listeners.borrow().len();
        for i in 0..count {
            let entry = self.listeners.borrow().get(i).cloned();
            if let Some(entry) = entry {
                if let Ok(mut listener) = entry.try_borrow_mut() {
                    listener.on_cancel();
                }
            }
        }
    }

    fn dispatch_end(&self) {
        let count = self.listeners.borrow().len();
        for i in 0..count {
            let entry = self.listeners.borrow().get(i).cloned();
            if let Some(entry) = entry {
                if let Ok(mut listener) = entry.try_borrow_mut() {
                    listener.on_end();
                }
            }
        }
    }
}

impl AnimatorBackend for PollingEngine {
    fn start(&self) {
        PollingEngine::start(self)
    }
    fn cancel(&self) {
        PollingEngine::cancel(self)
    }
    fn end(&self) {
        PollingEngine::end(self)
    }
    fn is_running(&self) -> bool {
        PollingEngine::is_running(self)
    }
    fn set_duration(&self, duration: Duration) {
        PollingEngine::set_duration(self, duration)
    }
    fn duration(&self) -> Duration {
        PollingEngine::duration(self)
    }
    fn set_interpolator(&self, interpolator: Box<dyn Interpolator>) {
        PollingEngine::set_interpolator(self, Rc::from(interpolator))
    }
    fn set_int_values(&self, from: i32, to: i32) {
        PollingEngine::set_int_values(self, from, to)
    }
    fn animated_int_value(&self) -> i32 {
        PollingEngine::animated_int_value(self)
    }
    fn set_float_values(&self, from: f32, to: f32) {
        PollingEngine::set_float_values(self, from, to)
    }
    fn animated_float_value(&self) -> f32 {
        PollingEngine::animated_float_value(self)
    }
    fn animated_fraction(&self) -> f32 {
        PollingEngine::animated_fraction(self)
    }
    fn add_update_listener(&self, listener: Box<dyn FnMut()>) {
        PollingEngine::add_update_listener(self, listener)
    }
    fn add_listener(&self, listener: Box<dyn LifecycleProxy>) {
        PollingEngine::add_listener(self, listener)
    }
}
