//! The animator facade and backend contract.
//!
//! [`ValueAnimator`] is a thin pass-through over an installed
//! [`AnimatorBackend`]; which backend gets installed is decided once, at
//! construction time, by an [`AnimatorFactory`]. User-facing listeners
//! receive the animator handle itself, so a callback can query values or
//! re-enter `start`/`cancel`/`end` on the animator it observes; internally
//! they are wrapped into backend-level proxies that close over a weak handle
//! (keeping strong references here would cycle the backend into itself).

use crate::config::Config;
use crate::easing::Interpolator;
use crate::engine::PollingEngine;
use crate::scheduler::{Clock, TickScheduler};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Backend-level lifecycle notifications, already bound to their animator.
pub trait LifecycleProxy {
    fn on_start(&mut self);
    fn on_end(&mut self);
    fn on_cancel(&mut self);
}

/// The operation set every engine variant exposes to the facade.
pub trait AnimatorBackend {
    fn start(&self);
    fn cancel(&self);
    fn end(&self);
    fn is_running(&self) -> bool;
    fn set_duration(&self, duration: Duration);
    fn duration(&self) -> Duration;
    fn set_interpolator(&self, interpolator: Box<dyn Interpolator>);
    fn set_int_values(&self, from: i32, to: i32);
    fn animated_int_value(&self) -> i32;
    fn set_float_values(&self, from: f32, to: f32);
    fn animated_float_value(&self) -> f32;
    fn animated_fraction(&self) -> f32;
    fn add_update_listener(&self, listener: Box<dyn FnMut()>);
    fn add_listener(&self, listener: Box<dyn LifecycleProxy>);
}

/// Lifecycle notifications delivered to user code. All methods default to
/// empty bodies so implementers override only what they need.
pub trait AnimationListener {
    fn on_animation_start(&mut self, animator: &ValueAnimator) {
        let _ = animator;
    }
    fn on_animation_end(&mut self, animator: &ValueAnimator) {
        let _ = animator;
    }
    fn on_animation_cancel(&mut self, animator: &ValueAnimator) {
        let _ = animator;
    }
}

/// A value animator handle. Clones share the same underlying run; dropping
/// the last clone drops the backend, and any still-scheduled tick becomes a
/// no-op.
///
/// Listener registration always appends: absent listeners are not
/// representable here, and duplicate registrations notify once per entry.
#[derive(Clone)]
pub struct ValueAnimator {
    backend: Rc<dyn AnimatorBackend>,
}

impl ValueAnimator {
    /// Wrap an already-constructed backend. Most callers go through an
    /// [`AnimatorFactory`] instead.
    pub fn from_backend(backend: Rc<dyn AnimatorBackend>) -> Self {
        Self { backend }
    }

    pub fn start(&self) {
        self.backend.start();
    }

    pub fn cancel(&self) {
        self.backend.cancel();
    }

    pub fn end(&self) {
        self.backend.end();
    }

    pub fn is_running(&self) -> bool {
        self.backend.is_running()
    }

    pub fn set_duration(&self, duration: Duration) {
        self.backend.set_duration(duration);
    }

    pub fn duration(&self) -> Duration {
        self.backend.duration()
    }

    pub fn set_interpolator(&self, interpolator: impl Interpolator + 'static) {
        self.backend.set_interpolator(Box::new(interpolator));
    }

    pub fn set_int_values(&self, from: i32, to: i32) {
        self.backend.set_int_values(from, to);
    }

    pub fn animated_int_value(&self) -> i32 {
        self.backend.animated_int_value()
    }

    pub fn set_float_values(&self, from: f32, to: f32) {
        self.backend.set_float_values(from, to);
    }

    pub fn animated_float_value(&self) -> f32 {
        self.backend.animated_float_value()
    }

    pub fn animated_fraction(&self) -> f32 {
        self.backend.animated_fraction()
    }

    /// Register a per-tick callback; it receives this animator, so it can
    /// read the current values or control the run.
    pub fn add_update_listener<F>(&self, mut listener: F)
    where
        F: FnMut(&ValueAnimator) + 'static,
    {
        let weak = Rc::downgrade(&self.backend);
        self.backend.add_update_listener(Box::new(move || {
            if let Some(backend) = weak.upgrade() {
                listener(&ValueAnimator { backend });
            }
        }));
    }

    /// Register a lifecycle listener.
    pub fn add_listener<L>(&self, listener: L)
    where
        L: AnimationListener + 'static,
    {
        self.backend.add_listener(Box::new(BoundListener {
            listener,
            backend: Rc::downgrade(&self.backend),
        }));
    }
}

/// Adapts a user [`AnimationListener`] into a backend [`LifecycleProxy`] by
/// re-deriving the animator handle at dispatch time.
struct BoundListener<L> {
    listener: L,
    backend: Weak<dyn AnimatorBackend>,
}

impl<L: AnimationListener> LifecycleProxy for BoundListener<L> {
    fn on_start(&mut self) {
        if let Some(backend) = self.backend.upgrade() {
            self.listener.on_animation_start(&ValueAnimator { backend });
        }
    }

    fn on_end(&mut self) {
        if let Some(backend) = self.backend.upgrade() {
            self.listener.on_animation_end(&ValueAnimator { backend });
        }
    }

    fn on_cancel(&mut self) {
        if let Some(backend) = self.backend.upgrade() {
            self.listener.on_animation_cancel(&ValueAnimator { backend });
        }
    }
}

/// Picks and builds the engine variant a [`ValueAnimator`] runs on.
pub trait AnimatorFactory {
    fn create_animator(&self) -> ValueAnimator;
}

/// The shipped variant: animators backed by the polling engine, all sharing
/// one scheduler/clock pair and one [`Config`].
pub struct PollingAnimatorFactory {
    scheduler: Rc<dyn TickScheduler>,
    clock: Rc<dyn Clock>,
    config: Config,
}

impl PollingAnimatorFactory {
    pub fn new(scheduler: Rc<dyn TickScheduler>, clock: Rc<dyn Clock>) -> Self {
        Self::with_config(scheduler, clock, Config::default())
    }

    pub fn with_config(
        scheduler: Rc<dyn TickScheduler>,
        clock: Rc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            scheduler,
            clock,
            config,
        }
    }
}

impl AnimatorFactory for PollingAnimatorFactory {
    fn create_animator(&self) -> ValueAnimator {
        ValueAnimator::from_backend(Rc::new(PollingEngine::new(
            self.scheduler.clone(),
            self.clock.clone(),
            &self.config,
        )))
    }
}
