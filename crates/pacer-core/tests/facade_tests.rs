use pacer_core::{
    AnimationListener, AnimatorFactory, Config, Easing, ManualScheduler, PollingAnimatorFactory,
    PollingEngine, ValueAnimator,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn factory_on(sched: &ManualScheduler, config: Config) -> PollingAnimatorFactory {
    PollingAnimatorFactory::with_config(Rc::new(sched.clone()), Rc::new(sched.clone()), config)
}

/// it should hand the animator itself to update callbacks for value reads
#[test]
fn update_listener_receives_animator_handle() {
    let sched = ManualScheduler::new();
    let factory = factory_on(
        &sched,
        Config {
            default_duration: ms(100),
            tick_interval: ms(10),
            default_easing: Easing::Linear,
        },
    );
    let animator = factory.create_animator();
    animator.set_int_values(0, 100);

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        animator.add_update_listener(move |a| seen.borrow_mut().push(a.animated_int_value()));
    }
    animator.start();
    sched.advance(ms(120));

    let seen = seen.borrow();
    assert_eq!(*seen.first().unwrap(), 0);
    assert!(seen.contains(&50));
    assert_eq!(*seen.last().unwrap(), 100);
}

/// it should let lifecycle listeners drive the animator they observe
#[test]
fn lifecycle_listener_can_reenter() {
    struct RestartOnce {
        restarted: Rc<Cell<bool>>,
    }
    impl AnimationListener for RestartOnce {
        fn on_animation_end(&mut self, animator: &ValueAnimator) {
            if !self.restarted.get() {
                self.restarted.set(true);
                animator.start();
            }
        }
    }

    let sched = ManualScheduler::new();
    let factory = factory_on(
        &sched,
        Config {
            default_duration: ms(50),
            tick_interval: ms(10),
            default_easing: Easing::Linear,
        },
    );
    let animator = factory.create_animator();
    let restarted = Rc::new(Cell::new(false));
    animator.add_listener(RestartOnce {
        restarted: restarted.clone(),
    });

    animator.start();
    sched.advance(ms(60)); // first run completes, listener restarts
    assert!(restarted.get());
    assert!(animator.is_running());

    sched.advance(ms(60)); // second run completes for real
    assert!(!animator.is_running());
    assert_eq!(animator.animated_fraction(), 1.0);
}

/// it should seed every animator with the factory's config defaults
#[test]
fn factory_applies_config_defaults() {
    let sched = ManualScheduler::new();
    let config = Config {
        default_duration: ms(350),
        tick_interval: ms(5),
        default_easing: Easing::Linear,
    };
    let factory = factory_on(&sched, config);
    let animator = factory.create_animator();
    assert_eq!(animator.duration(), ms(350));
    assert!(!animator.is_running());

    // Independent state per created animator
    let other = factory.create_animator();
    other.set_duration(ms(10));
    assert_eq!(animator.duration(), ms(350));
}

/// it should share one run between facade clones and a directly-held backend
#[test]
fn facade_wraps_shared_backend() {
    let sched = ManualScheduler::new();
    let engine = PollingEngine::new(
        Rc::new(sched.clone()),
        Rc::new(sched.clone()),
        &Config::default(),
    );
    let animator = ValueAnimator::from_backend(Rc::new(engine.clone()));
    let clone = animator.clone();

    engine.set_duration(ms(40));
    assert_eq!(animator.duration(), ms(40));

    clone.start();
    assert!(engine.is_running());
    sched.advance(ms(60));
    assert!(!animator.is_running());
    assert_eq!(engine.animated_fraction(), 1.0);
}
