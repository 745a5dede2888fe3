//! Fade an alpha value from 0 to 255 over 200ms and print each frame.

use pacer_core::{
    AnimationListener, AnimatorFactory, PollingAnimatorFactory, ValueAnimator,
};
use pacer_loop::TimerLoop;
use std::rc::Rc;
use std::time::Duration;

struct Done;

impl AnimationListener for Done {
    fn on_animation_end(&mut self, animator: &ValueAnimator) {
        println!("done at fraction {}", animator.animated_fraction());
    }
}

fn main() {
    let timer = Rc::new(TimerLoop::new());
    let factory = PollingAnimatorFactory::new(timer.clone(), timer.clone());

    let animator = factory.create_animator();
    animator.set_duration(Duration::from_millis(200));
    animator.set_int_values(0, 255);
    animator.add_update_listener(|a| {
        println!(
            "alpha {:>3}  (fraction {:.3})",
            a.animated_int_value(),
            a.animated_fraction()
        );
    });
    animator.add_listener(Done);

    animator.start();
    timer.run_until_idle();
}
