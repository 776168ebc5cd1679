//! Browser timer for the reorder coordinator

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::time::Duration;

use lesson_order::Timer;

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}
