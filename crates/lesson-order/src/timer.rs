//! Timer Abstraction
//!
//! The coordinator bounds every remote call with a timeout. The sleep
//! future comes from the host runtime: `gloo-timers` in the browser, tokio
//! in tests.

use futures::future::LocalBoxFuture;
use std::time::Duration;

pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
