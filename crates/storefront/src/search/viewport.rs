//! Throttled viewport evaluation.
//!
//! Resize events arrive far faster than the layout needs to react. [`ViewportObserver`] runs
//! them through a [`Throttler`], so the render mode is re-evaluated at most once per interval,
//! with the width of the event that opened the interval.

use std::sync::Arc;
use std::time::Duration;
use store_framework::Throttler;
use tokio::sync::watch;
use tracing::debug;

/// How the product list is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Paged grid with navigation buttons.
    Paged,
    /// Virtualized list with infinite scroll.
    Virtualized,
}

impl RenderMode {
    pub fn for_width(width: u32, virtualize_below: u32) -> Self {
        if width >= virtualize_below {
            RenderMode::Paged
        } else {
            RenderMode::Virtualized
        }
    }
}

pub struct ViewportObserver {
    mode: Arc<watch::Sender<RenderMode>>,
    throttle: Throttler<u32>,
}

impl ViewportObserver {
    pub fn new(initial_width: u32, virtualize_below: u32, interval: Duration) -> Self {
        let mode = Arc::new(watch::Sender::new(RenderMode::for_width(
            initial_width,
            virtualize_below,
        )));
        let publisher = Arc::clone(&mode);
        let throttle = Throttler::new(interval, move |width: u32| {
            let next = RenderMode::for_width(width, virtualize_below);
            let changed = publisher.send_if_modified(|current| {
                let changed = *current != next;
                *current = next;
                changed
            });
            if changed {
                debug!(width, mode = ?next, "Render mode changed");
            }
            std::future::ready(())
        });
        Self { mode, throttle }
    }

    /// Reports a new viewport width.
    pub fn on_resize(&self, width: u32) {
        self.throttle.call(width);
    }

    pub fn mode(&self) -> RenderMode {
        *self.mode.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderMode> {
        self.mode.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_breakpoint() {
        assert_eq!(RenderMode::for_width(1024, 768), RenderMode::Paged);
        assert_eq!(RenderMode::for_width(768, 768), RenderMode::Paged);
        assert_eq!(RenderMode::for_width(767, 768), RenderMode::Virtualized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_follows_window_opening_width() {
        let viewport = ViewportObserver::new(1024, 768, Duration::from_millis(200));
        assert_eq!(viewport.mode(), RenderMode::Paged);

        viewport.on_resize(500);
        viewport.on_resize(1200);
        sleep(Duration::from_millis(250)).await;

        // 1200 was dropped: the window was opened by 500.
        assert_eq!(viewport.mode(), RenderMode::Virtualized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_change_before_interval() {
        let viewport = ViewportObserver::new(1024, 768, Duration::from_millis(200));
        viewport.on_resize(300);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(viewport.mode(), RenderMode::Paged);
    }
}
