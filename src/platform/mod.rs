//! Platform abstraction layer
//!
//! Frame scheduling: one simulation tick and one redraw per display frame.
//! In the browser frames come from `requestAnimationFrame`; natively the
//! loop is driven synchronously for headless runs.

use std::cell::Cell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

#[derive(Debug, Default)]
struct LoopState {
    stopped: Cell<bool>,
    /// Outstanding frame request, if any
    pending: Cell<Option<i32>>,
    frames: Cell<u64>,
}

/// Handle to a running frame loop
///
/// Clones share the same loop, so any of them can stop it.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        !self.state.stopped.get()
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.state.frames.get()
    }

    /// Stop the loop
    ///
    /// Cancels the outstanding frame request. A frame that is already
    /// executing finishes but does not schedule another. Calling this again
    /// does nothing.
    pub fn stop(&self) {
        if self.state.stopped.replace(true) {
            return;
        }
        if let Some(id) = self.state.pending.take() {
            cancel_frame(id);
        }
        log::info!("Frame loop stopped after {} frames", self.frames());
    }

    /// Called at the top of every frame; `false` means the loop is over
    fn begin_frame(&self) -> bool {
        self.state.pending.set(None);
        if self.state.stopped.get() {
            return false;
        }
        self.state.frames.set(self.state.frames.get() + 1);
        true
    }

    /// Run frames back to back until stopped or `max_frames` have run
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_headless<F: FnMut(&FrameLoop)>(&self, max_frames: u64, mut frame: F) {
        while self.frames() < max_frames && self.begin_frame() {
            frame(self);
        }
    }

    /// Drive `frame` from `requestAnimationFrame` until stopped
    ///
    /// The callback receives the frame timestamp in milliseconds.
    #[cfg(target_arch = "wasm32")]
    pub fn start<F: FnMut(f64) + 'static>(&self, frame: F) {
        log::info!("Frame loop starting");
        schedule(self.clone(), Rc::new(RefCell::new(frame)));
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule<F: FnMut(f64) + 'static>(handle: FrameLoop, frame: Rc<RefCell<F>>) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        log::error!("No window to schedule frames on");
        return;
    };

    let next = handle.clone();
    // once_into_js frees the closure after it runs
    let callback = Closure::once_into_js(move |time: f64| {
        if !next.begin_frame() {
            return;
        }
        {
            let mut frame_fn = frame.borrow_mut();
            (*frame_fn)(time);
        }
        if next.is_running() {
            schedule(next, frame);
        }
    });

    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => handle.state.pending.set(Some(id)),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn cancel_frame(id: i32) {
    if let Some(window) = web_sys::window() {
        let _ = window.cancel_animation_frame(id);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn cancel_frame(_id: i32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_idempotent() {
        let frame_loop = FrameLoop::new();
        assert!(frame_loop.is_running());

        frame_loop.stop();
        frame_loop.stop();
        frame_loop.clone().stop();

        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.frames(), 0);
    }

    #[test]
    fn test_headless_runs_until_cap() {
        let frame_loop = FrameLoop::new();
        let mut count = 0;
        frame_loop.run_headless(10, |_| count += 1);
        assert_eq!(count, 10);
        assert_eq!(frame_loop.frames(), 10);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn test_stop_from_inside_frame() {
        let frame_loop = FrameLoop::new();
        let mut count = 0;
        frame_loop.run_headless(100, |handle| {
            count += 1;
            if count == 3 {
                handle.stop();
                // Second stop in the same frame is harmless
                handle.stop();
            }
        });
        assert_eq!(count, 3);
        assert!(!frame_loop.is_running());

        // A stopped loop never runs again
        frame_loop.run_headless(100, |_| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_stop_clears_pending_request() {
        let frame_loop = FrameLoop::new();
        frame_loop.state.pending.set(Some(7));
        frame_loop.stop();
        assert_eq!(frame_loop.state.pending.get(), None);
    }
}
