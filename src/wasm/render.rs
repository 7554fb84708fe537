use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use super::canvas::CanvasSurface;
use super::js_error;
use crate::animation::Animator;
use crate::input::InputState;

struct LoopState {
    // Holds the animation-frame closure so it can keep calling
    // `request_animation_frame` on itself. The `Option` lets the closure be
    // created first and then look itself up from within.
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    pending: Cell<Option<i32>>,
    running: Cell<bool>,
}

impl LoopState {
    fn request(&self) -> anyhow::Result<()> {
        let window = window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            return Ok(());
        };
        let handle = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.pending.set(Some(handle));
        Ok(())
    }
}

/// Self-rescheduling `requestAnimationFrame` loop driving an [`Animator`].
///
/// Each frame finishes its own work before asking for the next one, so the
/// callback never overlaps itself.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(
        mut animator: Animator,
        mut surface: CanvasSurface,
        input: Rc<RefCell<InputState>>,
    ) -> anyhow::Result<Self> {
        let state = Rc::new(LoopState {
            callback: RefCell::new(None),
            pending: Cell::new(None),
            running: Cell::new(true),
        });

        // The closure only holds a weak handle so `stop` can break the cycle.
        let weak = Rc::downgrade(&state);
        *state.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            if !state.running.get() {
                return;
            }

            let snapshot = *input.borrow();
            animator.frame(&snapshot, &mut surface);

            // schedule next
            if let Err(e) = state.request() {
                log::error!("frame loop halted: {e:#}");
                state.running.set(false);
            }
        }) as Box<dyn FnMut()>));

        state.request()?;
        Ok(Self { state })
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Cancels the pending frame and releases the callback.
    pub fn stop(&self) {
        let was_running = self.state.running.replace(false);
        if let (Some(handle), Some(window)) = (self.state.pending.take(), window()) {
            if let Err(e) = window.cancel_animation_frame(handle) {
                log::warn!("cancel_animation_frame failed: {e:?}");
            }
        }
        self.state.callback.borrow_mut().take();
        if was_running {
            log::info!("frame loop stopped");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
