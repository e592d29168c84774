//! Screen wake lock collaborator.
//!
//! Wraps `navigator.wakeLock` behind a cloneable handle: `request` is
//! fire-and-forget over the returned promise, `release` drops the held
//! sentinel, and `is_held` reports whether a sentinel is currently live.
//! The sentinel's `release` event flips the held flag, so a lock the
//! system revoked (tab backgrounded, lid closed) shows up as not held and
//! the run loop can re-request it. All of it is best-effort: a rejected
//! request only means the screen may sleep.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_utils::window;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{WakeLockSentinel, WakeLockType};

#[derive(Clone, Default)]
pub struct WakeLockHandle {
    sentinel: Rc<RefCell<Option<WakeLockSentinel>>>,
    held: Rc<Cell<bool>>,
}

impl WakeLockHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Ask the platform for a screen wake lock. No-op when already held.
    pub fn request(&self) {
        if self.held.get() {
            return;
        }
        let sentinel_slot = self.sentinel.clone();
        let held = self.held.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let wake_lock = window().navigator().wake_lock();
            match JsFuture::from(wake_lock.request(WakeLockType::Screen)).await {
                Ok(value) => {
                    let sentinel: WakeLockSentinel = value.unchecked_into();
                    let held_on_release = held.clone();
                    let on_release = Closure::<dyn FnMut()>::new(move || {
                        log::debug!("wake lock released by the platform");
                        held_on_release.set(false);
                    });
                    sentinel.set_onrelease(Some(on_release.as_ref().unchecked_ref()));
                    on_release.forget();
                    held.set(true);
                    *sentinel_slot.borrow_mut() = Some(sentinel);
                    log::debug!("wake lock acquired");
                }
                Err(err) => {
                    log::warn!("wake lock request failed: {err:?}");
                    held.set(false);
                }
            }
        });
    }

    /// Drop the held lock, if any. No-op when not held.
    pub fn release(&self) {
        if let Some(sentinel) = self.sentinel.borrow_mut().take() {
            let _ = sentinel.release();
        }
        self.held.set(false);
    }
}
