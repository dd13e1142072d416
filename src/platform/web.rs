//! Browser frame loop
//!
//! `WebRunner` owns a session, drives it from `requestAnimationFrame` and
//! turns keyboard/touch events into intents. Drawing stays in JS: the
//! `on_frame` hook runs after every update and reads state through the
//! getters. `stop()` (or dropping the runner) cancels the pending frame and
//! removes the listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, TouchEvent};

use super::input::{intent_for_key, intent_for_touch};
use crate::Tuning;
use crate::sim::{FrameView, GameState, Intent, write_obstacle_transforms};

type FrameCallback = Closure<dyn FnMut(f64)>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

struct Shared {
    state: GameState,
    on_frame: Option<js_sys::Function>,
    frame_handle: Option<i32>,
    running: bool,
}

#[wasm_bindgen]
pub struct WebRunner {
    shared: Rc<RefCell<Shared>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    touchstart: Option<Closure<dyn FnMut(TouchEvent)>>,
}

#[wasm_bindgen]
impl WebRunner {
    /// Session with default tuning. Seeds from the clock when `seed` is omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebRunner {
        Self::from_state(GameState::new(session_seed(seed)))
    }

    /// Session with tuning overrides given as JSON
    pub fn with_tuning(seed: Option<f64>, tuning_json: &str) -> Result<WebRunner, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let state = GameState::with_tuning(session_seed(seed), tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_state(state))
    }

    /// JS function called after each simulated frame
    pub fn set_on_frame(&mut self, callback: Option<js_sys::Function>) {
        self.shared.borrow_mut().on_frame = callback;
    }

    /// Install input listeners and start the frame loop
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.shared.borrow().running {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let shared = self.shared.clone();
        let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(intent) = intent_for_key(&event.code()) {
                shared.borrow_mut().state.handle_intent(intent);
            }
        });
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        self.keydown = Some(keydown);

        let shared = self.shared.clone();
        let touchstart = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let Some(touch) = event.changed_touches().get(0) else {
                return;
            };
            let width = web_sys::window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            let mut shared = shared.borrow_mut();
            let intent = intent_for_touch(touch.client_x() as f32, width as f32, shared.state.phase);
            shared.state.handle_intent(intent);
        });
        window.add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
        self.touchstart = Some(touchstart);

        // The loop only holds a weak reference to itself; the runner owns it
        let shared = self.shared.clone();
        let this: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&self.frame_callback);
        *self.frame_callback.borrow_mut() = Some(Closure::new(move |now: f64| {
            let hook = {
                let mut shared = shared.borrow_mut();
                shared.frame_handle = None;
                if !shared.running {
                    return;
                }
                shared.state.frame(now);
                shared.on_frame.clone()
            };

            if let Some(hook) = hook {
                if let Err(err) = hook.call0(&JsValue::NULL) {
                    log::warn!("on_frame hook failed: {:?}", err);
                }
            }

            // The hook may have stopped the runner
            if shared.borrow().running {
                if let Some(callback) = this.upgrade() {
                    schedule(&shared, &callback);
                }
            }
        }));

        self.shared.borrow_mut().running = true;
        schedule(&self.shared, &self.frame_callback);
        log::info!("Frame loop started");
        Ok(())
    }

    /// Cancel the pending frame and remove input listeners
    pub fn stop(&mut self) {
        let (was_running, handle) = {
            let mut shared = self.shared.borrow_mut();
            let was_running = std::mem::replace(&mut shared.running, false);
            (was_running, shared.frame_handle.take())
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = handle {
            if let Err(err) = window.cancel_animation_frame(handle) {
                log::error!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        if let Some(keydown) = self.keydown.take() {
            if let Err(err) = window
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            {
                log::error!("Removing keydown listener failed: {:?}", err);
            }
        }
        if let Some(touchstart) = self.touchstart.take() {
            if let Err(err) = window.remove_event_listener_with_callback(
                "touchstart",
                touchstart.as_ref().unchecked_ref(),
            ) {
                log::error!("Removing touchstart listener failed: {:?}", err);
            }
        }
        if was_running {
            log::info!("Frame loop stopped");
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shared.borrow_mut().state.handle_intent(Intent::MoveLeft)
    }

    pub fn move_right(&mut self) -> bool {
        self.shared.borrow_mut().state.handle_intent(Intent::MoveRight)
    }

    pub fn restart(&mut self) -> bool {
        self.shared.borrow_mut().state.handle_intent(Intent::Restart)
    }

    pub fn score(&self) -> f64 {
        self.shared.borrow().state.score() as f64
    }

    pub fn best_score(&self) -> f64 {
        self.shared.borrow().state.best_score() as f64
    }

    pub fn is_game_over(&self) -> bool {
        self.shared.borrow().state.is_game_over()
    }

    pub fn player_x(&self) -> f32 {
        self.shared.borrow().state.player.pos.x
    }

    pub fn player_lean(&self) -> f32 {
        self.shared.borrow().state.player.lean
    }

    /// Per-slot `[visible, x, y, z, rx, ry, rz]`, flattened
    pub fn obstacle_transforms(&self) -> Vec<f32> {
        let mut out = Vec::new();
        write_obstacle_transforms(&self.shared.borrow().state, &mut out);
        out
    }

    /// Drain pending game events as a JSON array
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        let events: Vec<_> = self.shared.borrow_mut().state.drain_events().collect();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Full frame snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        FrameView::capture(&self.shared.borrow().state)
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WebRunner {
    fn from_state(state: GameState) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                state,
                on_frame: None,
                frame_handle: None,
                running: false,
            })),
            frame_callback: Rc::new(RefCell::new(None)),
            keydown: None,
            touchstart: None,
        }
    }
}

impl Drop for WebRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn session_seed(seed: Option<f64>) -> u64 {
    seed.unwrap_or_else(js_sys::Date::now) as u64
}

fn schedule(shared: &Rc<RefCell<Shared>>, callback: &RefCell<Option<FrameCallback>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => shared.borrow_mut().frame_handle = Some(handle),
        Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
    }
}
