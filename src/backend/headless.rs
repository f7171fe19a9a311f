//! Headless development backend.
//!
//! Implements the full command surface as debug-logged no-ops and exposes
//! an event channel the embedder (or a test) can feed lifecycle events
//! through. Useful for running the session shell on a machine without DRM
//! access and for exercising the orchestrator end to end.

use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::Backend;
use crate::compositor::{
    DeviceId, Event, KeyState, OutputId, SelectionSource, ViewId, WindowCommands,
};

/// Size reported for every headless output.
const OUTPUT_SIZE: (i32, i32) = (1920, 1080);

/// Event channel depth; lifecycle events are small and consumed inline.
const EVENT_BUFFER: usize = 64;

/// Backend that accepts commands without a display.
#[derive(Debug)]
pub struct Headless {
    socket: String,
}

impl Headless {
    /// A headless backend plus the sender/receiver pair for its event
    /// channel. The sender side stands in for the compositor library's
    /// notification plumbing.
    #[must_use]
    pub fn create(socket: impl Into<String>) -> (Self, mpsc::Sender<Event>, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        (
            Self {
                socket: socket.into(),
            },
            tx,
            rx,
        )
    }
}

impl Backend for Headless {
    fn socket_name(&self) -> &str {
        &self.socket
    }
}

impl WindowCommands for Headless {
    fn set_activated(&mut self, view: ViewId, activated: bool) {
        debug!(view = view.0, activated, "set_activated");
    }

    fn keyboard_enter(&mut self, view: ViewId) {
        debug!(view = view.0, "keyboard_enter");
    }

    fn set_keyboard(&mut self, device: DeviceId) {
        debug!(device = device.0, "set_keyboard");
    }

    fn set_keymap(&mut self, device: DeviceId) {
        debug!(device = device.0, "set_keymap");
    }

    fn notify_key(&mut self, device: DeviceId, time_msec: u32, keycode: u32, state: KeyState) {
        debug!(device = device.0, time_msec, keycode, ?state, "notify_key");
    }

    fn notify_modifiers(&mut self, device: DeviceId) {
        debug!(device = device.0, "notify_modifiers");
    }

    fn set_selection(&mut self, source: SelectionSource) {
        debug!(source = source.0, "set_selection");
    }

    fn set_toplevel_fullscreen(&mut self, view: ViewId, width: i32, height: i32) {
        debug!(view = view.0, width, height, "set_toplevel_fullscreen");
    }

    fn enable_output(&mut self, output: OutputId) {
        debug!(output = output.0, "enable_output");
    }

    fn output_size(&mut self, output: OutputId) -> (i32, i32) {
        debug!(output = output.0, "output_size");
        OUTPUT_SIZE
    }

    fn layout_to_output_coords(&mut self, output: OutputId, x: f64, y: f64) -> (f64, f64) {
        debug!(output = output.0, x, y, "layout_to_output_coords");
        (x, y)
    }
}
