//! Shared test doubles.

use wayshell::compositor::{
    DeviceId, KeyEvent, KeyState, Keysym, Modifiers, OutputId, SelectionSource, ViewId,
    WindowCommands,
};

/// One recorded backend command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    SetActivated(u64, bool),
    KeyboardEnter(u64),
    SetKeyboard(u64),
    SetKeymap(u64),
    NotifyKey { device: u64, keycode: u32, state: KeyState },
    NotifyModifiers(u64),
    SetSelection(u64),
    SetToplevelFullscreen(u64, i32, i32),
    EnableOutput(u64),
}

/// Command sink that records everything the shell issues.
#[derive(Debug, Default)]
pub struct RecordingCommands {
    pub commands: Vec<Cmd>,
}

impl RecordingCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded activation commands only, in order.
    pub fn activations(&self) -> Vec<(u64, bool)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Cmd::SetActivated(view, state) => Some((*view, *state)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl WindowCommands for RecordingCommands {
    fn set_activated(&mut self, view: ViewId, activated: bool) {
        self.commands.push(Cmd::SetActivated(view.0, activated));
    }

    fn keyboard_enter(&mut self, view: ViewId) {
        self.commands.push(Cmd::KeyboardEnter(view.0));
    }

    fn set_keyboard(&mut self, device: DeviceId) {
        self.commands.push(Cmd::SetKeyboard(device.0));
    }

    fn set_keymap(&mut self, device: DeviceId) {
        self.commands.push(Cmd::SetKeymap(device.0));
    }

    fn notify_key(&mut self, device: DeviceId, _time_msec: u32, keycode: u32, state: KeyState) {
        self.commands.push(Cmd::NotifyKey {
            device: device.0,
            keycode,
            state,
        });
    }

    fn notify_modifiers(&mut self, device: DeviceId) {
        self.commands.push(Cmd::NotifyModifiers(device.0));
    }

    fn set_selection(&mut self, source: SelectionSource) {
        self.commands.push(Cmd::SetSelection(source.0));
    }

    fn set_toplevel_fullscreen(&mut self, view: ViewId, width: i32, height: i32) {
        self.commands
            .push(Cmd::SetToplevelFullscreen(view.0, width, height));
    }

    fn enable_output(&mut self, output: OutputId) {
        self.commands.push(Cmd::EnableOutput(output.0));
    }

    fn output_size(&mut self, _output: OutputId) -> (i32, i32) {
        (1280, 720)
    }

    fn layout_to_output_coords(&mut self, _output: OutputId, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

/// A key event with the given syms and modifier state.
pub fn key_event(syms: &[Keysym], alt: bool, state: KeyState) -> KeyEvent {
    KeyEvent {
        device: DeviceId(7),
        time_msec: 1000,
        keycode: 30,
        state,
        syms: syms.to_vec(),
        modifiers: if alt {
            Modifiers(Modifiers::ALT)
        } else {
            Modifiers::default()
        },
    }
}
