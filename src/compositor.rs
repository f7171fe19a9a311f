//! Interface to the external windowing backend.
//!
//! The backend owns rendering, protocol objects, and the event loop
//! plumbing. The shell sees it through two narrow surfaces: a tagged
//! [`Event`] delivered for each lifecycle notification, and the imperative
//! [`WindowCommands`] trait the shell issues commands through. Each event
//! variant carries an explicit handle to the originating entity, so handlers
//! never have to reconstruct context.

/// Opaque handle to a display output (monitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputId(pub u64);

/// Opaque handle to an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

/// Opaque handle to a top-level application window surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Opaque handle to a selection (clipboard) data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionSource(pub u64);

/// Kind of input device announced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// A keyboard; assigned to the shared seat and given a keymap.
    Keyboard,
    /// Anything else (pointer, touch); the shell ignores it.
    Other,
}

/// Key press/release state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Key went down.
    Pressed,
    /// Key went up.
    Released,
}

/// Translated keyboard symbol (xkb keysym value).
pub type Keysym = u32;

/// Keysym for `q`.
pub const KEY_Q: Keysym = 0x0071;
/// Keysym for `]`.
pub const KEY_BRACKET_RIGHT: Keysym = 0x005d;
/// Keysym for `t`.
pub const KEY_T: Keysym = 0x0074;
/// Keysym for `v`.
pub const KEY_V: Keysym = 0x0076;

/// Modifier bitmask snapshot taken when the event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers(pub u32);

impl Modifiers {
    /// ALT modifier bit.
    pub const ALT: u32 = 1 << 3;

    /// Whether ALT is asserted.
    #[must_use]
    pub fn alt(self) -> bool {
        self.0 & Self::ALT != 0
    }
}

/// A single key event, already translated by the backend's keymap.
///
/// `syms` holds every keysym the physical key produces under the current
/// layout; a binding matches if any of them does.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Keyboard device the event came from.
    pub device: DeviceId,
    /// Event timestamp in milliseconds.
    pub time_msec: u32,
    /// Raw keycode, forwarded untranslated to clients.
    pub keycode: u32,
    /// Press or release.
    pub state: KeyState,
    /// Translated keysyms for the key.
    pub syms: Vec<Keysym>,
    /// Modifier state at event time.
    pub modifiers: Modifiers,
}

/// Lifecycle notification delivered by the backend.
#[derive(Debug, Clone)]
pub enum Event {
    /// A display output became available.
    NewOutput(OutputId),
    /// An input device became available.
    NewInputDevice(DeviceId, DeviceKind),
    /// A client created a new top-level window surface.
    NewToplevel(ViewId),
    /// The surface is ready to be shown on-screen.
    Map(ViewId),
    /// The surface should no longer be shown.
    Unmap(ViewId),
    /// The surface is gone and will never be shown again.
    Destroyed(ViewId),
    /// A key was pressed or released.
    Key(KeyEvent),
    /// Modifier state changed on a keyboard.
    ModifiersChanged(DeviceId),
    /// A client asked to set the selection (copy).
    SelectionRequest(SelectionSource),
}

/// Imperative commands the shell issues back to the backend.
///
/// Implementations must be cheap and non-blocking; they run inline on the
/// single session event loop.
pub trait WindowCommands {
    /// Mark a view as foreground (`true`) or background (`false`) so the
    /// client can repaint accordingly.
    fn set_activated(&mut self, view: ViewId, activated: bool);

    /// Direct keyboard focus at the view's surface; the backend keeps
    /// routing key events there until told otherwise.
    fn keyboard_enter(&mut self, view: ViewId);

    /// Associate a keyboard device with the shared seat. The seat holds one
    /// keyboard at a time but may switch among several devices.
    fn set_keyboard(&mut self, device: DeviceId);

    /// Compile and attach the default keymap to a keyboard device.
    fn set_keymap(&mut self, device: DeviceId);

    /// Forward a key event to the focused client.
    fn notify_key(&mut self, device: DeviceId, time_msec: u32, keycode: u32, state: KeyState);

    /// Forward current modifier state to the focused client.
    fn notify_modifiers(&mut self, device: DeviceId);

    /// Honor a client's selection (copy) request.
    fn set_selection(&mut self, source: SelectionSource);

    /// Size a toplevel to fill an output and mark it fullscreen.
    fn set_toplevel_fullscreen(&mut self, view: ViewId, width: i32, height: i32);

    /// Enable an output at its preferred mode and commit.
    fn enable_output(&mut self, output: OutputId);

    /// Effective pixel size of an output.
    fn output_size(&mut self, output: OutputId) -> (i32, i32);

    /// Translate layout coordinates to output-local coordinates.
    fn layout_to_output_coords(&mut self, output: OutputId, x: f64, y: f64) -> (f64, f64);
}
