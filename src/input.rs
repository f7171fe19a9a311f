//! Keyboard input dispatch.
//!
//! Every key event is either a compositor command (ALT held, key pressed,
//! keysym in the fixed binding table) or pass-through to the focused
//! client. The binding table is immutable for the process lifetime.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::compositor::{
    KeyEvent, KeyState, Keysym, WindowCommands, KEY_BRACKET_RIGHT, KEY_Q, KEY_T, KEY_V,
};
use crate::supervisor::Supervisor;
use crate::views::ViewStack;
use crate::ShellConfig;

/// Compositor command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Terminate the session.
    Quit,
    /// Round-robin focus to the next view.
    CycleView,
    /// Launch the terminal helper.
    LaunchTerminal,
    /// Launch the secondary display helper.
    LaunchVideo,
}

/// Fixed keybinding table, matched with ALT held on key press.
pub const KEY_BINDINGS: [(Keysym, Action); 4] = [
    (KEY_Q, Action::Quit),
    (KEY_BRACKET_RIGHT, Action::CycleView),
    (KEY_T, Action::LaunchTerminal),
    (KEY_V, Action::LaunchVideo),
];

/// What became of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Matched a binding and was consumed by the shell.
    Consumed(Action),
    /// Forwarded to the focused client.
    Forwarded,
}

/// Look up the first bound action among the keysyms a physical key
/// produced.
#[must_use]
pub fn action_for(syms: &[Keysym]) -> Option<Action> {
    syms.iter().find_map(|sym| {
        KEY_BINDINGS
            .iter()
            .find(|(bound, _)| bound == sym)
            .map(|&(_, action)| action)
    })
}

/// Classify and act on one key event.
///
/// With ALT asserted on a press, a table match is consumed: Quit requests
/// event-loop termination via the token, `CycleView` rotates the view
/// stack, and the launch actions start their configured helper commands.
/// Everything else is forwarded — the keyboard device is re-associated
/// with the shared seat first, on every forwarded event, since the seat
/// may switch among keyboards.
pub fn dispatch(
    event: &KeyEvent,
    config: &ShellConfig,
    views: &mut ViewStack,
    supervisor: &Supervisor,
    cancel: &CancellationToken,
    cmds: &mut dyn WindowCommands,
) -> Disposition {
    if event.modifiers.alt() && event.state == KeyState::Pressed {
        if let Some(action) = action_for(&event.syms) {
            debug!(?action, keycode = event.keycode, "keybinding consumed");
            match action {
                Action::Quit => cancel.cancel(),
                Action::CycleView => views.cycle(cmds),
                Action::LaunchTerminal => {
                    supervisor.launch(&config.helpers.terminal);
                }
                Action::LaunchVideo => {
                    supervisor.launch(&config.helpers.video);
                }
            }
            return Disposition::Consumed(action);
        }
    }

    cmds.set_keyboard(event.device);
    cmds.notify_key(event.device, event.time_msec, event.keycode, event.state);
    Disposition::Forwarded
}
