//! Session orchestrator.
//!
//! Single dispatch point for backend lifecycle events, owning the view
//! stack and the supervisor handle. Everything runs on one cooperative
//! event loop; no other thread mutates session state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::compositor::{DeviceId, DeviceKind, Event, OutputId, WindowCommands};
use crate::supervisor::Supervisor;
use crate::views::{View, ViewStack};
use crate::{input, ShellConfig};

/// Explicit session context, constructed once at startup and passed by
/// reference — the shell keeps no process-wide globals beyond the crash
/// descriptor a signal handler needs.
pub struct Session {
    config: Arc<ShellConfig>,
    supervisor: Arc<Supervisor>,
    views: ViewStack,
    cancel: CancellationToken,
    keyboards: Vec<DeviceId>,
    primary_output: Option<OutputId>,
}

impl Session {
    /// A new session with an empty view stack.
    #[must_use]
    pub fn new(
        config: Arc<ShellConfig>,
        supervisor: Arc<Supervisor>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            supervisor,
            views: ViewStack::new(),
            cancel,
            keyboards: Vec::new(),
            primary_output: None,
        }
    }

    /// The view stack (shared, for inspection).
    #[must_use]
    pub fn views(&self) -> &ViewStack {
        &self.views
    }

    /// Keyboard devices announced so far, in arrival order.
    #[must_use]
    pub fn keyboards(&self) -> &[DeviceId] {
        &self.keyboards
    }

    /// Run the cooperative event loop until the Quit command cancels the
    /// token or the backend closes its event channel.
    pub async fn run(
        &mut self,
        cmds: &mut dyn WindowCommands,
        events: &mut mpsc::Receiver<Event>,
    ) {
        info!("session loop running");
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    info!("termination requested, leaving session loop");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        info!("backend event channel closed, leaving session loop");
                        break;
                    };
                    self.handle_event(cmds, event);
                }
            }
        }
    }

    /// Dispatch one lifecycle event.
    pub fn handle_event(&mut self, cmds: &mut dyn WindowCommands, event: Event) {
        match event {
            Event::NewOutput(output) => {
                info!(output = output.0, "new display output");
                if self.primary_output.is_none() {
                    self.primary_output = Some(output);
                }
                cmds.enable_output(output);
            }
            Event::NewInputDevice(device, kind) => {
                if kind == DeviceKind::Keyboard {
                    info!(device = device.0, "new keyboard");
                    cmds.set_keymap(device);
                    cmds.set_keyboard(device);
                    self.keyboards.push(device);
                } else {
                    debug!(device = device.0, "ignoring non-keyboard input device");
                }
            }
            Event::NewToplevel(id) => {
                // Every view is sized to fill the primary output.
                let (width, height) = self
                    .primary_output
                    .map_or((0, 0), |output| cmds.output_size(output));
                info!(view = id.0, width, height, "new toplevel");
                cmds.set_toplevel_fullscreen(id, width, height);
                self.views.register(View::new(id, width, height));
            }
            Event::Map(id) => {
                debug!(view = id.0, "view mapped");
                self.views.mark_mapped(id, cmds);
            }
            Event::Unmap(id) => {
                debug!(view = id.0, "view unmapped");
                self.views.mark_unmapped(id);
            }
            Event::Destroyed(id) => {
                info!(view = id.0, "view destroyed");
                self.views.unregister(id, cmds);
            }
            Event::Key(key_event) => {
                input::dispatch(
                    &key_event,
                    &self.config,
                    &mut self.views,
                    &self.supervisor,
                    &self.cancel,
                    cmds,
                );
            }
            Event::ModifiersChanged(device) => {
                cmds.set_keyboard(device);
                cmds.notify_modifiers(device);
            }
            Event::SelectionRequest(source) => {
                // Always honored.
                cmds.set_selection(source);
            }
        }
    }
}
