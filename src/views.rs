//! View registry and focus state machine.
//!
//! One ordered sequence holds every top-level window the backend has
//! announced. The front of the sequence is the focused view whenever focus
//! is established; focus changes always issue a deactivate/activate command
//! pair through [`WindowCommands`] unless nothing would change.

use std::collections::VecDeque;

use tracing::debug;

use crate::compositor::{ViewId, WindowCommands};

/// A tracked top-level window, independent of its on-screen pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Backend handle for the window surface.
    pub id: ViewId,
    /// Layout x coordinate.
    pub x: i32,
    /// Layout y coordinate.
    pub y: i32,
    /// Width in layout pixels.
    pub width: i32,
    /// Height in layout pixels.
    pub height: i32,
    /// Whether the surface is currently mapped (ready to display).
    pub mapped: bool,
}

impl View {
    /// A fresh, unmapped view at the layout origin.
    #[must_use]
    pub fn new(id: ViewId, width: i32, height: i32) -> Self {
        Self {
            id,
            x: 0,
            y: 0,
            width,
            height,
            mapped: false,
        }
    }
}

/// Ordered view sequence with focus/activation semantics.
///
/// `active` records the view an activation command pair has been established
/// for — the mirror of the seat's focused surface. The focused view's
/// *identity* is still always the front of the sequence; `active` only
/// distinguishes "front and activated" from "front but not yet activated"
/// (a freshly registered view, or the front after the activated view was
/// unregistered).
#[derive(Debug, Default)]
pub struct ViewStack {
    views: VecDeque<View>,
    active: Option<ViewId>,
}

impl ViewStack {
    /// An empty stack with no focus established.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no views are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Identity of the front (topmost) view, if any.
    #[must_use]
    pub fn front(&self) -> Option<ViewId> {
        self.views.front().map(|v| v.id)
    }

    /// View the last activation was established for, if any.
    #[must_use]
    pub fn active(&self) -> Option<ViewId> {
        self.active
    }

    /// Front-to-back order of registered view identities.
    #[must_use]
    pub fn order(&self) -> Vec<ViewId> {
        self.views.iter().map(|v| v.id).collect()
    }

    /// Mapped views in back-to-front order, for bottom-up rendering by the
    /// backend. Unmapped views stay registered but are excluded here.
    pub fn render_order(&self) -> impl Iterator<Item = &View> {
        self.views.iter().rev().filter(|v| v.mapped)
    }

    /// Shared access to a view by identity.
    #[must_use]
    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Insert a new view at the front of the sequence.
    ///
    /// Newly registered views become topmost but are not activated until
    /// mapped. Re-registering a known identity is ignored; the sequence
    /// never contains duplicates.
    pub fn register(&mut self, view: View) {
        if self.get(view.id).is_some() {
            debug!(view = view.id.0, "ignoring duplicate view registration");
            return;
        }
        self.views.push_front(view);
    }

    /// Give keyboard focus to a view.
    ///
    /// No-op when the view is already the activated front. Otherwise the
    /// previously activated view (if any) is deactivated, the view moves to
    /// the front, is activated, and keyboard focus is pointed at its
    /// surface.
    pub fn focus(&mut self, id: ViewId, cmds: &mut dyn WindowCommands) {
        if self.active == Some(id) {
            return;
        }
        if self.get(id).is_none() {
            debug!(view = id.0, "focus requested for unknown view");
            return;
        }

        if let Some(prev) = self.active {
            // The activated view may already have been unregistered.
            if self.get(prev).is_some() {
                cmds.set_activated(prev, false);
            }
        }

        self.raise(id);
        cmds.set_activated(id, true);
        cmds.keyboard_enter(id);
        self.active = Some(id);
    }

    /// Round-robin to the next view.
    ///
    /// With fewer than two views this is a no-op. Otherwise the second
    /// element is focused and the previous front falls to the bottom, so
    /// repeated cycling visits every view in recency order.
    pub fn cycle(&mut self, cmds: &mut dyn WindowCommands) {
        if self.views.len() < 2 {
            return;
        }
        let current = self.views[0].id;
        let next = self.views[1].id;
        self.focus(next, cmds);

        // `next` is now at the front and `current` sits right behind it;
        // send `current` to the back to complete the rotation.
        if let Some(pos) = self.views.iter().position(|v| v.id == current) {
            if let Some(view) = self.views.remove(pos) {
                self.views.push_back(view);
            }
        }
    }

    /// Remove a view unconditionally.
    ///
    /// If it was the activated view, focus state is cleared first. A
    /// non-empty remainder re-establishes focus on the new front (one
    /// activation command); an empty remainder issues no commands.
    pub fn unregister(&mut self, id: ViewId, cmds: &mut dyn WindowCommands) {
        let Some(pos) = self.views.iter().position(|v| v.id == id) else {
            return;
        };
        self.views.remove(pos);

        if self.active == Some(id) {
            self.active = None;
        }
        if let Some(front) = self.front() {
            self.focus(front, cmds);
        }
    }

    /// Mark a view as mapped and focus it.
    ///
    /// Mapping is the presentation-layer signal that the surface is ready
    /// to display; it is also the point where a new view first takes focus.
    pub fn mark_mapped(&mut self, id: ViewId, cmds: &mut dyn WindowCommands) {
        if let Some(view) = self.views.iter_mut().find(|v| v.id == id) {
            view.mapped = true;
            self.focus(id, cmds);
        }
    }

    /// Mark a view as unmapped.
    ///
    /// The view stays in the stack and keeps its position; only rendering
    /// enumeration excludes it. Focus is untouched.
    pub fn mark_unmapped(&mut self, id: ViewId) {
        if let Some(view) = self.views.iter_mut().find(|v| v.id == id) {
            view.mapped = false;
        }
    }

    fn raise(&mut self, id: ViewId) {
        if let Some(pos) = self.views.iter().position(|v| v.id == id) {
            if let Some(view) = self.views.remove(pos) {
                self.views.push_front(view);
            }
        }
    }
}
