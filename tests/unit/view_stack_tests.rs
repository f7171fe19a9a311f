//! View stack focus/activation state machine tests.

use wayshell::compositor::ViewId;
use wayshell::views::{View, ViewStack};

use super::support::{Cmd, RecordingCommands};

fn view(id: u64) -> View {
    View::new(ViewId(id), 1280, 720)
}

fn stack_of(ids: &[u64]) -> ViewStack {
    let mut stack = ViewStack::new();
    for &id in ids {
        stack.register(view(id));
    }
    stack
}

fn order(stack: &ViewStack) -> Vec<u64> {
    stack.order().iter().map(|v| v.0).collect()
}

#[test]
fn registration_is_front_first() {
    let stack = stack_of(&[1, 2, 3]);
    assert_eq!(order(&stack), vec![3, 2, 1]);
}

#[test]
fn duplicate_registration_is_ignored() {
    let mut stack = stack_of(&[1, 2]);
    stack.register(view(1));
    assert_eq!(order(&stack), vec![2, 1]);
}

#[test]
fn focus_moves_view_to_front_and_activates() {
    let mut stack = stack_of(&[1, 2, 3]);
    let mut cmds = RecordingCommands::new();

    stack.focus(ViewId(1), &mut cmds);

    assert_eq!(order(&stack), vec![1, 3, 2]);
    assert_eq!(stack.active(), Some(ViewId(1)));
    assert_eq!(cmds.activations(), vec![(1, true)]);
    assert!(cmds.commands.contains(&Cmd::KeyboardEnter(1)));
}

#[test]
fn refocusing_active_view_issues_no_commands() {
    let mut stack = stack_of(&[1, 2]);
    let mut cmds = RecordingCommands::new();

    stack.focus(ViewId(2), &mut cmds);
    cmds.clear();
    stack.focus(ViewId(2), &mut cmds);

    assert!(cmds.commands.is_empty());
}

#[test]
fn focus_change_deactivates_previous() {
    let mut stack = stack_of(&[1, 2]);
    let mut cmds = RecordingCommands::new();

    stack.focus(ViewId(2), &mut cmds);
    cmds.clear();
    stack.focus(ViewId(1), &mut cmds);

    assert_eq!(cmds.activations(), vec![(2, false), (1, true)]);
    assert_eq!(stack.front(), Some(ViewId(1)));
}

#[test]
fn cycle_on_empty_stack_is_noop() {
    let mut stack = ViewStack::new();
    let mut cmds = RecordingCommands::new();

    stack.cycle(&mut cmds);

    assert!(cmds.commands.is_empty());
}

#[test]
fn cycle_on_single_view_is_noop() {
    let mut stack = stack_of(&[1]);
    let mut cmds = RecordingCommands::new();

    stack.cycle(&mut cmds);

    assert!(cmds.commands.is_empty());
    assert_eq!(order(&stack), vec![1]);
}

#[test]
fn cycle_is_deterministic_round_robin() {
    // Register A=1, B=2, C=3 → order [C, B, A].
    let mut stack = stack_of(&[1, 2, 3]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(3), &mut cmds);
    cmds.clear();

    stack.cycle(&mut cmds);
    assert_eq!(stack.front(), Some(ViewId(2)));
    assert_eq!(order(&stack), vec![2, 1, 3]);

    stack.cycle(&mut cmds);
    assert_eq!(stack.front(), Some(ViewId(1)));
    assert_eq!(order(&stack), vec![1, 3, 2]);
}

#[test]
fn cycle_visits_every_view() {
    let mut stack = stack_of(&[1, 2, 3]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(3), &mut cmds);

    let mut focused = vec![stack.front().unwrap().0];
    for _ in 0..3 {
        stack.cycle(&mut cmds);
        focused.push(stack.front().unwrap().0);
    }

    // Full rotation returns to the start and visited each view once.
    assert_eq!(focused, vec![3, 2, 1, 3]);
}

#[test]
fn unregister_focused_view_refocuses_new_front_once() {
    let mut stack = stack_of(&[1, 2]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(2), &mut cmds);
    cmds.clear();

    stack.unregister(ViewId(2), &mut cmds);

    assert_eq!(order(&stack), vec![1]);
    // Exactly one activation, for the new front; the removed view is gone
    // so no deactivate is sent.
    assert_eq!(cmds.activations(), vec![(1, true)]);
    assert_eq!(stack.active(), Some(ViewId(1)));
}

#[test]
fn unregister_last_view_clears_focus_without_commands() {
    let mut stack = stack_of(&[1]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(1), &mut cmds);
    cmds.clear();

    stack.unregister(ViewId(1), &mut cmds);

    assert!(stack.is_empty());
    assert_eq!(stack.active(), None);
    assert!(cmds.commands.is_empty());
}

#[test]
fn unregister_background_view_issues_no_commands() {
    let mut stack = stack_of(&[1, 2, 3]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(3), &mut cmds);
    cmds.clear();

    stack.unregister(ViewId(1), &mut cmds);

    assert_eq!(order(&stack), vec![3, 2]);
    assert!(cmds.commands.is_empty());
}

#[test]
fn map_focuses_view() {
    let mut stack = stack_of(&[1, 2]);
    let mut cmds = RecordingCommands::new();
    stack.focus(ViewId(1), &mut cmds);
    cmds.clear();

    // View 2 was registered above view 1 but never activated; mapping a
    // fresh registration takes focus.
    stack.register(view(3));
    stack.mark_mapped(ViewId(3), &mut cmds);

    assert_eq!(stack.front(), Some(ViewId(3)));
    assert_eq!(cmds.activations(), vec![(1, false), (3, true)]);
}

#[test]
fn unmap_keeps_view_in_stack() {
    let mut stack = stack_of(&[1, 2]);
    let mut cmds = RecordingCommands::new();
    stack.mark_mapped(ViewId(2), &mut cmds);

    stack.mark_unmapped(ViewId(2));

    assert_eq!(order(&stack), vec![2, 1]);
    assert!(!stack.get(ViewId(2)).unwrap().mapped);
    assert_eq!(stack.active(), Some(ViewId(2)));
}

#[test]
fn render_order_is_back_to_front_and_mapped_only() {
    let mut stack = stack_of(&[1, 2, 3]);
    let mut cmds = RecordingCommands::new();
    stack.mark_mapped(ViewId(1), &mut cmds);
    stack.mark_mapped(ViewId(3), &mut cmds);

    let rendered: Vec<u64> = stack.render_order().map(|v| v.id.0).collect();

    // Unmapped view 2 is excluded; bottom-most mapped view first.
    assert_eq!(rendered, vec![1, 3]);
}

#[test]
fn no_duplicates_after_mixed_operations() {
    let mut stack = stack_of(&[1, 2, 3, 4]);
    let mut cmds = RecordingCommands::new();

    stack.focus(ViewId(2), &mut cmds);
    stack.cycle(&mut cmds);
    stack.unregister(ViewId(4), &mut cmds);
    stack.cycle(&mut cmds);
    stack.register(view(5));
    stack.mark_mapped(ViewId(5), &mut cmds);
    stack.cycle(&mut cmds);

    let mut ids = order(&stack);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), stack.len());
}
