use hexview_core::{
    Action, Column, Focus, HeadlessHost, HexViewer, Key, KeyEvent, KeyOutcome, LayoutAction,
    MountedRange, PointerAction, ScrollAlign, ScrollRequest, SearchAction, SelectionRange,
};
use pretty_assertions::assert_eq;

const COLUMNS: usize = 24;

fn mounted_viewer(len: usize) -> (HexViewer, HeadlessHost) {
    let mut viewer = HexViewer::new(vec![0x41; len]);
    let mut host = HeadlessHost::default();
    viewer.mount(&mut host);
    let window = MountedRange::from_rows(0..=9, 0..=14, COLUMNS, len).unwrap();
    viewer.dispatch_with(Action::Layout(LayoutAction::RangeRendered(window)), &mut host);
    (viewer, host)
}

fn click(viewer: &mut HexViewer, host: &mut HeadlessHost, index: usize) {
    viewer.dispatch_with(
        Action::Pointer(PointerAction::Down {
            index,
            column: Column::Hex,
        }),
        host,
    );
    viewer.dispatch_with(Action::Pointer(PointerAction::Up { index }), host);
}

fn press(viewer: &mut HexViewer, host: &mut HeadlessHost, key: Key) -> KeyOutcome {
    viewer.handle_key(KeyEvent::new(key), host)
}

#[test]
fn body_navigation() {
    let (mut viewer, mut host) = mounted_viewer(1024);
    click(&mut viewer, &mut host, 0);
    assert_eq!(viewer.state().layout.focus, Focus::Body);

    assert_eq!(press(&mut viewer, &mut host, Key::ArrowDown), KeyOutcome::Consumed);
    assert_eq!(viewer.state().cursor.index, Some(24));
    assert_eq!(press(&mut viewer, &mut host, Key::ArrowRight), KeyOutcome::Consumed);
    assert_eq!(viewer.state().cursor.index, Some(25));
    assert_eq!(press(&mut viewer, &mut host, Key::PageDown), KeyOutcome::Consumed);
    assert_eq!(viewer.state().cursor.index, Some(25 + 10 * COLUMNS));
    assert_eq!(
        host.virtualizer.requests(),
        &[ScrollRequest {
            row: (25 + 10 * COLUMNS) / COLUMNS,
            align: ScrollAlign::Include,
        }]
    );

    press(&mut viewer, &mut host, Key::End);
    assert_eq!(viewer.state().cursor.index, Some(1023));
    assert_eq!(
        host.virtualizer.last(),
        Some(ScrollRequest {
            row: 1023 / COLUMNS,
            align: ScrollAlign::Include,
        })
    );

    press(&mut viewer, &mut host, Key::Home);
    assert_eq!(viewer.state().cursor.index, Some(0));
    assert_eq!(host.virtualizer.requests().len(), 2);

    // Saturates at the first byte.
    press(&mut viewer, &mut host, Key::ArrowLeft);
    press(&mut viewer, &mut host, Key::ArrowUp);
    assert_eq!(viewer.state().cursor.index, Some(0));
}

#[test]
fn keys_are_ignored_without_focus() {
    let (mut viewer, mut host) = mounted_viewer(64);
    assert_eq!(press(&mut viewer, &mut host, Key::ArrowDown), KeyOutcome::Ignored);
    assert_eq!(viewer.state().cursor.index, None);

    click(&mut viewer, &mut host, 3);
    viewer.dispatch_with(Action::Layout(LayoutAction::ClickAway), &mut host);
    assert_eq!(viewer.state().cursor.index, None);
    assert_eq!(press(&mut viewer, &mut host, Key::ArrowDown), KeyOutcome::Ignored);
}

#[test]
fn copy_chord_interception() {
    let (mut viewer, mut host) = mounted_viewer(64);
    viewer.dispatch_with(Action::Layout(LayoutAction::Focus(Focus::Body)), &mut host);

    let chord = KeyEvent::ctrl(Key::Char('c'));
    assert_eq!(viewer.handle_key(chord, &mut host), KeyOutcome::Ignored);
    assert_eq!(host.clipboard.writes(), 0);

    click(&mut viewer, &mut host, 3);
    assert_eq!(viewer.handle_key(chord, &mut host), KeyOutcome::Consumed);
    assert_eq!(host.clipboard.text(), Some("41"));

    viewer.dispatch_with(Action::Search(SearchAction::Type("AB".into())), &mut host);
    assert_eq!(viewer.state().layout.focus, Focus::Toolbar);
    assert_eq!(
        viewer.handle_key(KeyEvent::meta(Key::Char('c')), &mut host),
        KeyOutcome::Ignored
    );
    assert_eq!(host.clipboard.writes(), 1);
}

#[test]
fn escape_clears_selection_but_keeps_query() {
    let (mut viewer, mut host) = mounted_viewer(64);
    viewer.dispatch_with(
        Action::Pointer(PointerAction::Down {
            index: 2,
            column: Column::Hex,
        }),
        &mut host,
    );
    viewer.dispatch_with(
        Action::Pointer(PointerAction::Enter {
            index: 5,
            column: Column::Hex,
        }),
        &mut host,
    );
    viewer.dispatch_with(Action::Pointer(PointerAction::Up { index: 5 }), &mut host);
    assert_eq!(
        viewer.state().selection.range,
        Some(SelectionRange { start: 2, end: 5 })
    );

    viewer.dispatch_with(Action::Search(SearchAction::Type("A".into())), &mut host);
    viewer.dispatch_with(Action::Search(SearchAction::SetQuery("A".into())), &mut host);
    assert!(viewer.state().search.suggestions_open);

    assert_eq!(press(&mut viewer, &mut host, Key::Escape), KeyOutcome::Consumed);
    let state = viewer.state();
    assert_eq!(state.selection.range, None);
    assert_eq!(state.cursor.index, None);
    assert!(!state.search.suggestions_open);
    assert!(state.search.query.is_some());
    assert_eq!(state.search.matches.len(), 64);
}
