use hexview_core::render::highlights_in;
use hexview_core::{
    Action, BodyType, BufferAction, CellPatch, Column, CursorAction, CursorMove, HeadlessHost,
    HexViewer, HighByteTable, HighlightClass, HighlightSet, LayoutAction, MountedRange,
    NonPrintableTable, PointerAction, SearchAction, SettingsAction, TextEncoding,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const LEN: usize = 2048;
const COLUMNS: usize = 24;

// Mostly letters, plus bytes whose glyph depends on the encoding settings.
const BYTE_POOL: [u8; 10] = [0x41, 0x42, 0x43, 0x41, 0x42, 0x00, 0x01, 0x2E, 0x80, 0xC1];

fn sample_bytes(seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..LEN)
        .map(|_| BYTE_POOL[rng.gen_range(0..BYTE_POOL.len())])
        .collect()
}

fn encoding_action(rng: &mut StdRng) -> Action {
    match rng.gen_range(0..4) {
        0 => {
            let glyphs = ["0", ".", "A", "·"];
            let glyph = glyphs[rng.gen_range(0..glyphs.len())];
            Action::Settings(SettingsAction::SetNullChar(glyph.to_string()))
        }
        1 => {
            let table = NonPrintableTable::ALL[rng.gen_range(0..NonPrintableTable::ALL.len())];
            Action::Settings(SettingsAction::SetNonPrintableTable(table))
        }
        2 => {
            let tables = [
                HighByteTable::Hidden,
                HighByteTable::Cp437,
                HighByteTable::Decoder(TextEncoding::Ascii),
                HighByteTable::Decoder(TextEncoding::Hex),
            ];
            let table = tables[rng.gen_range(0..tables.len())];
            Action::Settings(SettingsAction::SetHighByteTable(table))
        }
        _ => {
            let fallbacks = [".", "?"];
            let fallback = fallbacks[rng.gen_range(0..fallbacks.len())];
            Action::Settings(SettingsAction::SetHighByteFallback(fallback.to_string()))
        }
    }
}

fn window(top_row: usize) -> MountedRange {
    MountedRange::from_rows(
        top_row..=top_row + 20,
        top_row.saturating_sub(5)..=top_row + 25,
        COLUMNS,
        LEN,
    )
    .unwrap()
}

fn assert_no_drift(viewer: &HexViewer, host: &HeadlessHost, step: usize) {
    let state = viewer.state();
    assert_eq!(host.surface.mounted(), state.layout.mounted, "step {step}");
    if let Some(range) = state.layout.mounted {
        let expected = highlights_in(state, range.overscan());
        let actual: Vec<HighlightSet> = host.surface.cells().map(|(_, set)| set).collect();
        assert_eq!(actual, expected, "surface drifted at step {step}");
    }
}

fn random_action(rng: &mut StdRng) -> Action {
    let index = rng.gen_range(0..LEN);
    let column = if rng.gen_bool(0.5) {
        Column::Hex
    } else {
        Column::Text
    };
    match rng.gen_range(0..24) {
        0..=2 => Action::Pointer(PointerAction::Down { index, column }),
        3..=6 => Action::Pointer(PointerAction::Enter { index, column }),
        7 => Action::Pointer(PointerAction::Up { index }),
        8 => Action::Pointer(PointerAction::Leave),
        9 => {
            let steps = [
                CursorMove::Left,
                CursorMove::Right,
                CursorMove::Up,
                CursorMove::Down,
                CursorMove::PageUp,
                CursorMove::PageDown,
                CursorMove::Home,
                CursorMove::End,
            ];
            Action::Cursor(CursorAction::Move(steps[rng.gen_range(0..steps.len())]))
        }
        10 => Action::Cursor(CursorAction::MoveTo(Some(index))),
        11 => {
            let queries = [
                "text:A",
                "hex:41 42",
                "text:CC",
                "hex:4",
                "text:ABCD",
                "text:.",
                "text:A.",
                "text:?",
            ];
            let query = queries[rng.gen_range(0..queries.len())];
            Action::Search(SearchAction::SetQuery(query.to_string()))
        }
        12 => Action::Search(SearchAction::Next),
        13 => Action::Search(SearchAction::Wheel(-1)),
        14..=16 => {
            let top = rng.gen_range(0..LEN / COLUMNS);
            Action::Layout(LayoutAction::RangeRendered(window(top)))
        }
        17 => Action::Escape,
        18 => {
            let body = if rng.gen_bool(0.5) {
                BodyType::Window
            } else {
                BodyType::Table
            };
            Action::Settings(SettingsAction::SetBodyType(body))
        }
        19 => Action::Search(SearchAction::Clear),
        _ => encoding_action(rng),
    }
}

#[test]
fn randomized_actions_never_drift() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut viewer = HexViewer::new(sample_bytes(seed));
        let mut host = HeadlessHost::default();
        viewer.mount(&mut host);
        viewer.dispatch_with(
            Action::Layout(LayoutAction::RangeRendered(window(0))),
            &mut host,
        );
        assert_no_drift(&viewer, &host, 0);

        for step in 1..=400 {
            let action = random_action(&mut rng);
            viewer.dispatch_with(action, &mut host);
            assert_no_drift(&viewer, &host, step);
        }
    }
}

#[test]
fn encoding_change_repatches_search_highlights() {
    let bytes: Vec<u8> = BYTE_POOL.iter().copied().cycle().take(LEN).collect();
    let mut viewer = HexViewer::new(bytes);
    let mut host = HeadlessHost::default();
    viewer.mount(&mut host);
    viewer.dispatch_with(
        Action::Layout(LayoutAction::RangeRendered(window(0))),
        &mut host,
    );
    viewer.dispatch_with(
        Action::Search(SearchAction::SetQuery("text:.".into())),
        &mut host,
    );
    let before = viewer.state().search.matches.len();
    assert_no_drift(&viewer, &host, 0);

    let actions = [
        Action::Settings(SettingsAction::SetNullChar("0".into())),
        Action::Settings(SettingsAction::SetNonPrintableTable(NonPrintableTable::Caret)),
        Action::Settings(SettingsAction::SetHighByteTable(HighByteTable::Cp437)),
    ];
    for (step, action) in actions.into_iter().enumerate() {
        let dispatch = viewer.dispatch_with(action, &mut host);
        assert!(!dispatch.remount, "step {step}");
        assert!(!dispatch.patches.is_empty(), "step {step}");
        assert_no_drift(&viewer, &host, step + 1);
    }

    // Only the literal '.' bytes still show a dot.
    let dots = viewer.state().search.matches.len();
    assert!(dots < before);
    let buffer = &viewer.state().buffer;
    assert!(
        viewer
            .state()
            .search
            .matches
            .iter()
            .all(|&index| buffer.byte(index) == Some(0x2E))
    );
}

#[test]
fn buffer_reload_remounts() {
    let mut viewer = HexViewer::new(sample_bytes(1));
    let mut host = HeadlessHost::default();
    viewer.mount(&mut host);
    viewer.dispatch_with(
        Action::Layout(LayoutAction::RangeRendered(window(0))),
        &mut host,
    );
    viewer.dispatch_with(Action::Cursor(CursorAction::MoveTo(Some(5))), &mut host);

    let bytes: Arc<[u8]> = Arc::from(sample_bytes(2));
    let dispatch = viewer.dispatch_with(Action::Buffer(BufferAction::Load(bytes)), &mut host);
    assert!(dispatch.remount);
    assert_eq!(host.surface.mounted(), None);

    viewer.dispatch_with(
        Action::Layout(LayoutAction::RangeRendered(window(0))),
        &mut host,
    );
    assert_no_drift(&viewer, &host, 0);
    assert_eq!(viewer.state().cursor.index, None);
}

#[test]
fn patches_stay_inside_the_window() {
    let mut viewer = HexViewer::new(sample_bytes(3));
    viewer.dispatch(Action::Layout(LayoutAction::RangeRendered(window(10))));
    let range = viewer.state().layout.mounted.unwrap();

    viewer.dispatch(Action::Pointer(PointerAction::Down {
        index: 0,
        column: Column::Hex,
    }));
    let dispatch = viewer.dispatch(Action::Pointer(PointerAction::Enter {
        index: LEN - 1,
        column: Column::Hex,
    }));

    assert!(!dispatch.patches.is_empty());
    assert!(
        dispatch
            .patches
            .iter()
            .all(|patch| range.contains(patch.index))
    );
    assert_eq!(dispatch.patches.len(), range.mounted_len());
}

#[test]
fn drag_step_touches_only_changed_cells() {
    let mut viewer = HexViewer::new(sample_bytes(4));
    viewer.dispatch(Action::Layout(LayoutAction::RangeRendered(window(0))));
    viewer.dispatch(Action::Pointer(PointerAction::Down {
        index: 5,
        column: Column::Hex,
    }));
    viewer.dispatch(Action::Pointer(PointerAction::Enter {
        index: 10,
        column: Column::Hex,
    }));

    let mut patches = viewer
        .dispatch(Action::Pointer(PointerAction::Enter {
            index: 11,
            column: Column::Hex,
        }))
        .patches;
    patches.sort_by_key(|patch| (patch.index, patch.class));
    assert_eq!(
        patches,
        vec![
            CellPatch {
                index: 10,
                class: HighlightClass::Hover,
                on: false,
            },
            CellPatch {
                index: 11,
                class: HighlightClass::Hover,
                on: true,
            },
            CellPatch {
                index: 11,
                class: HighlightClass::Select,
                on: true,
            },
        ]
    );
}
