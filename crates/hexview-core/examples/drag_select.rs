//! Drag-select example
//!
//! Mounts a window, drags a selection across it, and prints the patches each step produced
//! along with the copied text and the shareable location.

use hexview_core::{
    Action, Column, CopyMode, HeadlessHost, HexViewer, LayoutAction, MountedRange,
    PointerAction, SearchAction, copy_as,
};

fn main() {
    let bytes: Vec<u8> = b"The quick brown fox jumps over the lazy dog.\x00\x01\x02\xff"
        .iter()
        .copied()
        .cycle()
        .take(512)
        .collect();
    let mut viewer = HexViewer::new(bytes);
    let mut host = HeadlessHost::default();
    viewer.mount(&mut host);

    let columns = viewer.state().layout.view.columns;
    let window = MountedRange::from_rows(0..=7, 0..=9, columns, viewer.state().buffer.len())
        .unwrap_or(MountedRange::new(0, 0, 0, 0));
    viewer.dispatch_with(Action::Layout(LayoutAction::RangeRendered(window)), &mut host);
    viewer.dispatch_with(Action::Search(SearchAction::SetQuery("text:fox".into())), &mut host);
    println!(
        "{} matches for text:fox",
        viewer.state().search.matches.len()
    );

    let steps = [
        Action::Pointer(PointerAction::Down {
            index: 4,
            column: Column::Text,
        }),
        Action::Pointer(PointerAction::Enter {
            index: 9,
            column: Column::Text,
        }),
        Action::Pointer(PointerAction::Enter {
            index: 19,
            column: Column::Text,
        }),
        Action::Pointer(PointerAction::Up { index: 19 }),
    ];
    for action in steps {
        let name = action.name();
        let dispatch = viewer.dispatch_with(action, &mut host);
        println!("{name}: {} patches", dispatch.patches.len());
    }

    viewer.dispatch_with(copy_as(Column::Text, CopyMode::Displayed), &mut host);
    println!("copied text: {:?}", host.clipboard.text().unwrap_or_default());
    viewer.dispatch_with(copy_as(Column::Hex, CopyMode::Displayed), &mut host);
    println!("copied hex:  {:?}", host.clipboard.text().unwrap_or_default());

    for row in 0..2 {
        if let Some(view) = viewer.state().row(row) {
            let hex: Vec<&str> = view.cells.iter().map(|cell| cell.hex).collect();
            let text: String = view.cells.iter().map(|cell| cell.text).collect();
            println!("{}  {}  {}", view.address, hex.join(" "), text);
        }
    }
    println!("location: {}", viewer.location());
}
