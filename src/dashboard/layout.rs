use crate::config::GridWidth;

/// Below this viewport width every widget is forced to full width.
pub const SMALL_SCREEN_BREAKPOINT: f32 = 1024.0;

/// Number of tracks in the widget grid.
const GRID_TRACKS: u8 = 2;

/// Resolve a slot's declared width against the current viewport width.
pub fn effective_width(declared: GridWidth, viewport_width: f32) -> GridWidth {
    if viewport_width < SMALL_SCREEN_BREAKPOINT {
        GridWidth::Full
    } else {
        declared
    }
}

fn tracks(width: GridWidth) -> u8 {
    match width {
        GridWidth::Full => GRID_TRACKS,
        GridWidth::Half => 1,
    }
}

/// Pack slot widths into grid rows, preserving order.
///
/// A row holds two tracks; a slot that doesn't fit the open row starts a new
/// one, so a `Half` followed by a `Full` leaves the second track of its row
/// empty rather than reordering.
pub fn pack_rows(widths: &[GridWidth]) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut free = 0u8;
    for (index, width) in widths.iter().enumerate() {
        let need = tracks(*width);
        if need > free {
            rows.push(Vec::new());
            free = GRID_TRACKS;
        }
        if let Some(row) = rows.last_mut() {
            row.push(index);
        }
        free -= need;
    }
    rows
}
