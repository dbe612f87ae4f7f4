//! Window addressing and the initial frame clear

use log::debug;

use crate::command::{MEMORY_WRITE, SET_COLUMN_ADDRESS, SET_PAGE_ADDRESS};
use crate::config::{Dimensions, MAX_EXTENT};
use crate::interface::DisplayInterface;
use crate::transfer::Transfer;

const MAX_ROW_BYTES: usize = MAX_EXTENT as usize * 2;

// One row of black RGB565 pixels, long enough for the widest panel
static BLACK_ROW: [u8; MAX_ROW_BYTES] = [0; MAX_ROW_BYTES];

/// Encode an inclusive `start..=end` range as the controller expects it
fn range_bytes(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}

/// Point the controller's write window at `(x0, y0)..=(x1, y1)`
///
/// Bounds are not checked here; [`Display::set_window`](crate::display::Display::set_window)
/// validates against the geometry.
pub fn set_window<I: DisplayInterface>(
    interface: &mut I,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
) -> Result<(), I::Error> {
    interface.execute(Transfer::new(SET_COLUMN_ADDRESS, &range_bytes(x0, x1)))?;
    interface.execute(Transfer::new(SET_PAGE_ADDRESS, &range_bytes(y0, y1)))
}

/// Write black into every pixel, one row per transfer
///
/// Later updates only send pixels that changed, so RAM has to start from a
/// known frame. Rows keep each transfer small enough for the transport. The
/// window is left covering the whole frame.
pub fn clear<I: DisplayInterface>(interface: &mut I, dims: &Dimensions) -> Result<(), I::Error> {
    let last_column = dims.width() - 1;
    let row = &BLACK_ROW[..dims.row_bytes()];

    debug!("Clearing {}x{} frame", dims.width(), dims.height());
    for y in 0..dims.height() {
        set_window(interface, 0, y, last_column, y)?;
        interface.execute(Transfer::new(MEMORY_WRITE, row))?;
    }

    set_window(interface, 0, 0, last_column, dims.height() - 1)
}
