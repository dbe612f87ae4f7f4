//! Memory access control (MADCTL) byte
//!
//! The controller's addressing mode register takes one byte whose bits pick
//! pixel byte order and scan direction. It is derived once from
//! [`Orientation`] and written during init.
//!
//! | bit | mask | meaning                                   |
//! |-----|------|-------------------------------------------|
//! | 7   | 0x80 | row address order swap                    |
//! | 6   | 0x40 | column address order swap                 |
//! | 5   | 0x20 | row/column exchange                       |
//! | 3   | 0x08 | BGR pixel order                           |

use crate::config::Orientation;

pub const MADCTL_BGR_PIXEL_ORDER: u8 = 1 << 3;
pub const MADCTL_ROW_COLUMN_EXCHANGE: u8 = 1 << 5;
pub const MADCTL_COLUMN_ADDRESS_ORDER_SWAP: u8 = 1 << 6;
pub const MADCTL_ROW_ADDRESS_ORDER_SWAP: u8 = 1 << 7;
pub const MADCTL_ROTATE_180_DEGREES: u8 =
    MADCTL_ROW_ADDRESS_ORDER_SWAP | MADCTL_COLUMN_ADDRESS_ORDER_SWAP;

/// Compute the MADCTL byte for an orientation
///
/// BGR order and the column swap are always on: the panel is wired BGR and
/// its default column direction is mirrored.
pub fn control_byte(orientation: &Orientation) -> u8 {
    let mut madctl = MADCTL_BGR_PIXEL_ORDER | MADCTL_COLUMN_ADDRESS_ORDER_SWAP;
    if orientation.rotate_180 {
        madctl |= MADCTL_ROTATE_180_DEGREES;
    }
    if orientation.hardware_exchange() {
        madctl |= MADCTL_ROW_COLUMN_EXCHANGE;
    }
    madctl
}
