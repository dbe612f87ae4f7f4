//! Controller register program
//!
//! The first part of init is a manufacturer table captured from a working
//! board with a logic analyzer. Nobody has a datasheet that explains these
//! payloads, so they are kept byte for byte and never "tidied up". The rest
//! of the program is the standard DCS tail shared with ILI9341-class parts.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::command::*;
use crate::interface::DisplayInterface;
use crate::transfer::Transfer;

/// Manufacturer registers, in the order they must be written
pub static VENDOR_REGISTERS: &[(u8, &[u8])] = &[
    (COMMAND_ACCESS_PROTECT, &[0x00]),
    (FRAME_MEMORY_ACCESS, &[0x02, 0x00, 0x00, 0x00]),
    (
        PANEL_DRIVING,
        &[0x13, 0x3B, 0x00, 0x02, 0x00, 0x01, 0x00, 0x43],
    ),
    (DISPLAY_TIMING_NORMAL, &[0x08, 0x16, 0x08, 0x08]),
    (FRAME_RATE_INVERSION, &[0x11, 0x07, 0x03, 0x03]),
    (INTERFACE_CONTROL, &[0x00]),
    (
        GAMMA_SETTING,
        &[
            0x03, 0x03, 0x13, 0x5C, 0x03, 0x07, 0x14, 0x08, 0x00, 0x21, 0x08, 0x14, 0x07, 0x53,
            0x0C, 0x13, 0x03, 0x03, 0x21, 0x00,
        ],
    ),
    (TEARING_EFFECT_ON, &[0x00]),
    (SET_TEAR_SCANLINE, &[0x00, 0x01]),
    (POWER_SETTING, &[0x07, 0x07, 0x1D, 0x03]),
    (VCOM_CONTROL, &[0x03, 0x30, 0x10]),
    (POWER_SETTING_NORMAL, &[0x03, 0x14, 0x04]),
];

/// Write the whole register program
///
/// `madctl` is the control byte from [`control_byte`](crate::orientation::control_byte).
/// The caller owns the bus session; this only issues transfers and waits.
pub fn run<I, D>(interface: &mut I, madctl: u8, delay: &mut D) -> Result<(), I::Error>
where
    I: DisplayInterface,
    D: DelayNs,
{
    debug!("Writing {} vendor registers", VENDOR_REGISTERS.len());
    for &(command, payload) in VENDOR_REGISTERS {
        interface.execute(Transfer::new(command, payload))?;
    }

    interface.execute(Transfer::new(PIXEL_FORMAT_SET, &[PIXEL_FORMAT_RGB565]))?;
    interface.execute(Transfer::new(MEMORY_ACCESS_CONTROL, &[madctl]))?;

    // Display on is undefined until the panel has settled out of sleep
    interface.execute(Transfer::command_only(SLEEP_OUT))?;
    delay.delay_ms(SLEEP_OUT_SETTLE_MS);
    interface.execute(Transfer::command_only(DISPLAY_ON))?;
    interface.execute(Transfer::command_only(MEMORY_WRITE))?;

    debug!("Register program done, MADCTL={madctl:#04x}");
    Ok(())
}
