//! Hardware reset pulse

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::command::RESET_SETTLE_MS;

fn drive<RST: OutputPin>(pin: &mut RST, high: bool) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("Reset pin write failed: {e:?}");
    }
}

/// Pulse the reset line high, low, high with a settle wait after each edge
///
/// There is nothing to read back, so a failed pin write is logged and the
/// sequence carries on.
pub fn pulse<RST: OutputPin, D: DelayNs>(pin: &mut RST, delay: &mut D) {
    for level in [true, false, true] {
        drive(pin, level);
        delay.delay_ms(RESET_SETTLE_MS);
    }
}
