//! Backlight pin handling
//!
//! The MZ61581 backlight is active low: driving the line low lights the
//! panel. At boot the line may have been left in a PWM function by a
//! brightness controller, so every write first forces it back to plain
//! digital output.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

/// An output pin that can be switched back to push-pull digital mode
pub trait BacklightPin: OutputPin {
    /// Drop any alternate (PWM) function and make the pin a plain output
    fn set_output_mode(&mut self) -> Result<(), Self::Error>;
}

/// Adapter for a pin that is only ever a digital output
///
/// Use this for a HAL [`OutputPin`] that has no PWM mode to leave.
pub struct DigitalBacklight<P>(pub P);

impl<P: OutputPin> ErrorType for DigitalBacklight<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for DigitalBacklight<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}

impl<P: OutputPin> BacklightPin for DigitalBacklight<P> {
    fn set_output_mode(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Placeholder for an unconnected reset or backlight line
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl BacklightPin for NoPin {
    fn set_output_mode(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Force digital mode, then light (low) or darken (high) the backlight
pub fn drive_backlight<BL: BacklightPin>(pin: &mut BL, lit: bool) {
    if let Err(e) = pin.set_output_mode() {
        warn!("Backlight mode switch failed: {e:?}");
    }
    let result = if lit { pin.set_low() } else { pin.set_high() };
    if let Err(e) = result {
        warn!("Backlight write failed: {e:?}");
    }
}
