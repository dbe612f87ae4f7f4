//! MZ61581 TFT Display Driver
//!
//! Brings a Tontec MZ61581 (R61581 controller, 320x480 RGB565) from an
//! unknown power-on state to a known, cleared frame, and switches its
//! backlight afterwards.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Reset pulse, low-speed register program and full black clear on init
//! - Configurable orientation (180 degree rotation, hardware landscape)
//! - Optional DMA-overlap mode that keeps the bus session open after init
//! - Active-low backlight control, optional sleep on power off
//!
//! The controller has no read-back path. Every operation is fire-and-forget,
//! so `Ok(())` only means the transport accepted the bytes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use mz61581::{Builder, DigitalBacklight, Dimensions, Display, FixedClock, Interface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let backlight = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc);
//! let dims = match Dimensions::new(320, 480) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, FixedClock, config)
//!     .with_reset(rst)
//!     .with_backlight(DigitalBacklight(backlight));
//! let _ = display.init(&mut delay);
//! let _ = display.turn_off(&mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Bus clock staging around init
pub mod clock;
/// MZ61581 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Window addressing and frame clear
pub mod frame;
/// Hardware interface abstraction
pub mod interface;
/// MADCTL control byte
pub mod orientation;
/// Backlight pin handling
pub mod power;
/// Controller register program
pub mod program;
/// Hardware reset pulse
pub mod reset;
/// Scoped bus session
pub mod session;
/// Single SPI transaction
pub mod transfer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use clock::{BusClock, ClockGuard, FixedClock, INIT_DIVISOR};
pub use config::{Builder, Config, DEFAULT_OPERATING_DIVISOR, Dimensions, MAX_EXTENT, Orientation};
pub use display::{Display, Parts};
pub use error::{BuilderError, Error};
pub use interface::{DisplayInterface, Interface, InterfaceError};
pub use orientation::control_byte;
pub use power::{BacklightPin, DigitalBacklight, NoPin};
pub use session::Session;
pub use transfer::Transfer;
