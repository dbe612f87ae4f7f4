//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to the MZ61581 over SPI.
//!
//! ## Hardware Requirements
//!
//! The MZ61581 requires:
//! - SPI bus (MOSI + SCK, chip select handled by the [`SpiDevice`])
//! - 1 GPIO pin:
//!   - **DC**: Data/Command select (output)
//!
//! Reset and backlight lines are optional and are handed to
//! [`Display`](crate::display::Display) separately.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mz61581::{DisplayInterface, Interface, Transfer};
//!
//! let mut interface = Interface::new(spi_device, dc_pin);
//!
//! // Pixel format: 16 bits per pixel
//! interface.execute(Transfer::new(0x3A, &[0x55]))?;
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::transfer::Transfer;

/// Trait for hardware interface to the MZ61581 controller
///
/// There is no read-back path on this panel. A successful return only means
/// the bytes left the host; it never confirms that the controller latched them.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait yourself for a DMA-queued transport or a bus that needs explicit
/// chip-select/transfer-active control around a session.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller (DC low)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send parameter or pixel bytes to the controller (DC high)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Open a bus communication session
    ///
    /// Called once before a batch of transfers. The default does nothing,
    /// which suits an [`SpiDevice`] that frames every write itself.
    fn begin_session(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Close a bus communication session opened with [`begin_session`](Self::begin_session)
    fn end_session(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Run one transfer to completion
    ///
    /// Sends the opcode, then the payload if there is one. Blocks until the
    /// transport has accepted every byte.
    fn execute(&mut self, transfer: Transfer<'_>) -> Result<(), Self::Error> {
        self.send_command(transfer.command())?;
        if !transfer.is_empty() {
            self.send_data(transfer.payload())?;
        }
        Ok(())
    }
}

impl<T: DisplayInterface + ?Sized> DisplayInterface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        T::send_command(self, command)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::send_data(self, data)
    }

    fn begin_session(&mut self) -> Result<(), Self::Error> {
        T::begin_session(self)
    }

    fn end_session(&mut self) -> Result<(), Self::Error> {
        T::end_session(self)
    }

    fn execute(&mut self, transfer: Transfer<'_>) -> Result<(), Self::Error> {
        T::execute(self, transfer)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the MZ61581
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
pub struct Interface<SPI, DC> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
}

impl<SPI, DC> Interface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new Interface
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the SPI device and DC pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DisplayInterface for Interface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }
}
