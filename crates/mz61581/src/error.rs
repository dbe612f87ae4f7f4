//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! The MZ61581 never answers on the wire. Every [`Error`] therefore describes
//! something the host side saw go wrong (the SPI peripheral refused a write, a
//! window was out of range). A successful return only means the transport
//! accepted the bytes, not that the panel acted on them.
//!
//! ## Example
//!
//! ```
//! use mz61581::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(1000, 320); // Too wide
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Largest addressable extent on either axis
///
/// The R61581 drives a 320x480 panel; with row/column exchange the 480 side
/// becomes the width, so both axes accept up to 480.
pub const MAX_EXTENT: u16 = 480;

/// Errors that can occur when talking to the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the transport error from the [`DisplayInterface`] implementation.
    /// This is the only failure the bus can report; it says nothing about
    /// whether the controller understood an earlier write.
    Interface(I::Error),
    /// Window lies outside the configured geometry or is inverted
    InvalidWindow {
        /// Inclusive start column
        x0: u16,
        /// Inclusive start row
        y0: u16,
        /// Inclusive end column
        x1: u16,
        /// Inclusive end row
        y1: u16,
    },
    /// Pixel data is not a whole number of RGB565 pixels
    UnalignedPixelData {
        /// Length of the rejected slice in bytes
        len: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::InvalidWindow { x0, y0, x1, y1 } => f
                .debug_struct("InvalidWindow")
                .field("x0", x0)
                .field("y0", y0)
                .field("x1", x1)
                .field("y1", y1)
                .finish(),
            Error::UnalignedPixelData { len } => f
                .debug_struct("UnalignedPixelData")
                .field("len", len)
                .finish(),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::InvalidWindow { x0, y0, x1, y1 } => {
                write!(f, "Invalid window ({x0},{y0})-({x1},{y1})")
            }
            Error::UnalignedPixelData { len } => {
                write!(f, "Pixel data of {len} bytes is not a multiple of 2")
            }
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
    /// Operating clock divisor of zero
    InvalidClockDivisor,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (each side must be 1..={MAX_EXTENT})"
            ),
            BuilderError::InvalidClockDivisor => write!(f, "Clock divisor must be non-zero"),
        }
    }
}

impl core::error::Error for BuilderError {}
