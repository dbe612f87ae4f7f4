//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] for [`Rgb565`] directly: there is no
//! host-side framebuffer, every draw call sets a window on the controller and
//! streams pixels into its RAM. That pairs with the black frame written by
//! [`Display::init`], so a caller only ever has to send what changed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! display.init(&mut delay)?;
//!
//! Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display)?;
//! ```

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    primitives::{PointsIter, Rectangle},
};
use embedded_hal::digital::OutputPin;

use crate::clock::BusClock;
use crate::command::MEMORY_WRITE;
use crate::display::Display;
use crate::error::Error;
use crate::frame;
use crate::interface::DisplayInterface;
use crate::power::BacklightPin;
use crate::transfer::Transfer;

// Pixels buffered per data write when streaming a window
const CHUNK_PIXELS: usize = 64;

impl<I, C, RST, BL> OriginDimensions for Display<I, C, RST, BL>
where
    I: DisplayInterface,
    C: BusClock,
    RST: OutputPin,
    BL: BacklightPin,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width() as u32, dims.height() as u32)
    }
}

impl<I, C, RST, BL> DrawTarget for Display<I, C, RST, BL>
where
    I: DisplayInterface,
    C: BusClock,
    RST: OutputPin,
    BL: BacklightPin,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            let bytes = color.into_storage().to_be_bytes();
            self.with_bus(|interface| {
                frame::set_window(interface, x, y, x, y)?;
                interface.execute(Transfer::new(MEMORY_WRITE, &bytes))
            })?;
        }
        Ok(())
    }

    fn fill_contiguous<P>(&mut self, area: &Rectangle, colors: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Self::Color>,
    {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        if area.intersection(&self.bounding_box()) != *area {
            let pixels = area
                .points()
                .zip(colors)
                .map(|(point, color)| Pixel(point, color));
            return self.draw_iter(pixels);
        }

        let (x0, y0) = (area.top_left.x as u16, area.top_left.y as u16);
        let (x1, y1) = (bottom_right.x as u16, bottom_right.y as u16);
        let count = area.size.width as usize * area.size.height as usize;

        self.with_bus(|interface| {
            frame::set_window(interface, x0, y0, x1, y1)?;
            interface.send_command(MEMORY_WRITE)?;

            let mut chunk = [0u8; CHUNK_PIXELS * 2];
            let mut filled = 0;
            for color in colors.into_iter().take(count) {
                chunk[filled..filled + 2].copy_from_slice(&color.into_storage().to_be_bytes());
                filled += 2;
                if filled == chunk.len() {
                    interface.send_data(&chunk)?;
                    filled = 0;
                }
            }
            if filled > 0 {
                interface.send_data(&chunk[..filled])?;
            }
            Ok(())
        })
    }
}
