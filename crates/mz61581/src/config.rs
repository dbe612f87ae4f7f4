//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_EXTENT};

/// Divisor used for steady-state operation unless the builder overrides it
pub const DEFAULT_OPERATING_DIVISOR: u32 = 8;

/// Display dimensions
///
/// Only constructible through [`Dimensions::new`], so both sides are always
/// within `1..=MAX_EXTENT`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// larger than [`MAX_EXTENT`].
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_EXTENT || height == 0 || height > MAX_EXTENT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels (columns addressed by the X window)
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels (rows addressed by the Y window)
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes in one full row of RGB565 pixels
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 2
    }

    /// Bytes in one full frame of RGB565 pixels
    pub fn frame_bytes(&self) -> usize {
        self.row_bytes() * self.height as usize
    }
}

/// How the panel is mounted relative to its native portrait scan
///
/// Fixed at construction; there is no way to change it on a running display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Flip both axes so the image is upside down relative to native
    pub rotate_180: bool,
    /// Present a landscape frame by exchanging rows and columns in the controller
    pub landscape: bool,
    /// The caller already transposes X/Y in software
    ///
    /// When set, the controller's row/column exchange stays off even if
    /// `landscape` is requested, so the two never stack.
    pub software_flip_xy: bool,
}

impl Orientation {
    /// Native portrait orientation
    pub const fn portrait() -> Self {
        Self {
            rotate_180: false,
            landscape: false,
            software_flip_xy: false,
        }
    }

    /// Whether the controller itself performs the row/column exchange
    pub fn hardware_exchange(&self) -> bool {
        self.landscape && !self.software_flip_xy
    }
}

/// Display configuration
///
/// Holds every build-time knob the bring-up sequence consumes.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Panel orientation
    pub orientation: Orientation,
    /// Bus clock divisor restored once initialization is finished
    pub operating_divisor: u32,
    /// Leave the bus session open after init for DMA-overlapped transfers
    pub dma_overlap: bool,
    /// Allow `turn_on`/`turn_off` to drive the backlight
    pub backlight_control: bool,
    /// Also put the controller to sleep when turning the display off
    pub sleep_on_power_off: bool,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use mz61581::{Builder, Dimensions, Orientation};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(480, 320).unwrap())
///     .orientation(Orientation { landscape: true, ..Orientation::portrait() })
///     .operating_divisor(6)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.dimensions.row_bytes(), 960);
/// ```
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Panel orientation
    orientation: Orientation,
    /// Steady-state bus clock divisor
    operating_divisor: u32,
    /// Keep the bus session open after init
    dma_overlap: bool,
    /// Runtime backlight control
    backlight_control: bool,
    /// Sleep the controller on power off
    sleep_on_power_off: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            orientation: Orientation::portrait(),
            operating_divisor: DEFAULT_OPERATING_DIVISOR,
            dma_overlap: false,
            backlight_control: true,
            sleep_on_power_off: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set panel orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the bus clock divisor used after initialization
    pub fn operating_divisor(mut self, divisor: u32) -> Self {
        self.operating_divisor = divisor;
        self
    }

    /// Keep the bus session open at the end of init
    pub fn dma_overlap(mut self, enabled: bool) -> Self {
        self.dma_overlap = enabled;
        self
    }

    /// Enable or disable runtime backlight control
    pub fn backlight_control(mut self, enabled: bool) -> Self {
        self.backlight_control = enabled;
        self
    }

    /// Send display-off/sleep-in on power off and the reverse on power on
    pub fn sleep_on_power_off(mut self, enabled: bool) -> Self {
        self.sleep_on_power_off = enabled;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    /// and `BuilderError::InvalidClockDivisor` for a zero divisor.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.operating_divisor == 0 {
            return Err(BuilderError::InvalidClockDivisor);
        }
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            orientation: self.orientation,
            operating_divisor: self.operating_divisor,
            dma_overlap: self.dma_overlap,
            backlight_control: self.backlight_control,
            sleep_on_power_off: self.sleep_on_power_off,
        })
    }
}
