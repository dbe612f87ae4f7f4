//! Core display operations

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::clock::{BusClock, ClockGuard};
use crate::command::*;
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::frame;
use crate::interface::DisplayInterface;
use crate::orientation::control_byte;
use crate::power::{BacklightPin, NoPin, drive_backlight};
use crate::program;
use crate::reset;
use crate::session::Session;
use crate::transfer::Transfer;

/// Resources handed back by [`Display::release`]
pub struct Parts<I, C, RST, BL> {
    /// Hardware interface
    pub interface: I,
    /// SPI clock divisor owner
    pub clock: C,
    /// Reset line, if one was attached
    pub reset: Option<RST>,
    /// Backlight line, if one was attached
    pub backlight: Option<BL>,
}

/// Core display driver for the MZ61581
///
/// Owns the transport, the bus clock handle and the optional reset and
/// backlight lines. Call [`init`](Self::init) once after power-up.
pub struct Display<I, C, RST = NoPin, BL = NoPin>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// SPI clock divisor owner
    clock: C,
    /// Optional reset line
    reset: Option<RST>,
    /// Optional active-low backlight line
    backlight: Option<BL>,
    /// Display configuration
    config: Config,
    /// MADCTL byte derived from the orientation
    control_byte: u8,
    /// A session was left open at the end of init
    session_open: bool,
    /// Last level the driver put the backlight at
    backlight_lit: bool,
}

impl<I, C> Display<I, C, NoPin, NoPin>
where
    I: DisplayInterface,
    C: BusClock,
{
    /// Create a new Display without reset or backlight lines
    pub fn new(interface: I, clock: C, config: Config) -> Self {
        let control_byte = control_byte(&config.orientation);
        Self {
            interface,
            clock,
            reset: None,
            backlight: None,
            config,
            control_byte,
            session_open: false,
            backlight_lit: false,
        }
    }
}

impl<I, C, RST, BL> Display<I, C, RST, BL>
where
    I: DisplayInterface,
    C: BusClock,
    RST: OutputPin,
    BL: BacklightPin,
{
    /// Attach a hardware reset line
    pub fn with_reset<R: OutputPin>(self, pin: R) -> Display<I, C, R, BL> {
        Display {
            interface: self.interface,
            clock: self.clock,
            reset: Some(pin),
            backlight: self.backlight,
            config: self.config,
            control_byte: self.control_byte,
            session_open: self.session_open,
            backlight_lit: self.backlight_lit,
        }
    }

    /// Attach an active-low backlight line
    pub fn with_backlight<B: BacklightPin>(self, pin: B) -> Display<I, C, RST, B> {
        Display {
            interface: self.interface,
            clock: self.clock,
            reset: self.reset,
            backlight: Some(pin),
            config: self.config,
            control_byte: self.control_byte,
            session_open: self.session_open,
            backlight_lit: self.backlight_lit,
        }
    }

    /// Bring the controller from an unknown state to a cleared, lit display
    ///
    /// Pulses reset, runs the register program at [`INIT_DIVISOR`](crate::clock::INIT_DIVISOR),
    /// lights the backlight, clears every pixel to black and finally returns
    /// the bus to the operating divisor. The clock is restored and the
    /// session closed on error as well.
    ///
    /// With `dma_overlap` configured the bus session is left open on success
    /// so the caller can keep streaming; see [`end_session`](Self::end_session).
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        if self.session_open {
            self.end_session()?;
        }

        let clock = ClockGuard::lower_for_init(&mut self.clock, self.config.operating_divisor);

        if let Some(rst) = self.reset.as_mut() {
            info!("Resetting display");
            reset::pulse(rst, delay);
        }

        let mut session = Session::begin(&mut self.interface).map_err(Error::Interface)?;
        program::run(&mut *session, self.control_byte, delay).map_err(Error::Interface)?;

        if let Some(backlight) = self.backlight.as_mut() {
            info!("Setting TFT backlight on");
            drive_backlight(backlight, true);
            self.backlight_lit = true;
        }

        frame::clear(&mut *session, &self.config.dimensions).map_err(Error::Interface)?;

        if self.config.dma_overlap {
            debug!("Holding bus session open for DMA transfers");
            session.hold_open();
            self.session_open = true;
        } else {
            session.end().map_err(Error::Interface)?;
        }

        clock.restore_operating_speed();
        Ok(())
    }

    /// Light the backlight, waking the controller first if configured to
    ///
    /// Does nothing to the backlight when backlight control is disabled or
    /// no backlight line is attached.
    pub fn turn_on<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        if self.config.sleep_on_power_off {
            self.transfer(Transfer::command_only(SLEEP_OUT))?;
            delay.delay_ms(SLEEP_TOGGLE_SETTLE_MS);
            self.transfer(Transfer::command_only(DISPLAY_ON))?;
        }
        self.set_backlight(true);
        Ok(())
    }

    /// Darken the backlight, then put the controller to sleep if configured to
    pub fn turn_off<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.set_backlight(false);
        if self.config.sleep_on_power_off {
            self.transfer(Transfer::command_only(DISPLAY_OFF))?;
            self.transfer(Transfer::command_only(SLEEP_IN))?;
            // Sleep out is not accepted for 120ms after sleep in
            delay.delay_ms(SLEEP_TOGGLE_SETTLE_MS);
        }
        Ok(())
    }

    fn set_backlight(&mut self, lit: bool) {
        if !self.config.backlight_control {
            return;
        }
        if let Some(backlight) = self.backlight.as_mut() {
            drive_backlight(backlight, lit);
            self.backlight_lit = lit;
        }
    }

    /// Set the write window to the inclusive rectangle `(x0, y0)..=(x1, y1)`
    ///
    /// The window only holds for a memory write in the same bus session.
    /// Pair this with [`write_pixels`](Self::write_pixels) only while init
    /// left the session open; otherwise use [`write_window`](Self::write_window).
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<I>> {
        self.check_window(x0, y0, x1, y1)?;
        self.with_bus(|interface| frame::set_window(interface, x0, y0, x1, y1))
    }

    /// Write big-endian RGB565 pixels into the current window
    ///
    /// Same session rule as [`set_window`](Self::set_window).
    pub fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Error<I>> {
        check_pixels(pixels)?;
        self.transfer(Transfer::new(MEMORY_WRITE, pixels))
    }

    /// Set the window `(x0, y0)..=(x1, y1)` and fill it with `pixels`
    ///
    /// Both steps share one bus session.
    pub fn write_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u8],
    ) -> Result<(), Error<I>> {
        self.check_window(x0, y0, x1, y1)?;
        check_pixels(pixels)?;
        self.with_bus(|interface| {
            frame::set_window(interface, x0, y0, x1, y1)?;
            interface.execute(Transfer::new(MEMORY_WRITE, pixels))
        })
    }

    fn check_window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<I>> {
        let dims = self.config.dimensions;
        if x0 > x1 || y0 > y1 || x1 >= dims.width() || y1 >= dims.height() {
            return Err(Error::InvalidWindow { x0, y0, x1, y1 });
        }
        Ok(())
    }

    /// Close a session that init left open in DMA-overlap mode
    pub fn end_session(&mut self) -> Result<(), Error<I>> {
        if !self.session_open {
            return Ok(());
        }
        self.session_open = false;
        self.interface.end_session().map_err(Error::Interface)
    }

    /// Tear the driver down and hand back its resources
    ///
    /// No bus traffic is generated; the panel keeps showing its last frame.
    pub fn release(self) -> Parts<I, C, RST, BL> {
        if self.session_open {
            warn!("Releasing display with bus session still open");
        }
        Parts {
            interface: self.interface,
            clock: self.clock,
            reset: self.reset,
            backlight: self.backlight,
        }
    }

    fn transfer(&mut self, transfer: Transfer<'_>) -> Result<(), Error<I>> {
        self.with_bus(|interface| interface.execute(transfer))
    }

    /// Run `f` inside a bus session, reusing the held one if there is one
    pub(crate) fn with_bus<F>(&mut self, f: F) -> Result<(), Error<I>>
    where
        F: FnOnce(&mut I) -> Result<(), I::Error>,
    {
        if self.session_open {
            return f(&mut self.interface).map_err(Error::Interface);
        }
        let mut session = Session::begin(&mut self.interface).map_err(Error::Interface)?;
        f(&mut *session).map_err(Error::Interface)?;
        session.end().map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// MADCTL byte written during init
    pub fn control_byte(&self) -> u8 {
        self.control_byte
    }

    /// Whether init left the bus session open
    pub fn is_session_open(&self) -> bool {
        self.session_open
    }

    /// Whether the driver last drove the backlight to its lit level
    pub fn backlight_lit(&self) -> bool {
        self.backlight_lit
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn check_pixels<I: DisplayInterface>(pixels: &[u8]) -> Result<(), Error<I>> {
    if pixels.len() % 2 != 0 {
        return Err(Error::UnalignedPixelData { len: pixels.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::INIT_DIVISOR;
    use crate::config::{Builder, Orientation};
    use crate::mock::{Event, MockClock, MockDelay, MockInterface, MockPin, PinId, Timeline};

    type TestDisplay = Display<MockInterface, MockClock, MockPin, MockPin>;

    fn test_display(timeline: &Timeline, builder: Builder) -> TestDisplay {
        let config = builder
            .dimensions(Dimensions::new(32, 4).unwrap())
            .operating_divisor(6)
            .build()
            .unwrap();
        Display::new(
            MockInterface::new(timeline),
            MockClock(timeline.clone()),
            config,
        )
        .with_reset(MockPin::new(timeline, PinId::Reset))
        .with_backlight(MockPin::new(timeline, PinId::Backlight))
    }

    #[test]
    fn test_init_order() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());
        let mut delay = MockDelay(timeline.clone());

        display.init(&mut delay).unwrap();

        let events = timeline.events();
        let pos = |event: &Event| events.iter().position(|e| e == event).unwrap();
        let last = |event: &Event| events.iter().rposition(|e| e == event).unwrap();

        assert_eq!(events.first(), Some(&Event::Divisor(INIT_DIVISOR)));
        assert_eq!(events.last(), Some(&Event::Divisor(6)));
        assert!(last(&Event::Level(PinId::Reset, true)) < pos(&Event::Begin));
        assert!(pos(&Event::Begin) < pos(&Event::Command(0xB0)));
        let lit = pos(&Event::Level(PinId::Backlight, false));
        assert!(pos(&Event::Command(DISPLAY_ON)) < lit);
        assert!(lit < pos(&Event::Command(SET_COLUMN_ADDRESS)));
        assert!(last(&Event::Command(SET_PAGE_ADDRESS)) < pos(&Event::End));
        assert!(pos(&Event::End) < last(&Event::Divisor(6)));
        assert!(!display.is_session_open());
        assert!(display.backlight_lit());
    }

    #[test]
    fn test_init_without_pins() {
        let timeline = Timeline::default();
        let config = Builder::new()
            .dimensions(Dimensions::new(8, 2).unwrap())
            .build()
            .unwrap();
        let mut display = Display::new(
            MockInterface::new(&timeline),
            MockClock(timeline.clone()),
            config,
        );
        let mut delay = MockDelay(timeline.clone());

        display.init(&mut delay).unwrap();

        assert!(timeline.pin_levels(PinId::Reset).is_empty());
        assert!(timeline.pin_levels(PinId::Backlight).is_empty());
        // Only the sleep-out settle, no reset waits
        assert_eq!(timeline.total_delay_ms(), SLEEP_OUT_SETTLE_MS as u64);
    }

    #[test]
    fn test_init_fault_restores_clock_and_closes_session() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());
        display.interface.fail_at_command = Some(5);
        let mut delay = MockDelay(timeline.clone());

        let result = display.init(&mut delay);

        assert!(matches!(result, Err(Error::Interface(_))));
        let events = timeline.events();
        assert_eq!(events[events.len() - 2], Event::End);
        assert_eq!(events.last(), Some(&Event::Divisor(6)));
        assert!(!display.is_session_open());
    }

    #[test]
    fn test_dma_overlap_holds_session() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new().dma_overlap(true));
        let mut delay = MockDelay(timeline.clone());

        display.init(&mut delay).unwrap();

        assert!(display.is_session_open());
        assert!(!timeline.events().contains(&Event::End));
        assert_eq!(timeline.events().last(), Some(&Event::Divisor(6)));

        // Work issued afterwards reuses the held session
        timeline.clear();
        display.write_pixels(&[0x12, 0x34]).unwrap();
        assert_eq!(
            timeline.events(),
            [Event::Command(MEMORY_WRITE), Event::Data(alloc::vec![0x12, 0x34])]
        );

        display.end_session().unwrap();
        assert_eq!(timeline.events().last(), Some(&Event::End));
        assert!(!display.is_session_open());
    }

    #[test]
    fn test_control_byte_from_orientation() {
        let timeline = Timeline::default();
        let display = test_display(
            &timeline,
            Builder::new().orientation(Orientation {
                rotate_180: true,
                ..Orientation::portrait()
            }),
        );
        assert_eq!(display.control_byte(), 0xC8);
    }

    #[test]
    fn test_turn_on_off_backlight() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());
        let mut delay = MockDelay(timeline.clone());

        display.turn_off(&mut delay).unwrap();
        assert_eq!(timeline.pin_levels(PinId::Backlight), [true]);
        assert!(!display.backlight_lit());

        display.turn_on(&mut delay).unwrap();
        assert_eq!(timeline.pin_levels(PinId::Backlight), [true, false]);
        assert!(display.backlight_lit());

        // Each write re-asserts digital mode first
        let modes = timeline
            .events()
            .iter()
            .filter(|e| **e == Event::OutputMode(PinId::Backlight))
            .count();
        assert_eq!(modes, 2);
        assert!(timeline.commands().is_empty());
    }

    #[test]
    fn test_backlight_control_disabled_is_noop() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new().backlight_control(false));
        let mut delay = MockDelay(timeline.clone());

        display.turn_on(&mut delay).unwrap();
        display.turn_off(&mut delay).unwrap();

        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_sleep_on_power_off() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new().sleep_on_power_off(true));
        let mut delay = MockDelay(timeline.clone());

        display.turn_off(&mut delay).unwrap();
        assert_eq!(timeline.commands(), [DISPLAY_OFF, SLEEP_IN]);
        assert_eq!(timeline.pin_levels(PinId::Backlight), [true]);
        assert_eq!(timeline.total_delay_ms(), 120);

        timeline.clear();
        display.turn_on(&mut delay).unwrap();
        assert_eq!(timeline.commands(), [SLEEP_OUT, DISPLAY_ON]);
        assert_eq!(timeline.pin_levels(PinId::Backlight), [false]);
        let events = timeline.events();
        let display_on = events
            .iter()
            .position(|e| *e == Event::Command(DISPLAY_ON))
            .unwrap();
        let lit = events
            .iter()
            .position(|e| *e == Event::Level(PinId::Backlight, false))
            .unwrap();
        assert!(display_on < lit);
    }

    #[test]
    fn test_set_window_validation() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());

        assert!(matches!(
            display.set_window(0, 0, 32, 3),
            Err(Error::InvalidWindow { x1: 32, .. })
        ));
        assert!(matches!(
            display.set_window(5, 0, 4, 3),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(timeline.events().is_empty());

        display.set_window(1, 2, 31, 3).unwrap();
        assert_eq!(
            timeline.transfers(),
            [
                (SET_COLUMN_ADDRESS, alloc::vec![0, 1, 0, 31]),
                (SET_PAGE_ADDRESS, alloc::vec![0, 2, 0, 3]),
            ]
        );
        assert_eq!(timeline.events().first(), Some(&Event::Begin));
        assert_eq!(timeline.events().last(), Some(&Event::End));
    }

    #[test]
    fn test_write_pixels_rejects_odd_length() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());
        assert!(matches!(
            display.write_pixels(&[0x00, 0x00, 0x00]),
            Err(Error::UnalignedPixelData { len: 3 })
        ));
    }

    #[test]
    fn test_write_window_is_one_session() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());

        display
            .write_window(2, 1, 3, 1, &[0xF8, 0x00, 0x07, 0xE0])
            .unwrap();

        assert_eq!(
            timeline.events(),
            [
                Event::Begin,
                Event::Command(SET_COLUMN_ADDRESS),
                Event::Data(alloc::vec![0, 2, 0, 3]),
                Event::Command(SET_PAGE_ADDRESS),
                Event::Data(alloc::vec![0, 1, 0, 1]),
                Event::Command(MEMORY_WRITE),
                Event::Data(alloc::vec![0xF8, 0x00, 0x07, 0xE0]),
                Event::End,
            ]
        );
    }

    #[test]
    fn test_write_window_validates_before_touching_bus() {
        let timeline = Timeline::default();
        let mut display = test_display(&timeline, Builder::new());

        assert!(matches!(
            display.write_window(0, 0, 0, 4, &[0, 0]),
            Err(Error::InvalidWindow { y1: 4, .. })
        ));
        assert!(matches!(
            display.write_window(0, 0, 0, 0, &[0]),
            Err(Error::UnalignedPixelData { len: 1 })
        ));
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_release_is_silent() {
        let timeline = Timeline::default();
        let display = test_display(&timeline, Builder::new());
        let parts = display.release();
        assert!(parts.reset.is_some());
        assert!(parts.backlight.is_some());
        assert!(timeline.events().is_empty());
    }
}
