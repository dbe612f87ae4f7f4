//! Bus clock staging around initialization
//!
//! The register program runs at a deliberately slow SPI clock so it succeeds
//! even when the configured operating speed is too fast for a given board.
//! [`ClockGuard`] lowers the divisor when it is created and puts the
//! operating divisor back when it goes away, on every exit path.

use core::sync::atomic::{Ordering, fence};

use log::debug;

/// Divisor used while the register program runs
///
/// Slow enough to work on every MZ61581 board seen so far.
pub const INIT_DIVISOR: u32 = 34;

/// Something that owns the SPI clock divisor
pub trait BusClock {
    /// Program a new clock divisor
    fn set_divisor(&mut self, divisor: u32);
}

impl<T: BusClock + ?Sized> BusClock for &mut T {
    fn set_divisor(&mut self, divisor: u32) {
        T::set_divisor(self, divisor)
    }
}

/// Clock for transports that cannot change speed at runtime
///
/// Every divisor write is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClock;

impl BusClock for FixedClock {
    fn set_divisor(&mut self, _divisor: u32) {}
}

/// Holds the bus at [`INIT_DIVISOR`] until dropped
pub struct ClockGuard<'a, C: BusClock> {
    clock: &'a mut C,
    operating: u32,
}

impl<'a, C: BusClock> ClockGuard<'a, C> {
    /// Drop the clock to [`INIT_DIVISOR`]
    ///
    /// The fence makes the new divisor visible before any transfer that
    /// follows is issued.
    pub fn lower_for_init(clock: &'a mut C, operating: u32) -> Self {
        debug!("Lowering SPI clock divisor to {INIT_DIVISOR} for init");
        clock.set_divisor(INIT_DIVISOR);
        fence(Ordering::SeqCst);
        Self { clock, operating }
    }

    /// Put the operating divisor back now
    pub fn restore_operating_speed(self) {
        drop(self);
    }
}

impl<C: BusClock> Drop for ClockGuard<'_, C> {
    fn drop(&mut self) {
        debug!("Restoring SPI clock divisor to {}", self.operating);
        self.clock.set_divisor(self.operating);
    }
}
