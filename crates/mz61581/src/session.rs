//! Scoped bus communication session

use core::ops::{Deref, DerefMut};

use log::warn;

use crate::interface::DisplayInterface;

/// An open bus session
///
/// Created by [`Session::begin`]. Dropping it closes the session, so the bus
/// goes back to idle even when a transfer inside it fails. Use
/// [`Session::end`] to see the close result, or [`Session::hold_open`] to
/// leave chip select and transfer-active asserted for a later caller.
pub struct Session<'a, I: DisplayInterface> {
    interface: &'a mut I,
    closed: bool,
}

impl<'a, I: DisplayInterface> Session<'a, I> {
    /// Open a session on `interface`
    pub fn begin(interface: &'a mut I) -> Result<Self, I::Error> {
        interface.begin_session()?;
        Ok(Self {
            interface,
            closed: false,
        })
    }

    /// Close the session and report the result
    pub fn end(mut self) -> Result<(), I::Error> {
        self.closed = true;
        self.interface.end_session()
    }

    /// Leave the session open past this scope
    pub fn hold_open(mut self) {
        self.closed = true;
    }
}

impl<I: DisplayInterface> Deref for Session<'_, I> {
    type Target = I;

    fn deref(&self) -> &I {
        &*self.interface
    }
}

impl<I: DisplayInterface> DerefMut for Session<'_, I> {
    fn deref_mut(&mut self) -> &mut I {
        &mut *self.interface
    }
}

impl<I: DisplayInterface> Drop for Session<'_, I> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.interface.end_session() {
            warn!("Failed to close bus session: {e:?}");
        }
    }
}
