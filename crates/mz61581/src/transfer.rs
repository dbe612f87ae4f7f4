//! One SPI transaction: an opcode and its payload
//!
//! A [`Transfer`] is built at the call site, handed to
//! [`DisplayInterface::execute`](crate::interface::DisplayInterface::execute)
//! by value and gone once that call returns. The borrow on the payload keeps
//! a task from outliving the bytes it points at, and taking it by value means
//! it cannot be committed twice.

/// A single command transaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transfer<'a> {
    command: u8,
    payload: &'a [u8],
}

impl<'a> Transfer<'a> {
    /// Command followed by parameter or pixel bytes
    pub const fn new(command: u8, payload: &'a [u8]) -> Self {
        Self { command, payload }
    }

    /// Bare command with no payload
    pub const fn command_only(command: u8) -> Self {
        Self {
            command,
            payload: &[],
        }
    }

    /// Opcode sent with DC low
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Bytes sent with DC high
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the transfer is a bare command
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
