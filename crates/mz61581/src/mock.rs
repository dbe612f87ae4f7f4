//! Recording doubles for unit tests
//!
//! Interface, pins, delay and clock all append to one shared timeline so a
//! test can assert on the exact interleaving of bus traffic, pin levels and
//! waits.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::clock::BusClock;
use crate::interface::DisplayInterface;
use crate::power::BacklightPin;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinId {
    Reset,
    Backlight,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Begin,
    End,
    Command(u8),
    Data(Vec<u8>),
    DelayNs(u64),
    Level(PinId, bool),
    OutputMode(PinId),
    Divisor(u32),
}

#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Commands paired with the data block that followed each one
    pub fn transfers(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in self.0.borrow().iter() {
            match event {
                Event::Command(c) => out.push((*c, Vec::new())),
                Event::Data(d) => {
                    if let Some(last) = out.last_mut() {
                        last.1.extend_from_slice(d);
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn commands(&self) -> Vec<u8> {
        self.transfers().into_iter().map(|(c, _)| c).collect()
    }

    pub fn pin_levels(&self, pin: PinId) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Level(p, level) if *p == pin => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::DelayNs(ns) => *ns,
                _ => 0,
            })
            .sum::<u64>()
            / 1_000_000
    }
}

#[derive(Debug, PartialEq)]
pub struct Fault;

pub struct MockInterface {
    pub timeline: Timeline,
    /// Fail the Nth command (0-based) and everything after it
    pub fail_at_command: Option<usize>,
    commands_seen: usize,
}

impl MockInterface {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
            fail_at_command: None,
            commands_seen: 0,
        }
    }
}

impl DisplayInterface for MockInterface {
    type Error = Fault;

    fn send_command(&mut self, command: u8) -> Result<(), Fault> {
        let index = self.commands_seen;
        self.commands_seen += 1;
        if self.fail_at_command.is_some_and(|n| index >= n) {
            return Err(Fault);
        }
        self.timeline.push(Event::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Fault> {
        self.timeline.push(Event::Data(data.to_vec()));
        Ok(())
    }

    fn begin_session(&mut self) -> Result<(), Fault> {
        self.timeline.push(Event::Begin);
        Ok(())
    }

    fn end_session(&mut self) -> Result<(), Fault> {
        self.timeline.push(Event::End);
        Ok(())
    }
}

pub struct MockPin {
    timeline: Timeline,
    id: PinId,
}

impl MockPin {
    pub fn new(timeline: &Timeline, id: PinId) -> Self {
        Self {
            timeline: timeline.clone(),
            id,
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.timeline.push(Event::Level(self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.timeline.push(Event::Level(self.id, true));
        Ok(())
    }
}

impl BacklightPin for MockPin {
    fn set_output_mode(&mut self) -> Result<(), Infallible> {
        self.timeline.push(Event::OutputMode(self.id));
        Ok(())
    }
}

pub struct MockDelay(pub Timeline);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayNs(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::DelayNs(us as u64 * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayNs(ms as u64 * 1_000_000));
    }
}

pub struct MockClock(pub Timeline);

impl BusClock for MockClock {
    fn set_divisor(&mut self, divisor: u32) {
        self.0.push(Event::Divisor(divisor));
    }
}
