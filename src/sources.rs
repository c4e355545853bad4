use embedded_hal::digital::v2::InputPin;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Instant};

use crate::button::Polarity;

/// Raw electrical level of a digital input.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Current level of a bound digital pin. Reading has no side effects.
pub trait DigitalSource {
    fn level(&mut self) -> Level;
}

/// Monotonic millisecond counter, allowed to wrap at `u32::MAX`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

/// One analog channel sampled at its native resolution.
pub trait AnalogSource {
    /// Width of the samples returned by [`AnalogSource::read_native`].
    fn resolution_bits(&self) -> u8 {
        16
    }

    fn read_native(&mut self) -> u16;
}

/// Any `embedded-hal` input pin used as a [`DigitalSource`].
///
/// A failed read is logged and the last successfully read level is reported
/// instead, so a flaky driver looks like a pin that did not move. Until the
/// first good read that level is the unpressed level of the wiring.
pub struct HalInput<P> {
    pin: P,
    last_level: Level,
}

impl<P> HalInput<P>
where
    P: InputPin,
    P::Error: Debug,
{
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut input = Self {
            pin,
            last_level: polarity.unpressed_level(),
        };
        input.last_level = input.level();
        input
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> DigitalSource for HalInput<P>
where
    P: InputPin,
    P::Error: Debug,
{
    fn level(&mut self) -> Level {
        match self.pin.is_high() {
            Ok(high) => self.last_level = Level::from(high),
            Err(err) => ::log::warn!("Pin read failed, keeping {:?}: {:?}", self.last_level, err),
        }
        self.last_level
    }
}

/// Host clock counting milliseconds since it was created.
pub struct StdClock {
    start: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&mut self) -> u32 {
        // truncation is the wrap
        self.start.elapsed().as_millis() as u32
    }
}
