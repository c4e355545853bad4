//! Debounced push button with press/release edges and a press counter, plus
//! 12-bit sampling of a two-axis analog joystick.
//!
//! The crate only sees its hardware through [`DigitalSource`], [`Clock`] and
//! [`AnalogSource`], so the same logic runs on the device and in host tests.

pub mod axis;
pub mod button;
pub mod config;
pub mod debouncer;
pub mod joystick;
pub mod sources;

pub use axis::{Axis, AxisSampler, NoAxis, AXIS_MAX};
pub use button::{ButtonStatus, CountMode, DebouncedButton, Polarity};
pub use config::JoystickConfig;
pub use joystick::{Joystick, JoystickReport};
pub use sources::{AnalogSource, Clock, DigitalSource, HalInput, Level, StdClock};
