use serde::{Deserialize, Serialize};

use crate::sources::AnalogSource;

pub const AXIS_BITS: u8 = 12;
pub const AXIS_MAX: u16 = (1 << AXIS_BITS) - 1;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

pub enum NoAxis {}

impl AnalogSource for NoAxis {
    fn read_native(&mut self) -> u16 {
        match *self {}
    }
}

/// Rescales a sample of `bits` width to [`AXIS_BITS`], saturating at
/// [`AXIS_MAX`] when the source overshoots its own range.
pub fn scale_to_axis_bits(sample: u16, bits: u8) -> u16 {
    let sample = u32::from(sample);
    let scaled = if bits >= AXIS_BITS {
        sample.checked_shr(u32::from(bits - AXIS_BITS)).unwrap_or(0)
    } else {
        sample << (AXIS_BITS - bits)
    };
    scaled.min(u32::from(AXIS_MAX)) as u16
}

pub struct AxisSampler<X = NoAxis, Y = NoAxis> {
    x: Option<X>,
    y: Option<Y>,
}

impl<X, Y> AxisSampler<X, Y>
where
    X: AnalogSource,
    Y: AnalogSource,
{
    pub fn new(x: Option<X>, y: Option<Y>) -> Self {
        Self { x, y }
    }

    pub fn is_bound(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x.is_some(),
            Axis::Y => self.y.is_some(),
        }
    }

    pub fn read_axis(&mut self, axis: Axis) -> Option<u16> {
        match axis {
            Axis::X => self.x.as_mut().map(sample),
            Axis::Y => self.y.as_mut().map(sample),
        }
    }

    pub fn read_x(&mut self) -> Option<u16> {
        self.read_axis(Axis::X)
    }

    pub fn read_y(&mut self) -> Option<u16> {
        self.read_axis(Axis::Y)
    }
}

fn sample<S: AnalogSource>(source: &mut S) -> u16 {
    let bits = source.resolution_bits();
    scale_to_axis_bits(source.read_native(), bits)
}
