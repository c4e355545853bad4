use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::axis::{Axis, AxisSampler, NoAxis};
use crate::button::{ButtonStatus, CountMode, DebouncedButton, Polarity};
use crate::config::JoystickConfig;
use crate::sources::{AnalogSource, Clock, DigitalSource, Level};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickReport {
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub button: ButtonStatus,
    pub pressed_count: u32,
}

/// Two-axis joystick with a push button. Call [`Joystick::update`] at least
/// every half debounce window.
pub struct Joystick<B, C, X = NoAxis, Y = NoAxis> {
    button_pin: B,
    clock: C,
    button: DebouncedButton,
    axes: AxisSampler<X, Y>,
}

impl<B, C, X, Y> Joystick<B, C, X, Y>
where
    B: DigitalSource,
    C: Clock,
    X: AnalogSource,
    Y: AnalogSource,
{
    pub fn new(
        mut button_pin: B,
        mut clock: C,
        x: Option<X>,
        y: Option<Y>,
        polarity: Polarity,
    ) -> Self {
        let initial = button_pin.level();
        let now = clock.now_ms();
        Self {
            button_pin,
            clock,
            button: DebouncedButton::new(polarity, initial, now),
            axes: AxisSampler::new(x, y),
        }
    }

    pub fn with_config(
        button_pin: B,
        clock: C,
        x: Option<X>,
        y: Option<Y>,
        config: &JoystickConfig,
    ) -> Self {
        let mut joystick = Self::new(button_pin, clock, x, y, config.polarity);
        joystick.apply_config(config);
        joystick
    }

    // polarity is fixed at construction
    pub fn apply_config(&mut self, config: &JoystickConfig) {
        self.set_debounce_window(config.debounce_window());
        self.set_press_count_mode_str(&config.count_mode);
    }

    pub fn update(&mut self) -> Option<ButtonStatus> {
        let level = self.button_pin.level();
        let now = self.clock.now_ms();
        self.button.poll(level, now)
    }

    pub fn set_debounce_window(&mut self, window: Duration) {
        self.button.set_debounce_window(window);
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn is_released(&self) -> bool {
        self.button.is_released()
    }

    pub fn read_button_state(&self) -> Level {
        self.button.read_button_state()
    }

    pub fn set_press_count_mode(&mut self, mode: CountMode) {
        self.button.set_press_count_mode(mode);
    }

    pub fn set_press_count_mode_str(&mut self, mode: &str) {
        self.button.set_press_count_mode_str(mode);
    }

    pub fn get_press_count(&self) -> u32 {
        self.button.get_press_count()
    }

    pub fn reset_press_count(&mut self) {
        self.button.reset_press_count();
    }

    pub fn read_axis(&mut self, axis: Axis) -> Option<u16> {
        self.axes.read_axis(axis)
    }

    pub fn read_x(&mut self) -> Option<u16> {
        self.axes.read_x()
    }

    pub fn read_y(&mut self) -> Option<u16> {
        self.axes.read_y()
    }

    pub fn button(&self) -> &DebouncedButton {
        &self.button
    }

    pub fn report(&mut self) -> JoystickReport {
        JoystickReport {
            x: self.read_x(),
            y: self.read_y(),
            button: self.button.status(),
            pressed_count: self.button.get_press_count(),
        }
    }
}
