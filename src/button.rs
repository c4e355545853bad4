use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

use crate::debouncer::Debouncer;
use crate::sources::Level;

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub fn pressed_level(self) -> Level {
        match self {
            Polarity::ActiveLow => Level::Low,
            Polarity::ActiveHigh => Level::High,
        }
    }

    pub fn unpressed_level(self) -> Level {
        match self {
            Polarity::ActiveLow => Level::High,
            Polarity::ActiveHigh => Level::Low,
        }
    }

    pub fn status(self, level: Level) -> ButtonStatus {
        if level == self.pressed_level() {
            ButtonStatus::Pressed
        } else {
            ButtonStatus::Released
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStatus {
    Pressed,
    Released,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountMode {
    // pressed -> unpressed
    #[default]
    CountFalling,
    // unpressed -> pressed
    CountRising,
    CountBoth,
}

impl CountMode {
    pub fn counts(self, status: ButtonStatus) -> bool {
        matches!(
            (self, status),
            (CountMode::CountBoth, _)
                | (CountMode::CountFalling, ButtonStatus::Released)
                | (CountMode::CountRising, ButtonStatus::Pressed)
        )
    }
}

impl FromStr for CountMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COUNT_FALLING" => Ok(CountMode::CountFalling),
            "COUNT_RISING" => Ok(CountMode::CountRising),
            "COUNT_BOTH" => Ok(CountMode::CountBoth),
            other => anyhow::bail!("unknown press count mode {other:?}"),
        }
    }
}

/// Debounced button with edge detection and a press counter. Edge queries
/// describe only the most recent poll.
pub struct DebouncedButton {
    polarity: Polarity,
    debouncer: Debouncer,
    count_mode: CountMode,
    count: u32,
}

impl DebouncedButton {
    pub fn new(polarity: Polarity, initial: Level, now_ms: u32) -> Self {
        Self {
            polarity,
            debouncer: Debouncer::new(initial, now_ms),
            count_mode: CountMode::default(),
            count: 0,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn set_debounce_window(&mut self, window: Duration) {
        self.debouncer.set_debounce_duration(window);
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.debounce_duration()
    }

    /// Returns the status the button moved to if this poll confirmed an edge.
    pub fn poll(&mut self, raw: Level, now_ms: u32) -> Option<ButtonStatus> {
        let (_, to) = self.debouncer.update(raw, now_ms)?;
        let status = self.polarity.status(to);

        if self.count_mode.counts(status) {
            self.count = self.count.saturating_add(1);
        }
        ::log::debug!("Button {:?} at {} ms, count {}", status, now_ms, self.count);

        Some(status)
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.previous_steady() == self.polarity.unpressed_level()
            && self.debouncer.current_steady() == self.polarity.pressed_level()
    }

    pub fn is_released(&self) -> bool {
        self.debouncer.previous_steady() == self.polarity.pressed_level()
            && self.debouncer.current_steady() == self.polarity.unpressed_level()
    }

    pub fn read_button_state(&self) -> Level {
        self.debouncer.current_steady()
    }

    pub fn status(&self) -> ButtonStatus {
        self.polarity.status(self.debouncer.current_steady())
    }

    pub fn press_count_mode(&self) -> CountMode {
        self.count_mode
    }

    pub fn set_press_count_mode(&mut self, mode: CountMode) {
        self.count_mode = mode;
    }

    /// Accepts `COUNT_FALLING`, `COUNT_RISING` or `COUNT_BOTH`. Anything else
    /// leaves the current mode untouched.
    pub fn set_press_count_mode_str(&mut self, mode: &str) {
        match mode.parse() {
            Ok(mode) => self.set_press_count_mode(mode),
            Err(err) => ::log::debug!("Ignoring press count mode: {}", err),
        }
    }

    pub fn get_press_count(&self) -> u32 {
        self.count
    }

    pub fn reset_press_count(&mut self) {
        self.count = 0;
    }
}
