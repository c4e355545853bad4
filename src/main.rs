//! Polls the joystick every 50 ms and prints its JSON report.

#[cfg(target_os = "espidf")]
use device::run;
#[cfg(not(target_os = "espidf"))]
use sim::run;

fn main() -> anyhow::Result<()> {
    run()
}

#[cfg(target_os = "espidf")]
mod device {
    use std::{cell::RefCell, rc::Rc};

    use esp_idf_hal::adc::{config::Config, AdcChannelDriver, AdcDriver, Atten11dB, ADC1};
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::*;
    use esp_idf_hal::peripherals::Peripherals;
    use joystick_button::{AnalogSource, Clock, HalInput, Joystick, JoystickConfig};

    const POLL_INTERVAL_MS: u32 = 50;

    struct EspClock;

    impl Clock for EspClock {
        fn now_ms(&mut self) -> u32 {
            // esp_timer counts microseconds since boot
            (unsafe { esp_idf_sys::esp_timer_get_time() } / 1000) as u32
        }
    }

    /// One ADC1 pin sharing the converter with the other axis.
    struct EspAxis<'d, P: ADCPin<Adc = ADC1>> {
        adc: Rc<RefCell<AdcDriver<'d, ADC1>>>,
        channel: AdcChannelDriver<'d, P, Atten11dB<ADC1>>,
        last_sample: u16,
    }

    impl<'d, P: ADCPin<Adc = ADC1>> AnalogSource for EspAxis<'d, P> {
        fn resolution_bits(&self) -> u8 {
            12
        }

        fn read_native(&mut self) -> u16 {
            match self.adc.borrow_mut().read(&mut self.channel) {
                Ok(sample) => self.last_sample = sample,
                Err(err) => ::log::warn!("ADC read failed: {:?}", err),
            }
            self.last_sample
        }
    }

    pub fn run() -> anyhow::Result<()> {
        esp_idf_sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        let peripherals =
            Peripherals::take().ok_or_else(|| anyhow::anyhow!("Peripherals already taken"))?;

        let mut button = PinDriver::input(peripherals.pins.gpio13)?;
        button.set_pull(Pull::Up)?;

        let adc = Rc::new(RefCell::new(AdcDriver::new(
            peripherals.adc1,
            &Config::new(),
        )?));
        let x = EspAxis {
            adc: adc.clone(),
            channel: AdcChannelDriver::new(peripherals.pins.gpio34)?,
            last_sample: 0,
        };
        let y = EspAxis {
            adc,
            channel: AdcChannelDriver::new(peripherals.pins.gpio35)?,
            last_sample: 0,
        };

        let config = JoystickConfig {
            debounce_ms: 100,
            ..Default::default()
        };
        let button = HalInput::new(button, config.polarity);
        let mut joystick = Joystick::with_config(button, EspClock, Some(x), Some(y), &config);

        loop {
            joystick.update();

            if joystick.is_pressed() {
                ::log::info!("Button pressed");
            }
            if joystick.is_released() {
                ::log::info!("Button released");
            }

            println!("{}", serde_json::to_string(&joystick.report())?);

            FreeRtos::delay_ms(POLL_INTERVAL_MS);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::{
        thread,
        time::{Duration, Instant},
    };

    use joystick_button::{
        AnalogSource, DigitalSource, Joystick, JoystickConfig, Level, StdClock,
    };

    const POLL_INTERVAL: Duration = Duration::from_millis(50);
    const POLLS: u32 = 200;

    const CYCLE_MS: u128 = 3_000;
    const PRESS_START_MS: u128 = 1_000;
    const PRESS_END_MS: u128 = 2_000;
    const BOUNCE_MS: u128 = 30;

    /// Active-low switch held for one second out of every three, chattering
    /// around both transitions.
    struct BouncingSwitch {
        start: Instant,
    }

    impl DigitalSource for BouncingSwitch {
        fn level(&mut self) -> Level {
            let t = self.start.elapsed().as_millis() % CYCLE_MS;
            let pressed = (PRESS_START_MS..PRESS_END_MS).contains(&t);
            let near_edge =
                t.abs_diff(PRESS_START_MS) < BOUNCE_MS || t.abs_diff(PRESS_END_MS) < BOUNCE_MS;
            let chatter = near_edge && (t / 3) % 2 == 0;
            Level::from(pressed == chatter)
        }
    }

    /// 16-bit sawtooth sweeping the full range once per period.
    struct SweepAxis {
        start: Instant,
        period_ms: u128,
    }

    impl AnalogSource for SweepAxis {
        fn read_native(&mut self) -> u16 {
            let phase = self.start.elapsed().as_millis() % self.period_ms;
            (phase * u128::from(u16::MAX) / self.period_ms) as u16
        }
    }

    pub fn run() -> anyhow::Result<()> {
        sensible_env_logger::init!();

        let config = JoystickConfig::from_env("JOYSTICK_CONFIG")?;
        ::log::info!("Simulating joystick with {:?}", config);

        let start = Instant::now();
        let mut joystick = Joystick::with_config(
            BouncingSwitch { start },
            StdClock::new(),
            Some(SweepAxis {
                start,
                period_ms: 4_000,
            }),
            Some(SweepAxis {
                start,
                period_ms: 7_000,
            }),
            &config,
        );

        for _ in 0..POLLS {
            joystick.update();

            if joystick.is_pressed() {
                ::log::info!("Button pressed");
            }
            if joystick.is_released() {
                ::log::info!("Button released");
            }

            println!("{}", serde_json::to_string(&joystick.report())?);

            thread::sleep(POLL_INTERVAL);
        }

        Ok(())
    }
}
