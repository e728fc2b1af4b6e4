use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use log::warn;

pub const DEFAULT_LED_FREQUENCY: u32 = 800_000;
pub const DEFAULT_DMA: u8 = 10;
pub const DEFAULT_BRIGHTNESS: u8 = 255;
// GPIOs that are routed to PWM channel 1 on the Pi
pub const CHANNEL1_PINS: [u32; 5] = [13, 19, 41, 45, 53];

/// Byte order the strip expects on the wire. The native library does the
/// reordering, we only tell it which one to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
    /// SK6812 style strips with a dedicated white LED
    Grbw,
    Rgbw,
}

impl std::str::FromStr for ColorOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let order = match s.to_ascii_lowercase().as_str() {
            "rgb" => ColorOrder::Rgb,
            "rbg" => ColorOrder::Rbg,
            "grb" => ColorOrder::Grb,
            "gbr" => ColorOrder::Gbr,
            "brg" => ColorOrder::Brg,
            "bgr" => ColorOrder::Bgr,
            "grbw" => ColorOrder::Grbw,
            "rgbw" => ColorOrder::Rgbw,
            other => bail!("unknown color order {other}"),
        };
        Ok(order)
    }
}

/// Everything the driver needs to open a strand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandConfig {
    /// BCM GPIO number the data line is on. This is neither the physical
    /// header pin nor the WiringPi number.
    pub gpio_pin: u32,
    pub led_frequency: u32,
    pub dma: u8,
    pub initial_brightness: u8,
    /// Set when an NPN transistor level shifter inverts the signal
    pub invert: bool,
    pub channel: u8,
    pub color_order: ColorOrder,
}

impl StrandConfig {
    pub fn new(gpio_pin: u32) -> Self {
        Self {
            gpio_pin,
            led_frequency: DEFAULT_LED_FREQUENCY,
            dma: DEFAULT_DMA,
            initial_brightness: DEFAULT_BRIGHTNESS,
            invert: false,
            channel: 0,
            color_order: ColorOrder::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.led_frequency == 0 {
            bail!("led frequency must be non-zero");
        }
        let channel1_pin = CHANNEL1_PINS.contains(&self.gpio_pin);
        match self.channel {
            0 if channel1_pin => {
                warn!(
                    "gpio {} is a channel 1 pin but channel 0 was configured",
                    self.gpio_pin
                );
            }
            0 => {}
            1 if !channel1_pin => {
                bail!(
                    "channel 1 needs one of gpio {:?}, got {}",
                    CHANNEL1_PINS,
                    self.gpio_pin
                );
            }
            1 => {}
            other => bail!("channel must be 0 or 1, got {other}"),
        }
        if self.dma == 5 {
            warn!("dma channel 5 is known to corrupt files on the Pi 3");
        }
        Ok(())
    }
}

/// Splits a 0xWWRRGGBB word into the bytes of its in-memory (little endian)
/// layout, `[B, G, R, W]`, which is what the native LED buffer holds.
pub fn split_word(word: u32) -> [u8; 4] {
    word.to_le_bytes()
}

/// Paces a loop at a fixed tick.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick: Duration,
    last: Instant,
}

impl TickClock {
    pub fn new(tick: Duration, now: Instant) -> Self {
        Self { tick, last: now }
    }

    /// Time left until the next tick is due, zero when already late.
    pub fn wait_timeout(&self, now: Instant) -> Duration {
        self.tick
            .checked_sub(now.saturating_duration_since(self.last))
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) >= self.tick
    }

    pub fn advance(&mut self, now: Instant) {
        self.last = now;
    }
}
