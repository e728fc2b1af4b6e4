use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use neogrid_common::{Animation, Hold, Pulse, Twinkle};
use neogrid_platforms_common::{
    ColorOrder, StrandConfig, DEFAULT_BRIGHTNESS, DEFAULT_DMA, DEFAULT_LED_FREQUENCY,
};

use crate::runner::RunOptions;

/// Neopixel matrix animation runner
///
/// Plays animations on a serpentine-wired LED matrix attached to a Raspberry Pi,
/// or in a terminal simulator when there is no hardware. Press q, Esc or Ctrl-C
/// to stop. Logging goes to stderr and is controlled by RUST_LOG.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Matrix rows
    #[arg(long, default_value_t = 7)]
    pub rows: usize,
    /// Matrix columns
    #[arg(long, default_value_t = 7)]
    pub cols: usize,
    /// BCM GPIO number of the data line (not the header pin number)
    #[arg(long, default_value_t = 18)]
    pub gpio_pin: u32,
    /// Strand signal frequency
    #[arg(long, default_value_t = DEFAULT_LED_FREQUENCY, value_name = "Hz")]
    pub led_frequency: u32,
    /// DMA channel used for signal generation. Avoid 5 on the Pi 3
    #[arg(long, default_value_t = DEFAULT_DMA)]
    pub dma: u8,
    /// Initial brightness of every LED, 0-255
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS)]
    pub brightness: u8,
    /// Invert the signal (NPN transistor level shifter)
    #[arg(long)]
    pub invert: bool,
    /// PWM channel, 1 for GPIO 13, 19, 41, 45 or 53
    #[arg(long, default_value_t = 0)]
    pub channel: u8,
    /// Strip byte order: rgb, grb, grbw, ...
    #[arg(long, default_value = "grb")]
    pub color_order: ColorOrder,
    /// Animation tick
    #[arg(long, default_value_t = 50, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,
    /// Draw in the terminal even when LED hardware is available
    #[arg(long)]
    pub simulate: bool,
    /// What to play
    #[command(subcommand)]
    pub program: Option<Program>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Program {
    /// Random LEDs fade in and out in random colors (default)
    Twinkle {
        /// Stop after this many twinkles
        #[arg(long)]
        count: Option<usize>,
        /// Random seed, taken from the clock when omitted
        #[arg(long)]
        seed: Option<u32>,
    },
    /// A blue LED in the corner breathing up and down
    Pulse,
    /// Whole matrix red, then green, then the pulse
    Demo {
        /// How long each solid color is held
        #[arg(long, default_value_t = 2000, value_name = "MS")]
        hold_ms: u64,
    },
}

impl Default for Program {
    fn default() -> Self {
        Program::Twinkle {
            count: None,
            seed: None,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

impl Cli {
    pub fn strand_config(&self) -> StrandConfig {
        StrandConfig {
            gpio_pin: self.gpio_pin,
            led_frequency: self.led_frequency,
            dma: self.dma,
            initial_brightness: self.brightness,
            invert: self.invert,
            channel: self.channel,
            color_order: self.color_order,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            tick: Duration::from_millis(self.tick_ms),
            max_ticks: self.max_ticks,
        }
    }

    pub fn animations(&self) -> Vec<Box<dyn Animation>> {
        match self.program.clone().unwrap_or_default() {
            Program::Twinkle { count, seed } => {
                let twinkle = Twinkle::new(seed.unwrap_or_else(clock_seed));
                let twinkle: Box<dyn Animation> = match count {
                    Some(count) => Box::new(twinkle.with_limit(count)),
                    None => Box::new(twinkle),
                };
                vec![twinkle]
            }
            Program::Pulse => vec![Box::new(Pulse::new())],
            Program::Demo { hold_ms } => {
                let hold = Duration::from_millis(hold_ms);
                vec![
                    Box::new(Hold::new((255, 0, 0), self.brightness, hold)),
                    Box::new(Hold::new((0, 255, 0), self.brightness, hold)),
                    Box::new(Pulse::new()),
                ]
            }
        }
    }
}
