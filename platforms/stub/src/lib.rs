pub mod fb;
pub mod renderer;
pub mod view;

use std::time::Duration;

use anyhow::{bail, Result};
use log::info;

use neogrid_common::Strand;
use neogrid_platforms_common::StrandConfig;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use view::MatrixView;

/// Strand that only remembers what it was sent. Stands in for the hardware
/// on machines without LEDs.
#[derive(Debug, Clone, Default)]
pub struct StubStrand {
    words: Vec<u32>,
    shows: usize,
}

impl StubStrand {
    pub fn new(count: usize) -> Self {
        Self {
            words: vec![0; count],
            shows: 0,
        }
    }

    /// Words as of the last `set`, in strand order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn shows(&self) -> usize {
        self.shows
    }
}

impl Strand for StubStrand {
    fn len(&self) -> usize {
        self.words.len()
    }

    fn set(&mut self, index: usize, word: u32) -> Result<()> {
        let count = self.words.len();
        match self.words.get_mut(index) {
            Some(w) => *w = word,
            None => bail!("led {index} out of range for a strand of {count}"),
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.shows += 1;
        Ok(())
    }
}

pub fn platform_init(config: &StrandConfig, count: usize) -> Result<StubStrand> {
    config.validate()?;
    info!(
        "Using stub strand of {} leds (gpio {} ignored)",
        count, config.gpio_pin
    );
    Ok(StubStrand::new(count))
}

pub fn delay(time: Duration) {
    std::thread::sleep(time);
}
