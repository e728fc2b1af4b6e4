use anyhow::{anyhow, Context, Result};
use log::{info, trace};
use rs_ws281x::{ChannelBuilder, Controller, ControllerBuilder, StripType};

use neogrid_common::Strand;
use neogrid_platforms_common::{split_word, ColorOrder, StrandConfig};

/// A strand driven by the rpi_ws281x library. The library owns the DMA/PWM
/// signal generation, we only fill its LED buffer and ask it to render.
pub struct RpiStrand {
    controller: Controller,
    channel: usize,
    count: usize,
}

fn strip_type(order: ColorOrder) -> StripType {
    match order {
        ColorOrder::Rgb => StripType::Ws2811Rgb,
        ColorOrder::Rbg => StripType::Ws2811Rbg,
        ColorOrder::Grb => StripType::Ws2811Grb,
        ColorOrder::Gbr => StripType::Ws2811Gbr,
        ColorOrder::Brg => StripType::Ws2811Brg,
        ColorOrder::Bgr => StripType::Ws2811Bgr,
        ColorOrder::Grbw => StripType::Sk6812Grbw,
        ColorOrder::Rgbw => StripType::Sk6812Rgbw,
    }
}

pub fn platform_init(config: &StrandConfig, count: usize) -> Result<RpiStrand> {
    config.validate()?;
    info!(
        "Opening ws281x strand: gpio {}, {} leds, {} Hz, dma {}, channel {}",
        config.gpio_pin, count, config.led_frequency, config.dma, config.channel
    );
    let pin = i32::try_from(config.gpio_pin)
        .with_context(|| format!("gpio {} out of range", config.gpio_pin))?;
    let led_count =
        i32::try_from(count).with_context(|| format!("{count} leds is more than ws281x supports"))?;
    let channel = ChannelBuilder::new()
        .pin(pin)
        .count(led_count)
        .strip_type(strip_type(config.color_order))
        .brightness(config.initial_brightness)
        .invert(config.invert)
        .build();
    let controller = ControllerBuilder::new()
        .freq(config.led_frequency)
        .dma(i32::from(config.dma))
        .channel(config.channel as usize, channel)
        .build()
        .map_err(|e| anyhow!("ws281x init failed on gpio {}: {e:?}", config.gpio_pin))?;

    Ok(RpiStrand {
        controller,
        channel: config.channel as usize,
        count,
    })
}

impl Strand for RpiStrand {
    fn len(&self) -> usize {
        self.count
    }

    fn set(&mut self, index: usize, word: u32) -> Result<()> {
        let count = self.count;
        let led = self
            .controller
            .leds_mut(self.channel)
            .get_mut(index)
            .ok_or_else(|| anyhow!("led {index} out of range for a strand of {count}"))?;
        *led = split_word(word);
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.controller
            .render()
            .map_err(|e| anyhow!("ws281x render failed: {e:?}"))?;
        trace!("rendered {} leds", self.count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both are rejected before the controller is opened
    #[test]
    fn test_out_of_range_pin() {
        assert!(platform_init(&StrandConfig::new(u32::MAX), 49).is_err());
    }

    #[test]
    fn test_out_of_range_count() {
        assert!(platform_init(&StrandConfig::new(18), usize::MAX).is_err());
    }
}
