use crate::MAX_BRIGHTNESS;

/// One LED of the matrix. `id` is the LED's position on the physical strand,
/// which differs from its logical grid position on serpentine-wired panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub id: usize,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub brightness: u8,
}

// Integer form of c * (brightness / 255), truncated
fn scale(channel: u8, brightness: u8) -> u8 {
    ((channel as u32 * brightness as u32) / MAX_BRIGHTNESS as u32) as u8
}

impl Pixel {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            red: 0,
            green: 0,
            blue: 0,
            white: 0,
            brightness: MAX_BRIGHTNESS,
        }
    }

    /// Packs the brightness-scaled channels into the 0xWWRRGGBB word the
    /// strand driver consumes.
    pub fn render(&self) -> u32 {
        (scale(self.white, self.brightness) as u32) << 24
            | (scale(self.red, self.brightness) as u32) << 16
            | (scale(self.green, self.brightness) as u32) << 8
            | scale(self.blue, self.brightness) as u32
    }

    /// Brightness-scaled red, green and blue. The white channel has no
    /// on-screen equivalent and is left out.
    pub fn scaled_rgb(&self) -> (u8, u8, u8) {
        (
            scale(self.red, self.brightness),
            scale(self.green, self.brightness),
            scale(self.blue, self.brightness),
        )
    }

    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.scaled_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.red = red;
        self.green = green;
        self.blue = blue;
    }

    /// Turns the colors off. Brightness is kept so a later color change shows
    /// at the same level.
    pub fn clear(&mut self) {
        self.red = 0;
        self.green = 0;
        self.blue = 0;
        self.white = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full_brightness() {
        let mut p = Pixel::new(0);
        p.white = 0x11;
        p.set_rgb(0x22, 0x33, 0x44);
        assert_eq!(p.render(), 0x11223344);
    }

    #[test]
    fn test_render_scaled() {
        let mut p = Pixel::new(3);
        p.set_rgb(255, 100, 1);
        p.brightness = 128;
        // 255*128/255 = 128, 100*128/255 = 50.19, 1*128/255 = 0.5
        assert_eq!(p.render(), 0x00803200);
        p.brightness = 0;
        assert_eq!(p.render(), 0);
    }

    #[test]
    fn test_clear_keeps_brightness() {
        let mut p = Pixel::new(1);
        p.set_rgb(1, 2, 3);
        p.white = 4;
        p.brightness = 40;
        p.clear();
        assert_eq!((p.red, p.green, p.blue, p.white), (0, 0, 0, 0));
        assert_eq!(p.brightness, 40);
    }

    #[test]
    fn test_hex_ignores_white() {
        let mut p = Pixel::new(0);
        p.white = 255;
        p.set_rgb(255, 0, 0x0a);
        assert_eq!(p.to_hex(), "#ff000a");
        p.brightness = 0;
        assert_eq!(p.to_hex(), "#000000");
    }
}
