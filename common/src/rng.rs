/// Small LCG (Numerical Recipes constants). Plenty for picking which LED
/// twinkles next, and seedable so animations replay identically in tests.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in [0, max). `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are the well-mixed ones
        (self.next_u32() >> 8) % max
    }

    pub fn next_u8(&mut self) -> u8 {
        self.next_range(256) as u8
    }
}
