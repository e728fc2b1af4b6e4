pub mod animation;
pub mod display;
pub mod grid;
pub mod layout;
pub mod pixel;
pub mod rng;
pub mod strand;

pub use animation::{Animation, Hold, Pulse, Scheduler, Twinkle};
pub use display::Display;
pub use grid::Grid;
pub use layout::Layout;
pub use pixel::Pixel;
pub use strand::Strand;

pub const MAX_BRIGHTNESS: u8 = 255;
