use anyhow::Result;

/// A physical (or pretend) run of LEDs addressed by strand position.
///
/// Words use the 0xWWRRGGBB layout produced by [`crate::Pixel::render`].
/// Nothing is visible until `show` latches the buffer out.
pub trait Strand {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, index: usize, word: u32) -> Result<()>;

    fn show(&mut self) -> Result<()>;
}

impl<S: Strand + ?Sized> Strand for Box<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn set(&mut self, index: usize, word: u32) -> Result<()> {
        (**self).set(index, word)
    }

    fn show(&mut self) -> Result<()> {
        (**self).show()
    }
}
