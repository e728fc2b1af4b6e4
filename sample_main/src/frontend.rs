use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use neogrid_common::{Display, Strand};
use neogrid_platforms_stub::{FrameBuffer, MatrixView, TerminalRenderer};

use crate::runner::Frontend;

pub fn is_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Set from the Ctrl-C handler. In raw mode Ctrl-C arrives as a key instead,
/// so this only fires when the terminal is cooked or absent.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn install() -> Result<Self> {
        let interrupt = Self::default();
        let handle = interrupt.clone();
        ctrlc::set_handler(move || handle.request()).context("installing the Ctrl-C handler")?;
        Ok(interrupt)
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))] {
        use crossterm::terminal;
        use log::warn;

        use crate::platform_libs::delay;

        fn poll_quit(timeout: Duration) -> Result<bool> {
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    return Ok(is_quit(key));
                }
            }
            Ok(false)
        }

        /// Real LEDs: nothing to draw, the keyboard is only read when stdin
        /// is a terminal. Ctrl-C always ends the run through `interrupt`.
        pub struct HardwareFrontend {
            raw: bool,
            interrupt: Interrupt,
        }

        impl HardwareFrontend {
            pub fn open(interrupt: Interrupt) -> Self {
                match terminal::enable_raw_mode() {
                    Ok(()) => Self { raw: true, interrupt },
                    Err(e) => {
                        warn!("Keyboard unavailable ({e}), stop with Ctrl-C");
                        Self { raw: false, interrupt }
                    }
                }
            }
        }

        impl Drop for HardwareFrontend {
            fn drop(&mut self) {
                if self.raw {
                    let _ = terminal::disable_raw_mode();
                }
            }
        }

        impl<S: Strand> Frontend<S> for HardwareFrontend {
            fn present(&mut self, _display: &Display<S>, _status: &str) -> Result<()> {
                Ok(())
            }

            fn wait(&mut self, timeout: Duration) -> Result<bool> {
                if self.interrupt.is_set() {
                    return Ok(true);
                }
                if !self.raw {
                    delay(timeout);
                    return Ok(self.interrupt.is_set());
                }
                poll_quit(timeout)
            }
        }
    }
}

/// Terminal simulator: every frame is painted as a grid of colored dots.
pub struct SimulatorFrontend {
    renderer: TerminalRenderer,
    view: MatrixView,
    fb: FrameBuffer,
    interrupt: Interrupt,
}

impl SimulatorFrontend {
    fn new(interrupt: Interrupt) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: MatrixView::default(),
            fb: FrameBuffer::new(0, 0),
            interrupt,
        }
    }

    pub fn enter(interrupt: Interrupt) -> Result<Self> {
        let mut frontend = Self::new(interrupt);
        frontend.renderer.enter()?;
        Ok(frontend)
    }

    pub fn exit(mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl<S: Strand> Frontend<S> for SimulatorFrontend {
    fn present(&mut self, display: &Display<S>, status: &str) -> Result<()> {
        self.view.render(display.grid(), status, &mut self.fb);
        self.renderer.draw(&self.fb)
    }

    fn wait(&mut self, timeout: Duration) -> Result<bool> {
        if self.interrupt.is_set() {
            return Ok(true);
        }
        if !event::poll(timeout)? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) => Ok(is_quit(key)),
            Event::Resize(..) => {
                self.renderer.invalidate();
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}
