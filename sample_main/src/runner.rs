use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use neogrid_common::{Animation, Display, Scheduler, Strand};
use neogrid_platforms_common::TickClock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub tick: Duration,
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// Every animation reported done
    Finished,
    /// The user asked to quit
    Quit,
    /// The tick limit was reached
    MaxTicks,
}

/// Where frames end up besides the strand, and where quit requests come from.
pub trait Frontend<S: Strand> {
    /// Called after every frame has been shown on the strand.
    fn present(&mut self, display: &Display<S>, status: &str) -> Result<()>;

    /// Waits up to `timeout` for input. Returns true when the user wants to
    /// quit. May return early.
    fn wait(&mut self, timeout: Duration) -> Result<bool>;
}

/// The fixed-tick loop: advance the scheduler, show the frame, wait out the
/// rest of the tick.
pub fn run<S: Strand>(
    display: &mut Display<S>,
    animations: Vec<Box<dyn Animation>>,
    options: &RunOptions,
    frontend: &mut impl Frontend<S>,
) -> Result<Stop> {
    let start = Instant::now();
    let mut scheduler = Scheduler::new(animations, start);
    let mut clock = TickClock::new(options.tick, start);

    loop {
        if options.max_ticks.is_some_and(|max| scheduler.ticks() >= max) {
            return Ok(Stop::MaxTicks);
        }

        let name = scheduler
            .current()
            .map(|a| a.name().to_string())
            .unwrap_or_default();
        let now = Instant::now();
        if !scheduler.tick(display.grid_mut(), now) {
            return Ok(Stop::Finished);
        }
        clock.advance(now);
        display.show()?;
        let status = format!("{name}  tick {}  q to quit", scheduler.ticks());
        frontend.present(display, &status)?;

        // Input is read at least once per tick, even when the tick is overdue
        loop {
            if frontend.wait(clock.wait_timeout(Instant::now()))? {
                debug!("quit requested after {} ticks", scheduler.ticks());
                return Ok(Stop::Quit);
            }
            if clock.is_due(Instant::now()) {
                break;
            }
        }
    }
}
