use std::time::{Duration, Instant};

use log::debug;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::MAX_BRIGHTNESS;

/// Something that draws into the grid one tick at a time.
pub trait Animation {
    /// Advances by one tick. `delta` is the wall time since the previous tick.
    fn update(&mut self, grid: &mut Grid, delta: Duration);

    fn is_done(&self) -> bool;

    fn name(&self) -> &str {
        "animation"
    }
}

/// Drives a list of animations at a fixed tick. The current animation keeps
/// the ticks until it reports done, then the next one takes over, wrapping
/// around at the end of the list. Finished animations are skipped.
pub struct Scheduler {
    animations: Vec<Box<dyn Animation>>,
    current: usize,
    last_tick: Instant,
    ticks: u64,
}

impl Scheduler {
    pub fn new(animations: Vec<Box<dyn Animation>>, now: Instant) -> Self {
        Self {
            animations,
            current: 0,
            last_tick: now,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.animations.iter().all(|a| a.is_done())
    }

    /// The animation the next tick goes to, if any is still running.
    pub fn current(&self) -> Option<&dyn Animation> {
        let len = self.animations.len();
        (0..len)
            .map(|step| &self.animations[(self.current + step) % len])
            .find(|a| !a.is_done())
            .map(|a| &**a)
    }

    fn select(&mut self) -> Option<usize> {
        let len = self.animations.len();
        let next = (0..len)
            .map(|step| (self.current + step) % len)
            .find(|&i| !self.animations[i].is_done())?;
        if next != self.current || self.ticks == 0 {
            debug!("scheduler switching to {}", self.animations[next].name());
        }
        self.current = next;
        Some(next)
    }

    /// Runs one tick. Returns false once every animation is done, in which
    /// case the grid is left untouched.
    pub fn tick(&mut self, grid: &mut Grid, now: Instant) -> bool {
        let Some(i) = self.select() else {
            debug!("all animations done after {} ticks", self.ticks);
            return false;
        };
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.animations[i].update(grid, delta);
        self.ticks += 1;
        true
    }
}

/// Single blue LED in the corner breathing up and down forever.
#[derive(Debug, Default)]
pub struct Pulse {
    brightness: u8,
    decreasing: bool,
}

impl Pulse {
    const STEP: u8 = 10;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Animation for Pulse {
    fn update(&mut self, grid: &mut Grid, _delta: Duration) {
        grid.clear();
        if let Some(pixel) = grid.pixel_at_mut(0, 0) {
            pixel.brightness = self.brightness;
            pixel.blue = MAX_BRIGHTNESS;
        }

        if self.decreasing {
            self.brightness = self.brightness.saturating_sub(Self::STEP);
            if self.brightness == 0 {
                self.decreasing = false;
            }
        } else {
            self.brightness = self.brightness.saturating_add(Self::STEP);
            if self.brightness == MAX_BRIGHTNESS {
                self.decreasing = true;
            }
        }
    }

    fn is_done(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "pulse"
    }
}

// Up 0, 10 .. 120 then down 128, 118 .. 8
fn twinkle_ramp() -> Vec<u8> {
    (0..128u8)
        .step_by(10)
        .chain((6..=128u8).rev().step_by(10))
        .collect()
}

/// Random LEDs fade in and out in random colors, one at a time.
pub struct Twinkle {
    rng: SimpleRng,
    ramp: Vec<u8>,
    limit: Option<usize>,
    completed: usize,
    started: bool,
    target: Option<(usize, usize)>,
    step: usize,
}

impl Twinkle {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            ramp: twinkle_ramp(),
            limit: None,
            completed: 0,
            started: false,
            target: None,
            step: 0,
        }
    }

    /// Stop after `count` twinkles instead of running forever.
    pub fn with_limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    fn pick(&mut self, grid: &mut Grid) -> (usize, usize) {
        let row = self.rng.next_range(grid.rows() as u32) as usize;
        let col = self.rng.next_range(grid.cols() as u32) as usize;
        let (red, green, blue) = (self.rng.next_u8(), self.rng.next_u8(), self.rng.next_u8());
        if let Some(pixel) = grid.pixel_at_mut(row, col) {
            pixel.set_rgb(red, green, blue);
        }
        (row, col)
    }
}

impl Animation for Twinkle {
    fn update(&mut self, grid: &mut Grid, _delta: Duration) {
        if self.is_done() {
            return;
        }
        if !self.started {
            grid.clear();
            self.started = true;
        }
        let (row, col) = match self.target {
            Some(target) => target,
            None => {
                let target = self.pick(grid);
                self.target = Some(target);
                target
            }
        };
        if let Some(pixel) = grid.pixel_at_mut(row, col) {
            pixel.brightness = self.ramp[self.step];
        }
        self.step += 1;
        if self.step == self.ramp.len() {
            self.step = 0;
            self.target = None;
            self.completed += 1;
        }
    }

    fn is_done(&self) -> bool {
        self.limit.is_some_and(|limit| self.completed >= limit)
    }

    fn name(&self) -> &str {
        "twinkle"
    }
}

/// Fills the whole grid with one color for a while.
#[derive(Debug)]
pub struct Hold {
    color: (u8, u8, u8),
    brightness: u8,
    duration: Duration,
    elapsed: Duration,
}

impl Hold {
    pub fn new(color: (u8, u8, u8), brightness: u8, duration: Duration) -> Self {
        Self {
            color,
            brightness,
            duration,
            elapsed: Duration::ZERO,
        }
    }
}

impl Animation for Hold {
    fn update(&mut self, grid: &mut Grid, delta: Duration) {
        let (red, green, blue) = self.color;
        grid.fill(red, green, blue, self.brightness);
        self.elapsed += delta;
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn name(&self) -> &str {
        "hold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grid() -> Grid {
        Grid::new(7, 7, Layout::Serpentine, 255).unwrap()
    }

    /// Finishes after a fixed number of updates and records how it was driven.
    struct Countdown {
        left: usize,
        deltas: Rc<RefCell<Vec<Duration>>>,
    }

    impl Animation for Countdown {
        fn update(&mut self, _grid: &mut Grid, delta: Duration) {
            self.left -= 1;
            self.deltas.borrow_mut().push(delta);
        }

        fn is_done(&self) -> bool {
            self.left == 0
        }
    }

    #[test]
    fn test_pulse_bounces() {
        let mut g = grid();
        let mut pulse = Pulse::new();
        let mut seen = Vec::new();
        for _ in 0..60 {
            pulse.update(&mut g, Duration::ZERO);
            let p = g.pixel_at(0, 0).unwrap();
            assert_eq!(p.blue, 255);
            seen.push(p.brightness);
        }
        assert_eq!(&seen[..3], &[0, 10, 20]);
        // 250 is followed by the clamped peak, then the way down
        assert_eq!(&seen[25..29], &[250, 255, 245, 235]);
        assert!(seen.contains(&0));
        assert!(!pulse.is_done());
    }

    #[test]
    fn test_pulse_clears_rest_of_grid() {
        let mut g = grid();
        g.fill(1, 1, 1, 255);
        Pulse::new().update(&mut g, Duration::ZERO);
        assert!(g.iter_grid().skip(1).all(|(_, _, p)| p.render() == 0));
    }

    #[test]
    fn test_twinkle_ramp() {
        let ramp = twinkle_ramp();
        assert_eq!(ramp.len(), 26);
        assert_eq!(&ramp[..3], &[0, 10, 20]);
        assert_eq!(ramp[12], 120);
        assert_eq!(ramp[13], 128);
        assert_eq!(*ramp.last().unwrap(), 8);
    }

    #[test]
    fn test_twinkle_limit() {
        let mut g = grid();
        let mut twinkle = Twinkle::new(3).with_limit(2);
        let mut ticks = 0;
        while !twinkle.is_done() {
            twinkle.update(&mut g, Duration::ZERO);
            ticks += 1;
        }
        assert_eq!(ticks, 52);
        assert_eq!(twinkle.completed(), 2);
    }

    #[test]
    fn test_twinkle_ramps_one_pixel() {
        let mut g = grid();
        let mut twinkle = Twinkle::new(11);
        twinkle.update(&mut g, Duration::ZERO);
        twinkle.update(&mut g, Duration::ZERO);
        let (row, col) = twinkle.target.unwrap();
        assert_eq!(g.pixel_at(row, col).unwrap().brightness, 10);
        let others = g
            .iter_grid()
            .filter(|(r, c, _)| (*r, *c) != (row, col))
            .all(|(_, _, p)| p.render() == 0);
        assert!(others);
    }

    #[test]
    fn test_hold_done_after_duration() {
        let mut g = grid();
        let mut hold = Hold::new((255, 0, 0), 200, Duration::from_millis(100));
        hold.update(&mut g, Duration::from_millis(60));
        assert!(!hold.is_done());
        assert_eq!(g.pixel_at(3, 3).unwrap().red, 255);
        hold.update(&mut g, Duration::from_millis(40));
        assert!(hold.is_done());
    }

    #[test]
    fn test_scheduler_runs_in_order_until_done() {
        let start = Instant::now();
        let mut g = grid();
        let mut scheduler = Scheduler::new(
            vec![
                Box::new(Countdown {
                    left: 2,
                    deltas: Rc::default(),
                }),
                Box::new(Hold::new((0, 0, 9), 255, Duration::from_millis(30))),
            ],
            start,
        );
        let mut names = Vec::new();
        for n in 1..=10u64 {
            let name = scheduler.current().map(|a| a.name().to_string());
            if !scheduler.tick(&mut g, start + Duration::from_millis(10 * n)) {
                break;
            }
            names.extend(name);
        }
        assert_eq!(
            names,
            vec!["animation", "animation", "hold", "hold", "hold"]
        );
        assert!(scheduler.is_finished());
        assert_eq!(scheduler.ticks(), 5);
        assert_eq!(g.pixel_at(0, 0).unwrap().blue, 9);
    }

    #[test]
    fn test_scheduler_wraps_to_unfinished() {
        let start = Instant::now();
        let mut g = grid();
        let mut scheduler = Scheduler::new(
            vec![
                Box::new(Pulse::new()),
                Box::new(Hold::new((0, 9, 0), 255, Duration::from_millis(10))),
            ],
            start,
        );
        // Pulse never finishes, so it keeps every tick
        for n in 1..=5u64 {
            assert!(scheduler.tick(&mut g, start + Duration::from_millis(n)));
            assert_eq!(scheduler.current().unwrap().name(), "pulse");
        }
    }

    #[test]
    fn test_scheduler_empty_is_finished() {
        let mut g = grid();
        let mut scheduler = Scheduler::new(vec![], Instant::now());
        assert!(scheduler.is_finished());
        assert!(!scheduler.tick(&mut g, Instant::now()));
        assert!(scheduler.current().is_none());
    }

    #[test]
    fn test_scheduler_passes_deltas() {
        let start = Instant::now();
        let mut g = grid();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new(
            vec![Box::new(Countdown {
                left: 3,
                deltas: deltas.clone(),
            })],
            start,
        );
        for ms in [5u64, 15, 40] {
            assert!(scheduler.tick(&mut g, start + Duration::from_millis(ms)));
        }
        assert!(!scheduler.tick(&mut g, start + Duration::from_millis(50)));
        assert_eq!(
            *deltas.borrow(),
            vec![
                Duration::from_millis(5),
                Duration::from_millis(10),
                Duration::from_millis(25)
            ]
        );
    }
}
