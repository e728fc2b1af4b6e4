use anyhow::Result;
use clap::Parser;
use log::{error, info};

use neogrid_common::{Animation, Display, Grid, Layout};
use neogrid_platforms_common::StrandConfig;

mod cli;
mod frontend;
mod platform_libs;
mod runner;

use cli::Cli;
use frontend::{Interrupt, SimulatorFrontend};
use runner::{RunOptions, Stop};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.strand_config();
    let animations = cli.animations();
    let options = cli.run_options();

    let interrupt = Interrupt::install()?;

    info!("Initializing neogrid {}x{}", cli.rows, cli.cols);
    let stop = run(&cli, &config, animations, &options, interrupt)?;
    info!("Stopped: {stop:?}");
    Ok(())
}

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))] {
        use frontend::HardwareFrontend;

        fn run(
            cli: &Cli,
            config: &StrandConfig,
            animations: Vec<Box<dyn Animation>>,
            options: &RunOptions,
            interrupt: Interrupt,
        ) -> Result<Stop> {
            if cli.simulate {
                info!("Using the terminal simulator");
                return run_simulator(cli, config, animations, options, interrupt);
            }
            run_hardware(cli, config, animations, options, interrupt)
        }

        fn run_hardware(
            cli: &Cli,
            config: &StrandConfig,
            animations: Vec<Box<dyn Animation>>,
            options: &RunOptions,
            interrupt: Interrupt,
        ) -> Result<Stop> {
            let grid = Grid::new(cli.rows, cli.cols, Layout::Serpentine, config.initial_brightness)?;
            let strand = platform_libs::hardware_strand(config, grid.len())?;
            let mut display = Display::new(grid, strand)?;
            display.clear()?;

            let mut frontend = HardwareFrontend::open(interrupt);
            let result = runner::run(&mut display, animations, options, &mut frontend);
            drop(frontend);
            // Leave the matrix dark however the run ended
            if let Err(e) = display.clear() {
                error!("Failed to clear the matrix: {e:#}");
            }
            result
        }
    } else {
        fn run(
            cli: &Cli,
            config: &StrandConfig,
            animations: Vec<Box<dyn Animation>>,
            options: &RunOptions,
            interrupt: Interrupt,
        ) -> Result<Stop> {
            if !cli.simulate {
                info!("No LED hardware on this target, using the terminal simulator");
            }
            run_simulator(cli, config, animations, options, interrupt)
        }
    }
}

fn run_simulator(
    cli: &Cli,
    config: &StrandConfig,
    animations: Vec<Box<dyn Animation>>,
    options: &RunOptions,
    interrupt: Interrupt,
) -> Result<Stop> {
    // Simulated pixels are not wired, so the strand order is the grid order
    let grid = Grid::new(cli.rows, cli.cols, Layout::Linear, config.initial_brightness)?;
    let strand = neogrid_platforms_stub::platform_init(config, grid.len())?;
    let mut display = Display::new(grid, strand)?;

    let mut frontend = SimulatorFrontend::enter(interrupt)?;
    let result = runner::run(&mut display, animations, options, &mut frontend);
    // Always try to restore the terminal
    if let Err(e) = frontend.exit() {
        error!("Failed to restore the terminal: {e:#}");
    }
    result
}
