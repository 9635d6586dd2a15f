use orbitsim::{bench_step, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "circular_orbit.yaml")]
    file_name: String,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<usize>,

    /// Time the all-pairs step instead of running a scenario
    #[arg(long)]
    bench: bool,

    /// -v for debug, -vv for trace
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    let frames = args.frames.unwrap_or(scenario.engine.frames);
    info!("running {} for {} frames with {} bodies", args.file_name, frames, scenario.system.len());

    let summary = scenario.run(frames);

    for a in &summary.absorptions {
        info!("{:?} absorbed {:?}", a.survivor, a.absorbed);
    }
    info!(
        "{} frames, {} absorptions, {} bodies left, total mass {:.4e} kg",
        summary.frames,
        summary.absorptions.len(),
        summary.bodies_left,
        summary.total_mass
    );
    if let Some(com) = scenario.center_of_mass() {
        info!("center of mass at ({:.2}, {:.2})", com.position.x, com.position.y);
    }

    Ok(())
}
