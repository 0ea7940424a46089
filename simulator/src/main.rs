mod report;
mod session;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use snake_engine::config::{
    ConfigManager, FileContentConfigProvider, SimulationConfig, Validate, YamlConfigSerializer,
};
use snake_engine::logger::{self, LogLevel};
use snake_engine::navigation::NavigatorType;
use snake_engine::{log, SessionRng};

use report::SimulationSummary;
use session::SimulationSession;

const DEFAULT_CONFIG_FILE: &str = "snake_simulator.yaml";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NavigatorArg {
    Reactive,
    CycleSafe,
}

impl From<NavigatorArg> for NavigatorType {
    fn from(arg: NavigatorArg) -> Self {
        match arg {
            NavigatorArg::Reactive => NavigatorType::Reactive,
            NavigatorArg::CycleSafe => NavigatorType::CycleSafe,
        }
    }
}

#[derive(Parser)]
#[command(name = "snake_simulator", about = "Plays headless snake games with an autonomous navigator")]
struct Args {
    /// YAML config; defaults are used when the file does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[arg(long, value_enum)]
    navigator: Option<NavigatorArg>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    games: Option<u32>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Sleep the game's tick interval between ticks.
    #[arg(long)]
    realtime: bool,

    /// Only log warnings.
    #[arg(long)]
    quiet: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the merged configuration back to the config file.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut SimulationConfig) {
        if let Some(navigator) = self.navigator {
            config.navigator = navigator.into();
        }
        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.quiet {
            config.log_level = LogLevel::Warn;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ConfigManager<FileContentConfigProvider, SimulationConfig, YamlConfigSerializer> =
        ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;
    if args.save_config {
        config_manager.set_config(&config)?;
    }

    let prefix = if args.use_log_prefix {
        Some("Simulator".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    let base_seed = config
        .seed
        .unwrap_or_else(|| SessionRng::from_random().seed());
    log!(
        "Playing {} game(s) with the {} navigator on a {}x{} field, base seed {}",
        config.games,
        config.navigator.name(),
        config.field_width,
        config.field_height,
        base_seed
    );

    let mut summary = SimulationSummary::default();
    for game in 0..config.games {
        let seed = base_seed.wrapping_add(game as u64);
        let report = SimulationSession::new(&config, seed).run(config.max_ticks, args.realtime);
        log!(
            "Game {}: {} after {} ticks, score {}, length {} ({:.1}% of field), seed {}",
            game + 1,
            report.outcome(),
            report.ticks,
            report.score,
            report.length,
            report.fill_percent(),
            report.seed
        );
        summary.record(&report);
    }

    println!("{}", summary);
    Ok(())
}
