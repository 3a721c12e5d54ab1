// Statline entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file; stdout carries the report)
// 4. Load the league datasets (skipped for commands that only read the catalog)
// 5. Run the requested command

mod export;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use statline_baseball::catalog;
use statline_baseball::franchise::FranchiseResolver;
use statline_baseball::leaderboard::{self, LeaderboardRequest, LeagueContext};
use statline_baseball::qualification::{CareerMinimums, QualificationRates};
use statline_baseball::search::PlayerIndex;
use statline_baseball::standings;
use statline_core::config::{self, Config};
use statline_core::data;
use statline_core::model::{LeagueData, Side};

#[derive(Parser)]
#[command(name = "statline")]
#[command(about = "Leaderboards, standings and player search for a simulated baseball league")]
#[command(version)]
struct Cli {
    /// Directory holding the league JSON files (overrides data.dir in config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show all-time, single-season and per-season leaders for a stat
    Leaders(LeadersArgs),

    /// Show division standings for a season
    Standings {
        /// Season identifier, e.g. S12 (defaults to the latest season)
        #[arg(long)]
        season: Option<String>,
    },

    /// Find players by current or former name, or by id
    Search {
        /// Name fragment (two characters or more) or player id
        query: String,
    },

    /// List the stats available for leaderboards
    Stats {
        /// List pitching stats instead of batting stats
        #[arg(long)]
        pitching: bool,
    },
}

#[derive(Args)]
struct LeadersArgs {
    /// Stat label, e.g. HR, BA, ERA, W-L%
    stat: String,

    /// Rank pitchers instead of hitters
    #[arg(long)]
    pitching: bool,

    /// Franchise key or team abbreviation
    #[arg(long)]
    team: Option<String>,

    /// Player type (pitching types match by prefix)
    #[arg(long = "type")]
    player_type: Option<String>,

    /// Worst qualifiers first
    #[arg(long)]
    reverse: bool,

    /// Rows per leaderboard (defaults to leaderboard.length in config)
    #[arg(long)]
    length: Option<usize>,

    /// Only show one tier: all-time, single-season, or a season such as S4
    #[arg(long)]
    tier: Option<String>,

    /// Also write the shown rows to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(&config.logging.filter)?;
    info!("Statline starting up");

    if let Some(side) = catalog_only(&cli.command) {
        print!("{}", render::stat_list(side));
        return Ok(());
    }

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => PathBuf::from(&config.data.dir),
    };
    let data = data::load_league_data(&data_dir)
        .with_context(|| format!("failed to load league data from {}", data_dir.display()))?;
    FranchiseResolver::new(&data.franchises).validate();

    match cli.command {
        Command::Leaders(args) => run_leaders(&args, &config, &data),
        Command::Standings { season } => run_standings(season.as_deref(), &data),
        Command::Search { query } => run_search(&query, &data),
        // Answered from the catalog before loading data.
        Command::Stats { .. } => Ok(()),
    }
}

/// Commands answered from the static stat catalog, without league data.
fn catalog_only(command: &Command) -> Option<Side> {
    match command {
        Command::Stats { pitching } => Some(side_for(*pitching)),
        _ => None,
    }
}

fn side_for(pitching: bool) -> Side {
    if pitching {
        Side::Pitching
    } else {
        Side::Hitting
    }
}

fn run_leaders(args: &LeadersArgs, config: &Config, data: &LeagueData) -> anyhow::Result<()> {
    let side = side_for(args.pitching);
    if catalog::resolve_field(&args.stat, side).is_none() {
        bail!(
            "`{}` is not a {} stat (run `statline stats{}` for the list)",
            args.stat,
            side.label(),
            if args.pitching { " --pitching" } else { "" }
        );
    }

    let request = LeaderboardRequest {
        side,
        team: args.team.clone(),
        player_type: args.player_type.clone(),
        reverse: args.reverse,
        length: args.length.unwrap_or(config.leaderboard.length),
        rates: QualificationRates::from(&config.qualification),
        career: CareerMinimums::from(&config.qualification.career),
    };
    let ctx = LeagueContext::from_data(data);
    let mut boards = leaderboard::build(&args.stat, data.rows(side), &ctx, &request);

    if let Some(wanted) = &args.tier {
        if !render::keep_tier(&mut boards, wanted) {
            bail!("no leaderboard tier named `{}`", wanted);
        }
    }
    info!(
        "Built {} {} leaderboards across {} tiers",
        side.label(),
        args.stat,
        boards.tiers.len()
    );

    print!("{}", render::leaderboards(&boards, data));

    if let Some(path) = &args.csv {
        let written = export::write_csv_file(path, &boards, data)?;
        info!("Wrote {} rows to {}", written, path.display());
        println!("Wrote {} rows to {}", written, path.display());
    }
    Ok(())
}

fn run_standings(season: Option<&str>, data: &LeagueData) -> anyhow::Result<()> {
    let season = match season {
        Some(s) => s.to_string(),
        None => data
            .seasons_with_stats()
            .pop()
            .context("no seasons with stats to show standings for")?,
    };

    let records = standings::team_records(&season, &data.pitching, data.seasons.scheduled(&season));
    let table = standings::standings(&season, &records, &data.divisions);
    if table.is_empty() {
        bail!("no division layout for {}", season);
    }
    print!("{}", render::standings(&season, &table, &FranchiseResolver::new(&data.franchises)));
    Ok(())
}

fn run_search(query: &str, data: &LeagueData) -> anyhow::Result<()> {
    let index = PlayerIndex::new(&data.players);
    let hits = index.search(query);
    info!("Search {:?} matched {} players", query, hits.len());
    print!("{}", render::suggestions(&hits));
    Ok(())
}

/// Initialize tracing to log to a file so stdout stays clean for reports.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_path(&log_dir))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

fn log_path(log_dir: &Path) -> PathBuf {
    log_dir.join("statline.log")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
