mod logger;
mod report;

use std::path::PathBuf;

use clap::Parser;
use engine::SessionRng;
use engine::board::find_connected;
use engine::session::{ClickResult, GameEvent, GameSession, LevelConfig, SessionStatus};
use logger::log;
use report::{RunOutcome, Summary};

/// Virtual milliseconds between clicks. Short enough to keep streaks
/// alive, so the report reflects combo-heavy play.
const CLICK_INTERVAL_MS: i64 = 700;

#[derive(Parser)]
#[command(
    name = "board_simulator",
    about = "Headless bulk play-throughs for level balancing"
)]
struct Args {
    /// Level definition in YAML. Falls back to a procedural level.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Procedural level number used when no file is given.
    #[arg(long, default_value_t = 51)]
    procedural_level: u32,

    #[arg(long, default_value_t = 100)]
    runs: u32,

    /// Base seed; run i plays with seed base + i. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Log every resolved click of every run.
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let prefix = args.use_log_prefix.then(|| "Simulator".to_string());
    logger::init(prefix);

    let config = load_level(&args)?;
    let base_seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());

    log!(
        "Simulating level {}: {}x{} board, {} moves, {} runs, base seed {}",
        config.level_number,
        config.rows,
        config.cols,
        config.moves,
        args.runs,
        base_seed
    );

    let mut summary = Summary::default();
    for run in 0..args.runs {
        let seed = base_seed.wrapping_add(u64::from(run));
        let outcome = play_one(&config, seed, args.verbose)?;
        if args.verbose {
            log!(
                "Run {} (seed {}): {:?}, score {}, {} clicks",
                run,
                seed,
                outcome.status,
                outcome.score,
                outcome.clicks
            );
        }
        summary.record(&outcome);
    }

    for line in summary.lines() {
        log!("{}", line);
    }
    Ok(())
}

fn load_level(args: &Args) -> Result<LevelConfig, String> {
    let config = match &args.level {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read level file: {}", e))?;
            serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to parse level file: {}", e))?
        }
        None => LevelConfig::procedural(args.procedural_level),
    };
    config.validate()?;
    Ok(config)
}

/// Plays one session to completion with a uniformly random policy over
/// the clickable cells (power-up carriers and matchable regions). The
/// click cap only guards against a policy bug; a healthy session always
/// ends through its own status.
fn play_one(config: &LevelConfig, seed: u64, verbose: bool) -> Result<RunOutcome, String> {
    let mut session = GameSession::start(config.clone(), seed)?;
    let mut policy_rng = SessionRng::new(seed.rotate_left(17));

    let click_cap = config.moves * 4 + 50;
    let mut clicks = 0;
    let mut shuffles = 0;
    let mut now = 0;

    while session.status() == SessionStatus::Idle && clicks < click_cap {
        let candidates: Vec<_> = session
            .grid()
            .positions()
            .filter(|&p| {
                let tile = session.grid().get(p);
                !tile.frozen
                    && (tile.power_up.is_some() || find_connected(session.grid(), p).len() >= 2)
            })
            .collect();
        if candidates.is_empty() {
            break;
        }

        let pos = *policy_rng.pick(&candidates);
        now += CLICK_INTERVAL_MS;
        clicks += 1;
        let ClickResult::Resolved(outcome) = session.handle_click_at(pos, now) else {
            continue;
        };
        shuffles += outcome
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Shuffle { .. }))
            .count() as u32;

        if verbose {
            log!(
                "  click {:?}: +{} score, {} events, status {:?}",
                pos,
                outcome.score_delta,
                outcome.events.len(),
                outcome.status
            );
        }
    }

    Ok(RunOutcome {
        status: session.status(),
        score: session.score(),
        stars: session.stars(),
        moves_used: config.moves - session.moves_left(),
        shuffles,
        clicks,
    })
}
