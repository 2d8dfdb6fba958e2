// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the player catalog and select the pool
// 4. Build teams, draft order and session
// 5. Run the draft with picks read from stdin
// 6. Score every roster and print the results

use std::io::{BufRead, Write};

use anyhow::Context;
use courtside::config;
use courtside::runner::{DraftOutcome, DraftRunner, TeamStanding, UserPicker};
use courtside_core::{PlayerCatalog, PlayerId};
use courtside_draft::{DraftSession, DraftedPlayer};
use courtside_eval::{feedback_message, Metric};
use tracing::info;

/// Players listed on the user's clock.
const SHORTLIST_LEN: usize = 10;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Courtside starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded from {}: {} rounds, {} AI teams, {:?} pool",
        config.base_dir.display(),
        config.draft.rounds,
        config.draft.ai_team_count,
        config.draft.player_pool
    );

    let current_path = config.current_pool_path();
    let all_time_path = config.required_all_time_path();
    let catalog = PlayerCatalog::from_files(&current_path, all_time_path.as_deref())
        .context("failed to load player pools")?;
    let players = catalog.players(config.draft.player_pool);
    info!("Selected {} players", players.len());

    let mut runner =
        DraftRunner::new(&config.draft, players).context("failed to set up the draft")?;
    println!(
        "Courtside draft: {} teams, {} rounds, {} players in the pool.",
        runner.session().teams().len(),
        config.draft.rounds,
        runner.session().pool_size()
    );
    if let Some(seed) = runner.seed() {
        println!("Seed: {seed}");
    }

    let stdin = std::io::stdin();
    let mut picker = StdinPicker {
        input: stdin.lock(),
    };
    let outcome = runner.run(&mut picker).context("draft failed")?;

    match outcome {
        DraftOutcome::Completed => println!("\nThe draft is complete."),
        DraftOutcome::PoolExhausted => println!("\nThe player pool ran dry; the draft is over."),
        DraftOutcome::Abandoned => {
            println!("\nDraft abandoned.");
            info!("Courtside shut down after an abandoned draft");
            return Ok(());
        }
    }

    print_results(&runner.standings());

    info!("Courtside shut down cleanly");
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive picker
// ---------------------------------------------------------------------------

/// Reads the user's picks from a line-oriented input.
struct StdinPicker<R> {
    input: R,
}

impl<R: BufRead> UserPicker for StdinPicker<R> {
    fn pick(&mut self, session: &DraftSession) -> Option<PlayerId> {
        let shortlist: Vec<_> = session
            .available_players()
            .iter()
            .take(SHORTLIST_LEN)
            .collect();

        println!(
            "\nPick {} (round {}): you're on the clock.",
            session.current_pick(),
            session.current_round().unwrap_or(0)
        );
        if let Some(team) = session.user_team() {
            let roster: Vec<&str> = team.roster.iter().map(|p| p.name.as_str()).collect();
            if !roster.is_empty() {
                println!("Your roster: {}", roster.join(", "));
            }
        }
        for (i, p) in shortlist.iter().enumerate() {
            println!(
                "  {:>2}. {:<28} {:<6} {:>3}  {}",
                i + 1,
                p.name,
                p.position_label(),
                p.overall_rating,
                p.team
            );
        }

        loop {
            print!("Choose 1-{} (Enter = best available, q = quit): ", shortlist.len());
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let choice = line.trim();
            if choice.eq_ignore_ascii_case("q") {
                return None;
            }
            if choice.is_empty() {
                return shortlist.first().map(|p| p.id);
            }
            match choice.parse::<usize>() {
                Ok(n) if (1..=shortlist.len()).contains(&n) => return Some(shortlist[n - 1].id),
                _ => println!("'{choice}' is not a valid choice."),
            }
        }
    }

    fn ai_picked(&mut self, session: &DraftSession, pick: &DraftedPlayer) {
        let team = session.team(pick.team_id).map_or("?", |t| t.name.as_str());
        println!(
            "  #{:<3} {:<24} {} ({}, {})",
            pick.pick_number,
            team,
            pick.player.name,
            pick.player.position_label(),
            pick.player.overall_rating
        );
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

fn print_results(standings: &[TeamStanding]) {
    println!("\nFinal standings:");
    for (rank, standing) in standings.iter().enumerate() {
        let marker = if standing.is_user { " (you)" } else { "" };
        println!(
            "  {:>2}. {:<28} {:>3}{}",
            rank + 1,
            standing.name,
            standing.evaluation.score,
            marker
        );
    }

    let Some(user) = standings.iter().find(|s| s.is_user) else {
        return;
    };

    if let Some(breakdown) = &user.evaluation.breakdown {
        println!("\nYour breakdown (0-200):");
        for metric in Metric::ALL {
            println!("  {:<22} {:>5.1}", metric.label(), breakdown.get(metric));
        }
    }
    println!("\n{}", feedback_message(&user.evaluation));
}

/// Initialize tracing to log to a file (stdout carries the draft itself).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("courtside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("courtside=info,warn")),
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
