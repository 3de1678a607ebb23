//! Runs one match and prints it as it goes

use std::io::{self, Write};

use anyhow::{Context, Result};
use engine_games::TextGame;
use minimax::{Match, MatchOutcome, MatchResult, MoveSource, PlayerKind, SearchConfig};
use tracing::info;

/// Match parameters resolved from the command line
#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub players: [PlayerKind; 2],
    pub search: SearchConfig,
    pub max_turns: Option<u32>,
}

/// Play `game` to the end, writing the board after every move and the
/// result to `out`.
pub fn run_match<G, S, W>(
    game: &G,
    plan: &MatchPlan,
    source: &mut S,
    out: &mut W,
) -> Result<MatchOutcome<G>>
where
    G: TextGame,
    S: MoveSource<G>,
    W: Write,
{
    let meta = game.metadata();
    let initial = game.initial_state();

    writeln!(out, "{}", meta.display_name)?;
    writeln!(out, "{}", game.render(&initial))?;

    let mut game_match = Match::new(game, plan.search.clone(), plan.players)
        .with_max_turns(plan.max_turns);

    // The callback cannot return errors; the first write failure is kept
    let mut write_error: Option<io::Error> = None;
    let outcome = game_match
        .play(initial, source, |turn| {
            if write_error.is_some() {
                return;
            }
            let result = writeln!(
                out,
                "Turn {}: {} ({}) plays {:?}\n{}",
                turn.number,
                meta.player_name(turn.side),
                turn.player,
                turn.mv,
                game.render(turn.state)
            );
            if let Err(err) = result {
                write_error = Some(err);
            }
        })
        .context("match ended early")?;

    if let Some(err) = write_error {
        return Err(err).context("failed to write board");
    }

    let summary = match outcome.result {
        MatchResult::Winner(side) => format!("{} wins", meta.player_name(side)),
        MatchResult::Draw => "Draw".to_string(),
        MatchResult::Unfinished => format!("Stopped after {} turns", outcome.turns),
    };
    writeln!(out, "{}", summary)?;

    if let Some(cache) = game_match.cache() {
        let table = cache.stats();
        info!(
            entries = cache.len(),
            buckets = cache.bucket_count(),
            lookups = table.lookups,
            hits = table.hits,
            "Transposition table"
        );
    }
    info!(
        turns = outcome.turns,
        nodes = outcome.stats.nodes,
        cache_hit_rate = outcome.stats.cache_hit_rate(),
        "{}",
        summary
    );

    Ok(outcome)
}
