//! Share string serializer.
//!
//! Players copy this text verbatim, so field order and wording are fixed:
//!
//! ```text
//! <Title> <mode>
//! Seed: <seed>
//! Score: <score>
//! Moves: <turn>
//! <signature line>...
//! Result: <result>        (terminal sessions only)
//! ```

use crate::types::{GameId, Mode, Phase};

/// Everything the share text needs, borrowed from a session.
#[derive(Debug, Clone, Copy)]
pub struct ShareCard<'a> {
    pub game: GameId,
    pub mode: Mode,
    pub seed: &'a str,
    pub score: u32,
    pub turn: u32,
    pub phase: Phase,
    pub headline: &'a [String],
}

/// Result wording for a terminal phase.
pub fn result_label(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::GameOver => Some("Game over"),
        Phase::Win => Some("Cleared"),
        Phase::Lose => Some("Out of folds"),
        Phase::Home | Phase::Playing => None,
    }
}

/// Render the newline-separated share text (no trailing newline).
pub fn render(card: &ShareCard<'_>) -> String {
    let mut lines = Vec::with_capacity(5 + card.headline.len());
    lines.push(format!("{} {}", card.game.title(), card.mode.as_str()));
    lines.push(format!("Seed: {}", card.seed));
    lines.push(format!("Score: {}", card.score));
    lines.push(format!("Moves: {}", card.turn));
    lines.extend(card.headline.iter().cloned());
    if let Some(label) = result_label(card.phase) {
        lines.push(format!("Result: {label}"));
    }
    lines.join("\n")
}
