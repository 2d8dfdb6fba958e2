// How well a player's attributes suit a position (0-100 scale).

use courtside_core::{Player, Position};

/// Weighted attribute blend for `player` at `position`.
///
/// Pure function of the player's ratings; it ignores whether the player is
/// actually listed at that position.
pub fn positional_fit(player: &Player, position: Position) -> f64 {
    let inside = &player.inside_scoring;
    let shooting = &player.shooting;
    let playmaking = &player.playmaking;
    let defense = &player.defense;

    match position {
        Position::PointGuard => {
            (playmaking.pass_vision + playmaking.pass_iq + playmaking.ball_handle) / 3.0
        }
        Position::ShootingGuard => {
            shooting.three_point * 0.4 + shooting.mid_range * 0.3 + playmaking.ball_handle * 0.3
        }
        Position::SmallForward => {
            shooting.three_point * 0.3 + inside.driving_dunk * 0.3 + defense.perimeter * 0.4
        }
        Position::PowerForward => {
            defense.interior * 0.4 + defense.defensive_rebound * 0.3 + inside.post_control * 0.3
        }
        Position::Center => {
            defense.interior * 0.4 + defense.defensive_rebound * 0.4 + inside.standing_dunk * 0.2
        }
    }
}
