// Historic teammate combinations and their bonuses.

use std::sync::Arc;

use courtside_core::Player;
use serde::Serialize;
use tracing::debug;

/// Cap on the combined legendary bonus.
pub const MAX_LEGENDARY_BONUS: u32 = 200;

/// A famous set of teammates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendaryCombo {
    pub players: &'static [&'static str],
    pub bonus: u32,
    pub description: &'static str,
}

pub const LEGENDARY_DUOS: [LegendaryCombo; 13] = [
    LegendaryCombo {
        players: &["Kobe Bryant", "Shaquille O'Neal"],
        bonus: 40,
        description: "One of the most dominant inside-out combinations in NBA history",
    },
    LegendaryCombo {
        players: &["Michael Jordan", "Scottie Pippen"],
        bonus: 45,
        description: "The greatest wing duo ever, perfect defensive and offensive complement",
    },
    LegendaryCombo {
        players: &["Magic Johnson", "Kareem Abdul-Jabbar"],
        bonus: 40,
        description: "The Showtime Lakers' cornerstone duo",
    },
    LegendaryCombo {
        players: &["John Stockton", "Karl Malone"],
        bonus: 35,
        description: "The pick-and-roll masters",
    },
    LegendaryCombo {
        players: &["Stephen Curry", "Klay Thompson"],
        bonus: 35,
        description: "The Splash Brothers",
    },
    LegendaryCombo {
        players: &["Kevin Durant", "Stephen Curry"],
        bonus: 30,
        description: "Unstoppable offensive duo",
    },
    LegendaryCombo {
        players: &["Tim Duncan", "Tony Parker"],
        bonus: 25,
        description: "Spurs' dynamic inside-out combo",
    },
    LegendaryCombo {
        players: &["Tim Duncan", "Manu Ginobili"],
        bonus: 25,
        description: "Spurs' fundamental excellence",
    },
    LegendaryCombo {
        players: &["Larry Bird", "Kevin McHale"],
        bonus: 30,
        description: "Celtics' legendary frontcourt duo",
    },
    LegendaryCombo {
        players: &["Steve Nash", "Amar'e Stoudemire"],
        bonus: 25,
        description: "Pick-and-roll perfection",
    },
    LegendaryCombo {
        players: &["Gary Payton", "Shawn Kemp"],
        bonus: 25,
        description: "The Sonic Boom",
    },
    LegendaryCombo {
        players: &["Dwyane Wade", "LeBron James"],
        bonus: 35,
        description: "Dynamic scoring and athletic duo",
    },
    LegendaryCombo {
        players: &["Kevin Garnett", "Paul Pierce"],
        bonus: 30,
        description: "Celtics' modern big-wing combo",
    },
];

pub const LEGENDARY_TRIOS: [LegendaryCombo; 6] = [
    LegendaryCombo {
        players: &["Michael Jordan", "Scottie Pippen", "Dennis Rodman"],
        bonus: 60,
        description: "The Bulls' second three-peat core",
    },
    LegendaryCombo {
        players: &["Tim Duncan", "Tony Parker", "Manu Ginobili"],
        bonus: 55,
        description: "The Spurs' Big Three",
    },
    LegendaryCombo {
        players: &["Larry Bird", "Kevin McHale", "Robert Parish"],
        bonus: 50,
        description: "Celtics' legendary frontcourt",
    },
    LegendaryCombo {
        players: &["Magic Johnson", "Kareem Abdul-Jabbar", "James Worthy"],
        bonus: 55,
        description: "Showtime Lakers' core",
    },
    LegendaryCombo {
        players: &["Stephen Curry", "Klay Thompson", "Draymond Green"],
        bonus: 50,
        description: "Warriors' championship core",
    },
    LegendaryCombo {
        players: &["LeBron James", "Dwyane Wade", "Chris Bosh"],
        bonus: 45,
        description: "Miami's Big Three",
    },
];

/// A combination found on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivatedCombo {
    pub players: Vec<String>,
    pub bonus: u32,
    pub description: String,
}

/// All combinations found on a roster and the capped total bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegendaryResult {
    pub bonus: u32,
    pub combinations: Vec<ActivatedCombo>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find legendary combinations on `roster`.
///
/// Trios are checked first. A duo whose two players both belong to one
/// awarded trio is not awarded again.
pub fn evaluate_legendary(roster: &[Arc<Player>]) -> LegendaryResult {
    let names: Vec<String> = roster.iter().map(|p| normalize(&p.name)).collect();
    let on_roster = |combo: &LegendaryCombo| {
        combo
            .players
            .iter()
            .all(|member| names.contains(&normalize(member)))
    };

    let awarded_trios: Vec<&LegendaryCombo> =
        LEGENDARY_TRIOS.iter().filter(|t| on_roster(t)).collect();

    let awarded_duos = LEGENDARY_DUOS.iter().filter(|duo| {
        on_roster(duo)
            && !awarded_trios
                .iter()
                .any(|trio| duo.players.iter().all(|m| trio.players.contains(m)))
    });

    let combinations: Vec<ActivatedCombo> = awarded_trios
        .iter()
        .copied()
        .chain(awarded_duos)
        .map(|combo| ActivatedCombo {
            players: combo.players.iter().map(|s| s.to_string()).collect(),
            bonus: combo.bonus,
            description: combo.description.to_string(),
        })
        .collect();

    let total: u32 = combinations.iter().map(|c| c.bonus).sum();
    if !combinations.is_empty() {
        debug!(
            "{} legendary combination(s), raw bonus {}",
            combinations.len(),
            total
        );
    }

    LegendaryResult {
        bonus: total.min(MAX_LEGENDARY_BONUS),
        combinations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::Position;

    fn roster(names: &[&str]) -> Vec<Arc<Player>> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Arc::new(Player::new(i as u32 + 1, name, Position::SmallForward, 90)))
            .collect()
    }

    #[test]
    fn duo_awarded() {
        let result = evaluate_legendary(&roster(&["Kobe Bryant", "Shaquille O'Neal", "Nobody"]));
        assert_eq!(result.bonus, 40);
        assert_eq!(result.combinations.len(), 1);
        assert_eq!(
            result.combinations[0].description,
            "One of the most dominant inside-out combinations in NBA history"
        );
    }

    #[test]
    fn trio_replaces_its_duo() {
        let result =
            evaluate_legendary(&roster(&["Michael Jordan", "Scottie Pippen", "Dennis Rodman"]));
        assert_eq!(result.bonus, 60);
        assert_eq!(result.combinations.len(), 1);
        assert_eq!(result.combinations[0].players.len(), 3);
    }

    #[test]
    fn partial_trio_keeps_duo() {
        let result = evaluate_legendary(&roster(&["Michael Jordan", "Scottie Pippen"]));
        assert_eq!(result.bonus, 45);
    }

    #[test]
    fn overlapping_combos_outside_the_trio_still_count() {
        // Spurs trio absorbs both Duncan duos; Curry/Klay trio absorbs the
        // Splash Brothers but not Durant/Curry.
        let result = evaluate_legendary(&roster(&[
            "Tim Duncan",
            "Tony Parker",
            "Manu Ginobili",
            "Stephen Curry",
            "Klay Thompson",
            "Draymond Green",
            "Kevin Durant",
        ]));
        assert_eq!(result.bonus, 55 + 50 + 30);
        assert_eq!(result.combinations.len(), 3);
    }

    #[test]
    fn total_is_capped() {
        let result = evaluate_legendary(&roster(&[
            "Michael Jordan",
            "Scottie Pippen",
            "Dennis Rodman",
            "Tim Duncan",
            "Tony Parker",
            "Manu Ginobili",
            "Magic Johnson",
            "Kareem Abdul-Jabbar",
            "James Worthy",
            "Larry Bird",
            "Kevin McHale",
            "Robert Parish",
        ]));
        assert_eq!(result.bonus, MAX_LEGENDARY_BONUS);
        assert_eq!(result.combinations.len(), 4);
    }

    #[test]
    fn names_match_case_insensitively() {
        let result = evaluate_legendary(&roster(&["gary payton", " Shawn Kemp "]));
        assert_eq!(result.bonus, 25);
    }

    #[test]
    fn empty_roster_has_no_bonus() {
        assert_eq!(evaluate_legendary(&[]), LegendaryResult::default());
    }
}
