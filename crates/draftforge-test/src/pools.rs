//! Player pool fixtures.
//!
//! # Example
//!
//! ```
//! use draftforge_core::Position;
//! use draftforge_test::pools::{minimal_pool, reference_pool};
//!
//! let pool = reference_pool();
//! assert_eq!(pool.len(), 20);
//! assert_eq!(pool.count_by_position(&Position::Qb), 3);
//!
//! assert_eq!(minimal_pool().len(), 9);
//! ```
//!
//! Larger slates come from a seed:
//!
//! ```
//! use draftforge_core::Position;
//! use draftforge_test::pools::seeded_slate_pool;
//!
//! let pool = seeded_slate_pool(7, 300);
//! assert_eq!(pool.len(), 300);
//! assert_eq!(pool.count_by_position(&Position::Wr), 114);
//! assert_eq!(seeded_slate_pool(7, 300).salaries(), pool.salaries());
//! ```

use draftforge_core::{Player, PlayerPool, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates an available player.
pub fn player(id: &str, position: Position, salary: u32, projection: f64) -> Player {
    Player::available(id, salary, position, projection)
}

/// Reference slate: (name, position code, salary, projection).
pub(crate) const REFERENCE_SLATE: &[(&str, &str, u32, f64)] = &[
    ("Josh Allen", "QB", 8200, 24.1),
    ("Jalen Hurts", "QB", 7900, 22.8),
    ("Geno Smith", "QB", 5600, 16.2),
    ("Bills", "DST", 3600, 9.5),
    ("Cowboys", "DST", 3300, 8.4),
    ("Jets", "DST", 2500, 6.1),
    ("Christian McCaffrey", "RB", 9400, 23.5),
    ("Austin Ekeler", "RB", 7600, 18.9),
    ("Josh Jacobs", "RB", 6800, 16.7),
    ("Tony Pollard", "RB", 5900, 14.2),
    ("Rachaad White", "RB", 4800, 11.6),
    ("Justin Jefferson", "WR", 9000, 21.8),
    ("Tyreek Hill", "WR", 8600, 20.9),
    ("CeeDee Lamb", "WR", 7400, 18.1),
    ("Amon-Ra St. Brown", "WR", 7000, 17.0),
    ("Chris Olave", "WR", 5800, 13.9),
    ("Garrett Wilson", "WR", 5200, 12.4),
    ("Travis Kelce", "TE", 7700, 17.5),
    ("Mark Andrews", "TE", 6100, 13.8),
    ("Dallas Goedert", "TE", 4500, 10.2),
];

/// A 20-player slate (3 QB, 3 DST, 5 RB, 6 WR, 3 TE) where the salary cap binds.
pub fn reference_pool() -> PlayerPool {
    REFERENCE_SLATE
        .iter()
        .map(|&(name, code, salary, projection)| player(name, Position::parse(code), salary, projection))
        .collect()
}

/// Exactly nine players forming the only legal lineup: 1 QB, 1 DST, 2 RB, 3 WR, 2 TE.
///
/// Minimum counts sum to eight, so the ninth player is a second tight end.
pub fn minimal_pool() -> PlayerPool {
    [
        player("Geno Smith", Position::Qb, 5600, 16.2),
        player("Jets", Position::Dst, 2500, 6.1),
        player("Tony Pollard", Position::Rb, 5900, 14.2),
        player("Rachaad White", Position::Rb, 4800, 11.6),
        player("Chris Olave", Position::Wr, 5800, 13.9),
        player("Garrett Wilson", Position::Wr, 5200, 12.4),
        player("Amon-Ra St. Brown", Position::Wr, 7000, 17.0),
        player("Mark Andrews", Position::Te, 6100, 13.8),
        player("Dallas Goedert", Position::Te, 4500, 10.2),
    ]
    .into_iter()
    .collect()
}

/// The reference slate with every running back but one removed.
pub fn thin_running_back_pool() -> PlayerPool {
    reference_pool()
        .iter()
        .filter(|p| p.position() != &Position::Rb || p.id() == "Christian McCaffrey")
        .cloned()
        .collect()
}

/// Two running backs identical in salary, scoring 10.0 ("Low Back") and 20.0 ("High Back").
///
/// Exactly one of them fits the optimal lineup: the wide receivers outscore
/// either back, so the lineup keeps four receivers and two backs.
pub fn interchangeable_pair_pool() -> PlayerPool {
    [
        player("Starter", Position::Qb, 6000, 18.0),
        player("Defense", Position::Dst, 3000, 7.0),
        player("Anchor Back", Position::Rb, 5000, 15.0),
        player("Low Back", Position::Rb, 5000, 10.0),
        player("High Back", Position::Rb, 5000, 20.0),
        player("Receiver One", Position::Wr, 5000, 25.0),
        player("Receiver Two", Position::Wr, 5000, 25.0),
        player("Receiver Three", Position::Wr, 5000, 25.0),
        player("Receiver Four", Position::Wr, 5000, 25.0),
        player("Tight End", Position::Te, 4000, 9.0),
    ]
    .into_iter()
    .collect()
}

/// A slate of roughly `size` players drawn from a seeded generator.
///
/// The position mix is 12% QB, 6% DST, 26% RB, 38% WR and 18% TE, with at
/// least three players per position. Projections scale with salary at a
/// random value rate, so the cap binds the way it does on a real slate.
/// Ids are `"{code} {n}"`, e.g. `"WR 17"`.
pub fn seeded_slate_pool(seed: u64, size: usize) -> PlayerPool {
    let mut rng = StdRng::seed_from_u64(seed);
    let mix = [
        (Position::Qb, 12, 5000..=8400),
        (Position::Dst, 6, 2400..=4000),
        (Position::Rb, 26, 4000..=9400),
        (Position::Wr, 38, 3000..=9200),
        (Position::Te, 18, 2500..=7800),
    ];

    let mut players = Vec::with_capacity(size);
    for (position, share, salaries) in mix {
        let count = (size * share / 100).max(3);
        for n in 1..=count {
            let salary: u32 = rng.random_range(salaries.clone()) / 100 * 100;
            let rate: f64 = rng.random_range(1.6..3.2);
            let projection = (f64::from(salary) / 1000.0 * rate * 10.0).round() / 10.0;
            let id = format!("{} {n}", position.code());
            players.push(player(&id, position.clone(), salary, projection));
        }
    }
    players.into_iter().collect()
}
