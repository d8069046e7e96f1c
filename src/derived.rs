use serde::Serialize;

use crate::player::{League, Player, PlayerStats, Position, StatField};

/// Goals-minus-xG threshold used by the ranked scorer scatter.
pub const RANKED_SCATTER_THRESHOLD: f64 = 2.0;
/// Goals-minus-xG threshold used by the top-N scorer scatter.
pub const TOP_N_SCATTER_THRESHOLD: f64 = 3.0;

/// Rate per 90 minutes. Fewer than one ninety played counts as one, so a player with no
/// recorded nineties keeps the raw value instead of dividing by zero.
pub fn per90(value: f64, nineties: f64) -> f64 {
    value / nineties.max(1.0)
}

pub fn per90_field(player: &Player, field: StatField) -> f64 {
    per90(player.stat(field), player.stats.nineties)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceClass {
    Overperformer,
    Underperformer,
    Average,
}

impl PerformanceClass {
    pub fn label(self) -> &'static str {
        match self {
            PerformanceClass::Overperformer => "Overperformer",
            PerformanceClass::Underperformer => "Underperformer",
            PerformanceClass::Average => "Average",
        }
    }
}

pub fn performance_diff(player: &Player) -> f64 {
    player.stats.goals - player.stats.xg
}

/// Bucket `goals - xg` against a caller-chosen threshold. Values exactly on the threshold
/// are `Average`.
pub fn classify_performance(goals: f64, xg: f64, threshold: f64) -> PerformanceClass {
    let diff = goals - xg;
    if diff > threshold {
        PerformanceClass::Overperformer
    } else if diff < -threshold {
        PerformanceClass::Underperformer
    } else {
        PerformanceClass::Average
    }
}

pub fn player_performance(player: &Player, threshold: f64) -> PerformanceClass {
    classify_performance(player.stats.goals, player.stats.xg, threshold)
}

/// Arithmetic mean of `key` over `players`; `None` for an empty group.
pub fn mean_by<'a, I, F>(players: I, key: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Player>,
    F: Fn(&Player) -> f64,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for p in players {
        sum += key(p);
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

pub fn mean<'a, I>(players: I, field: StatField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Player>,
{
    mean_by(players, |p| p.stat(field))
}

/// Mean of `field` across one league's players, or `None` if the league has none.
pub fn league_average<'a, I>(players: I, league: League, field: StatField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Player>,
{
    mean(players.into_iter().filter(|p| p.league == league), field)
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0.
pub fn share_pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefensiveArchetype {
    Tackler,
    Reader,
}

impl DefensiveArchetype {
    pub fn label(self) -> &'static str {
        match self {
            DefensiveArchetype::Tackler => "Tackler",
            DefensiveArchetype::Reader => "Reader",
        }
    }
}

/// `None` when tackles and interceptions are tied.
pub fn defensive_archetype(stats: &PlayerStats) -> Option<DefensiveArchetype> {
    if stats.tackles > stats.interceptions {
        Some(DefensiveArchetype::Tackler)
    } else if stats.interceptions > stats.tackles {
        Some(DefensiveArchetype::Reader)
    } else {
        None
    }
}

/// Tackler/Reader split over all defenders. Tied defenders count toward `total` but neither
/// class, so the two percentages need not add to 100.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArchetypeSplit {
    pub total: usize,
    pub tacklers: usize,
    pub readers: usize,
    pub tackler_pct: f64,
    pub reader_pct: f64,
    pub avg_tackles: Option<f64>,
    pub avg_interceptions: Option<f64>,
}

pub fn archetype_split<'a, I>(players: I) -> ArchetypeSplit
where
    I: IntoIterator<Item = &'a Player>,
{
    let defenders: Vec<&Player> = players
        .into_iter()
        .filter(|p| p.position == Position::Defender)
        .collect();

    let mut split = ArchetypeSplit {
        total: defenders.len(),
        ..ArchetypeSplit::default()
    };
    for p in &defenders {
        match defensive_archetype(&p.stats) {
            Some(DefensiveArchetype::Tackler) => split.tacklers += 1,
            Some(DefensiveArchetype::Reader) => split.readers += 1,
            None => {}
        }
    }
    let total = split.total as f64;
    split.tackler_pct = share_pct(split.tacklers as f64, total);
    split.reader_pct = share_pct(split.readers as f64, total);
    split.avg_tackles = mean(defenders.iter().copied(), StatField::Tackles);
    split.avg_interceptions = mean(defenders.iter().copied(), StatField::Interceptions);
    split
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProgressiveStyle {
    Carrier,
    Passer,
}

impl ProgressiveStyle {
    pub fn label(self) -> &'static str {
        match self {
            ProgressiveStyle::Carrier => "Carrier",
            ProgressiveStyle::Passer => "Passer",
        }
    }
}

/// `None` when progressive carries and passes are tied.
pub fn progressive_style(stats: &PlayerStats) -> Option<ProgressiveStyle> {
    if stats.progressive_carries > stats.progressive_passes {
        Some(ProgressiveStyle::Carrier)
    } else if stats.progressive_passes > stats.progressive_carries {
        Some(ProgressiveStyle::Passer)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressiveSplit {
    pub total: usize,
    pub carriers: usize,
    pub passers: usize,
    pub balanced: usize,
    pub carrier_pct: f64,
    pub passer_pct: f64,
    pub avg_carries: Option<f64>,
    pub avg_passes: Option<f64>,
}

/// Carrier/Passer split over players with at least one progressive carry or pass.
pub fn progressive_split<'a, I>(players: I) -> ProgressiveSplit
where
    I: IntoIterator<Item = &'a Player>,
{
    let active: Vec<&Player> = players
        .into_iter()
        .filter(|p| p.stats.progressive_carries > 0.0 || p.stats.progressive_passes > 0.0)
        .collect();

    let mut split = ProgressiveSplit {
        total: active.len(),
        ..ProgressiveSplit::default()
    };
    for p in &active {
        match progressive_style(&p.stats) {
            Some(ProgressiveStyle::Carrier) => split.carriers += 1,
            Some(ProgressiveStyle::Passer) => split.passers += 1,
            None => split.balanced += 1,
        }
    }
    let total = split.total as f64;
    split.carrier_pct = share_pct(split.carriers as f64, total);
    split.passer_pct = share_pct(split.passers as f64, total);
    split.avg_carries = mean(active.iter().copied(), StatField::ProgressiveCarries);
    split.avg_passes = mean(active.iter().copied(), StatField::ProgressivePasses);
    split
}
