use serde::{Deserialize, Serialize};

use crate::player::{Player, Position, StatField};

/// Sort descending by `key`. The sort is stable, so equal values keep collection order;
/// since the collection never changes after load, the output is reproducible.
pub fn rank_by_key<'a, I, F>(players: I, key: F) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
    F: Fn(&Player) -> f64,
{
    let mut ranked: Vec<&Player> = players.into_iter().collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked
}

pub fn rank_by<'a, I>(players: I, field: StatField) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    rank_by_key(players, |p| p.stat(field))
}

pub fn top_n<'a, I>(players: I, field: StatField, n: usize) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut ranked = rank_by(players, field);
    ranked.truncate(n);
    ranked
}

/// Inclusive 1-based window over a ranked list, as driven by a rank slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    pub start: usize,
    pub end: usize,
}

impl Default for RankRange {
    fn default() -> Self {
        Self { start: 1, end: 50 }
    }
}

impl RankRange {
    pub const STEP: usize = 5;
    /// Sliders never reach further down a ranking than this.
    pub const MAX_RANK: usize = 300;

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the whole window by `delta` ranks, keeping its width, within `1..=max`.
    pub fn shift(&mut self, delta: isize, max: usize) {
        let max = max.clamp(1, Self::MAX_RANK);
        let width = self.len().max(1);
        let start = (self.start as isize + delta).max(1) as usize;
        let start = start.min(max.saturating_sub(width - 1).max(1));
        self.start = start;
        self.end = (start + width - 1).min(max);
    }

    /// Grow or shrink the window from its upper end. The window never gets narrower than
    /// one step.
    pub fn resize(&mut self, delta: isize, max: usize) {
        let max = max.clamp(1, Self::MAX_RANK);
        let min_end = (self.start + Self::STEP - 1).min(max);
        let end = (self.end as isize + delta).max(1) as usize;
        self.end = end.clamp(min_end, max);
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Slice `ranked` to the 1-based inclusive `range`. Out-of-range bounds are clamped.
pub fn rank_range<'a>(ranked: &[&'a Player], range: RankRange) -> Vec<&'a Player> {
    if range.start == 0 || range.start > range.end {
        return Vec::new();
    }
    let start = (range.start - 1).min(ranked.len());
    let end = range.end.min(ranked.len());
    ranked[start..end].to_vec()
}

/// Forwards with any goal or xG, best scorers first.
pub fn attacker_pool<'a, I>(players: I) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    rank_by(
        players.into_iter().filter(|p| {
            p.position == Position::Forward && (p.stats.goals > 0.0 || p.stats.xg > 0.0)
        }),
        StatField::Goals,
    )
}

pub fn total_defensive_actions(player: &Player) -> f64 {
    let s = &player.stats;
    s.tackles + s.interceptions + s.clearances + s.blocks
}

/// Defenders with any tackle or interception, most defensive actions first.
pub fn defender_pool<'a, I>(players: I) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    rank_by_key(
        players.into_iter().filter(|p| {
            p.position == Position::Defender
                && (p.stats.tackles > 0.0 || p.stats.interceptions > 0.0)
        }),
        total_defensive_actions,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub team: String,
    pub league: &'static str,
    pub value: f64,
}

/// Display rows for an already ranked list; `first_rank` is the rank of `ranked[0]`.
pub fn rank_rows(ranked: &[&Player], field: StatField, first_rank: usize) -> Vec<RankRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, p)| RankRow {
            rank: first_rank + i,
            id: p.id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
            league: p.league.label(),
            value: p.stat(field),
        })
        .collect()
}
