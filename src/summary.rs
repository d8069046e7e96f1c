//! Dataset-wide rollups for the overview and findings screens.

use serde::Serialize;

use crate::derived::{
    ArchetypeSplit, PerformanceClass, ProgressiveSplit, archetype_split, mean, mean_by,
    performance_diff, player_performance, progressive_split,
};
use crate::player::{League, Player, Position, StatField};
use crate::rankings::rank_by_key;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub label: &'static str,
    pub count: usize,
}

/// Tally labels in first-appearance order, then sort by count (stable, so equal counts keep
/// that order).
fn tally<I>(labels: I) -> Vec<Count>
where
    I: IntoIterator<Item = &'static str>,
{
    let mut counts: Vec<Count> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|c| c.label == label) {
            Some(c) => c.count += 1,
            None => counts.push(Count { label, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_players: usize,
    pub by_league: Vec<Count>,
    pub by_position: Vec<Count>,
    pub avg_goals: Option<f64>,
    pub avg_assists: Option<f64>,
    pub avg_xg: Option<f64>,
}

impl Overview {
    /// League with the most players, by short label.
    pub fn top_league(&self) -> Option<&Count> {
        self.by_league.first()
    }
}

pub fn dataset_overview(players: &[Player]) -> Overview {
    Overview {
        total_players: players.len(),
        by_league: tally(players.iter().map(|p| p.league.short_label())),
        by_position: tally(players.iter().map(|p| p.position.label())),
        avg_goals: mean(players, StatField::Goals),
        avg_assists: mean(players, StatField::Assists),
        avg_xg: mean(players, StatField::Xg),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSummary {
    pub league: League,
    pub count: usize,
    pub avg_goals: Option<f64>,
    pub avg_xg: Option<f64>,
    pub avg_tackles: Option<f64>,
}

/// One row per league in canonical order, empty leagues included.
pub fn league_summaries(players: &[Player]) -> Vec<LeagueSummary> {
    League::ALL
        .into_iter()
        .map(|league| {
            let members: Vec<&Player> = players.iter().filter(|p| p.league == league).collect();
            LeagueSummary {
                league,
                count: members.len(),
                avg_goals: mean(members.iter().copied(), StatField::Goals),
                avg_xg: mean(members.iter().copied(), StatField::Xg),
                avg_tackles: mean(members.iter().copied(), StatField::Tackles),
            }
        })
        .collect()
}

/// A player singled out by a finding, with the value that earned the mention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerValue {
    pub id: String,
    pub name: String,
    pub team: String,
    pub value: f64,
}

impl PlayerValue {
    fn new(player: &Player, value: f64) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            team: player.team.clone(),
            value,
        }
    }
}

fn leader<'a, I, F>(players: I, key: F) -> Option<PlayerValue>
where
    I: IntoIterator<Item = &'a Player>,
    F: Fn(&Player) -> f64,
{
    rank_by_key(players, &key)
        .first()
        .map(|p| PlayerValue::new(p, key(*p)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgFindings {
    /// Players with at least one goal or some xG.
    pub involved: usize,
    pub overperformers: usize,
    pub underperformers: usize,
    pub avg_diff: Option<f64>,
    pub top_overperformer: Option<PlayerValue>,
    pub top_underperformer: Option<PlayerValue>,
}

pub fn xg_findings(players: &[Player]) -> XgFindings {
    let involved: Vec<&Player> = players
        .iter()
        .filter(|p| p.stats.goals > 0.0 || p.stats.xg > 0.0)
        .collect();
    XgFindings {
        involved: involved.len(),
        overperformers: involved.iter().filter(|p| performance_diff(p) > 0.0).count(),
        underperformers: involved.iter().filter(|p| performance_diff(p) < 0.0).count(),
        avg_diff: mean_by(involved.iter().copied(), performance_diff),
        top_overperformer: leader(involved.iter().copied(), performance_diff),
        top_underperformer: leader(involved.iter().copied(), |p| -performance_diff(p))
            .map(|pv| PlayerValue { value: -pv.value, ..pv }),
    }
}

const EMPTY_WINDOW: &str = "No players in this window.";

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Rollup of the scorer window currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerTakeaway {
    pub threshold: f64,
    pub players: usize,
    pub overperformers: usize,
    pub underperformers: usize,
    pub most_clinical: Option<PlayerValue>,
    /// Set only when the worst finisher trails xG by more than the threshold.
    pub most_wasteful: Option<PlayerValue>,
}

impl ScorerTakeaway {
    pub fn describe(&self) -> String {
        if self.players == 0 {
            return EMPTY_WINDOW.to_string();
        }
        let mut text = format!(
            "{} of {} beat their xG by more than {:.0}, {} fall short by as much.",
            self.overperformers, self.players, self.threshold, self.underperformers
        );
        if let Some(best) = &self.most_clinical {
            text.push_str(&format!(" {} is the most clinical ({:+.1}).", best.name, best.value));
        }
        if let Some(worst) = &self.most_wasteful {
            text.push_str(&format!(
                " {} underperformed most ({:.1} fewer than expected).",
                worst.name,
                worst.value.abs()
            ));
        }
        text
    }
}

pub fn scorer_window_takeaway(window: &[&Player], threshold: f64) -> ScorerTakeaway {
    let count = |class: PerformanceClass| {
        window
            .iter()
            .filter(|p| player_performance(p, threshold) == class)
            .count()
    };
    ScorerTakeaway {
        threshold,
        players: window.len(),
        overperformers: count(PerformanceClass::Overperformer),
        underperformers: count(PerformanceClass::Underperformer),
        most_clinical: leader(window.iter().copied(), performance_diff),
        most_wasteful: leader(window.iter().copied(), |p| -performance_diff(p))
            .map(|pv| PlayerValue { value: -pv.value, ..pv })
            .filter(|pv| pv.value < -threshold),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenderTakeaway {
    pub players: usize,
    pub top_tackler: Option<PlayerValue>,
    pub top_interceptor: Option<PlayerValue>,
    pub avg_tackles: Option<f64>,
    pub avg_interceptions: Option<f64>,
}

impl DefenderTakeaway {
    pub fn describe(&self) -> String {
        let (Some(tackler), Some(interceptor)) = (&self.top_tackler, &self.top_interceptor)
        else {
            return EMPTY_WINDOW.to_string();
        };
        format!(
            "{} leads in tackles ({:.0}), {} tops interceptions ({:.0}). \
             Average: {} tackles, {} interceptions.",
            tackler.name,
            tackler.value,
            interceptor.name,
            interceptor.value,
            fmt_opt(self.avg_tackles),
            fmt_opt(self.avg_interceptions)
        )
    }
}

pub fn defender_window_takeaway(window: &[&Player]) -> DefenderTakeaway {
    DefenderTakeaway {
        players: window.len(),
        top_tackler: leader(window.iter().copied(), |p| p.stats.tackles),
        top_interceptor: leader(window.iter().copied(), |p| p.stats.interceptions),
        avg_tackles: mean(window.iter().copied(), StatField::Tackles),
        avg_interceptions: mean(window.iter().copied(), StatField::Interceptions),
    }
}

/// Leader, cutoff and mean of a top-N list. `ranked` must already be in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopNTakeaway {
    pub metric: &'static str,
    pub players: usize,
    pub leader: Option<PlayerValue>,
    pub cutoff: Option<PlayerValue>,
    pub average: Option<f64>,
}

impl TopNTakeaway {
    pub fn describe(&self) -> String {
        let (Some(first), Some(last)) = (&self.leader, &self.cutoff) else {
            return EMPTY_WINDOW.to_string();
        };
        format!(
            "{} leads the top {} in {} with {:.1}; {} is the cutoff with {:.1}. Average {}.",
            first.name,
            self.players,
            self.metric,
            first.value,
            last.name,
            last.value,
            fmt_opt(self.average)
        )
    }
}

pub fn top_n_takeaway(ranked: &[&Player], field: StatField) -> TopNTakeaway {
    let value_of = |p: &Player| PlayerValue::new(p, p.stat(field));
    TopNTakeaway {
        metric: field.label(),
        players: ranked.len(),
        leader: ranked.first().map(|p| value_of(p)),
        cutoff: ranked.last().map(|p| value_of(p)),
        average: mean(ranked.iter().copied(), field),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Findings {
    pub xg: XgFindings,
    pub leagues: Vec<LeagueSummary>,
    pub highest_scoring_league: Option<League>,
    pub most_defensive_league: Option<League>,
    pub progressive: ProgressiveSplit,
    pub top_carrier: Option<PlayerValue>,
    pub top_passer: Option<PlayerValue>,
    pub archetypes: ArchetypeSplit,
    pub top_tackler: Option<PlayerValue>,
    pub top_interceptor: Option<PlayerValue>,
}

/// League with the largest value of `key`, skipping leagues without players. The earlier
/// league wins a tie.
fn best_league<F>(leagues: &[LeagueSummary], key: F) -> Option<League>
where
    F: Fn(&LeagueSummary) -> Option<f64>,
{
    let mut best: Option<(League, f64)> = None;
    for summary in leagues {
        let Some(value) = key(summary) else { continue };
        match best {
            Some((_, top)) if top >= value => {}
            _ => best = Some((summary.league, value)),
        }
    }
    best.map(|(league, _)| league)
}

pub fn findings(players: &[Player]) -> Findings {
    let leagues = league_summaries(players);
    let defenders: Vec<&Player> = players
        .iter()
        .filter(|p| p.position == Position::Defender)
        .collect();

    Findings {
        xg: xg_findings(players),
        highest_scoring_league: best_league(&leagues, |l| l.avg_goals),
        most_defensive_league: best_league(&leagues, |l| l.avg_tackles),
        leagues,
        progressive: progressive_split(players),
        top_carrier: leader(players, |p| p.stats.progressive_carries),
        top_passer: leader(players, |p| p.stats.progressive_passes),
        archetypes: archetype_split(players),
        top_tackler: leader(defenders.iter().copied(), |p| p.stats.tackles),
        top_interceptor: leader(defenders.iter().copied(), |p| p.stats.interceptions),
    }
}
