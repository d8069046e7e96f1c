use std::collections::VecDeque;
use std::sync::Arc;

use crate::loader::Dataset;
use crate::player::{League, Player, Position, StatField};
use crate::rankings::{RankRange, attacker_pool, defender_pool, rank_range, top_n};
use crate::selection::{Filters, Selection, Slot, teams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    TopPerformers,
    Scorers,
    Defenders,
    Compare,
    Findings,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Overview,
        Screen::TopPerformers,
        Screen::Scorers,
        Screen::Defenders,
        Screen::Compare,
        Screen::Findings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Overview => "Overview",
            Screen::TopPerformers => "Top Performers",
            Screen::Scorers => "Scorers",
            Screen::Defenders => "Defenders",
            Screen::Compare => "Compare",
            Screen::Findings => "Findings",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Metrics offered by the top-performers chart.
pub const TOP_METRICS: [StatField; 5] = [
    StatField::Goals,
    StatField::Assists,
    StatField::Xg,
    StatField::ProgressiveCarries,
    StatField::Tackles,
];

pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
pub enum Delta {
    DatasetLoaded(Arc<Dataset>),
    LoadFailed(String),
    Log(String),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub status: LoadStatus,
    pub dataset: Option<Arc<Dataset>>,
    pub filters: Filters,
    pub selection: Selection,
    pub compare_slot: Slot,
    pub metric: StatField,
    pub top_n: usize,
    pub scorer_range: RankRange,
    pub defender_range: RankRange,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(15)
    }
}

impl AppState {
    pub fn new(top_n: usize) -> Self {
        Self {
            screen: Screen::Overview,
            status: LoadStatus::Loading,
            dataset: None,
            filters: Filters::default(),
            selection: Selection::default(),
            compare_slot: Slot::First,
            metric: TOP_METRICS[0],
            top_n: top_n.clamp(TOP_N_MIN, TOP_N_MAX),
            scorer_range: RankRange::default(),
            defender_range: RankRange::default(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn players(&self) -> &[Player] {
        self.dataset
            .as_deref()
            .map(|d| d.players.as_slice())
            .unwrap_or(&[])
    }

    pub fn filtered(&self) -> Vec<&Player> {
        self.filters.apply(self.players())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn cycle_metric(&mut self) {
        let idx = TOP_METRICS
            .iter()
            .position(|m| *m == self.metric)
            .unwrap_or(0);
        self.metric = TOP_METRICS[(idx + 1) % TOP_METRICS.len()];
    }

    pub fn adjust_top_n(&mut self, delta: isize) {
        let next = self.top_n as isize + delta;
        self.top_n = next.clamp(TOP_N_MIN as isize, TOP_N_MAX as isize) as usize;
    }

    pub fn cycle_position_filter(&mut self) {
        self.filters.position = match self.filters.position {
            None => Some(Position::Forward),
            Some(Position::Forward) => Some(Position::Midfielder),
            Some(Position::Midfielder) => Some(Position::Defender),
            Some(Position::Defender) => Some(Position::Goalkeeper),
            Some(Position::Goalkeeper) => None,
        };
    }

    pub fn cycle_league_filter(&mut self) {
        self.filters.league = match self.filters.league {
            None => Some(League::ALL[0]),
            Some(current) => League::ALL
                .iter()
                .position(|l| *l == current)
                .and_then(|idx| League::ALL.get(idx + 1).copied()),
        };
    }

    /// Step through the sorted team list, then back to "All".
    pub fn cycle_team_filter(&mut self) {
        let teams = teams(self.players());
        self.filters.team = match self.filters.team.as_deref() {
            None => teams.first().cloned(),
            Some(current) => teams
                .iter()
                .position(|t| t == current)
                .and_then(|idx| teams.get(idx + 1).cloned()),
        };
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
    }

    pub fn top_performers(&self) -> Vec<&Player> {
        top_n(self.filtered(), self.metric, self.top_n)
    }

    pub fn scorer_pool(&self) -> Vec<&Player> {
        attacker_pool(self.filtered())
    }

    pub fn defender_pool(&self) -> Vec<&Player> {
        defender_pool(self.filtered())
    }

    pub fn scorer_window(&self) -> Vec<&Player> {
        rank_range(&self.scorer_pool(), self.scorer_range)
    }

    pub fn defender_window(&self) -> Vec<&Player> {
        rank_range(&self.defender_pool(), self.defender_range)
    }

    /// Slide the rank window of the current chart screen.
    pub fn shift_range(&mut self, delta: isize) {
        match self.screen {
            Screen::Scorers => {
                let max = self.scorer_pool().len();
                self.scorer_range.shift(delta, max);
            }
            Screen::Defenders => {
                let max = self.defender_pool().len();
                self.defender_range.shift(delta, max);
            }
            _ => {}
        }
    }

    pub fn resize_range(&mut self, delta: isize) {
        match self.screen {
            Screen::Scorers => {
                let max = self.scorer_pool().len();
                self.scorer_range.resize(delta, max);
            }
            Screen::Defenders => {
                let max = self.defender_pool().len();
                self.defender_range.resize(delta, max);
            }
            _ => {}
        }
    }

    pub fn toggle_compare_slot(&mut self) {
        self.compare_slot = self.compare_slot.other();
    }

    /// Move the active compare slot to the next/previous player in the filtered list,
    /// wrapping at either end.
    pub fn step_compare(&mut self, delta: isize) {
        let candidates = self.filtered();
        if candidates.is_empty() {
            return;
        }
        let len = candidates.len() as isize;
        let current = self
            .selection
            .get(self.compare_slot)
            .and_then(|id| candidates.iter().position(|p| p.id == id));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        let id = candidates[next].id.clone();
        self.selection.set(self.compare_slot, id);
    }

    pub fn compared(&self) -> (Option<&Player>, Option<&Player>) {
        self.selection.resolve(self.players())
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::DatasetLoaded(dataset) => {
            state.selection = Selection::with_defaults(&dataset.players);
            state.push_log(format!(
                "[INFO] Loaded {} players from {} ({} rows dropped)",
                dataset.players.len(),
                dataset.source,
                dataset.report.rejected()
            ));
            state.dataset = Some(dataset);
            state.status = LoadStatus::Ready;
        }
        Delta::LoadFailed(message) => {
            state.push_log(format!("[ERROR] {message}"));
            state.status = LoadStatus::Failed(message);
        }
        Delta::Log(line) => state.push_log(line),
    }
}
