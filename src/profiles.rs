use serde::Serialize;

use crate::derived::{per90, share_pct};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinishingLabel {
    Clinical,
    Wasteful,
    OnPar,
}

impl FinishingLabel {
    pub fn label(self) -> &'static str {
        match self {
            FinishingLabel::Clinical => "Clinical Finisher",
            FinishingLabel::Wasteful => "Wasteful",
            FinishingLabel::OnPar => "On Par",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgComparison {
    pub goals: f64,
    pub xg: f64,
    pub diff: f64,
    /// `diff` relative to xG; 0 when the player has no xG.
    pub percent_of_xg: f64,
    pub label: FinishingLabel,
}

pub fn xg_comparison(player: &Player) -> XgComparison {
    let goals = player.stats.goals;
    let xg = player.stats.xg;
    let diff = goals - xg;
    let label = if diff > 0.0 {
        FinishingLabel::Clinical
    } else if diff < 0.0 {
        FinishingLabel::Wasteful
    } else {
        FinishingLabel::OnPar
    };
    XgComparison {
        goals,
        xg,
        diff,
        percent_of_xg: share_pct(diff, xg),
        label,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassRange {
    pub label: &'static str,
    pub completed: f64,
    pub attempted: f64,
    pub missed: f64,
    pub completion_pct: f64,
}

impl PassRange {
    fn new(label: &'static str, completed: f64, attempted: f64) -> Self {
        Self {
            label,
            completed,
            attempted,
            missed: attempted - completed,
            completion_pct: share_pct(completed, attempted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassCompletion {
    pub ranges: [PassRange; 3],
    pub total_completed: f64,
    pub total_attempted: f64,
    pub overall_pct: f64,
    /// Range with the most attempts; the shorter range wins a tie.
    pub most_attempted: &'static str,
}

pub fn pass_completion(player: &Player) -> PassCompletion {
    let s = &player.stats;
    let ranges = [
        PassRange::new("Short (0-15y)", s.short_passes_completed, s.short_passes_attempted),
        PassRange::new("Medium (15-30y)", s.medium_passes_completed, s.medium_passes_attempted),
        PassRange::new("Long (30y+)", s.long_passes_completed, s.long_passes_attempted),
    ];
    let total_completed: f64 = ranges.iter().map(|r| r.completed).sum();
    let total_attempted: f64 = ranges.iter().map(|r| r.attempted).sum();

    let mut most = &ranges[0];
    for r in &ranges[1..] {
        if r.attempted > most.attempted {
            most = r;
        }
    }
    let most_attempted = most.label;

    PassCompletion {
        total_completed,
        total_attempted,
        overall_pct: share_pct(total_completed, total_attempted),
        most_attempted,
        ranges,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: &'static str,
    pub value: f64,
    pub pct: f64,
}

/// Pair labels with values and their share of the total.
fn shares(items: &[(&'static str, f64)]) -> (Vec<Share>, f64) {
    let total: f64 = items.iter().map(|(_, v)| v).sum();
    let out = items
        .iter()
        .map(|&(label, value)| Share {
            label,
            value,
            pct: share_pct(value, total),
        })
        .collect();
    (out, total)
}

/// Index of the largest share; the earliest entry wins a tie.
fn dominant(items: &[Share]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, item) in items.iter().enumerate() {
        match best {
            Some(b) if items[b].value >= item.value => {}
            _ => best = Some(i),
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TouchProfile {
    pub zones: Vec<Share>,
    pub total: f64,
    pub dominant: &'static str,
    pub attacking: f64,
    pub defensive: f64,
    pub attacking_pct: f64,
}

pub fn touch_profile(player: &Player) -> TouchProfile {
    let s = &player.stats;
    let (zones, total) = shares(&[
        ("Def Pen", s.touches_def_pen),
        ("Def Third", s.touches_def_third),
        ("Mid Third", s.touches_mid_third),
        ("Att Third", s.touches_att_third),
        ("Att Pen", s.touches_att_pen),
    ]);
    let attacking = s.touches_att_third + s.touches_att_pen;
    let defensive = s.touches_def_third + s.touches_def_pen;
    let dominant = dominant(&zones).map(|i| zones[i].label).unwrap_or("-");
    TouchProfile {
        dominant,
        total,
        attacking,
        defensive,
        attacking_pct: share_pct(attacking, total),
        zones,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefensiveProfile {
    pub actions: Vec<Share>,
    pub total: f64,
    /// Actions ordered by count, highest first, ties in listing order.
    pub ranked: Vec<&'static str>,
}

impl DefensiveProfile {
    pub fn dominant(&self) -> Option<&Share> {
        self.ranked
            .first()
            .and_then(|label| self.actions.iter().find(|a| a.label == *label))
    }

    pub fn runner_up(&self) -> Option<&Share> {
        self.ranked
            .get(1)
            .and_then(|label| self.actions.iter().find(|a| a.label == *label))
    }

    /// What the dominant action says about a defender's style.
    pub fn style_note(&self) -> &'static str {
        match self.dominant().map(|a| a.label) {
            Some("Tackles") => "aggressive, front-foot defending",
            Some("Interceptions") => "reads the game and anticipates",
            Some("Clearances") => "traditional, safety-first defending",
            Some("Blocks") => "brave shot-blocking positioning",
            _ => "no defensive actions recorded",
        }
    }
}

pub fn defensive_profile(player: &Player) -> DefensiveProfile {
    let s = &player.stats;
    let (actions, total) = shares(&[
        ("Tackles", s.tackles),
        ("Interceptions", s.interceptions),
        ("Blocks", s.blocks),
        ("Clearances", s.clearances),
    ]);
    let mut order: Vec<&Share> = actions.iter().collect();
    order.sort_by(|a, b| b.value.total_cmp(&a.value));
    let ranked = order.into_iter().map(|a| a.label).collect();
    DefensiveProfile {
        actions,
        total,
        ranked,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressiveFlow {
    pub carries: f64,
    pub passes: f64,
    pub total: f64,
    pub carry_pct: f64,
    pub pass_pct: f64,
    /// `"carrying"` only when carries strictly exceed passes.
    pub dominant_method: &'static str,
}

pub fn progressive_flow(player: &Player) -> ProgressiveFlow {
    let carries = player.stats.progressive_carries;
    let passes = player.stats.progressive_passes;
    let total = carries + passes;
    ProgressiveFlow {
        carries,
        passes,
        total,
        carry_pct: share_pct(carries, total),
        pass_pct: share_pct(passes, total),
        dominant_method: if carries > passes { "carrying" } else { "passing" },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadarKind {
    Attacker,
    Defender,
}

impl RadarKind {
    pub fn for_player(player: &Player) -> Self {
        if player.is_attacking() {
            RadarKind::Attacker
        } else {
            RadarKind::Defender
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RadarKind::Attacker => "Performance Profile",
            RadarKind::Defender => "Defensive Profile",
        }
    }
}

/// One spoke of a radar chart. `value` is on a shared 0..~150 plotting scale, `raw` is
/// what gets printed next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub label: &'static str,
    pub value: f64,
    pub raw: String,
}

const RADAR_CAP: f64 = 150.0;

fn axis(label: &'static str, value: f64, raw: String) -> RadarAxis {
    RadarAxis { label, value, raw }
}

fn capped(label: &'static str, count: f64, scale: f64) -> RadarAxis {
    axis(label, (count * scale).min(RADAR_CAP), format!("{count:.0}"))
}

pub fn radar_profile(player: &Player, kind: RadarKind) -> Vec<RadarAxis> {
    let s = &player.stats;
    let n = s.nineties;
    match kind {
        RadarKind::Attacker => {
            let goals = per90(s.goals, n);
            let assists = per90(s.assists, n);
            let xg = per90(s.xg, n);
            let shots = per90(s.shots, n);
            vec![
                axis("Goals/90", goals * 100.0, format!("{goals:.2}")),
                axis("Assists/90", assists * 100.0, format!("{assists:.2}")),
                axis("xG/90", xg * 100.0, format!("{xg:.2}")),
                axis("Shots/90", shots * 25.0, format!("{shots:.2}")),
                capped("Dribbles", s.dribbles, 1.0),
                capped("Prog Carries", s.progressive_carries, 1.0),
                capped("Shot Creating", s.shot_creating_actions, 1.0),
            ]
        }
        RadarKind::Defender => {
            let tackles = per90(s.tackles, n);
            vec![
                axis("Tackles/90", tackles * 50.0, format!("{tackles:.2}")),
                capped("Interceptions", s.interceptions, 2.0),
                capped("Blocks", s.blocks, 4.0),
                capped("Clearances", s.clearances, 1.0),
                capped("Aerial Wins", s.aerial_wins, 1.0),
                axis(
                    "Pass %",
                    s.pass_completion_pct * 1.5,
                    format!("{:.1}%", s.pass_completion_pct),
                ),
                capped("Prog Passes", s.progressive_passes, 1.0),
            ]
        }
    }
}

/// Strongest and weakest spokes. A tied maximum goes to the earlier spoke, a tied minimum to
/// the later one.
pub fn radar_extremes(axes: &[RadarAxis]) -> Option<(&RadarAxis, &RadarAxis)> {
    let first = axes.first()?;
    let mut strongest = first;
    let mut weakest = first;
    for a in &axes[1..] {
        if a.value > strongest.value {
            strongest = a;
        }
        if a.value <= weakest.value {
            weakest = a;
        }
    }
    Some((strongest, weakest))
}
