use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    PremierLeague,
    LaLiga,
    SerieA,
    Bundesliga,
    Ligue1,
}

impl League {
    pub const ALL: [League; 5] = [
        League::PremierLeague,
        League::LaLiga,
        League::SerieA,
        League::Bundesliga,
        League::Ligue1,
    ];

    /// Exact `Comp` column value. Anything else is not one of the five leagues.
    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|league| league.label() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::LaLiga => "La Liga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
            League::Ligue1 => "Ligue 1",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            League::PremierLeague => "PL",
            League::LaLiga => "La Liga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
            League::Ligue1 => "Ligue 1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    /// Classify a raw FBref `Pos` code such as `"DF,MF"` or `"FW"`.
    ///
    /// The first listed role wins for defenders and forwards; only an exact `"GK"` is a
    /// goalkeeper. Everything else, including empty codes, falls back to midfield.
    pub fn from_code(code: &str) -> Self {
        if code.starts_with("DF") {
            Position::Defender
        } else if code.starts_with("FW") {
            Position::Forward
        } else if code == "GK" {
            Position::Goalkeeper
        } else {
            Position::Midfielder
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|pos| pos.label().eq_ignore_ascii_case(raw))
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        }
    }
}

macro_rules! stat_fields {
    ($($field:ident => $variant:ident, $label:literal, [$($col:literal),+];)+) => {
        /// Season totals and rates for one player. Unparseable source values are stored as 0.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct PlayerStats {
            $(pub $field: f64,)+
        }

        /// Every numeric column a view can rank, average or plot by.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum StatField {
            $($variant,)+
        }

        impl StatField {
            pub const ALL: &'static [StatField] = &[$(StatField::$variant,)+];

            pub fn label(self) -> &'static str {
                match self {
                    $(StatField::$variant => $label,)+
                }
            }

            /// Snake-case name used on the command line and in JSON output.
            pub fn key(self) -> &'static str {
                match self {
                    $(StatField::$variant => stringify!($field),)+
                }
            }

            /// CSV headers summed into this field.
            pub fn columns(self) -> &'static [&'static str] {
                match self {
                    $(StatField::$variant => &[$($col),+],)+
                }
            }

            pub fn value(self, stats: &PlayerStats) -> f64 {
                match self {
                    $(StatField::$variant => stats.$field,)+
                }
            }

            pub(crate) fn slot(self, stats: &mut PlayerStats) -> &mut f64 {
                match self {
                    $(StatField::$variant => &mut stats.$field,)+
                }
            }
        }
    };
}

stat_fields! {
    matches => Matches, "Matches", ["MP"];
    starts => Starts, "Starts", ["Starts"];
    minutes => Minutes, "Minutes", ["Min"];
    nineties => Nineties, "90s Played", ["90s"];

    goals => Goals, "Goals", ["Gls"];
    assists => Assists, "Assists", ["Ast"];
    xg => Xg, "Expected Goals (xG)", ["xG"];
    xag => Xag, "Expected Assisted Goals (xAG)", ["xAG"];
    npxg => Npxg, "Non-Penalty xG", ["npxG"];
    goals_per90 => GoalsPer90, "Goals/90", ["Gls.1"];
    assists_per90 => AssistsPer90, "Assists/90", ["Ast.1"];
    xg_per90 => XgPer90, "xG/90", ["xG.1"];

    progressive_carries => ProgressiveCarries, "Progressive Carries", ["PrgC"];
    progressive_passes => ProgressivePasses, "Progressive Passes", ["PrgP"];
    progressive_receptions => ProgressiveReceptions, "Progressive Receptions", ["PrgR"];

    tackles => Tackles, "Tackles", ["Tkl"];
    tackles_won => TacklesWon, "Tackles Won", ["TklW"];
    interceptions => Interceptions, "Interceptions", ["Int"];
    blocks => Blocks, "Blocks", ["Blocks"];
    clearances => Clearances, "Clearances", ["Clr"];

    passes_completed => PassesCompleted, "Passes Completed", ["Cmp"];
    passes_attempted => PassesAttempted, "Passes Attempted", ["Att"];
    pass_completion_pct => PassCompletionPct, "Pass Completion %", ["Cmp%"];
    total_pass_distance => TotalPassDistance, "Total Pass Distance", ["TotDist"];
    progressive_pass_distance => ProgressivePassDistance, "Progressive Pass Distance", ["PrgDist"];
    short_passes_completed => ShortPassesCompleted, "Short Passes Completed", ["Cmp.1"];
    short_passes_attempted => ShortPassesAttempted, "Short Passes Attempted", ["Att.1"];
    short_pass_completion_pct => ShortPassCompletionPct, "Short Pass %", ["Cmp%.1"];
    medium_passes_completed => MediumPassesCompleted, "Medium Passes Completed", ["Cmp.2"];
    medium_passes_attempted => MediumPassesAttempted, "Medium Passes Attempted", ["Att.2"];
    medium_pass_completion_pct => MediumPassCompletionPct, "Medium Pass %", ["Cmp%.2"];
    long_passes_completed => LongPassesCompleted, "Long Passes Completed", ["Cmp.3"];
    long_passes_attempted => LongPassesAttempted, "Long Passes Attempted", ["Att.3"];
    long_pass_completion_pct => LongPassCompletionPct, "Long Pass %", ["Cmp%.3"];

    shot_creating_actions => ShotCreatingActions, "Shot-Creating Actions", ["SCA"];
    goal_creating_actions => GoalCreatingActions, "Goal-Creating Actions", ["GCA"];

    touches => Touches, "Touches", ["Touches"];
    touches_def_pen => TouchesDefPen, "Touches (Def Pen)", ["Def Pen"];
    touches_def_third => TouchesDefThird, "Touches (Def 3rd)", ["Def 3rd"];
    touches_mid_third => TouchesMidThird, "Touches (Mid 3rd)", ["Mid 3rd"];
    touches_att_third => TouchesAttThird, "Touches (Att 3rd)", ["Att 3rd"];
    touches_att_pen => TouchesAttPen, "Touches (Att Pen)", ["Att Pen"];

    shots => Shots, "Shots", ["Sh"];
    shots_on_target => ShotsOnTarget, "Shots on Target", ["SoT"];
    shots_on_target_pct => ShotsOnTargetPct, "Shots on Target %", ["SoT%"];

    dribbles => Dribbles, "Dribbles", ["Succ"];
    dribbles_success => DribblesSuccess, "Successful Dribbles", ["Succ"];
    dribbles_attempted => DribblesAttempted, "Dribbles Attempted", ["Succ", "Tkld"];

    carries => Carries, "Carries", ["Carries"];
    carries_progressive => CarriesProgressive, "Progressive Carries (Carrying)", ["PrgC"];

    aerial_wins => AerialWins, "Aerial Duels Won", ["Won"];
    aerial_losses => AerialLosses, "Aerial Duels Lost", ["Lost"];
    aerial_win_pct => AerialWinPct, "Aerial Win %", ["Won%"];

    yellow_cards => YellowCards, "Yellow Cards", ["CrdY"];
    red_cards => RedCards, "Red Cards", ["CrdR"];
}

impl StatField {
    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub age: u32,
    pub nation: String,
    pub league: League,
    pub stats: PlayerStats,
}

impl Player {
    pub fn stat(&self, field: StatField) -> f64 {
        field.value(&self.stats)
    }

    /// Forwards and midfielders get the attacking comparison views; everyone else the
    /// defensive ones.
    pub fn is_attacking(&self) -> bool {
        matches!(self.position, Position::Forward | Position::Midfielder)
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Identity key: `name-team` with every whitespace character removed.
pub fn player_id(name: &str, team: &str) -> String {
    format!("{name}-{team}")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
