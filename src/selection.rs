use serde::{Deserialize, Serialize};

use crate::player::{League, Player, Position};

/// Active list filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub position: Option<Position>,
    pub team: Option<String>,
    pub league: Option<League>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.team.is_none() && self.league.is_none()
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.position.is_none_or(|pos| player.position == pos)
            && self.team.as_deref().is_none_or(|team| player.team == team)
            && self.league.is_none_or(|league| player.league == league)
    }

    /// Players matching every active filter, in collection order.
    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn describe(&self) -> String {
        format!(
            "position: {} | team: {} | league: {}",
            self.position.map(Position::label).unwrap_or("All"),
            self.team.as_deref().unwrap_or("All"),
            self.league.map(League::label).unwrap_or("All"),
        )
    }
}

/// Sorted, de-duplicated team names.
pub fn teams(players: &[Player]) -> Vec<String> {
    let mut teams: Vec<String> = players.iter().map(|p| p.team.clone()).collect();
    teams.sort();
    teams.dedup();
    teams
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// The two players shown side by side, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub first: Option<String>,
    pub second: Option<String>,
}

pub const DEFAULT_FIRST_PLAYER: &str = "Erling Haaland";

impl Selection {
    /// Haaland (or the first player) against the first defender (or the second player).
    pub fn with_defaults(players: &[Player]) -> Self {
        let first = players
            .iter()
            .find(|p| p.name == DEFAULT_FIRST_PLAYER)
            .or_else(|| players.first());
        let second = players
            .iter()
            .find(|p| p.position == Position::Defender)
            .or_else(|| players.get(1));
        Self {
            first: first.map(|p| p.id.clone()),
            second: second.map(|p| p.id.clone()),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::First => self.first.as_deref(),
            Slot::Second => self.second.as_deref(),
        }
    }

    pub fn set(&mut self, slot: Slot, id: impl Into<String>) {
        let id = Some(id.into());
        match slot {
            Slot::First => self.first = id,
            Slot::Second => self.second = id,
        }
    }

    /// Look the selected ids up in `players`. Ids that are no longer present resolve to `None`.
    pub fn resolve<'a>(&self, players: &'a [Player]) -> (Option<&'a Player>, Option<&'a Player>) {
        let find = |id: Option<&str>| id.and_then(|id| players.iter().find(|p| p.id == id));
        (find(self.get(Slot::First)), find(self.get(Slot::Second)))
    }
}
