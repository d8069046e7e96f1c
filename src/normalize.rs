use std::collections::HashSet;

use serde::Serialize;

use crate::csv_rows::RawRow;
use crate::player::{League, Player, PlayerStats, Position, StatField, player_id};

/// Rows with fewer minutes than this are not statistically meaningful and are dropped.
pub const MIN_MINUTES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectReason {
    UnknownLeague,
    InsufficientMinutes,
    Duplicate,
}

/// Per-reason drop counts for one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectionReport {
    pub rows_seen: usize,
    pub accepted: usize,
    pub unknown_league: usize,
    pub insufficient_minutes: usize,
    pub duplicate: usize,
}

impl RejectionReport {
    fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::UnknownLeague => self.unknown_league += 1,
            RejectReason::InsufficientMinutes => self.insufficient_minutes += 1,
            RejectReason::Duplicate => self.duplicate += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.unknown_league + self.insufficient_minutes + self.duplicate
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub players: Vec<Player>,
    pub report: RejectionReport,
}

/// Turn raw rows into players, silently dropping rows outside the five leagues, rows under
/// [`MIN_MINUTES`], and repeats of an already accepted `Player`+`Squad` pair. Input order
/// is preserved.
pub fn normalize(rows: &[RawRow]) -> Vec<Player> {
    normalize_with_report(rows).players
}

pub fn normalize_with_report(rows: &[RawRow]) -> Normalized {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Normalized::default();

    for (idx, row) in rows.iter().enumerate() {
        out.report.rows_seen += 1;
        match normalize_row(row, &mut seen) {
            Ok(player) => {
                out.report.accepted += 1;
                out.players.push(player);
            }
            Err(reason) => {
                // +2: one for the header line, one for 1-based numbering.
                log::trace!("line {}: dropped ({reason:?})", idx + 2);
                out.report.record(reason);
            }
        }
    }

    out
}

fn normalize_row(row: &RawRow, seen: &mut HashSet<String>) -> Result<Player, RejectReason> {
    let league = League::from_label(row.get("Comp")).ok_or(RejectReason::UnknownLeague)?;

    let minutes = coerce_number(row.get("Min"));
    if minutes < MIN_MINUTES {
        return Err(RejectReason::InsufficientMinutes);
    }

    let name = row.get("Player");
    let team = row.get("Squad");
    let id = player_id(name, team);
    if !seen.insert(id.clone()) {
        return Err(RejectReason::Duplicate);
    }

    Ok(Player {
        id,
        name: name.to_string(),
        team: team.to_string(),
        position: Position::from_code(row.get("Pos")),
        age: coerce_number(row.get("Age")) as u32,
        nation: row.get("Nation").to_string(),
        league,
        stats: coerce_stats(row),
    })
}

/// Fill every [`StatField`] from its source columns, summing when a field has several.
pub fn coerce_stats(row: &RawRow) -> PlayerStats {
    let mut stats = PlayerStats::default();
    for &field in StatField::ALL {
        *field.slot(&mut stats) = field
            .columns()
            .iter()
            .map(|column| coerce_number(row.get(column)))
            .sum();
    }
    stats
}

/// Lenient numeric read: thousands separators are stripped and the longest leading decimal
/// number is taken, so `"1,234"` is 1234 and an FBref age like `"25-123"` is 25. Anything
/// without a leading number, or a non-finite result, is 0.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    leading_number(&cleaned)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}
