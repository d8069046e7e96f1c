use std::fs;
use std::path::PathBuf;

use big5_dashboard::csv_rows::{DELIMITER, parse_records, split_fields};
use big5_dashboard::normalize::{coerce_number, normalize, normalize_with_report};
use big5_dashboard::player::{League, Position};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn quoted_delimiter_stays_in_field() {
    let fields = split_fields(r#""Smith, John",TeamA,10"#, DELIMITER);
    assert_eq!(fields, vec!["Smith, John", "TeamA", "10"]);
}

#[test]
fn rows_are_keyed_by_header() {
    let rows = parse_records("Player,Squad,Gls\n\"Smith, John\",TeamA,10\nShort\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("Player"), "Smith, John");
    assert_eq!(rows[0].get("Gls"), "10");
    assert_eq!(rows[1].get("Player"), "Short");
    assert_eq!(rows[1].get("Squad"), "");
    assert_eq!(rows[1].get("NotAColumn"), "");
}

#[test]
fn numeric_coercion_never_fails() {
    assert_eq!(coerce_number("abc"), 0.0);
    assert_eq!(coerce_number("7"), 7.0);
    assert_eq!(coerce_number("2,769"), 2769.0);
}

#[test]
fn position_codes_classify() {
    assert_eq!(Position::from_code("DF,MF"), Position::Defender);
    assert_eq!(Position::from_code("FW"), Position::Forward);
    assert_eq!(Position::from_code("GK"), Position::Goalkeeper);
    assert_eq!(Position::from_code("MF"), Position::Midfielder);
    assert_eq!(Position::from_code(""), Position::Midfielder);
    assert_eq!(Position::from_code("GK,DF"), Position::Midfielder);
}

#[test]
fn three_row_scenario_keeps_only_premier_league() {
    let csv = "\
Player,Squad,Comp,Min,Pos,Gls
A One,Arsenal,Premier League,200,FW,3
B Two,Sevilla,La Liga,50,MF,0
C Three,Somewhere,Unknown League,900,DF,1
";
    let players = normalize(&parse_records(csv));
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "A One");
    assert_eq!(players[0].league, League::PremierLeague);
    assert_eq!(players[0].stats.goals, 3.0);
}

#[test]
fn fixture_drops_each_rejection_reason() {
    let raw = read_fixture("big5_sample.csv");
    let rows = parse_records(&raw);
    assert_eq!(rows.len(), 12);

    let out = normalize_with_report(&rows);
    let report = &out.report;
    assert_eq!(report.rows_seen, 12);
    assert_eq!(report.accepted, 9);
    assert_eq!(report.unknown_league, 1);
    assert_eq!(report.insufficient_minutes, 1);
    assert_eq!(report.duplicate, 1);
    assert_eq!(report.rejected(), 3);

    let names: Vec<&str> = out.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Erling Haaland",
            "William Saliba",
            "Kylian Mbappé",
            "Pedri",
            "Victor Osimhen",
            "Kim Min-jae",
            "Jamal Musiala",
            "Yann Sommer",
            "Smith, John",
        ]
    );
}

#[test]
fn fixture_players_hold_invariants() {
    let raw = read_fixture("big5_sample.csv");
    let players = normalize(&parse_records(&raw));
    for p in &players {
        assert!(p.stats.minutes >= 90.0, "{} has {} minutes", p.name, p.stats.minutes);
        assert!(League::ALL.contains(&p.league));
    }

    // First occurrence wins for the repeated Haaland row.
    let haaland = &players[0];
    assert_eq!(haaland.id, "ErlingHaaland-ManchesterCity");
    assert_eq!(haaland.stats.goals, 36.0);
    assert_eq!(haaland.stats.minutes, 2769.0);
    assert_eq!(haaland.age, 22);
    assert_eq!(haaland.stats.dribbles_attempted, 36.0);

    let smith = players.iter().find(|p| p.team == "Brentford").expect("smith kept");
    assert_eq!(smith.stats.goals, 0.0);
    assert_eq!(smith.position, Position::Midfielder);
    assert_eq!(smith.age, 0);

    let mbappe = players.iter().find(|p| p.team == "Paris S-G").expect("mbappe kept");
    assert_eq!(mbappe.position, Position::Forward);
    assert_eq!(mbappe.league, League::Ligue1);
}

#[test]
fn parsing_is_deterministic() {
    let raw = read_fixture("big5_sample.csv");
    let first = normalize(&parse_records(&raw));
    let second = normalize(&parse_records(&raw));
    assert_eq!(first, second);
}

#[test]
fn blank_line_between_rows_is_not_a_rejection() {
    let text = "Player,Squad,Comp,Min\nA,X,Serie A,900\n\nB,Y,Serie A,900\n";
    let out = normalize_with_report(&parse_records(text));
    assert_eq!(out.report.rows_seen, 2);
    assert_eq!(out.report.unknown_league, 0);
    assert_eq!(out.report.accepted, 2);
}
