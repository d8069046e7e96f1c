use std::fs;
use std::path::PathBuf;

use big5_dashboard::csv_rows::parse_records;
use big5_dashboard::normalize::normalize;
use big5_dashboard::player::{League, Player, PlayerStats};
use big5_dashboard::profiles::{
    FinishingLabel, RadarKind, defensive_profile, pass_completion, progressive_flow,
    radar_extremes, radar_profile, touch_profile, xg_comparison,
};
use big5_dashboard::summary::{dataset_overview, findings, league_summaries};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_players() -> Vec<Player> {
    normalize(&parse_records(&read_fixture("big5_sample.csv")))
}

fn by_name<'a>(players: &'a [Player], name: &str) -> &'a Player {
    players
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("{name} should be in the fixture"))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn xg_comparison_labels() {
    let players = fixture_players();
    let haaland = xg_comparison(by_name(&players, "Erling Haaland"));
    assert!(close(haaland.diff, 7.6));
    assert!(close(haaland.percent_of_xg, 7.6 / 28.4 * 100.0));
    assert_eq!(haaland.label, FinishingLabel::Clinical);

    let smith = xg_comparison(by_name(&players, "Smith, John"));
    assert_eq!(smith.label, FinishingLabel::Wasteful);

    let keeper = xg_comparison(by_name(&players, "Yann Sommer"));
    assert_eq!(keeper.label, FinishingLabel::OnPar);
    assert_eq!(keeper.percent_of_xg, 0.0);
}

#[test]
fn pass_completion_by_range() {
    let players = fixture_players();
    let saliba = pass_completion(by_name(&players, "William Saliba"));
    assert_eq!(saliba.most_attempted, "Medium (15-30y)");
    assert_eq!(saliba.total_attempted, 2060.0);
    assert_eq!(saliba.ranges[2].missed, 70.0);
    assert!(close(saliba.overall_pct, 1880.0 / 2060.0 * 100.0));

    let empty = Player {
        stats: PlayerStats::default(),
        ..by_name(&players, "Pedri").clone()
    };
    let none = pass_completion(&empty);
    assert_eq!(none.overall_pct, 0.0);
    assert_eq!(none.ranges[0].completion_pct, 0.0);
    assert_eq!(none.most_attempted, "Short (0-15y)");
}

#[test]
fn touch_and_defensive_profiles() {
    let players = fixture_players();
    let saliba = by_name(&players, "William Saliba");

    let touches = touch_profile(saliba);
    assert_eq!(touches.total, 2690.0);
    assert_eq!(touches.dominant, "Mid Third");
    assert_eq!(touches.attacking, 260.0);

    let defensive = defensive_profile(saliba);
    assert_eq!(defensive.total, 196.0);
    assert_eq!(
        defensive.ranked,
        vec!["Clearances", "Tackles", "Interceptions", "Blocks"]
    );
    assert_eq!(defensive.dominant().map(|a| a.value), Some(92.0));
    assert_eq!(defensive.runner_up().map(|a| a.label), Some("Tackles"));

    let flow = progressive_flow(saliba);
    assert_eq!(flow.dominant_method, "passing");
    assert_eq!(flow.total, 140.0);
}

#[test]
fn radar_profiles_scale_and_cap() {
    let players = fixture_players();
    let haaland = by_name(&players, "Erling Haaland");
    assert_eq!(RadarKind::for_player(haaland), RadarKind::Attacker);
    let axes = radar_profile(haaland, RadarKind::Attacker);
    assert_eq!(axes.len(), 7);
    assert!(close(axes[0].value, 36.0 / 30.8 * 100.0));
    assert_eq!(axes[0].raw, "1.17");
    assert_eq!(axes[6].value, 61.0);

    let sommer = by_name(&players, "Yann Sommer");
    assert_eq!(RadarKind::for_player(sommer), RadarKind::Defender);
    let axes = radar_profile(sommer, RadarKind::Defender);
    assert_eq!(axes[5].raw, "83.3%");
    let (strongest, weakest) = radar_extremes(&axes).expect("non-empty radar");
    assert_eq!(strongest.label, "Pass %");
    assert_eq!(weakest.label, "Tackles/90");

    let kim = by_name(&players, "Kim Min-jae");
    let axes = radar_profile(kim, RadarKind::Defender);
    assert_eq!(axes[1].value, 96.0);
    assert_eq!(axes[2].value, 120.0);
    assert_eq!(axes[3].value, 110.0);

    let mut heavy = kim.clone();
    heavy.stats.clearances = 400.0;
    let axes = radar_profile(&heavy, RadarKind::Defender);
    assert_eq!(axes[3].value, 150.0);
    assert_eq!(axes[3].raw, "400");
}

#[test]
fn radar_tied_minimum_goes_to_later_spoke() {
    let players = fixture_players();
    let mut lone = by_name(&players, "Erling Haaland").clone();
    lone.stats = PlayerStats {
        goals: 5.0,
        nineties: 10.0,
        ..PlayerStats::default()
    };
    let axes = radar_profile(&lone, RadarKind::Attacker);
    let (strongest, weakest) = radar_extremes(&axes).expect("non-empty radar");
    assert_eq!(strongest.label, "Goals/90");
    assert_eq!(weakest.label, "Shot Creating");
}

#[test]
fn overview_counts_sorted_descending() {
    let overview = dataset_overview(&fixture_players());
    assert_eq!(overview.total_players, 9);
    let leagues: Vec<(&str, usize)> = overview
        .by_league
        .iter()
        .map(|c| (c.label, c.count))
        .collect();
    assert_eq!(
        leagues,
        vec![
            ("PL", 3),
            ("Serie A", 2),
            ("Bundesliga", 2),
            ("Ligue 1", 1),
            ("La Liga", 1),
        ]
    );
    assert_eq!(overview.top_league().map(|c| c.label), Some("PL"));
    let positions: Vec<&str> = overview.by_position.iter().map(|c| c.label).collect();
    assert_eq!(positions, vec!["Forward", "Midfielder", "Defender", "Goalkeeper"]);
    assert_eq!(dataset_overview(&[]).avg_goals, None);
}

#[test]
fn league_summaries_cover_all_leagues() {
    let summaries = league_summaries(&fixture_players());
    assert_eq!(summaries.len(), 5);
    assert_eq!(summaries[0].league, League::PremierLeague);
    assert_eq!(summaries[0].count, 3);
    assert_eq!(summaries[4].avg_goals, Some(29.0));

    let empty = league_summaries(&[]);
    assert!(empty.iter().all(|s| s.count == 0 && s.avg_goals.is_none()));
}

#[test]
fn findings_over_fixture() {
    let f = findings(&fixture_players());
    assert_eq!(f.xg.involved, 8);
    assert_eq!(f.xg.overperformers, 7);
    assert_eq!(f.xg.underperformers, 1);
    assert_eq!(
        f.xg.top_overperformer.as_ref().map(|p| p.name.as_str()),
        Some("Erling Haaland")
    );
    let under = f.xg.top_underperformer.as_ref().expect("one underperformer");
    assert_eq!(under.name, "Smith, John");
    assert!(close(under.value, -0.9));

    assert_eq!(f.highest_scoring_league, Some(League::Ligue1));
    // La Liga and Serie A tie on tackles; the earlier league wins.
    assert_eq!(f.most_defensive_league, Some(League::LaLiga));

    assert_eq!(f.top_carrier.as_ref().map(|p| p.name.as_str()), Some("Jamal Musiala"));
    assert_eq!(f.top_passer.as_ref().map(|p| p.name.as_str()), Some("Kim Min-jae"));
    assert_eq!(f.top_tackler.as_ref().map(|p| p.value), Some(42.0));
    assert_eq!(f.top_interceptor.as_ref().map(|p| p.name.as_str()), Some("Kim Min-jae"));
}

#[test]
fn findings_on_empty_collection() {
    let f = findings(&[]);
    assert_eq!(f.xg.involved, 0);
    assert_eq!(f.xg.avg_diff, None);
    assert!(f.xg.top_overperformer.is_none());
    assert_eq!(f.highest_scoring_league, None);
    assert_eq!(f.progressive.carrier_pct, 0.0);
}
