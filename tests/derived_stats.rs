use std::fs;
use std::path::PathBuf;

use big5_dashboard::csv_rows::parse_records;
use big5_dashboard::derived::{
    DefensiveArchetype, PerformanceClass, ProgressiveStyle, RANKED_SCATTER_THRESHOLD,
    archetype_split, classify_performance, defensive_archetype, league_average, mean, per90,
    per90_field, progressive_split, progressive_style,
};
use big5_dashboard::normalize::normalize;
use big5_dashboard::player::{League, Player, PlayerStats, Position, StatField, player_id};
use big5_dashboard::rankings::{
    RankRange, attacker_pool, defender_pool, rank_range, rank_rows, top_n,
};
use big5_dashboard::summary::{defender_window_takeaway, scorer_window_takeaway, top_n_takeaway};

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

fn names<'a>(players: &[&'a Player]) -> Vec<&'a str> {
    players.iter().map(|p| p.name.as_str()).collect()
}

fn bare(name: &str, goals: f64) -> Player {
    Player {
        id: player_id(name, "Team"),
        name: name.to_string(),
        team: "Team".to_string(),
        position: Position::Forward,
        age: 20,
        nation: String::new(),
        league: League::SerieA,
        stats: PlayerStats {
            goals,
            minutes: 900.0,
            ..PlayerStats::default()
        },
    }
}

#[test]
fn per90_floors_nineties_at_one() {
    assert_eq!(per90(5.0, 0.0), 5.0);
    assert_eq!(per90(5.0, 0.5), 5.0);
    assert_eq!(per90(10.0, 4.0), 2.5);
}

#[test]
fn per90_field_reads_player_nineties() {
    let players = fixture_players();
    let haaland = players
        .iter()
        .find(|p| p.name == "Erling Haaland")
        .expect("fixture has Haaland");
    let g90 = per90_field(haaland, StatField::Goals);
    assert!((g90 - 36.0 / 30.8).abs() < 1e-9);

    // No nineties recorded: the raw count comes back.
    assert_eq!(per90_field(&bare("A", 4.0), StatField::Goals), 4.0);
}

#[test]
fn performance_classes_at_ranked_threshold() {
    assert_eq!(
        classify_performance(10.0, 7.0, RANKED_SCATTER_THRESHOLD),
        PerformanceClass::Overperformer
    );
    assert_eq!(
        classify_performance(5.0, 6.0, RANKED_SCATTER_THRESHOLD),
        PerformanceClass::Average
    );
    assert_eq!(
        classify_performance(3.0, 6.0, RANKED_SCATTER_THRESHOLD),
        PerformanceClass::Underperformer
    );
    // Exactly on the threshold is still average.
    assert_eq!(classify_performance(9.0, 7.0, 2.0), PerformanceClass::Average);
}

#[test]
fn top_n_is_descending_with_stable_ties() {
    let players = fixture_players();
    let top = top_n(&players, StatField::Goals, 7);
    assert_eq!(
        names(&top),
        vec![
            "Erling Haaland",
            "Kylian Mbappé",
            "Victor Osimhen",
            "Jamal Musiala",
            "Pedri",
            "William Saliba",
            "Kim Min-jae",
        ]
    );

    let everyone = top_n(&players, StatField::Goals, 100);
    assert_eq!(everyone.len(), players.len());
}

#[test]
fn equal_values_keep_collection_order() {
    let players = vec![bare("B", 3.0), bare("A", 3.0), bare("C", 5.0)];
    let top = top_n(&players, StatField::Goals, 3);
    assert_eq!(names(&top), vec!["C", "B", "A"]);
}

#[test]
fn pools_filter_and_rank() {
    let players = fixture_players();
    let attackers = attacker_pool(&players);
    assert_eq!(
        names(&attackers),
        vec!["Erling Haaland", "Kylian Mbappé", "Victor Osimhen"]
    );

    // Kim: 36 + 48 + 110 + 30 beats Saliba: 42 + 35 + 92 + 27.
    let defenders = defender_pool(&players);
    assert_eq!(names(&defenders), vec!["Kim Min-jae", "William Saliba"]);
}

#[test]
fn rank_range_slices_one_based() {
    let players = fixture_players();
    let ranked = top_n(&players, StatField::Goals, 100);
    let window = rank_range(&ranked, RankRange::new(2, 3));
    assert_eq!(names(&window), vec!["Kylian Mbappé", "Victor Osimhen"]);

    let past_end = rank_range(&ranked, RankRange::new(8, 50));
    assert_eq!(past_end.len(), 2);
    assert!(rank_range(&ranked, RankRange::new(5, 4)).is_empty());
    assert!(rank_range(&ranked, RankRange::new(40, 50)).is_empty());

    let rows = rank_rows(&window, StatField::Goals, 2);
    assert_eq!(rows[0].rank, 2);
    assert_eq!(rows[0].value, 29.0);
    assert_eq!(rows[1].league, "Serie A");
}

#[test]
fn league_averages_guard_empty_groups() {
    let players = fixture_players();
    let serie_a = league_average(&players, League::SerieA, StatField::Goals);
    assert_eq!(serie_a, Some(14.0));

    let only_pl: Vec<Player> = players
        .iter()
        .filter(|p| p.league == League::PremierLeague)
        .cloned()
        .collect();
    assert_eq!(league_average(&only_pl, League::LaLiga, StatField::Goals), None);
    assert_eq!(mean(&Vec::<Player>::new(), StatField::Xg), None);
}

#[test]
fn defensive_archetypes() {
    let stats = PlayerStats {
        tackles: 5.0,
        interceptions: 3.0,
        ..PlayerStats::default()
    };
    assert_eq!(defensive_archetype(&stats), Some(DefensiveArchetype::Tackler));
    let tied = PlayerStats {
        tackles: 4.0,
        interceptions: 4.0,
        ..PlayerStats::default()
    };
    assert_eq!(defensive_archetype(&tied), None);

    let split = archetype_split(&fixture_players());
    assert_eq!(split.total, 2);
    assert_eq!(split.tacklers, 1);
    assert_eq!(split.readers, 1);
    assert_eq!(split.tackler_pct, 50.0);
    assert_eq!(split.avg_tackles, Some(39.0));
    assert_eq!(split.avg_interceptions, Some(41.5));
}

#[test]
fn archetype_percentages_exclude_ties() {
    let mut players = vec![bare("A", 0.0), bare("B", 0.0), bare("C", 0.0), bare("D", 0.0)];
    for (p, (tkl, int)) in players
        .iter_mut()
        .zip([(5.0, 1.0), (2.0, 2.0), (1.0, 3.0), (0.0, 0.0)])
    {
        p.position = Position::Defender;
        p.stats.tackles = tkl;
        p.stats.interceptions = int;
    }
    let split = archetype_split(&players);
    assert_eq!(split.total, 4);
    assert_eq!(split.tackler_pct, 25.0);
    assert_eq!(split.reader_pct, 25.0);

    assert_eq!(archetype_split(&Vec::<Player>::new()).tackler_pct, 0.0);
}

#[test]
fn progressive_styles() {
    let carrier = PlayerStats {
        progressive_carries: 10.0,
        progressive_passes: 4.0,
        ..PlayerStats::default()
    };
    assert_eq!(progressive_style(&carrier), Some(ProgressiveStyle::Carrier));
    assert_eq!(progressive_style(&PlayerStats::default()), None);

    let split = progressive_split(&fixture_players());
    assert_eq!(split.total, 7);
    assert_eq!(split.carriers, 4);
    assert_eq!(split.passers, 3);
    assert_eq!(split.balanced, 0);
}

fn finisher(name: &str, goals: f64, xg: f64) -> Player {
    let mut p = bare(name, goals);
    p.stats.xg = xg;
    p
}

#[test]
fn scorer_takeaway_counts_window() {
    let players = vec![
        finisher("A", 10.0, 5.0),
        finisher("B", 5.0, 6.0),
        finisher("C", 4.0, 7.0),
    ];
    let window: Vec<&Player> = players.iter().collect();
    let t = scorer_window_takeaway(&window, RANKED_SCATTER_THRESHOLD);
    assert_eq!(t.players, 3);
    assert_eq!(t.overperformers, 1);
    assert_eq!(t.underperformers, 1);
    let best = t.most_clinical.as_ref().expect("clinical finisher");
    assert_eq!((best.name.as_str(), best.value), ("A", 5.0));
    let worst = t.most_wasteful.as_ref().expect("wasteful finisher");
    assert_eq!((worst.name.as_str(), worst.value), ("C", -3.0));
    assert!(t.describe().contains("C underperformed most"));
}

#[test]
fn wasteful_needs_to_miss_by_more_than_threshold() {
    let players = vec![finisher("A", 10.0, 5.0), finisher("B", 3.0, 5.0)];
    let window: Vec<&Player> = players.iter().collect();
    let t = scorer_window_takeaway(&window, RANKED_SCATTER_THRESHOLD);
    // B trails by exactly 2: still average and not called out.
    assert_eq!(t.underperformers, 0);
    assert!(t.most_wasteful.is_none());
    assert!(!t.describe().contains("underperformed most"));
}

#[test]
fn empty_windows_have_no_leaders() {
    let scorers = scorer_window_takeaway(&[], RANKED_SCATTER_THRESHOLD);
    assert_eq!(scorers.players, 0);
    assert!(scorers.most_clinical.is_none());
    assert!(scorers.most_wasteful.is_none());
    assert_eq!(scorers.describe(), "No players in this window.");

    let defenders = defender_window_takeaway(&[]);
    assert!(defenders.top_tackler.is_none());
    assert_eq!(defenders.avg_tackles, None);
    assert_eq!(defenders.describe(), "No players in this window.");

    let top = top_n_takeaway(&[], StatField::Goals);
    assert!(top.leader.is_none() && top.cutoff.is_none());
    assert_eq!(top.average, None);
}

#[test]
fn defender_takeaway_over_pool() {
    let players = fixture_players();
    let pool = defender_pool(&players);
    let window = rank_range(&pool, RankRange::default());
    let t = defender_window_takeaway(&window);
    assert_eq!(t.players, 2);
    assert_eq!(t.top_tackler.as_ref().map(|p| p.name.as_str()), Some("William Saliba"));
    assert_eq!(t.top_interceptor.as_ref().map(|p| p.value), Some(48.0));
    assert_eq!(t.avg_tackles, Some(39.0));
    assert_eq!(t.avg_interceptions, Some(41.5));
}

#[test]
fn top_n_takeaway_leader_and_cutoff() {
    let players = vec![bare("A", 3.0), bare("B", 1.0), bare("C", 5.0)];
    let top = top_n(&players, StatField::Goals, 3);
    let t = top_n_takeaway(&top, StatField::Goals);
    assert_eq!(t.leader.as_ref().map(|p| p.name.as_str()), Some("C"));
    assert_eq!(t.cutoff.as_ref().map(|p| (p.name.as_str(), p.value)), Some(("B", 1.0)));
    assert_eq!(t.average, Some(3.0));
    assert!(t.describe().starts_with("C leads the top 3 in Goals with 5.0"));
}
