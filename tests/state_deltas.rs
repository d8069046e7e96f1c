use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use big5_dashboard::loader::Dataset;
use big5_dashboard::player::{League, Position, StatField};
use big5_dashboard::rankings::RankRange;
use big5_dashboard::selection::Slot;
use big5_dashboard::state::{AppState, Delta, LoadStatus, Screen, TOP_N_MAX, apply_delta};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn loaded_state() -> AppState {
    let dataset = Dataset::from_csv("fixture", &read_fixture("big5_sample.csv"))
        .expect("fixture should load");
    let mut state = AppState::new(15);
    apply_delta(&mut state, Delta::DatasetLoaded(Arc::new(dataset)));
    state
}

#[test]
fn dataset_loaded_sets_defaults() {
    let state = loaded_state();
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.players().len(), 9);
    let (first, second) = state.compared();
    assert_eq!(first.map(|p| p.name.as_str()), Some("Erling Haaland"));
    assert_eq!(second.map(|p| p.name.as_str()), Some("William Saliba"));
    assert!(state.logs.back().is_some_and(|l| l.contains("9 players")));
}

#[test]
fn load_failure_is_terminal_state() {
    let mut state = AppState::new(15);
    assert_eq!(state.status, LoadStatus::Loading);
    assert!(state.players().is_empty());
    apply_delta(&mut state, Delta::LoadFailed("boom".to_string()));
    assert_eq!(state.status, LoadStatus::Failed("boom".to_string()));
    assert!(state.top_performers().is_empty());
}

#[test]
fn filters_cycle_back_to_all() {
    let mut state = loaded_state();
    state.cycle_position_filter();
    assert_eq!(state.filters.position, Some(Position::Forward));
    assert_eq!(state.filtered().len(), 3);
    for _ in 0..4 {
        state.cycle_position_filter();
    }
    assert_eq!(state.filters.position, None);

    for league in League::ALL {
        state.cycle_league_filter();
        assert_eq!(state.filters.league, Some(league));
    }
    state.cycle_league_filter();
    assert_eq!(state.filters.league, None);

    state.cycle_team_filter();
    assert_eq!(state.filters.team.as_deref(), Some("Arsenal"));
    assert_eq!(state.filtered().len(), 1);
    state.clear_filters();
    assert!(state.filters.is_empty());
}

#[test]
fn top_performers_follow_metric_and_count() {
    let mut state = loaded_state();
    state.top_n = 5;
    assert_eq!(state.metric, StatField::Goals);
    assert_eq!(state.top_performers()[0].name, "Erling Haaland");

    state.cycle_metric();
    assert_eq!(state.metric, StatField::Assists);
    assert_eq!(state.top_performers()[0].name, "Jamal Musiala");

    state.adjust_top_n(1000);
    assert_eq!(state.top_n, TOP_N_MAX);
    assert_eq!(state.top_performers().len(), 9);
}

#[test]
fn range_keys_only_touch_current_chart() {
    let mut state = loaded_state();
    state.screen = Screen::Scorers;
    state.resize_range(-100);
    assert_eq!(state.scorer_range, RankRange::new(1, 3));
    assert_eq!(state.defender_range, RankRange::default());
    assert_eq!(state.scorer_window().len(), 3);

    state.screen = Screen::Overview;
    state.shift_range(5);
    assert_eq!(state.scorer_range, RankRange::new(1, 3));
}

#[test]
fn compare_steps_active_slot() {
    let mut state = loaded_state();
    state.step_compare(1);
    let (first, _) = state.compared();
    assert_eq!(first.map(|p| p.name.as_str()), Some("William Saliba"));

    state.step_compare(-2);
    let (first, _) = state.compared();
    assert_eq!(first.map(|p| p.name.as_str()), Some("Smith, John"));

    state.toggle_compare_slot();
    assert_eq!(state.compare_slot, Slot::Second);
    state.step_compare(1);
    let (_, second) = state.compared();
    assert_eq!(second.map(|p| p.name.as_str()), Some("Kylian Mbappé"));
}
