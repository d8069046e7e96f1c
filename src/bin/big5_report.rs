use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Serialize;

use big5_dashboard::config::{self, DataSource, Settings, resolve_source};
use big5_dashboard::derived::{
    PerformanceClass, RANKED_SCATTER_THRESHOLD, TOP_N_SCATTER_THRESHOLD, player_performance,
};
use big5_dashboard::loader::{Dataset, load_dataset};
use big5_dashboard::normalize::RejectionReport;
use big5_dashboard::player::{League, Position, StatField};
use big5_dashboard::rankings::{
    RankRange, RankRow, attacker_pool, defender_pool, rank_range, rank_rows, top_n,
};
use big5_dashboard::selection::Filters;
use big5_dashboard::summary::{
    DefenderTakeaway, Findings, Overview, ScorerTakeaway, TopNTakeaway, dataset_overview,
    defender_window_takeaway, findings, scorer_window_takeaway, top_n_takeaway,
};

#[derive(Debug)]
struct Args {
    data: Option<String>,
    json: bool,
    top: Option<usize>,
    metric: StatField,
    filters: Filters,
}

#[derive(Serialize)]
struct TopEntry {
    #[serde(flatten)]
    row: RankRow,
    class: PerformanceClass,
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    source: &'a str,
    ingest: &'a RejectionReport,
    overview: Overview,
    findings: Findings,
    metric: &'static str,
    filters: &'a Filters,
    top: Vec<TopEntry>,
    top_takeaway: TopNTakeaway,
    scorers: ScorerTakeaway,
    defenders: DefenderTakeaway,
}

fn main() -> Result<()> {
    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let settings = Settings::from_env();
    let source = match &args.data {
        Some(path) => resolve_source("", path),
        None => settings.source(),
    };
    let dataset = load_dataset(&source).with_context(|| format!("unable to load {source}"))?;
    let top = args.top.unwrap_or(settings.top_n);

    let report = build_report(&dataset, &args, top);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &source);
    }
    Ok(())
}

fn build_report<'a>(dataset: &'a Dataset, args: &'a Args, top: usize) -> Report<'a> {
    let players = &dataset.players;
    let filtered = args.filters.apply(players);
    let ranked = top_n(filtered.iter().copied(), args.metric, top);
    let top_takeaway = top_n_takeaway(&ranked, args.metric);
    let scorer_window = rank_range(&attacker_pool(filtered.iter().copied()), RankRange::default());
    let defender_window =
        rank_range(&defender_pool(filtered.iter().copied()), RankRange::default());
    let rows = rank_rows(&ranked, args.metric, 1);
    let top = rows
        .into_iter()
        .zip(ranked.iter())
        .map(|(row, p)| TopEntry {
            row,
            class: player_performance(p, TOP_N_SCATTER_THRESHOLD),
        })
        .collect();

    Report {
        generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        source: &dataset.source,
        ingest: &dataset.report,
        overview: dataset_overview(players),
        findings: findings(players),
        metric: args.metric.key(),
        filters: &args.filters,
        top,
        top_takeaway,
        scorers: scorer_window_takeaway(&scorer_window, RANKED_SCATTER_THRESHOLD),
        defenders: defender_window_takeaway(&defender_window),
    }
}

fn opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string())
}

fn print_report(report: &Report<'_>, source: &DataSource) {
    let ingest = report.ingest;
    println!("Big 5 player stats ({source}) generated {}", report.generated_at);
    println!(
        "Rows: {} read, {} players, {} dropped (league {}, minutes {}, duplicate {})",
        ingest.rows_seen,
        ingest.accepted,
        ingest.rejected(),
        ingest.unknown_league,
        ingest.insufficient_minutes,
        ingest.duplicate
    );

    let overview = &report.overview;
    println!();
    println!("Players by league:");
    for count in &overview.by_league {
        println!("  {:<12} {:>5}", count.label, count.count);
    }
    println!("Players by position:");
    for count in &overview.by_position {
        println!("  {:<12} {:>5}", count.label, count.count);
    }
    println!(
        "Averages: goals {} | assists {} | xG {}",
        opt(overview.avg_goals, 2),
        opt(overview.avg_assists, 2),
        opt(overview.avg_xg, 2)
    );

    let f = &report.findings;
    println!();
    println!("Findings:");
    println!(
        "  xG: {} involved, {} over, {} under, avg diff {}",
        f.xg.involved,
        f.xg.overperformers,
        f.xg.underperformers,
        opt(f.xg.avg_diff, 2)
    );
    if let Some(top) = &f.xg.top_overperformer {
        println!("  most clinical: {} ({}) {:+.1}", top.name, top.team, top.value);
    }
    if let Some(bottom) = &f.xg.top_underperformer {
        println!("  most wasteful: {} ({}) {:+.1}", bottom.name, bottom.team, bottom.value);
    }
    for league in &f.leagues {
        println!(
            "  {:<16} n={:<5} goals {:>5} xG {:>5} tackles {:>5}",
            league.league.label(),
            league.count,
            opt(league.avg_goals, 2),
            opt(league.avg_xg, 2),
            opt(league.avg_tackles, 1)
        );
    }
    if let Some(league) = f.highest_scoring_league {
        println!("  highest scoring league: {}", league.label());
    }
    if let Some(league) = f.most_defensive_league {
        println!("  most defensive league: {}", league.label());
    }
    println!(
        "  progressive: {} carriers ({:.0}%), {} passers ({:.0}%), {} balanced",
        f.progressive.carriers,
        f.progressive.carrier_pct,
        f.progressive.passers,
        f.progressive.passer_pct,
        f.progressive.balanced
    );
    println!(
        "  defenders: {} tacklers ({:.0}%), {} readers ({:.0}%) of {}",
        f.archetypes.tacklers,
        f.archetypes.tackler_pct,
        f.archetypes.readers,
        f.archetypes.reader_pct,
        f.archetypes.total
    );

    println!();
    println!("Top {} by {} [{}]", report.top.len(), report.metric, report.filters.describe());
    for entry in &report.top {
        let row = &entry.row;
        println!(
            "{:>3}. {:<26} {:<24} {:<15} {:>8.2}  {}",
            row.rank,
            row.name,
            row.team,
            row.league,
            row.value,
            entry.class.label()
        );
    }
    println!("  {}", report.top_takeaway.describe());

    let window = RankRange::default().label();
    println!();
    println!("Scorers ranked {window}: {}", report.scorers.describe());
    println!("Defenders ranked {window}: {}", report.defenders.describe());
}

fn parse_league(raw: &str) -> Option<League> {
    let raw = raw.trim();
    League::ALL.into_iter().find(|league| {
        league.label().eq_ignore_ascii_case(raw) || league.short_label().eq_ignore_ascii_case(raw)
    })
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args {
        data: None,
        json: false,
        top: None,
        metric: StatField::Goals,
        filters: Filters::default(),
    };

    for arg in args {
        if arg == "--json" {
            parsed.json = true;
        } else if let Some(path) = arg.strip_prefix("--data=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                parsed.data = Some(trimmed.to_string());
            }
        } else if let Some(raw) = arg.strip_prefix("--top=") {
            let n = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid --top value {raw:?}"))?;
            parsed.top = Some(n.max(1));
        } else if let Some(raw) = arg.strip_prefix("--metric=") {
            parsed.metric = StatField::from_key(raw)
                .with_context(|| format!("unknown metric {raw:?}"))?;
        } else if let Some(raw) = arg.strip_prefix("--league=") {
            parsed.filters.league =
                Some(parse_league(raw).with_context(|| format!("unknown league {raw:?}"))?);
        } else if let Some(raw) = arg.strip_prefix("--position=") {
            parsed.filters.position = Some(
                Position::from_label(raw).with_context(|| format!("unknown position {raw:?}"))?,
            );
        } else if let Some(raw) = arg.strip_prefix("--team=") {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                parsed.filters.team = Some(trimmed.to_string());
            }
        } else {
            bail!("unrecognised argument {arg:?}");
        }
    }
    Ok(parsed)
}
