use std::fs::OpenOptions;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset as Series, GraphType,
    Paragraph, Wrap,
};

use big5_dashboard::config::{self, Settings};
use big5_dashboard::derived::{
    DefensiveArchetype, PerformanceClass, RANKED_SCATTER_THRESHOLD, TOP_N_SCATTER_THRESHOLD,
    defensive_archetype, per90_field, player_performance,
};
use big5_dashboard::feed;
use big5_dashboard::player::{Player, StatField};
use big5_dashboard::profiles::{
    RadarKind, defensive_profile, pass_completion, progressive_flow, radar_extremes,
    radar_profile, touch_profile, xg_comparison,
};
use big5_dashboard::rankings::{RankRange, total_defensive_actions};
use big5_dashboard::selection::Slot;
use big5_dashboard::state::{AppState, Delta, LoadStatus, Screen, apply_delta};
use big5_dashboard::summary::{
    dataset_overview, defender_window_takeaway, findings, league_summaries, scorer_window_takeaway,
    top_n_takeaway,
};

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new(settings: &Settings) -> Self {
        Self {
            state: AppState::new(settings.top_n),
            should_quit: false,
            tick_rate: Duration::from_millis(settings.tick_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let step = RankRange::STEP as isize;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.state.screen = Screen::ALL[idx];
            }
            KeyCode::Tab => self.state.screen = self.state.screen.next(),
            KeyCode::Char('m') => self.state.cycle_metric(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.state.adjust_top_n(5),
            KeyCode::Char('-') => self.state.adjust_top_n(-5),
            KeyCode::Char('p') => self.state.cycle_position_filter(),
            KeyCode::Char('l') => self.state.cycle_league_filter(),
            KeyCode::Char('t') => self.state.cycle_team_filter(),
            KeyCode::Char('c') => self.state.clear_filters(),
            KeyCode::Left => self.state.shift_range(-step),
            KeyCode::Right => self.state.shift_range(step),
            KeyCode::Char('[') => self.state.resize_range(-step),
            KeyCode::Char(']') => self.state.resize_range(step),
            KeyCode::Char('j') | KeyCode::Down => self.state.step_compare(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.step_compare(-1),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.state.toggle_compare_slot(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    config::load_dotenv();
    let settings = Settings::from_env();
    init_logging(&settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    feed::spawn_loader(tx, settings.source());

    let mut app = App::new(&settings);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// The TUI owns stderr, so logs only go somewhere when a log file is configured.
fn init_logging(settings: &Settings) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("off");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &settings.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        if std::env::var_os("RUST_LOG").is_none() {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    builder.try_init().context("failed to initialise logger")?;
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_lines(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.status {
        LoadStatus::Loading => {
            let loading = Paragraph::new("Loading player data...")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, chunks[1]);
        }
        LoadStatus::Failed(message) => {
            let failed = Paragraph::new(format!(
                "Failed to load data: {message}\n\nCheck BIG5_ASSET_PREFIX / BIG5_DATA_PATH and restart."
            ))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false });
            frame.render_widget(failed, chunks[1]);
        }
        LoadStatus::Ready => match app.state.screen {
            Screen::Overview => render_overview(frame, chunks[1], &app.state),
            Screen::TopPerformers => render_top_performers(frame, chunks[1], &app.state),
            Screen::Scorers => render_scorers(frame, chunks[1], &app.state),
            Screen::Defenders => render_defenders(frame, chunks[1], &app.state),
            Screen::Compare => render_compare(frame, chunks[1], &app.state),
            Screen::Findings => render_findings(frame, chunks[1], &app.state),
        },
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_lines(state: &AppState) -> Vec<Line<'static>> {
    let status = match &state.status {
        LoadStatus::Loading => "loading".to_string(),
        LoadStatus::Ready => format!("{} players", state.players().len()),
        LoadStatus::Failed(_) => "load failed".to_string(),
    };
    let title = Line::from(vec![
        Span::styled("BIG5 2022-23", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | {} | {status}", state.screen.label())),
    ]);

    let mut tabs = Vec::new();
    for (i, screen) in Screen::ALL.iter().enumerate() {
        let style = if *screen == state.screen {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        tabs.push(Span::styled(format!(" {} {} ", i + 1, screen.label()), style));
        tabs.push(Span::raw(" "));
    }

    vec![title, Line::from(tabs)]
}

fn footer_text(state: &AppState) -> String {
    let filters = state.filters.describe();
    let keys = match state.screen {
        Screen::Overview | Screen::Findings => "1-6/Tab Screens | ? Help | q Quit",
        Screen::TopPerformers => "m Metric | +/- Top N | p/l/t Filters | c Clear | ? Help | q Quit",
        Screen::Scorers | Screen::Defenders => {
            "←/→ Shift ranks | [/] Resize | p/l/t Filters | c Clear | ? Help | q Quit"
        }
        Screen::Compare => "j/k Player | s Slot | p/l/t Filters | c Clear | ? Help | q Quit",
    };
    format!("{filters}\n{keys}")
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn class_color(class: PerformanceClass) -> Color {
    match class {
        PerformanceClass::Overperformer => Color::Green,
        PerformanceClass::Underperformer => Color::Red,
        PerformanceClass::Average => Color::Gray,
    }
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(cols[1]);

    let players = state.players();
    let overview = dataset_overview(players);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} players", overview.total_players),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Avg goals {}  assists {}  xG {}",
            fmt_opt(overview.avg_goals, 2),
            fmt_opt(overview.avg_assists, 2),
            fmt_opt(overview.avg_xg, 2)
        )),
        Line::from(""),
        Line::from(Span::styled("By league", Style::default().fg(Color::Green))),
    ];
    for count in &overview.by_league {
        lines.push(Line::from(format!("  {:<12} {:>5}", count.label, count.count)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("By position", Style::default().fg(Color::Green))));
    for count in &overview.by_position {
        lines.push(Line::from(format!("  {:<12} {:>5}", count.label, count.count)));
    }
    if let Some(dataset) = state.dataset.as_deref() {
        let report = &dataset.report;
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "{} rows read, {} dropped (league {}, minutes {}, duplicate {})",
            report.rows_seen,
            report.rejected(),
            report.unknown_league,
            report.insufficient_minutes,
            report.duplicate
        )));
    }
    let left = Paragraph::new(lines)
        .block(Block::default().title("Dataset").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(left, cols[0]);

    let mut league_lines = vec![Line::from(Span::styled(
        format!("{:<16} {:>5} {:>7} {:>7} {:>8}", "League", "N", "Goals", "xG", "Tackles"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for summary in league_summaries(players) {
        league_lines.push(Line::from(format!(
            "{:<16} {:>5} {:>7} {:>7} {:>8}",
            summary.league.label(),
            summary.count,
            fmt_opt(summary.avg_goals, 2),
            fmt_opt(summary.avg_xg, 2),
            fmt_opt(summary.avg_tackles, 1)
        )));
    }
    let leagues = Paragraph::new(league_lines)
        .block(Block::default().title("League averages").borders(Borders::ALL));
    frame.render_widget(leagues, right[0]);

    let console = Paragraph::new(console_text(state, right[1].height.saturating_sub(2)))
        .block(Block::default().title("Console").borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(console, right[1]);
}

fn console_text(state: &AppState, rows: u16) -> String {
    let skip = state.logs.len().saturating_sub(rows as usize);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Carve a takeaway strip off the bottom of `area` and render `text` into it.
fn with_takeaway(frame: &mut Frame, area: Rect, text: String) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(area);
    let takeaway = Paragraph::new(text)
        .block(Block::default().title("Takeaway").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(takeaway, rows[1]);
    rows[0]
}

fn render_top_performers(frame: &mut Frame, area: Rect, state: &AppState) {
    let top = state.top_performers();
    if top.is_empty() {
        let empty = Paragraph::new("No players match the current filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    // Bars are coloured by finishing against xG.
    let bars: Vec<Bar> = top
        .iter()
        .map(|p| {
            let value = p.stat(state.metric);
            let color = class_color(player_performance(p, TOP_N_SCATTER_THRESHOLD));
            Bar::default()
                .value((value * 100.0).round().max(0.0) as u64)
                .text_value(fmt_stat(value))
                .label(Line::from(format!("{} ({})", p.name, p.league.short_label())))
                .style(Style::default().fg(color))
        })
        .collect();

    let title = format!(
        "Top {} by {} ({} players)",
        state.top_n,
        state.metric.label(),
        state.filtered().len()
    );
    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    let area = with_takeaway(frame, area, top_n_takeaway(&top, state.metric).describe());
    frame.render_widget(chart, area);
}

fn series<'a>(name: &'static str, color: Color, points: &'a [(f64, f64)]) -> Series<'a> {
    Series::default()
        .name(name)
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(color))
        .data(points)
}

fn axis(title: &'static str, max: f64) -> Axis<'static> {
    Axis::default()
        .title(title)
        .style(Style::default().fg(Color::DarkGray))
        .bounds([0.0, max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", max / 2.0)),
            Span::raw(format!("{max:.0}")),
        ])
}

/// Upper axis bound with some headroom.
fn axis_max<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(0.0, f64::max).max(1.0) * 1.1
}

fn rank_list_text(
    window: &[&Player],
    first_rank: usize,
    value: impl Fn(&Player) -> String,
) -> String {
    window
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:>3}. {:<22} {}", first_rank + i, p.name, value(*p)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_scorers(frame: &mut Frame, area: Rect, state: &AppState) {
    let window = state.scorer_window();
    let takeaway = scorer_window_takeaway(&window, RANKED_SCATTER_THRESHOLD);
    let area = with_takeaway(frame, area, takeaway.describe());
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let pool_len = state.scorer_pool().len();
    let mut over = Vec::new();
    let mut average = Vec::new();
    let mut under = Vec::new();
    for p in &window {
        let point = (p.stats.xg, p.stats.goals);
        match player_performance(p, RANKED_SCATTER_THRESHOLD) {
            PerformanceClass::Overperformer => over.push(point),
            PerformanceClass::Average => average.push(point),
            PerformanceClass::Underperformer => under.push(point),
        }
    }
    let max_x = axis_max(window.iter().map(|p| p.stats.xg));
    let max_y = axis_max(window.iter().map(|p| p.stats.goals));

    let title = format!(
        "Goals vs xG | ranks {} of {pool_len} forwards",
        state.scorer_range.label()
    );
    let chart = Chart::new(vec![
        series("Overperformer", Color::Green, &over),
        series("Average", Color::Gray, &average),
        series("Underperformer", Color::Red, &under),
    ])
    .block(Block::default().title(title).borders(Borders::ALL))
    .x_axis(axis("xG", max_x))
    .y_axis(axis("Goals", max_y));
    frame.render_widget(chart, cols[0]);

    let list = rank_list_text(&window, state.scorer_range.start, |p| {
        format!("{:>3.0} G {:>5.1} xG", p.stats.goals, p.stats.xg)
    });
    let list = Paragraph::new(list).block(Block::default().title("Ranked").borders(Borders::ALL));
    frame.render_widget(list, cols[1]);
}

fn render_defenders(frame: &mut Frame, area: Rect, state: &AppState) {
    let window = state.defender_window();
    let area = with_takeaway(frame, area, defender_window_takeaway(&window).describe());
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let pool_len = state.defender_pool().len();
    let mut tacklers = Vec::new();
    let mut readers = Vec::new();
    let mut balanced = Vec::new();
    for p in &window {
        let point = (p.stats.tackles, p.stats.interceptions);
        match defensive_archetype(&p.stats) {
            Some(DefensiveArchetype::Tackler) => tacklers.push(point),
            Some(DefensiveArchetype::Reader) => readers.push(point),
            None => balanced.push(point),
        }
    }
    let max_x = axis_max(window.iter().map(|p| p.stats.tackles));
    let max_y = axis_max(window.iter().map(|p| p.stats.interceptions));

    let title = format!(
        "Tackles vs Interceptions | ranks {} of {pool_len} defenders",
        state.defender_range.label()
    );
    let chart = Chart::new(vec![
        series("Tackler", Color::Yellow, &tacklers),
        series("Reader", Color::Cyan, &readers),
        series("Balanced", Color::Gray, &balanced),
    ])
    .block(Block::default().title(title).borders(Borders::ALL))
    .x_axis(axis("Tackles", max_x))
    .y_axis(axis("Interceptions", max_y));
    frame.render_widget(chart, cols[0]);

    let list = rank_list_text(&window, state.defender_range.start, |p| {
        format!("{:>4.0} actions", total_defensive_actions(p))
    });
    let list = Paragraph::new(list).block(Block::default().title("Ranked").borders(Borders::ALL));
    frame.render_widget(list, cols[1]);
}

fn meter(value: f64, width: usize) -> String {
    let filled = ((value / 150.0).clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
}

fn player_lines(player: &Player) -> Vec<Line<'static>> {
    let s = &player.stats;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", player.name, player.initials()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} | {} | {} | age {} | {}",
            player.team,
            player.league.label(),
            player.position.label(),
            player.age,
            player.nation
        )),
        Line::from(format!(
            "{:.0} MP  {:.0} starts  {:.0} min  {:.1} 90s",
            s.matches, s.starts, s.minutes, s.nineties
        )),
        Line::from(format!(
            "G {:.0}  A {:.0}  xG {:.1}  xAG {:.1}  G/90 {:.2}  A/90 {:.2}",
            s.goals,
            s.assists,
            s.xg,
            s.xag,
            per90_field(player, StatField::Goals),
            per90_field(player, StatField::Assists)
        )),
        Line::from(""),
    ];

    let kind = RadarKind::for_player(player);
    let axes = radar_profile(player, kind);
    lines.push(heading(kind.title()));
    for axis in &axes {
        lines.push(Line::from(format!(
            "  {:<14} {} {}",
            axis.label,
            meter(axis.value, 16),
            axis.raw
        )));
    }
    if let Some((strongest, weakest)) = radar_extremes(&axes) {
        lines.push(Line::from(format!(
            "  strongest {} | weakest {}",
            strongest.label, weakest.label
        )));
    }
    lines.push(Line::from(""));

    match kind {
        RadarKind::Attacker => {
            let xg = xg_comparison(player);
            lines.push(heading("Goals vs xG"));
            lines.push(Line::from(format!(
                "  {:.0} goals from {:.1} xG ({:+.1}, {:+.0}%) {}",
                xg.goals,
                xg.xg,
                xg.diff,
                xg.percent_of_xg,
                xg.label.label()
            )));
            lines.push(Line::from(""));

            let flow = progressive_flow(player);
            lines.push(heading("Progressive actions"));
            lines.push(Line::from(format!(
                "  carries {:.0} ({:.0}%)  passes {:.0} ({:.0}%)",
                flow.carries, flow.carry_pct, flow.passes, flow.pass_pct
            )));
            lines.push(Line::from(format!(
                "  {:.0} total, progresses mainly by {}",
                flow.total, flow.dominant_method
            )));
        }
        RadarKind::Defender => {
            let touches = touch_profile(player);
            lines.push(heading("Touches by zone"));
            for zone in &touches.zones {
                lines.push(Line::from(format!(
                    "  {:<10} {:>5.0} ({:>4.1}%)",
                    zone.label, zone.value, zone.pct
                )));
            }
            lines.push(Line::from(format!(
                "  most active in {} | {:.1}% attacking",
                touches.dominant, touches.attacking_pct
            )));
            lines.push(Line::from(""));

            let defensive = defensive_profile(player);
            lines.push(heading("Defensive actions"));
            for action in &defensive.actions {
                lines.push(Line::from(format!(
                    "  {:<14} {:>4.0} ({:>4.1}%)",
                    action.label, action.value, action.pct
                )));
            }
            lines.push(Line::from(format!(
                "  {:.0} total, {}",
                defensive.total,
                defensive.style_note()
            )));
            lines.push(Line::from(""));

            let passes = pass_completion(player);
            lines.push(heading("Pass completion"));
            for range in &passes.ranges {
                lines.push(Line::from(format!(
                    "  {:<16} {:>5.0}/{:<5.0} {:>5.1}%",
                    range.label, range.completed, range.attempted, range.completion_pct
                )));
            }
            lines.push(Line::from(format!(
                "  overall {:.1}%, most attempts {}",
                passes.overall_pct, passes.most_attempted
            )));
        }
    }
    lines
}

fn render_compare(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (first, second) = state.compared();
    for (col, slot, player) in [(cols[0], Slot::First, first), (cols[1], Slot::Second, second)] {
        let active = state.compare_slot == slot;
        let title = match slot {
            Slot::First => "Player 1",
            Slot::Second => "Player 2",
        };
        let border = if active {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let lines = player
            .map(player_lines)
            .unwrap_or_else(|| vec![Line::from("No player selected")]);
        let column = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(column, col);
    }
}

fn render_findings(frame: &mut Frame, area: Rect, state: &AppState) {
    let f = findings(state.players());
    let mut lines = vec![heading("1. Clinical finishing vs expected goals")];
    lines.push(Line::from(format!(
        "  {} players with goal involvement: {} outperformed xG, {} underperformed, average diff {}",
        f.xg.involved,
        f.xg.overperformers,
        f.xg.underperformers,
        f.xg.avg_diff
            .map(|d| format!("{d:+.2}"))
            .unwrap_or_else(|| "-".to_string())
    )));
    if let Some(top) = &f.xg.top_overperformer {
        lines.push(Line::from(format!(
            "  most clinical: {} ({}) {:+.1}",
            top.name, top.team, top.value
        )));
    }
    if let Some(bottom) = &f.xg.top_underperformer {
        lines.push(Line::from(format!(
            "  most wasteful: {} ({}) {:+.1}",
            bottom.name, bottom.team, bottom.value
        )));
    }
    lines.push(Line::from(""));

    lines.push(heading("2. League scoring and defensive patterns"));
    if let Some(league) = f.highest_scoring_league {
        lines.push(Line::from(format!("  highest scoring: {}", league.label())));
    }
    if let Some(league) = f.most_defensive_league {
        lines.push(Line::from(format!("  most tackles per player: {}", league.label())));
    }
    let per_league = f
        .leagues
        .iter()
        .map(|l| format!("{} {}", l.league.short_label(), fmt_opt(l.avg_goals, 2)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(Line::from(format!("  avg goals: {per_league}")));
    lines.push(Line::from(""));

    lines.push(heading("3. Progressive play styles"));
    let prog = &f.progressive;
    lines.push(Line::from(format!(
        "  {} players: {} carriers ({:.0}%), {} passers ({:.0}%), {} balanced",
        prog.total, prog.carriers, prog.carrier_pct, prog.passers, prog.passer_pct, prog.balanced
    )));
    lines.push(Line::from(format!(
        "  avg carries {} | avg passes {}",
        fmt_opt(prog.avg_carries, 1),
        fmt_opt(prog.avg_passes, 1)
    )));
    if let (Some(carrier), Some(passer)) = (&f.top_carrier, &f.top_passer) {
        lines.push(Line::from(format!(
            "  top carrier {} ({:.0}) | top passer {} ({:.0})",
            carrier.name, carrier.value, passer.name, passer.value
        )));
    }
    lines.push(Line::from(""));

    lines.push(heading("4. Defensive archetypes"));
    let arch = &f.archetypes;
    lines.push(Line::from(format!(
        "  {} defenders: {} tacklers ({:.0}%), {} readers ({:.0}%)",
        arch.total, arch.tacklers, arch.tackler_pct, arch.readers, arch.reader_pct
    )));
    lines.push(Line::from(format!(
        "  avg tackles {} | avg interceptions {}",
        fmt_opt(arch.avg_tackles, 1),
        fmt_opt(arch.avg_interceptions, 1)
    )));
    if let (Some(tackler), Some(interceptor)) = (&f.top_tackler, &f.top_interceptor) {
        lines.push(Line::from(format!(
            "  top tackler {} ({:.0}) | top interceptor {} ({:.0})",
            tackler.name, tackler.value, interceptor.name, interceptor.value
        )));
    }

    let text = Paragraph::new(lines)
        .block(Block::default().title("Key findings").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(text, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Big 5 Dashboard - Help",
        "",
        "Global:",
        "  1-6 / Tab    Switch screen",
        "  p            Cycle position filter",
        "  l            Cycle league filter",
        "  t            Cycle team filter",
        "  c            Clear filters",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Top Performers:",
        "  m            Cycle metric",
        "  + / -        More / fewer players",
        "",
        "Scorers / Defenders:",
        "  ← / →        Shift rank window",
        "  [ / ]        Shrink / grow rank window",
        "",
        "Compare:",
        "  j/k or ↑/↓   Change player",
        "  s / Space    Switch slot",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
