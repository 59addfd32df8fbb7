//! TUI rendering.
//!
//! Live view:
//!
//! ┌──────────────────────────────────────────────┐
//! │  〰 RMS Trend   RUNNING  10x  ▲ inclining      │
//! ├──────────────────────────────────────────────┤
//! │  RMS Trend (mm/s)                  ─ Good    │
//! │  ~~~~~~~~~~~~~~~~~~~~~~~~~         ─ Satisf. │
//! │                       time (minutes)         │
//! ├──────────────────────────────────────────────┤
//! │  Time: 10:42:07 | RMS: 1.0153                │
//! ├──────────────────────────────────────────────┤
//! │  [Incline] [Decline] [Stabilize]  Elapsed …  │
//! ├──────────────────────────────────────────────┤
//! │  s start  i/d/z trend  p pause  e edit time  │
//! └──────────────────────────────────────────────┘
//!
//! History view swaps the chart for the full-session plot with zone
//! transition markers and a transition table.

use super::app::{App, InputMode, LIVE_SPAN_MINUTES, MAX_CHART_POINTS, View, decimate, trend_arrow};
use ratatui::{prelude::*, widgets::*};
use rmstrend_core::{Trend, Zone, ZoneThresholds};

/// Y range of the live chart, mm/s.
const LIVE_Y_MAX: f64 = 5.0;
/// Y range of the history chart, mm/s.
const HISTORY_Y_MAX: f64 = 8.0;

pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3), // title
        Constraint::Min(10),   // main
        Constraint::Length(3), // status
    ];
    if app.show_controls() {
        constraints.push(Constraint::Length(3)); // controls
    }
    constraints.push(Constraint::Length(1)); // keys

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_title(f, rows[0], app);
    match app.view() {
        View::Live => draw_live_chart(f, rows[1], app),
        View::History => draw_history(f, rows[1], app),
    }
    draw_status(f, rows[2], app);
    if app.show_controls() {
        draw_controls(f, rows[3], app);
    }
    draw_keys(f, rows[rows.len() - 1], app);
}

fn zone_color(zone: Zone) -> Color {
    match zone {
        Zone::Good => Color::Green,
        Zone::Satisfactory => Color::Yellow,
        Zone::Unsatisfactory => Color::Rgb(255, 165, 0),
        Zone::Unacceptable => Color::Red,
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let sim = app.sim();
    let (state, state_style) = if sim.is_running() {
        ("RUNNING", Style::default().bold().fg(Color::Green))
    } else if sim.has_started() {
        ("PAUSED", Style::default().bold().fg(Color::Yellow))
    } else {
        ("READY", Style::default().fg(Color::DarkGray))
    };
    let view = match app.view() {
        View::Live => "RMS Trend Line",
        View::History => "Complete RMS History",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" 〰 Simulated RMS Monitor ", Style::default().bold().fg(Color::Cyan)),
            Span::raw(format!(" {view}  ")),
            Span::styled(state, state_style),
            Span::styled(
                format!(
                    "  {}x  {} {}  #{} ",
                    sim.speed(),
                    trend_arrow(sim.trend()),
                    sim.trend(),
                    sim.history().len()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

/// Horizontal reference lines at each zone boundary across `[x0, x1]`.
fn threshold_lines(zones: &ZoneThresholds, x0: f64, x1: f64, y_max: f64) -> Vec<(Zone, f64, [(f64, f64); 2])> {
    zones
        .boundaries()
        .into_iter()
        .filter(|(y, _)| *y <= y_max)
        .map(|(y, zone)| (zone, y, [(x0, y), (x1, y)]))
        .collect()
}

fn draw_live_chart(f: &mut Frame, area: Rect, app: &App) {
    let sim = app.sim();
    let now_min = sim.elapsed(app.now()).as_secs_f64() / 60.0;
    let x1 = now_min.max(LIVE_SPAN_MINUTES);
    let x0 = (now_min - LIVE_SPAN_MINUTES).max(0.0);

    let data = decimate(&sim.recent().points_since(x0), MAX_CHART_POINTS);
    let lines = threshold_lines(app.zones(), x0, x1, LIVE_Y_MAX);

    let mut datasets: Vec<Dataset> = lines
        .iter()
        .map(|(zone, y, pts)| {
            Dataset::default()
                .name(format!("{zone} <{y:.2}"))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(zone_color(*zone)))
                .data(pts)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name(format!("{:.4}", sim.current_value()))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightGreen))
            .data(&data),
    );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" RMS Trend (mm/s) "),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .title("Time (minutes)")
                .bounds([x0, x1])
                .labels(vec![
                    Line::from(format!("{x0:.2}")),
                    Line::from(format!("{x1:.2}")),
                ]),
        )
        .y_axis(Axis::default().bounds([0.0, LIVE_Y_MAX]).labels(vec![
            Line::from("0.0"),
            Line::from("2.5"),
            Line::from("5.0"),
        ]));

    f.render_widget(chart, area);
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    draw_history_chart(f, cols[0], app);
    draw_transition_table(f, cols[1], app);
}

fn draw_history_chart(f: &mut Frame, area: Rect, app: &App) {
    let snap = app.history();
    if snap.points.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Complete RMS History ");
        let p = Paragraph::new("No samples yet. Press s to start, h to return.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let x1 = snap.last_minute.max(f64::EPSILON);
    let lines = threshold_lines(app.zones(), 0.0, x1, HISTORY_Y_MAX);
    let (normal, alarm) = snap.marker_points();

    let mut datasets: Vec<Dataset> = lines
        .iter()
        .map(|(zone, y, pts)| {
            Dataset::default()
                .name(format!("{zone} ({y:.2})"))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(zone_color(*zone)))
                .data(pts)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&snap.points),
    );
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&normal),
    );
    datasets.push(
        Dataset::default()
            .name("alarm")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&alarm),
    );

    let peak = snap.peak.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"));
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Complete RMS History  {} samples  peak {peak} mm/s ",
            snap.sample_count
        )))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title("Time (minutes)")
                .bounds([0.0, x1])
                .labels(vec![Line::from("0"), Line::from(format!("{x1:.2}"))]),
        )
        .y_axis(Axis::default().bounds([0.0, HISTORY_Y_MAX]).labels(vec![
            Line::from("0"),
            Line::from("4"),
            Line::from("8"),
        ]));

    f.render_widget(chart, area);
}

fn draw_transition_table(f: &mut Frame, area: Rect, app: &App) {
    let snap = app.history();
    let rows: Vec<Row> = snap
        .transitions
        .iter()
        .map(|t| {
            let style = if t.zone.is_alarm() {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default().fg(zone_color(t.zone))
            };
            Row::new(vec![
                t.wall_clock_label.clone(),
                format!("{:.2}", t.value),
                t.zone.label().to_string(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),  // time
            Constraint::Length(6),  // value
            Constraint::Length(15), // zone
        ],
    )
    .header(
        Row::new(vec!["Time", "mm/s", "Zone"]).style(Style::default().bold().fg(Color::Cyan)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Zone changes ({}) ", snap.transitions.len())),
    );

    f.render_widget(table, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let sim = app.sim();
    let now = app.now();
    let clock = sim
        .simulated_clock(now)
        .unwrap_or_else(|| "00:00:00".to_string());
    let zone = app.zones().classify(sim.current_value());

    let mut spans = vec![
        Span::styled(
            format!("Time: {clock} | RMS: {:.4}", sim.current_value()),
            Style::default().bold(),
        ),
        Span::raw("  "),
        Span::styled(zone.label(), Style::default().fg(zone_color(zone))),
    ];
    if let Some(status) = app.status() {
        spans.push(Span::raw("   "));
        let color = if status.starts_with("Failed") {
            Color::Red
        } else {
            Color::DarkGray
        };
        spans.push(Span::styled(status.to_string(), Style::default().fg(color)));
    }

    let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &App) {
    let sim = app.sim();
    let button = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!("[{label}]"),
                Style::default().bg(Color::LightBlue).fg(Color::Black).bold(),
            )
        } else {
            Span::raw(format!("[{label}]"))
        }
    };

    let line = Line::from(vec![
        button("Incline", sim.trend() == Trend::Inclining),
        Span::raw(" "),
        button("Decline", sim.trend() == Trend::Declining),
        Span::raw(" "),
        button("Stabilize", sim.trend() == Trend::Stable),
        Span::raw("   "),
        Span::styled(
            format!(
                "Current RMS: {:.4} {}",
                sim.current_value(),
                trend_arrow(sim.trend())
            ),
            Style::default().bold(),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Elapsed: {}", sim.elapsed_string(app.now())),
            Style::default().bold(),
        ),
        Span::raw(format!("   Speed: {}x", sim.speed())),
    ]);

    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(p, area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.input_mode() {
        InputMode::Normal => match app.view() {
            View::Live => " s start  i/d/z incline/decline/stabilize  p pause  e edit time  t reset time  v edit RMS  +/- speed  h history  x export  c controls  q quit".to_string(),
            View::History => " r refresh  x export  h/Esc back  q quit".to_string(),
        },
        mode => format!(" {}{}_   Enter: apply   Esc: cancel", mode.prompt(), app.input()),
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
