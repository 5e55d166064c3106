use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use frame_profiler_core::views::table::format_fraction;
use frame_profiler_core::views::{
    build_report_tree, flat_report, nested_report, render_frame_summary,
};
use frame_profiler_core::{local, profile_scope};
use frame_profiler_protocol::{
    FrameTiming, PrintableReportLine, ProfilerCommand, ScaledTime, SortMode, SplitNumber,
    ThemeToken,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::demo;

const INPUT_POLL: Duration = Duration::from_millis(8);

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::TableHeaderBackground => Color::DarkGray,
        ThemeToken::NameFront => Color::Rgb(119, 199, 99),
        ThemeToken::NameBack => Color::White,
        ThemeToken::IntPart => Color::White,
        ThemeToken::FloatPart => Color::Rgb(160, 130, 189),
        ThemeToken::Unit => Color::Rgb(119, 199, 99),
        ThemeToken::GraphBackground => Color::Rgb(20, 30, 60),
        ThemeToken::FrameGood => Color::Rgb(139, 195, 74),
        ThemeToken::FrameWarning => Color::Rgb(255, 235, 59),
        ThemeToken::FrameDropped => Color::Rgb(244, 67, 54),
        ThemeToken::SelectedFrame => Color::Rgb(33, 150, 243),
    }
}

fn fg(token: ThemeToken) -> Style {
    Style::default().fg(theme_to_color(token))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportView {
    Nested,
    Flat,
}

struct VisualizerState {
    view: ReportView,
    sort: SortMode,
    /// Frame number of the archived frame being inspected. `None` follows
    /// the newest.
    selected: Option<u64>,
}

/// Everything one draw needs, copied out of the profiler so drawing never
/// holds the thread-local borrow.
struct Snapshot {
    timings: Vec<FrameTiming>,
    shown: Option<FrameTiming>,
    lines: Vec<PrintableReportLine>,
    paused: bool,
    frame_number: u64,
}

impl Snapshot {
    fn capture(state: &VisualizerState) -> Self {
        local::with(|profiler| {
            let tree = state
                .selected
                .and_then(|n| profiler.all_previous_trees().find(|t| t.frame_number() == n))
                .or_else(|| profiler.previous_tree(0));
            let lines = tree
                .map(|tree| {
                    let report = build_report_tree(tree);
                    match state.view {
                        ReportView::Nested => nested_report(&report),
                        ReportView::Flat => flat_report(&report, state.sort),
                    }
                })
                .unwrap_or_default();
            Self {
                timings: profiler.frame_timings(),
                shown: tree.map(|t| FrameTiming {
                    frame_number: t.frame_number(),
                    seconds: t.elapsed_seconds(),
                }),
                lines,
                paused: profiler.is_paused(),
                frame_number: profiler.frame_number(),
            }
        })
    }
}

pub fn render_tui() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    let mut state = VisualizerState {
        view: ReportView::Nested,
        sort: SortMode::TotalTime,
        selected: None,
    };

    loop {
        local::begin_frame()?;
        demo::simulate_frame(local::frame_number());

        let snapshot = Snapshot::capture(&state);
        {
            profile_scope!("Visualizer::Draw");
            terminal.draw(|frame| draw(frame, &state, &snapshot))?;
        }

        let quit = {
            profile_scope!("Visualizer::Input");
            handle_input(&mut state, &snapshot.timings)?
        };
        local::end_frame();
        if quit {
            break;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Older,
    Newer,
}

/// Move the selection one archived frame older or newer. With nothing
/// selected, `Older` starts at the newest frame. Stops at either end.
fn step_selection(timings: &[FrameTiming], selected: Option<u64>, step: Step) -> Option<u64> {
    let newest = timings.len().checked_sub(1)?;
    let current = selected.and_then(|n| timings.iter().position(|t| t.frame_number == n));
    let idx = match (current, step) {
        (None, _) => newest,
        (Some(i), Step::Older) => i.saturating_sub(1),
        (Some(i), Step::Newer) => (i + 1).min(newest),
    };
    Some(timings[idx].frame_number)
}

/// Returns `true` when the user asked to quit.
fn handle_input(state: &mut VisualizerState, timings: &[FrameTiming]) -> Result<bool> {
    if !event::poll(INPUT_POLL)? {
        return Ok(false);
    }
    let Event::Key(key) = event::read()? else {
        return Ok(false);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('v') | KeyCode::Char('V') => {
            state.view = match state.view {
                ReportView::Nested => ReportView::Flat,
                ReportView::Flat => ReportView::Nested,
            };
        }
        KeyCode::Char('l') | KeyCode::Char('L') => state.sort = state.sort.toggled(),
        KeyCode::Char('p') | KeyCode::Char('P') => {
            let command = if local::is_paused() {
                ProfilerCommand::Unpause
            } else {
                ProfilerCommand::Pause
            };
            local::execute(command);
        }
        KeyCode::Left => {
            // Pauses at the next frame boundary, after one more frame is
            // archived; the selection is a frame number so it stays put.
            local::execute(ProfilerCommand::Pause);
            state.selected = step_selection(timings, state.selected, Step::Older);
        }
        KeyCode::Right => {
            if state.selected.is_some() {
                state.selected = step_selection(timings, state.selected, Step::Newer);
            }
        }
        KeyCode::Esc => {
            if state.selected.take().is_some() {
                local::execute(ProfilerCommand::Unpause);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn draw(frame: &mut Frame<'_>, state: &VisualizerState, snapshot: &Snapshot) {
    let [header, graph, table, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, snapshot);
    draw_graph(frame, graph, state, snapshot);
    draw_report(frame, table, state, snapshot);

    let help = " <V> nested/flat | <L> total/self | <P> pause | ←→ select frame | Esc release | q quit ";
    frame.render_widget(
        Paragraph::new(help).style(fg(ThemeToken::TextMuted)),
        footer,
    );
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let summary = snapshot
        .shown
        .as_ref()
        .map_or_else(|| "no archived frames yet".to_string(), render_frame_summary);
    let status = if snapshot.paused { "PAUSED" } else { "RECORDING" };
    let shown = snapshot
        .shown
        .map_or_else(String::new, |t| format!("  showing frame {}", t.frame_number));

    let text = vec![
        Line::from(Span::styled(
            "PROFILER",
            fg(ThemeToken::TextPrimary).add_modifier(Modifier::BOLD),
        )),
        Line::from(summary),
        Line::from(format!(
            "{status}  frame {}{shown}",
            snapshot.frame_number
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_graph(frame: &mut Frame<'_>, area: Rect, state: &VisualizerState, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(fg(ThemeToken::Border))
        .title(" Frame Time Graph ");

    let visible = usize::from(area.width.saturating_sub(2));
    let skip = snapshot.timings.len().saturating_sub(visible);
    let selected_index = state
        .selected
        .and_then(|n| snapshot.timings.iter().position(|t| t.frame_number == n));

    let bars: Vec<Bar<'_>> = snapshot
        .timings
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, timing)| {
            let token = if Some(i) == selected_index {
                ThemeToken::SelectedFrame
            } else {
                timing.cost().theme_token()
            };
            Bar::default()
                .value((timing.seconds * 1_000_000.0) as u64)
                .text_value(String::new())
                .style(fg(token))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(1)
        .bar_gap(0)
        .style(Style::default().bg(theme_to_color(ThemeToken::GraphBackground)))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn percent_cell(value: &SplitNumber) -> Cell<'static> {
    Cell::from(Line::from(vec![
        Span::styled(value.int_part.to_string(), fg(ThemeToken::IntPart)),
        Span::styled(format_fraction(value.frac_part), fg(ThemeToken::FloatPart)),
        Span::styled("%", fg(ThemeToken::IntPart)),
    ]))
}

fn time_cell(time: &ScaledTime) -> Cell<'static> {
    let mut spans = vec![Span::styled(
        time.int_part.to_string(),
        fg(ThemeToken::IntPart),
    )];
    if time.frac_part != 0.0 {
        spans.push(Span::styled(
            format_fraction(time.frac_part),
            fg(ThemeToken::FloatPart),
        ));
    }
    spans.push(Span::styled(time.unit.label(), fg(ThemeToken::Unit)));
    Cell::from(Line::from(spans))
}

fn report_row(line: &PrintableReportLine) -> Row<'static> {
    let name = Line::from(vec![
        Span::raw(" ".repeat(line.indent as usize)),
        Span::styled(line.name_front.clone(), fg(ThemeToken::NameFront)),
        Span::styled(line.name_back.clone(), fg(ThemeToken::NameBack)),
    ]);
    Row::new(vec![
        Cell::from(name),
        Cell::from(line.call_count.to_string()),
        percent_cell(&line.total_percent),
        time_cell(&line.total_time),
        percent_cell(&line.self_percent),
        time_cell(&line.self_time),
    ])
}

fn draw_report(frame: &mut Frame<'_>, area: Rect, state: &VisualizerState, snapshot: &Snapshot) {
    let title = match state.view {
        ReportView::Nested => " NESTED REPORT ".to_string(),
        ReportView::Flat => format!(" FLAT REPORT ({}^) ", state.sort.label()),
    };

    let header = Row::new(vec![
        "FUNCTION NAME",
        "CALLS",
        "TOTAL%",
        "TOTAL TIME",
        "SELF%",
        "SELF TIME",
    ])
    .style(
        fg(ThemeToken::NameFront)
            .bg(theme_to_color(ThemeToken::TableHeaderBackground))
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Min(30),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(snapshot.lines.iter().map(report_row), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(fg(ThemeToken::Border))
                .title(title),
        )
        .style(Style::default().bg(theme_to_color(ThemeToken::Background)));
    frame.render_widget(table, area);
}
