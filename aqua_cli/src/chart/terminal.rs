//! Interactive chart in the terminal
//!
//! Takes over the screen until the user closes the chart, animating the
//! bars and showing a tooltip for the bar under the mouse cursor. The
//! terminal is restored on exit and on panic.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;
use std::time::{Duration, Instant};

use aqua_core::config::ChartConfig;
use aqua_core::{CategoryTotals, Error, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::{layout_bars, Animation, ChartState, FOOTER, LABEL_WIDTH, TITLE, X_LABEL, Y_LABEL};

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Poll timeout once the animation has finished
const IDLE_TICK: Duration = Duration::from_millis(250);

static PANIC_HOOK: Once = Once::new();

/// Show the chart and block until it is closed
pub fn show(totals: CategoryTotals, config: &ChartConfig) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = run(&mut terminal, totals, config);
    restore_terminal()?;
    result
}

/// Initialize the terminal for the chart
fn init_terminal() -> Result<Tui> {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

fn run(terminal: &mut Tui, totals: CategoryTotals, config: &ChartConfig) -> Result<()> {
    let interval = Duration::from_millis(config.frame_interval_ms.max(1));
    let mut state = ChartState::new(totals, Animation::from_config(config), interval);
    let mut last_frame = Instant::now();

    loop {
        terminal
            .draw(|frame| render(frame, &mut state))
            .map_err(|e| Error::Terminal(format!("failed to draw chart: {}", e)))?;

        let timeout = if state.animation.is_done() {
            IDLE_TICK
        } else {
            interval
                .checked_sub(last_frame.elapsed())
                .unwrap_or(Duration::ZERO)
        };

        if event::poll(timeout)? && handle_event(&mut state, event::read()?) {
            break;
        }

        if state.tick(last_frame.elapsed()) {
            last_frame = Instant::now();
        }
    }

    tracing::debug!("Chart closed after {} frames", state.animation.frame());
    Ok(())
}

/// Apply one terminal event; returns true when the chart should close
fn handle_event(state: &mut ChartState, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
        ),
        Event::Mouse(mouse) => {
            if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                state.on_motion(mouse.column, mouse.row);
            }
            false
        }
        // Resize is picked up by the next draw
        _ => false,
    }
}

fn render(frame: &mut Frame, state: &mut ChartState) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Footer text
            Constraint::Min(6),    // Chart
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        FOOTER,
        Style::default().fg(Color::Blue),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);

    let block = Block::default()
        .title(format!(" {} ", Y_LABEL))
        .borders(Borders::ALL);
    let inner = block.inner(chunks[2]);
    frame.render_widget(block, chunks[2]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Bars
            Constraint::Length(1), // Axis ticks
            Constraint::Length(1), // Axis label
        ])
        .split(inner);

    let ceiling = state.ceiling();
    state.bars = layout_bars(rows[0], &state.totals, state.animation.factor(), ceiling);

    for bar in &state.bars {
        if bar.band.height == 0 {
            continue;
        }
        let label_area = Rect::new(
            bar.band.x,
            bar.band.y + bar.band.height / 2,
            LABEL_WIDTH.min(bar.band.width),
            1,
        );
        frame.render_widget(Paragraph::new(bar.category.name()), label_area);

        if bar.bar.width > 0 {
            let (r, g, b) = bar.category.rgb();
            frame.render_widget(
                Block::default().style(Style::default().bg(Color::Rgb(r, g, b))),
                bar.bar,
            );
        }
    }

    frame.render_widget(
        Paragraph::new(axis_line(rows[1].width, ceiling))
            .style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(X_LABEL).alignment(Alignment::Center),
        rows[2],
    );

    let help = Paragraph::new(Line::from(vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Close  "),
        Span::raw("Hover a bar to see its total"),
    ]));
    frame.render_widget(help, chunks[3]);

    render_tooltip(frame, state, area);
}

fn render_tooltip(frame: &mut Frame, state: &ChartState, area: Rect) {
    let (Some(text), Some(tooltip_area)) = (state.tooltip.text(), state.tooltip.area(area)) else {
        return;
    };

    frame.render_widget(Clear, tooltip_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Black))
        .style(Style::default().bg(Color::Yellow).fg(Color::Black));
    let label = Paragraph::new(format!(" {} ", text)).block(block);
    frame.render_widget(label, tooltip_area);
}

/// Tick labels for 0, half and full ceiling under the bar area
fn axis_line(width: u16, ceiling: f64) -> String {
    let span = usize::from(width.saturating_sub(LABEL_WIDTH));
    let mut cells = vec![' '; span];

    let ticks = [
        (0, "0".to_string()),
        (span / 2, format!("{:.0}", ceiling / 2.0)),
        (span, format!("{:.0}", ceiling)),
    ];
    for (pos, label) in ticks {
        let len = label.chars().count();
        let start = pos.saturating_sub(len / 2).min(span.saturating_sub(len));
        for (offset, ch) in label.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + offset) {
                *cell = ch;
            }
        }
    }

    format!(
        "{}{}",
        " ".repeat(usize::from(LABEL_WIDTH)),
        cells.into_iter().collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Tooltip;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent};
    use ratatui::backend::TestBackend;

    fn sample_state() -> ChartState {
        let totals = CategoryTotals {
            brushing: 6,
            bathing: 22,
            cooking: 6,
            other: 6,
        };
        ChartState::new(totals, Animation::new(50, 1.0), Duration::from_millis(300))
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn state_with_bars() -> ChartState {
        let mut state = sample_state();
        let ceiling = state.ceiling();
        state.bars = layout_bars(Rect::new(0, 0, 60, 11), &state.totals, 1.0, ceiling);
        state
    }

    #[test]
    fn test_close_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter] {
            let mut state = sample_state();
            assert!(handle_event(&mut state, key(code, KeyEventKind::Press)), "{:?}", code);
        }

        let mut state = sample_state();
        assert!(!handle_event(&mut state, key(KeyCode::Char('x'), KeyEventKind::Press)));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut state = sample_state();
        assert!(!handle_event(&mut state, key(KeyCode::Char('q'), KeyEventKind::Release)));
        assert!(!handle_event(&mut state, key(KeyCode::Esc, KeyEventKind::Repeat)));
    }

    #[test]
    fn test_motion_updates_tooltip() {
        let mut state = state_with_bars();
        let bathing = state.bars[1].bar;

        assert!(!handle_event(&mut state, mouse(MouseEventKind::Moved, bathing.x, bathing.y)));
        assert_eq!(state.tooltip.text().as_deref(), Some("Bathing: 22 L"));

        let brushing = state.bars[0].bar;
        handle_event(
            &mut state,
            mouse(MouseEventKind::Drag(MouseButton::Left), brushing.x, brushing.y),
        );
        assert_eq!(state.tooltip.text().as_deref(), Some("Brushing: 6 L"));

        handle_event(&mut state, mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(state.tooltip, Tooltip::Hidden);
    }

    #[test]
    fn test_clicks_and_scrolls_leave_tooltip_alone() {
        let mut state = state_with_bars();
        let bathing = state.bars[1].bar;

        handle_event(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), bathing.x, bathing.y),
        );
        handle_event(&mut state, mouse(MouseEventKind::ScrollDown, bathing.x, bathing.y));
        assert_eq!(state.tooltip, Tooltip::Hidden);

        assert!(!handle_event(&mut state, Event::Resize(80, 24)));
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for row in buffer.content.chunks(usize::from(buffer.area.width)) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_axis_line_places_ticks() {
        let line = axis_line(LABEL_WIDTH + 20, 100.0);
        assert_eq!(line.chars().count(), usize::from(LABEL_WIDTH) + 20);
        let ticks = &line[usize::from(LABEL_WIDTH)..];
        assert!(ticks.starts_with('0'));
        assert!(ticks.contains("50"));
        assert!(ticks.ends_with("100"));
    }

    #[test]
    fn test_render_draws_labels_and_records_bars() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = sample_state();

        terminal.draw(|frame| render(frame, &mut state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(TITLE));
        assert!(text.contains(FOOTER));
        assert!(text.contains(X_LABEL));
        assert!(text.contains(Y_LABEL));
        for name in ["Brushing", "Bathing", "Cooking", "Other"] {
            assert!(text.contains(name), "missing label {}", name);
        }
        assert_eq!(state.bars.len(), 4);
        assert!(state.bars.iter().all(|b| b.bar.width > 0));
    }

    #[test]
    fn test_hover_renders_single_tooltip() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = sample_state();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();

        let bathing = state.bars[1].bar;
        state.on_motion(bathing.x, bathing.y);
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = buffer_text(&terminal);
        assert_eq!(text.matches("Bathing: 22 L").count(), 1);

        // Leaving the bars hides the label again
        state.on_motion(0, 0);
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = buffer_text(&terminal);
        assert!(!text.contains(": 22 L"));
    }
}
