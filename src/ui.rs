//! Terminal UI rendering with ratatui

use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use zonetris::board::{BOARD_HEIGHT, BOARD_WIDTH, Zone};
use zonetris::{Cell, GameState, Snapshot};

const EMPTY: &str = "  ";

/// Total width needed: board(24 + 2) + next/stats(18) = 44
const GAME_WIDTH: u16 = 44;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// Foreground color for a board cell
fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Empty => Color::Reset,
        Cell::Red => Color::Red,
        Cell::Blue => Color::Blue,
        Cell::Green => Color::Green,
        Cell::Gray => Color::Gray,
    }
}

/// Dim background marking a zone
fn zone_background(col: usize) -> Color {
    match Zone::for_column(col as i32) {
        Some(Zone::Left) => Color::Rgb(64, 0, 0),
        Some(Zone::Middle) => Color::Rgb(0, 0, 64),
        Some(Zone::Right) => Color::Rgb(0, 50, 0),
        None => Color::Reset,
    }
}

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Length(18),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // 3 preview rows + borders
            Constraint::Min(12),   // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], snapshot, settings.visual.block_chars());
    render_stats(frame, right_layout[1], snapshot);

    if snapshot.state == GameState::GameOver {
        render_overlay(frame, area, "GAME OVER", "Enter to restart");
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let block_char = settings.visual.block_chars();
    let show_zones = settings.visual.show_zones;

    let block = Block::default()
        .title(" ZONETRIS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);

    for (row, cells) in snapshot.board.iter().enumerate() {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);

        for (col, &cell) in cells.iter().enumerate() {
            let active = snapshot.active.as_ref().and_then(|piece| {
                piece
                    .cells
                    .contains(&(col as i32, row as i32))
                    .then_some(piece.color.cell())
            });
            let cell = active.unwrap_or(cell);

            let mut style = Style::default();
            if show_zones {
                style = style.bg(zone_background(col));
            }
            let text = if cell.is_empty() {
                EMPTY
            } else {
                style = style.fg(cell_color(cell));
                block_char
            };

            spans.push(Span::styled(text, style));
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, snapshot: &Snapshot, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .next
        .grid
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| {
                    if cell.is_empty() {
                        Span::raw(EMPTY)
                    } else {
                        Span::styled(block_char, Style::default().fg(cell_color(cell)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let efficiency_color = match snapshot.efficiency {
        80.. => Color::Green,
        50..80 => Color::Yellow,
        _ => Color::Red,
    };

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.lines),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        Line::from(Span::styled("EFFICIENCY", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}%", snapshot.efficiency),
            Style::default().fg(efficiency_color).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("SPEED", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{} ticks", snapshot.tick_cycle),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
