use crate::game::{Board, Vec2};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    board: &Board,
    new_tiles: &[Vec2],
    message: &Option<String>,
    game_over: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, board, game_over, chunks[0]);
    super::board_widget::render_board(frame, board, new_tiles, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, board: &Board, game_over: bool, area: ratatui::layout::Rect) {
    let status = if game_over {
        format!("Game Over  |  Score: {}", board.score())
    } else {
        format!("Score: {}", board.score())
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Five Twelve"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let controls = Line::from("arrows / hjkl: slide   r: new game   q: quit");
    let widget = Paragraph::new(controls)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
