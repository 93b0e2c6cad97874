use crate::game::{Board, Vec2};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the board grid into the given area. Tiles created this turn are
/// drawn bold and underlined so the player can spot them.
pub fn render_board(frame: &mut Frame, board: &Board, new_tiles: &[Vec2], area: Rect) {
    let grid = board.to_list();
    let mut lines = Vec::new();

    for (row, row_values) in grid.iter().enumerate() {
        let mut spans = Vec::new();
        for (col, &value) in row_values.iter().enumerate() {
            if value == 0 {
                spans.push(Span::styled(
                    format!("{:^6}", "."),
                    Style::default().fg(Color::DarkGray),
                ));
                continue;
            }
            let mut style = Style::default().fg(tile_color(value));
            if new_tiles.contains(&Vec2::new(row as i32, col as i32)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!("{value:^6}"), style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from("")); // breathing room between rows
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Tile color ramp, brighter as the value climbs.
/// Colors from http://colorbrewer2.org sequential Reds.
pub fn tile_color(value: u32) -> Color {
    match value {
        2 | 4 => Color::Rgb(0xff, 0xf5, 0xf0),
        8 | 16 => Color::Rgb(0xfe, 0xe0, 0xd2),
        32 => Color::Rgb(0xfc, 0xbb, 0xa1),
        64 => Color::Rgb(0xfc, 0x92, 0x72),
        128 => Color::Rgb(0xfb, 0x6a, 0x4a),
        256 => Color::Rgb(0xef, 0x3b, 0x2c),
        512 => Color::Rgb(0xcb, 0x18, 0x1d),
        1024 => Color::Rgb(0xa5, 0x0f, 0x15),
        // Anything beyond stays at the top of the ramp.
        _ => Color::Rgb(0x67, 0x00, 0x0d),
    }
}
