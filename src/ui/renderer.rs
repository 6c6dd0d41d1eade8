use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Cell, Engine, Piece};

pub fn ui(f: &mut Frame, engine: &Engine) {
    let size = f.size();

    let board_height = engine.grid.rows() as u16 + 2; // rows + borders
    let board_width = engine.grid.cols() as u16 * 2 + 2; // 2 chars per cell + borders

    // Center the playfield with an info panel on its right
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_height),
            Constraint::Min(1),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_width),
            Constraint::Length(14),
            Constraint::Min(1),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[1];
    let info_area = horizontal_chunks[2];

    render_board(f, engine, board_area);
    render_info(f, engine, info_area);

    if engine.is_game_over() {
        render_game_over_overlay(f, engine, board_area);
    }
}

fn render_board(f: &mut Frame, engine: &Engine, area: Rect) {
    let mut board_lines = Vec::new();

    for row in 0..engine.grid.rows() {
        let mut line_spans = Vec::new();
        for col in 0..engine.grid.cols() {
            match engine.get_cell(row, col) {
                Cell::Empty => {
                    // Checkerboard background to keep columns readable
                    if (row + col) % 2 == 0 {
                        line_spans.push(Span::styled("░░", Style::default().fg(Color::DarkGray)));
                    } else {
                        line_spans.push(Span::raw("  "));
                    }
                }
                Cell::Active(color) => {
                    line_spans.push(Span::styled("██", Style::default().fg(color)));
                }
                Cell::Locked(color) => {
                    line_spans.push(Span::styled("▓▓", Style::default().fg(color)));
                }
            }
        }
        board_lines.push(Line::from(line_spans));
    }

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("blockfall"));

    f.render_widget(board_widget, area);
}

fn render_info(f: &mut Frame, engine: &Engine, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // next piece
            Constraint::Length(5), // score
            Constraint::Min(1),
        ])
        .split(area);

    render_next_piece(f, engine.peek_next(), chunks[0]);
    render_score(f, engine, chunks[1]);
}

fn render_next_piece(f: &mut Frame, next: Option<&Piece>, area: Rect) {
    let mut next_lines = vec![Line::from(vec![Span::raw("")])];

    if let Some(piece) = next {
        // Offsets are centered around the anchor; shift them back into a
        // small 2x4 box for display.
        for box_row in 0..2 {
            let mut line_spans = Vec::new();
            for box_col in 0..4 {
                let occupied = piece
                    .cells
                    .iter()
                    .any(|&(di, dj)| di + 1 == box_row && dj + 1 == box_col);
                if occupied {
                    line_spans.push(Span::styled("██", Style::default().fg(piece.color)));
                } else {
                    line_spans.push(Span::raw("  "));
                }
            }
            next_lines.push(Line::from(line_spans));
        }
    }

    let next_widget = Paragraph::new(next_lines)
        .block(Block::default().borders(Borders::ALL).title("Next"))
        .alignment(Alignment::Center);

    f.render_widget(next_widget, area);
}

fn render_score(f: &mut Frame, engine: &Engine, area: Rect) {
    let score_text = vec![
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled(
            format!("{}", engine.score()),
            Style::default().fg(Color::Cyan),
        )]),
    ];

    let score_widget = Paragraph::new(score_text)
        .block(Block::default().borders(Borders::ALL).title("Lines"))
        .alignment(Alignment::Center);

    f.render_widget(score_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_game_over_overlay(f: &mut Frame, engine: &Engine, area: Rect) {
    let popup_area = centered_rect(70, 50, area);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red),
        )]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw(format!("Lines: {}", engine.score()))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("Press R to restart")]),
        Line::from(vec![Span::raw("Press Q to quit")]),
    ];

    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(widget, popup_area);
}
