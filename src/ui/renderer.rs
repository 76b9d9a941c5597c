use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{Canvas, Game, Rgba};

/// Collects the board's draw calls into terminal colors, one per cell.
pub struct TerminalCanvas {
    cells: [[Option<Color>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// `None` for empty and out-of-bounds cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut board_lines = Vec::new();

        for (y, row) in self.cells.iter().enumerate() {
            let mut line_spans = Vec::new();
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => {
                        line_spans.push(Span::styled("██", Style::default().fg(*color)));
                    }
                    None => {
                        // Checkerboard background
                        if (x + y) % 2 == 0 {
                            line_spans.push(Span::styled("░░", Style::default().fg(Color::DarkGray)));
                        } else {
                            line_spans.push(Span::raw("  "));
                        }
                    }
                }
            }
            board_lines.push(Line::from(line_spans));
        }
        board_lines
    }
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for TerminalCanvas {
    fn fill_cell(&mut self, row: usize, col: usize, color: Rgba) {
        self.cells[row][col] = Some(Color::Rgb(color.r, color.g, color.b));
    }
}

pub fn ui(f: &mut Frame, game: &Game) {
    let size = f.size();

    let board_height = BOARD_HEIGHT as u16 + 2; // rows + borders
    let board_width = BOARD_WIDTH as u16 * 2 + 2; // 2 chars per block + borders

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
            Constraint::Length(18), // Controls panel
            Constraint::Min(1),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[1];
    let info_area = horizontal_chunks[2];

    render_board(f, game, board_area);
    render_controls(f, info_area);

    if game.is_over() {
        render_game_over_overlay(f, board_area);
    }
}

fn render_board(f: &mut Frame, game: &Game, area: Rect) {
    let mut canvas = TerminalCanvas::new();
    game.board.draw(&mut canvas);

    let board_widget = Paragraph::new(canvas.lines())
        .block(Block::default()
               .borders(Borders::ALL)
               .title("tstris"));

    f.render_widget(board_widget, area);
}

fn render_controls(f: &mut Frame, area: Rect) {
    let controls = [
        ("←/→", "move"),
        ("↑", "rotate ccw"),
        ("↓", "rotate cw"),
        ("space", "drop"),
        ("r", "restart"),
        ("q", "quit"),
    ];

    let lines: Vec<Line> = controls
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>5} "), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();

    let controls_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Keys"));

    f.render_widget(controls_widget, area);
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

fn render_game_over_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(80, 35, area);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled("GAME OVER", Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("R to restart")]),
        Line::from(vec![Span::raw("Q to quit")]),
    ];

    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(widget, popup_area);
}
