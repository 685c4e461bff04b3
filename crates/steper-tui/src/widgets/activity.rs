use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

/// Recent drag and slide callbacks, newest at the bottom
pub struct ActivityWidget;

impl ActivityWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let activity = app.activity.borrow();
        let lines: Vec<Line> = activity
            .iter()
            .map(|entry| {
                Line::from(Span::styled(
                    entry.clone(),
                    Style::default().fg(entry_color(entry, theme)),
                ))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" activity ");
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(theme.background));
        frame.render_widget(paragraph, area);
    }
}

fn entry_color(entry: &str, theme: &Theme) -> ratatui::style::Color {
    if entry.starts_with("drag") {
        theme.dragging
    } else {
        theme.sliding
    }
}
