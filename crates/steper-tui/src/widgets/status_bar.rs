use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let drag_str = if app.drag.is_some() { "drag on" } else { "drag off" };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " Slide {}/{} | nearest {} | offset {:.1} | {}",
                app.index.get() + 1,
                app.slide_count(),
                app.nearest_index() + 1,
                app.offset(),
                drag_str,
            )
        };

        frame.render_widget(Paragraph::new(status_line(status_text, area.width, theme)), area);
    }
}

fn status_line(status_text: String, width: u16, theme: &Theme) -> Line<'static> {
    let help_hint = " q:quit h/l:step H/L:skip g/G:jump d:drag ";
    let padding_len = width.saturating_sub(
        status_text.len() as u16 + help_hint.len() as u16,
    ) as usize;

    Line::from(vec![
        Span::styled(
            status_text,
            Style::default().fg(theme.text).bg(theme.status_bg),
        ),
        Span::styled(
            " ".repeat(padding_len),
            Style::default().bg(theme.status_bg),
        ),
        Span::styled(
            help_hint,
            Style::default().fg(theme.muted).bg(theme.status_bg),
        ),
    ])
}
