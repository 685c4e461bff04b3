use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use steper_core::{Mode, Surface};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

pub struct CarouselWidget;

impl CarouselWidget {
    /// Outer frame around the slides; returns the area the slides live in
    pub fn inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let (mode_label, mode_color) = match app.strip.mode() {
            Mode::Idle => ("idle", theme.muted),
            Mode::Dragging => ("dragging", theme.dragging),
            Mode::Sliding => ("sliding", theme.sliding),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background))
            .title(Span::styled(
                format!(" steper [{}] ", mode_label),
                Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let active = app.nearest_index();
        let buf = frame.buffer_mut();
        for index in 0..app.strip.child_count() {
            if let Some(rect) = app.strip.child_rect(index) {
                draw_slide(buf, inner, rect.left.round() as i32, rect.width.round() as i32, index, index == active, theme);
            }
        }
    }
}

/// Draw one slide box starting at column `left`, clipped to `clip`
fn draw_slide(buf: &mut Buffer, clip: Rect, left: i32, width: i32, index: usize, active: bool, theme: &Theme) {
    if width <= 0 || clip.height < 3 {
        return;
    }
    let right = left + width - 1;
    let start = left.max(clip.x as i32);
    let end = right.min(clip.right() as i32 - 1);
    if start > end {
        return;
    }

    let top = clip.y;
    let bottom = clip.bottom() - 1;
    let middle = top + clip.height / 2;

    let label = format!("Slide {}", index + 1);
    let label_width = label.width() as i32;
    let label_start = left + (width - label_width) / 2;

    let (border_color, fill) = if active {
        (theme.border_active, theme.slide_active)
    } else {
        (theme.border, theme.slide)
    };
    let border_style = Style::default().fg(border_color).bg(fill);
    let text_style = Style::default().fg(theme.text).bg(fill);

    for column in start..=end {
        for row in top..=bottom {
            let symbol = match (column == left, column == right, row == top, row == bottom) {
                (true, _, true, _) => "┌",
                (_, true, true, _) => "┐",
                (true, _, _, true) => "└",
                (_, true, _, true) => "┘",
                (_, _, true, _) | (_, _, _, true) => "─",
                (true, _, _, _) | (_, true, _, _) => "│",
                _ => " ",
            };
            let (symbol, style) = if row == middle && symbol == " " {
                let offset = column - label_start;
                match label.get(offset.max(0) as usize..offset.max(0) as usize + 1) {
                    Some(ch) if offset >= 0 && offset < label_width => (ch, text_style),
                    _ => (" ", text_style),
                }
            } else if symbol == " " {
                (symbol, text_style)
            } else {
                (symbol, border_style)
            };

            if let Some(cell) = buf.cell_mut((column as u16, row)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}
