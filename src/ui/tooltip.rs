use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

const MAX_TOOLTIP_WIDTH: u16 = 48;

/// Where a tooltip of `lines` anchored at `anchor` fits inside `bounds`.
/// Pushed left/up when it would run past the right or bottom edge.
pub fn tooltip_rect(lines: &[String], anchor: (u16, u16), bounds: Rect) -> Rect {
    let widest = lines.iter().map(|l| l.width()).max().unwrap_or_default() as u16;
    let width = (widest + 2).min(MAX_TOOLTIP_WIDTH).min(bounds.width);
    let inner = width.saturating_sub(2).max(1);

    let wrapped_rows: u16 = lines
        .iter()
        .map(|l| (l.width() as u16).div_ceil(inner).max(1))
        .sum();
    let height = (wrapped_rows + 2).min(bounds.height);

    let x = anchor
        .0
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);
    let y = anchor
        .1
        .min(bounds.bottom().saturating_sub(height))
        .max(bounds.y);

    Rect::new(x, y, width, height)
}

/// Draw the hover tooltip on top of whatever is already in `buf`
pub fn render_tooltip(
    lines: &[String],
    anchor: (u16, u16),
    doping_color: Option<Color>,
    buf: &mut Buffer,
) {
    let area = tooltip_rect(lines, anchor, buf.area);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = match i {
                0 => Style::default().add_modifier(Modifier::BOLD),
                1 => Style::default(),
                _ => Style::default().fg(doping_color.unwrap_or(Color::Yellow)),
            };
            Line::from(Span::styled(line.clone(), style))
        })
        .collect();

    Clear.render(area, buf);
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
