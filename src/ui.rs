pub mod charting;
pub mod screen;
pub mod tooltip;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use webbrowser::Browser;

use crate::{ui::screen::current_screen, App};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

pub const TITLE: &str = "Dopers Amongst Bikers";
pub const SUBTITLE: &str = "35 Fastest times up Alpe d'Huez";

/// Regions of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub header: Rect,
    pub chart: Rect,
    pub footer: Rect,
}

/// Split the terminal area; shared by drawing and pointer hit testing so both
/// agree on where the chart is
pub fn split(area: Rect) -> ViewLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title + subtitle
            Constraint::Min(0),    // chart
            Constraint::Length(1), // key hints
        ])
        .split(area);

    ViewLayout {
        header: chunks[0],
        chart: chunks[1],
        footer: chunks[2],
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = split(area);
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        Paragraph::new(vec![
            Line::from(Span::styled(TITLE, bold_style)),
            Line::from(Span::styled(SUBTITLE, Style::default().add_modifier(Modifier::DIM))),
        ])
        .alignment(Alignment::Center)
        .render(layout.header, buf);

        current_screen(self.view.status()).render(self, &layout, buf);

        let hints = if self.source_link().is_some() && Browser::is_available() {
            "(o)pen allegation source / (q)uit"
        } else {
            "(q)uit"
        };
        Paragraph::new(Span::styled(hints, italic_style)).render(layout.footer, buf);
    }
}
