use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Line},
        Paragraph, Widget, Wrap,
    },
};

use crate::{
    ui::{
        charting::{tick_counts, Viewport},
        tooltip::render_tooltip,
        ViewLayout,
    },
    view::LoadStatus,
    App,
};

pub const FETCHING_MESSAGE: &str = "Fetching data...";
pub const FAILED_MESSAGE: &str = "Something bad happened and I could not get the biker data";
pub const EMPTY_MESSAGE: &str = "No race results to plot";

/// A UI Screen boundary: responsible for rendering the chart region
pub trait Screen {
    fn render(&self, app: &App, layout: &ViewLayout, buf: &mut Buffer);
}

fn render_message(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let middle = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(2),
        ..area
    }
    .intersection(area);
    Paragraph::new(Span::styled(text.to_string(), style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(middle, buf);
}

/// Waiting on the fetch
pub struct FetchingScreen;

impl Screen for FetchingScreen {
    fn render(&self, _app: &App, layout: &ViewLayout, buf: &mut Buffer) {
        render_message(
            FETCHING_MESSAGE,
            Style::default().add_modifier(Modifier::ITALIC),
            layout.chart,
            buf,
        );
    }
}

/// Load or parse failure; stays up for the rest of the session
pub struct FailedScreen;

impl Screen for FailedScreen {
    fn render(&self, _app: &App, layout: &ViewLayout, buf: &mut Buffer) {
        render_message(
            FAILED_MESSAGE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            layout.chart,
            buf,
        );
    }
}

pub struct EmptyScreen;

impl Screen for EmptyScreen {
    fn render(&self, _app: &App, layout: &ViewLayout, buf: &mut Buffer) {
        render_message(
            EMPTY_MESSAGE,
            Style::default().fg(Color::Gray),
            layout.chart,
            buf,
        );
    }
}

/// The scatterplot itself
pub struct PlotScreen;

impl Screen for PlotScreen {
    fn render(&self, app: &App, layout: &ViewLayout, buf: &mut Buffer) {
        let view = &app.view;
        let (x_count, y_count) = tick_counts(layout.chart);
        let Some(model) = view.model(x_count, y_count) else {
            return;
        };

        let g = *view.geometry();
        let viewport = Viewport::new(layout.chart, &g);
        let (cw, ch) = viewport.cell_size();
        let selected = view.hover().selected();

        // Canvas y grows upward; the plot model's grows downward
        let flip = |y: f64| g.height - y;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let left = g.plot_left();
        let right = left + g.x_range().1;
        let baseline = g.baseline();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, g.width])
            .y_bounds([0.0, g.height])
            .paint(|ctx| {
                ctx.draw(&Line {
                    x1: left,
                    y1: flip(baseline),
                    x2: right,
                    y2: flip(baseline),
                    color: Color::Gray,
                });
                ctx.draw(&Line {
                    x1: left,
                    y1: flip(baseline),
                    x2: left,
                    y2: flip(g.margin.top),
                    color: Color::Gray,
                });
                ctx.layer();

                for marker in &model.markers {
                    ctx.draw(&Circle {
                        x: marker.center.x,
                        y: flip(marker.center.y),
                        radius: g.dot_radius,
                        color: marker.fill,
                    });
                }
                if let Some(m) = selected.and_then(|i| model.markers.get(i)) {
                    ctx.draw(&Circle {
                        x: m.center.x,
                        y: flip(m.center.y),
                        radius: g.dot_radius * 2.0,
                        color: Color::White,
                    });
                }

                for tick in &model.x_axis.ticks {
                    let half = tick.label.len() as f64 / 2.0 * cw;
                    ctx.print(
                        (tick.position - half).max(0.0),
                        flip(baseline + ch),
                        Span::styled(tick.label.clone(), bold_style),
                    );
                }
                ctx.print(
                    (right - model.x_axis.title.len() as f64 * cw).max(0.0),
                    flip(baseline + 2.0 * ch),
                    Span::styled(model.x_axis.title, Style::default().add_modifier(Modifier::DIM)),
                );

                for tick in &model.y_axis.ticks {
                    ctx.print(
                        (left - (tick.label.len() + 1) as f64 * cw).max(0.0),
                        flip(tick.position),
                        Span::styled(tick.label.clone(), bold_style),
                    );
                }

                let legend_top = (g.margin.top - 4.0 * ch).max(0.0);
                ctx.print(
                    0.0,
                    flip(legend_top + 2.0 * ch),
                    Span::styled(model.y_axis.title, Style::default().add_modifier(Modifier::DIM)),
                );

                let legend_width = model
                    .legend
                    .iter()
                    .map(|e| e.label.len() + 2)
                    .max()
                    .unwrap_or_default() as f64;
                let legend_left = (right - legend_width * cw).max(0.0);
                for (row, entry) in model.legend.iter().enumerate() {
                    ctx.print(
                        legend_left,
                        flip(legend_top + row as f64 * ch),
                        TextLine::from(vec![
                            Span::styled("■ ", Style::default().fg(entry.color)),
                            Span::raw(entry.label),
                        ]),
                    );
                }
            })
            .render(layout.chart, buf);

        if let (Some(lines), Some(at)) = (view.tooltip_lines(), view.hover().tooltip_at()) {
            let doping_color = view.scales().map(|s| s.color.color(true));
            render_tooltip(&lines, viewport.to_cell(at), doping_color, buf);
        }
    }
}

/// Helper to construct the appropriate screen for the current status
pub fn current_screen(status: &LoadStatus) -> Box<dyn Screen> {
    match status {
        LoadStatus::Fetching => Box::new(FetchingScreen),
        LoadStatus::Loaded => Box::new(PlotScreen),
        LoadStatus::Empty => Box::new(EmptyScreen),
        LoadStatus::Failed(_) => Box::new(FailedScreen),
    }
}
