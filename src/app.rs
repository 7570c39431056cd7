use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::warn;
use webbrowser::Browser;

use crate::{
    geometry::PlotGeometry,
    runtime::PlotEvent,
    ui::{charting::Viewport, split},
    view::PlotView,
};

#[derive(Debug)]
pub struct App {
    pub view: PlotView,
    pub should_quit: bool,
}

impl App {
    pub fn new(geometry: PlotGeometry) -> Self {
        Self {
            view: PlotView::new(geometry),
            should_quit: false,
        }
    }

    /// Apply one event. `area` is the full terminal area the view is drawn
    /// into. Returns true when the screen needs redrawing.
    pub fn on_event(&mut self, event: PlotEvent, area: Rect) -> bool {
        match event {
            PlotEvent::Tick => false,
            PlotEvent::Resize => true,
            PlotEvent::Loaded(result) => {
                self.view.on_load_complete(result);
                true
            }
            PlotEvent::Key(key) => self.on_key(key),
            PlotEvent::Mouse(mouse) => self.on_mouse(mouse, area),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('o') => {
                self.open_source_link();
            }
            _ => {}
        }
        false
    }

    fn on_mouse(&mut self, mouse: MouseEvent, area: Rect) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return false;
        }

        let viewport = Viewport::new(split(area).chart, self.view.geometry());
        match viewport.to_canvas(mouse.column, mouse.row) {
            Some(pointer) => {
                let tolerance = viewport.hit_tolerance(self.view.geometry().dot_radius);
                self.view.on_pointer_moved(pointer, tolerance)
            }
            None if self.view.hover().is_hovering() => {
                self.view.hover_leave();
                true
            }
            None => false,
        }
    }

    /// Allegation source of the hovered rider, if it has one
    pub fn source_link(&self) -> Option<&str> {
        self.view
            .selected()
            .map(|p| p.url.as_str())
            .filter(|url| !url.is_empty())
    }

    fn open_source_link(&self) {
        let Some(url) = self.source_link() else {
            return;
        };
        if !Browser::is_available() {
            return;
        }
        if let Err(err) = webbrowser::open(url) {
            warn!(%url, %err, "could not open browser");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::record::race_result;
    use crate::view::LoadStatus;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    fn key(code: KeyCode, modifiers: KeyModifiers) -> PlotEvent {
        PlotEvent::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse_at(column: u16, row: u16) -> PlotEvent {
        PlotEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn loaded_app() -> App {
        let mut app = App::new(PlotGeometry::default());
        let mut rider = race_result("Marco Pantani", "1995", "37:30", "EPO");
        rider.url = "https://example.org/pantani".to_string();
        assert!(app.on_event(PlotEvent::Loaded(Ok(vec![rider])), AREA));
        app
    }

    fn marker_cell(app: &App) -> (u16, u16) {
        let viewport = Viewport::new(split(AREA).chart, app.view.geometry());
        let center = app.view.model(10, 10).unwrap().markers[0].center;
        viewport.to_cell(center)
    }

    #[test]
    fn test_quit_keys() {
        for ev in [
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(PlotGeometry::default());
            app.on_event(ev, AREA);
            assert!(app.should_quit);
        }

        let mut app = App::new(PlotGeometry::default());
        app.on_event(key(KeyCode::Char('c'), KeyModifiers::NONE), AREA);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_and_resize() {
        let mut app = App::new(PlotGeometry::default());
        assert!(!app.on_event(PlotEvent::Tick, AREA));
        assert!(app.on_event(PlotEvent::Resize, AREA));
    }

    #[test]
    fn test_load_failure_event() {
        let mut app = App::new(PlotGeometry::default());
        app.on_event(PlotEvent::Loaded(Err(LoadError::Payload("x".into()))), AREA);
        assert!(matches!(app.view.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn test_mouse_hover_enter_and_leave() {
        let mut app = loaded_app();
        let (col, row) = marker_cell(&app);

        assert!(app.on_event(mouse_at(col, row), AREA));
        assert_eq!(
            app.view.selected().map(|p| p.name.as_str()),
            Some("Marco Pantani")
        );
        assert_eq!(app.source_link(), Some("https://example.org/pantani"));

        // Far corner of the chart, away from the only marker
        let chart = split(AREA).chart;
        assert!(app.on_event(mouse_at(chart.x, chart.y), AREA));
        assert!(app.view.selected().is_none());
        assert_eq!(app.source_link(), None);
    }

    #[test]
    fn test_leaving_chart_area_clears_hover() {
        let mut app = loaded_app();
        let (col, row) = marker_cell(&app);
        app.on_event(mouse_at(col, row), AREA);
        assert!(app.view.hover().is_hovering());

        assert!(app.on_event(mouse_at(0, 0), AREA));
        assert!(!app.view.hover().is_hovering());
        assert!(!app.on_event(mouse_at(0, 0), AREA));
    }

    #[test]
    fn test_clicks_do_not_change_hover() {
        let mut app = loaded_app();
        let (col, row) = marker_cell(&app);
        let click = PlotEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!app.on_event(click, AREA));
        assert!(!app.view.hover().is_hovering());
    }
}
