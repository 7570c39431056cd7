use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use dopers::{
    geometry::PlotGeometry,
    loader::{DataSource, FileSource},
    runtime::{FixedTicker, PlotEvent, Runner, TestEventSource},
    ui::{charting::Viewport, split},
    view::LoadStatus,
    App,
};

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

fn fixture() -> FileSource {
    FileSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cyclists.json"))
}

fn mouse_at(column: u16, row: u16) -> PlotEvent {
    PlotEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn drive(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>, max_steps: u32) {
    for _ in 0..max_steps {
        let event = runner.step();
        if matches!(event, PlotEvent::Tick) {
            break;
        }
        app.on_event(event, AREA);
        if app.should_quit {
            break;
        }
    }
}

// Loads the fixture, hovers a marker, then moves away and quits.
#[test]
fn headless_hover_flow() {
    let mut app = App::new(PlotGeometry::default());
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(PlotEvent::Loaded(fixture().fetch_results())).unwrap();
    drive(&mut app, &runner, 10);

    assert_eq!(app.view.status(), &LoadStatus::Loaded);
    assert!(app.view.is_ready());
    assert_eq!(app.view.points().len(), 4);

    let model = app.view.model(5, 5).expect("model once loaded");
    let pantani = model
        .markers
        .iter()
        .find(|m| app.view.points()[m.index].name == "Marco Pantani")
        .expect("marker for fixture rider");
    let viewport = Viewport::new(split(AREA).chart, app.view.geometry());
    let (col, row) = viewport.to_cell(pantani.center);

    tx.send(mouse_at(col, row)).unwrap();
    drive(&mut app, &runner, 10);

    let selected = app.view.selected().expect("hovering a marker");
    assert_eq!(selected.name, "Marco Pantani");
    let lines = app.view.tooltip_lines().unwrap();
    assert_eq!(lines[0], "Marco Pantani: ITA");
    assert_eq!(lines[1], "Year: 1995, Time: 36:50");
    assert!(app.source_link().is_some());

    // Header row sits outside the chart
    tx.send(mouse_at(0, 0)).unwrap();
    drive(&mut app, &runner, 10);
    assert!(app.view.selected().is_none());
    assert!(app.view.tooltip_lines().is_none());

    tx.send(PlotEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();
    drive(&mut app, &runner, 10);
    assert!(app.should_quit);
}

#[test]
fn headless_failed_load_ignores_pointer() {
    let mut app = App::new(PlotGeometry::default());
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let missing = FileSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/nope.json"));
    tx.send(PlotEvent::Loaded(missing.fetch_results())).unwrap();
    tx.send(mouse_at(60, 20)).unwrap();
    drive(&mut app, &runner, 10);

    assert!(matches!(app.view.status(), LoadStatus::Failed(_)));
    assert!(app.view.model(5, 5).is_none());
    assert!(app.view.selected().is_none());
}

#[test]
fn headless_runner_ticks_when_idle() {
    let (_tx, rx) = mpsc::channel::<PlotEvent>();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let mut app = App::new(PlotGeometry::default());
    for _ in 0..3 {
        let event = runner.step();
        assert!(matches!(event, PlotEvent::Tick));
        assert!(!app.on_event(event, AREA));
    }
    assert_eq!(app.view.status(), &LoadStatus::Fetching);
}
