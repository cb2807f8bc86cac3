//! TUI application for the interactive map.
//!
//! # Architecture
//!
//! - `run_tui()` - Event loop driving an [`AnnotationSession`] from terminal input
//! - `TuiAppConfig` - Everything the loop needs, built by `commands::run`
//!
//! The loop runs on the main thread. Reverse lookups run on the tokio runtime
//! and are collected with `pump_lookups` once per iteration; a search blocks
//! the loop until the geocoder answers.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use mapsketch::location::LocationUpdate;
use mapsketch::session::AnnotationSession;

use crate::error::CliError;
use crate::runner::CliGeocoder;
use crate::ui::screen::{MouseKind, MouseTarget, RenderContext, UiAction};
use crate::ui::{MapScreen, ScreenState, Viewport};

/// How long the loop waits for input before redrawing.
const TICK_RATE: Duration = Duration::from_millis(50);

/// How long a new marker shows its drop glyph.
const DROP_ANIMATION: Duration = Duration::from_millis(300);

/// Configuration for starting the TUI application.
pub struct TuiAppConfig<'a> {
    pub session: AnnotationSession<CliGeocoder>,
    /// Runtime the session spawns lookups on.
    pub runtime: &'a Runtime,
    /// Device location updates.
    pub location_rx: mpsc::Receiver<LocationUpdate>,
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the interactive map until the user quits.
pub fn run_tui(config: TuiAppConfig<'_>) -> Result<(), CliError> {
    let TuiAppConfig {
        mut session,
        runtime,
        mut location_rx,
    } = config;

    let mut screen = MapScreen::new().map_err(CliError::Terminal)?;
    let mut state = ScreenState::new();
    let mut drop_started: Option<Instant> = None;

    info!("Interactive map started");

    loop {
        while let Ok(update) = location_rx.try_recv() {
            session.device_location(update);
        }
        session.pump_lookups();
        let now = Instant::now();
        session.tick(now);

        let layout = screen.layout().map_err(CliError::Terminal)?;
        let view = *session.view().state();
        let viewport = Viewport::new(layout.map_inner(), view.center, view.zoom)
            .map_err(|e| CliError::Terminal(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let snapshot = session.snapshot();
        screen
            .draw(&RenderContext {
                layout,
                viewport: &viewport,
                markers: session.markers(),
                transient: session.view().transient(),
                layer: session.view().layer(),
                snapshot: &snapshot,
                display_area: session.display_area(),
                mode: state.mode(),
                search_input: state.search_input(),
                alert: state.alert(),
            })
            .map_err(CliError::Terminal)?;

        let animating = session.markers().iter().any(|m| m.animate_drop);
        match (animating, drop_started) {
            (true, None) => drop_started = Some(now),
            (true, Some(started)) if now.duration_since(started) >= DROP_ANIMATION => {
                session.markers_mut().finish_animations();
                drop_started = None;
            }
            (false, _) => drop_started = None,
            _ => {}
        }

        let Some(event) = screen.poll_event(TICK_RATE).map_err(CliError::Terminal)? else {
            continue;
        };

        let actions: Vec<UiAction> = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                state.on_key(key.code).into_iter().collect()
            }
            Event::Mouse(mouse) => match mouse_kind(&mouse) {
                Some(kind) => {
                    let target = layout.target_at(mouse.column, mouse.row, || {
                        let coord = viewport.cell_to_latlng(mouse.column, mouse.row)?;
                        let marker = session.markers().marker_at(
                            coord,
                            viewport.zoom(),
                            viewport.hit_tolerance_px(),
                        );
                        Some(MouseTarget::Map { coord, marker })
                    });
                    state.on_mouse(kind, target)
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        };

        for action in actions {
            let flow = apply_action(&mut session, &mut state, runtime, &viewport, action);
            if flow == Flow::Quit {
                info!(
                    points = session.snapshot().len(),
                    lookups = session.lookups_issued(),
                    "Interactive map closed"
                );
                return Ok(());
            }
        }
    }
}

/// Reduce a terminal mouse event to the gestures the map reacts to.
fn mouse_kind(mouse: &MouseEvent) -> Option<MouseKind> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseKind::Down),
        MouseEventKind::Drag(MouseButton::Left) => Some(MouseKind::Drag),
        MouseEventKind::Up(MouseButton::Left) => Some(MouseKind::Up),
        MouseEventKind::Moved => Some(MouseKind::Moved),
        MouseEventKind::ScrollUp => Some(MouseKind::ScrollUp),
        MouseEventKind::ScrollDown => Some(MouseKind::ScrollDown),
        _ => None,
    }
}

fn apply_action(
    session: &mut AnnotationSession<CliGeocoder>,
    state: &mut ScreenState,
    runtime: &Runtime,
    viewport: &Viewport,
    action: UiAction,
) -> Flow {
    let result = match action {
        UiAction::Quit => return Flow::Quit,
        UiAction::AddPoint(coord) => session.click_map(coord).map(|_| ()),
        UiAction::Hover(id) => session.hover_marker(id),
        UiAction::Unhover(id) => session.unhover_marker(id),
        UiAction::BeginDrag(id) => session.begin_drag(id),
        UiAction::DragTo(id, coord) => session.drag_marker(id, coord).map(|_| ()),
        UiAction::EndDrag(id) => session.end_drag(id).map(|_| ()),
        UiAction::Reset => {
            session.reset();
            state.clear_pointer();
            Ok(())
        }
        UiAction::ToggleSatellite => {
            session.toggle_satellite();
            Ok(())
        }
        UiAction::Search(query) => {
            if let Err(e) = runtime.block_on(session.search(&query)) {
                state.show_alert(e.alert_text());
            }
            Ok(())
        }
        UiAction::Zoom(delta) => {
            session.view_mut().mark_user_interaction();
            session.view_mut().zoom_by(delta);
            Ok(())
        }
        UiAction::Pan { columns, rows } => {
            match viewport.panned(columns, rows) {
                Ok(center) => {
                    session.view_mut().mark_user_interaction();
                    session.view_mut().set_center(center);
                }
                Err(e) => warn!(error = %e, "Pan rejected"),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        // Pointer events can race a reset; the marker is simply gone.
        debug!(error = %e, "Map action ignored");
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_kind_left_button_only() {
        assert_eq!(
            mouse_kind(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(MouseKind::Down)
        );
        assert_eq!(
            mouse_kind(&mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(MouseKind::Up)
        );
        assert_eq!(
            mouse_kind(&mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(
            mouse_kind(&mouse(MouseEventKind::ScrollDown)),
            Some(MouseKind::ScrollDown)
        );
    }
}
