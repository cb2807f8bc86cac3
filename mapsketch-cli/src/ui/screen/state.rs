//! Input state for the map screen.
//!
//! Translates terminal input into [`UiAction`]s without touching the session,
//! so the interaction rules can be tested without a terminal.

use crossterm::event::KeyCode;
use mapsketch::coord::LatLng;
use mapsketch::store::PointId;

/// Zoom step for keys and the scroll wheel.
pub const ZOOM_STEP: f64 = 1.0;

/// Cells moved per arrow key press.
pub const PAN_STEP: i32 = 4;

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Map,
    Search,
}

/// Something the session or the camera should do.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Quit,
    AddPoint(LatLng),
    Hover(PointId),
    Unhover(PointId),
    BeginDrag(PointId),
    DragTo(PointId, LatLng),
    EndDrag(PointId),
    Reset,
    ToggleSatellite,
    Search(String),
    Zoom(f64),
    Pan { columns: i32, rows: i32 },
}

/// Mouse gesture, already reduced from the terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Drag,
    Up,
    Moved,
    ScrollUp,
    ScrollDown,
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseTarget {
    /// The map, with the coordinate under the pointer and the marker hit.
    Map {
        coord: LatLng,
        marker: Option<PointId>,
    },
    SearchField,
    ResetButton,
    ToggleButton,
    Elsewhere,
}

/// A left-button press that has not been released yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Map,
    Marker(PointId),
    Dragging(PointId),
}

/// Screen-local state: input mode, search text, alert and pointer tracking.
#[derive(Debug, Default)]
pub struct ScreenState {
    mode: InputMode,
    search_input: String,
    alert: Option<String>,
    hovered: Option<PointId>,
    press: Option<Press>,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Show a blocking alert. Input is swallowed until it is dismissed.
    pub fn show_alert(&mut self, text: impl Into<String>) {
        self.alert = Some(text.into());
    }

    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }

    /// Forget pointer state for markers that no longer exist.
    pub fn clear_pointer(&mut self) {
        self.hovered = None;
        self.press = None;
    }

    /// Handle a key press.
    pub fn on_key(&mut self, code: KeyCode) -> Option<UiAction> {
        if self.alert.take().is_some() {
            return None;
        }

        match self.mode {
            InputMode::Search => self.on_search_key(code),
            InputMode::Map => self.on_map_key(code),
        }
    }

    fn on_search_key(&mut self, code: KeyCode) -> Option<UiAction> {
        match code {
            KeyCode::Enter => {
                self.mode = InputMode::Map;
                Some(UiAction::Search(self.search_input.clone()))
            }
            KeyCode::Esc => {
                self.mode = InputMode::Map;
                None
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                None
            }
            _ => None,
        }
    }

    fn on_map_key(&mut self, code: KeyCode) -> Option<UiAction> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.mode = InputMode::Search;
                None
            }
            KeyCode::Char('r') => Some(UiAction::Reset),
            KeyCode::Char('t') => Some(UiAction::ToggleSatellite),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(UiAction::Zoom(ZOOM_STEP)),
            KeyCode::Char('-') => Some(UiAction::Zoom(-ZOOM_STEP)),
            KeyCode::Left => Some(UiAction::Pan {
                columns: -PAN_STEP,
                rows: 0,
            }),
            KeyCode::Right => Some(UiAction::Pan {
                columns: PAN_STEP,
                rows: 0,
            }),
            KeyCode::Up => Some(UiAction::Pan {
                columns: 0,
                rows: -PAN_STEP,
            }),
            KeyCode::Down => Some(UiAction::Pan {
                columns: 0,
                rows: PAN_STEP,
            }),
            _ => None,
        }
    }

    /// Handle a mouse event.
    ///
    /// A press and release on empty map adds a point. A press on a marker
    /// followed by movement drags it; the release commits the drag.
    pub fn on_mouse(&mut self, kind: MouseKind, target: MouseTarget) -> Vec<UiAction> {
        if self.alert.is_some() {
            if kind == MouseKind::Down {
                self.alert = None;
            }
            return Vec::new();
        }

        match kind {
            MouseKind::Down => self.on_press(target),
            MouseKind::Drag => self.on_drag(target),
            MouseKind::Up => self.on_release(target),
            MouseKind::Moved => self.on_move(target),
            MouseKind::ScrollUp => vec![UiAction::Zoom(ZOOM_STEP)],
            MouseKind::ScrollDown => vec![UiAction::Zoom(-ZOOM_STEP)],
        }
    }

    fn on_press(&mut self, target: MouseTarget) -> Vec<UiAction> {
        self.press = None;
        match target {
            MouseTarget::Map { marker, .. } => {
                self.mode = InputMode::Map;
                self.press = Some(marker.map_or(Press::Map, Press::Marker));
                Vec::new()
            }
            MouseTarget::SearchField => {
                self.mode = InputMode::Search;
                Vec::new()
            }
            MouseTarget::ResetButton => vec![UiAction::Reset],
            MouseTarget::ToggleButton => vec![UiAction::ToggleSatellite],
            MouseTarget::Elsewhere => Vec::new(),
        }
    }

    fn on_drag(&mut self, target: MouseTarget) -> Vec<UiAction> {
        let MouseTarget::Map { coord, .. } = target else {
            return Vec::new();
        };

        match self.press {
            Some(Press::Marker(id)) => {
                self.press = Some(Press::Dragging(id));
                vec![UiAction::BeginDrag(id), UiAction::DragTo(id, coord)]
            }
            Some(Press::Dragging(id)) => vec![UiAction::DragTo(id, coord)],
            Some(Press::Map) | None => Vec::new(),
        }
    }

    fn on_release(&mut self, target: MouseTarget) -> Vec<UiAction> {
        match (self.press.take(), target) {
            (Some(Press::Dragging(id)), _) => {
                // The marker settles unhighlighted; the next move re-hovers it.
                self.hovered = None;
                vec![UiAction::EndDrag(id)]
            }
            (Some(Press::Map), MouseTarget::Map { coord, .. }) => vec![UiAction::AddPoint(coord)],
            _ => Vec::new(),
        }
    }

    fn on_move(&mut self, target: MouseTarget) -> Vec<UiAction> {
        let under = match target {
            MouseTarget::Map { marker, .. } => marker,
            _ => None,
        };
        if under == self.hovered {
            return Vec::new();
        }

        let mut actions = Vec::with_capacity(2);
        if let Some(previous) = self.hovered {
            actions.push(UiAction::Unhover(previous));
        }
        if let Some(current) = under {
            actions.push(UiAction::Hover(current));
        }
        self.hovered = under;
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsketch::markers::{MarkerSet, MarkerState};
    use mapsketch::store::{LocationStatus, SnapshotPoint};

    fn here() -> LatLng {
        LatLng::new_unchecked(1.0, 2.0)
    }

    fn on_map(marker: Option<PointId>) -> MouseTarget {
        MouseTarget::Map {
            coord: here(),
            marker,
        }
    }

    #[test]
    fn test_click_on_empty_map_adds_point() {
        let mut state = ScreenState::new();

        assert!(state.on_mouse(MouseKind::Down, on_map(None)).is_empty());
        let actions = state.on_mouse(MouseKind::Up, on_map(None));

        assert_eq!(actions, vec![UiAction::AddPoint(here())]);
    }

    #[test]
    fn test_click_on_marker_without_moving_does_nothing() {
        let mut state = ScreenState::new();
        let id = PointId(1);

        state.on_mouse(MouseKind::Down, on_map(Some(id)));
        let actions = state.on_mouse(MouseKind::Up, on_map(Some(id)));

        assert!(actions.is_empty());
    }

    #[test]
    fn test_drag_marker_sequence() {
        let mut state = ScreenState::new();
        let id = PointId(3);

        state.on_mouse(MouseKind::Down, on_map(Some(id)));
        let first = state.on_mouse(MouseKind::Drag, on_map(None));
        let second = state.on_mouse(MouseKind::Drag, on_map(None));
        let end = state.on_mouse(MouseKind::Up, on_map(None));

        assert_eq!(
            first,
            vec![UiAction::BeginDrag(id), UiAction::DragTo(id, here())]
        );
        assert_eq!(second, vec![UiAction::DragTo(id, here())]);
        assert_eq!(end, vec![UiAction::EndDrag(id)]);
    }

    #[test]
    fn test_drag_release_outside_map_still_commits() {
        let mut state = ScreenState::new();
        let id = PointId(2);

        state.on_mouse(MouseKind::Down, on_map(Some(id)));
        state.on_mouse(MouseKind::Drag, on_map(None));

        let end = state.on_mouse(MouseKind::Up, MouseTarget::Elsewhere);
        assert_eq!(end, vec![UiAction::EndDrag(id)]);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut state = ScreenState::new();
        let a = PointId(1);
        let b = PointId(2);

        assert_eq!(
            state.on_mouse(MouseKind::Moved, on_map(Some(a))),
            vec![UiAction::Hover(a)]
        );
        assert!(state.on_mouse(MouseKind::Moved, on_map(Some(a))).is_empty());
        assert_eq!(
            state.on_mouse(MouseKind::Moved, on_map(Some(b))),
            vec![UiAction::Unhover(a), UiAction::Hover(b)]
        );
        assert_eq!(
            state.on_mouse(MouseKind::Moved, MouseTarget::Elsewhere),
            vec![UiAction::Unhover(b)]
        );
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn test_marker_highlights_again_after_drag() {
        let mut state = ScreenState::new();
        let mut markers = MarkerSet::new();
        let id = PointId(1);
        let start = SnapshotPoint {
            id,
            coord: here(),
            location: LocationStatus::Pending,
        };
        markers.reconcile(&[start], None);

        fn replay(
            state: &mut ScreenState,
            markers: &mut MarkerSet,
            kind: MouseKind,
            target: MouseTarget,
        ) -> Vec<UiAction> {
            let actions = state.on_mouse(kind, target);
            for action in &actions {
                match action {
                    UiAction::Hover(id) => markers.hover(*id).unwrap(),
                    UiAction::Unhover(id) => markers.unhover(*id).unwrap(),
                    UiAction::BeginDrag(id) => markers.begin_drag(*id).unwrap(),
                    UiAction::DragTo(id, coord) => markers.drag_to(*id, *coord).unwrap(),
                    UiAction::EndDrag(id) => {
                        let (_, coord) = markers.end_drag(*id).unwrap();
                        let committed = SnapshotPoint {
                            id: *id,
                            coord,
                            location: LocationStatus::Pending,
                        };
                        markers.reconcile(&[committed], None);
                    }
                    _ => {}
                }
            }
            actions
        }

        replay(&mut state, &mut markers, MouseKind::Moved, on_map(Some(id)));
        replay(&mut state, &mut markers, MouseKind::Down, on_map(Some(id)));
        replay(&mut state, &mut markers, MouseKind::Drag, on_map(Some(id)));
        replay(&mut state, &mut markers, MouseKind::Up, on_map(Some(id)));
        assert_eq!(markers.get(id).unwrap().state, MarkerState::Normal);

        let actions = replay(&mut state, &mut markers, MouseKind::Moved, on_map(Some(id)));

        assert_eq!(actions, vec![UiAction::Hover(id)]);
        assert_eq!(markers.get(id).unwrap().state, MarkerState::Hovered);
        assert_eq!(state.hovered(), Some(id));
    }

    #[test]
    fn test_sidebar_buttons() {
        let mut state = ScreenState::new();

        assert_eq!(
            state.on_mouse(MouseKind::Down, MouseTarget::ResetButton),
            vec![UiAction::Reset]
        );
        assert_eq!(
            state.on_mouse(MouseKind::Down, MouseTarget::ToggleButton),
            vec![UiAction::ToggleSatellite]
        );
    }

    #[test]
    fn test_search_typing_and_submit() {
        let mut state = ScreenState::new();

        assert_eq!(state.on_key(KeyCode::Char('/')), None);
        assert_eq!(state.mode(), InputMode::Search);

        for c in "Pariz".chars() {
            state.on_key(KeyCode::Char(c));
        }
        state.on_key(KeyCode::Backspace);
        state.on_key(KeyCode::Char('s'));

        assert_eq!(
            state.on_key(KeyCode::Enter),
            Some(UiAction::Search("Paris".to_string()))
        );
        assert_eq!(state.mode(), InputMode::Map);
        assert_eq!(state.search_input(), "Paris");
    }

    #[test]
    fn test_map_keys_ignored_while_searching() {
        let mut state = ScreenState::new();
        state.on_mouse(MouseKind::Down, MouseTarget::SearchField);

        assert_eq!(state.on_key(KeyCode::Char('q')), None);
        assert_eq!(state.search_input(), "q");
    }

    #[test]
    fn test_alert_swallows_next_input() {
        let mut state = ScreenState::new();
        state.show_alert("Location not found. Please try a different search.");

        assert_eq!(state.on_key(KeyCode::Char('r')), None);
        assert!(state.alert().is_none());
        assert_eq!(state.on_key(KeyCode::Char('r')), Some(UiAction::Reset));
    }

    #[test]
    fn test_alert_blocks_map_clicks() {
        let mut state = ScreenState::new();
        state.show_alert("blocked");

        assert!(state.on_mouse(MouseKind::Down, on_map(None)).is_empty());
        assert!(state.on_mouse(MouseKind::Up, on_map(None)).is_empty());
        assert!(state.alert().is_none());
    }

    #[test]
    fn test_zoom_and_quit_keys() {
        let mut state = ScreenState::new();

        assert_eq!(state.on_key(KeyCode::Char('+')), Some(UiAction::Zoom(1.0)));
        assert_eq!(state.on_key(KeyCode::Char('-')), Some(UiAction::Zoom(-1.0)));
        assert_eq!(state.on_key(KeyCode::Char('q')), Some(UiAction::Quit));
    }
}
