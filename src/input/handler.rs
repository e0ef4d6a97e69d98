use crate::{
    core::{
        constants::{DEFAULT_ZOOM_DELTA, WHEEL_ZOOM_SENSITIVITY},
        geo::Point,
    },
    input::events::{InputEvent, MapEvent, MouseButton},
    prelude::VecDeque,
};

/// What the map should do in response to one input event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the content by `delta` pixels
    Pan { delta: Point },
    /// Zoom to `level`, keeping `focus_point` fixed when given
    Zoom {
        level: f64,
        focus_point: Option<Point>,
    },
    /// Report a primary click at a container pixel
    Click { pixel: Point },
    /// Track the pointer (`None` once it leaves)
    Pointer { pixel: Option<Point> },
    /// Container size changed
    Resize { size: Point },
}

/// Map events waiting for their owner to drain them
#[derive(Debug, Default)]
pub struct EventManager {
    pending: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: MapEvent) {
        self.pending.push_back(event);
    }

    /// Empties the queue, oldest event first
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.pending.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }
}

/// The default map interactions: drag to pan, wheel and double-click to
/// zoom, primary click reported as a map event.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pub enabled: bool,
    pub drag_pan: bool,
    pub wheel_zoom: bool,
    pub double_click_zoom: bool,
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            drag_pan: true,
            wheel_zoom: true,
            double_click_zoom: true,
            dragging: false,
        }
    }

    /// A drag gesture is in progress; the click that ends it is swallowed
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle_event(&mut self, event: InputEvent, current_zoom: f64) -> Option<Action> {
        if !self.enabled {
            return None;
        }

        match event {
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } if !self.dragging => Some(Action::Click { pixel: position }),
            InputEvent::Click { .. } => None,
            InputEvent::MouseMove { position } => Some(Action::Pointer {
                pixel: Some(position),
            }),
            InputEvent::MouseLeave => Some(Action::Pointer { pixel: None }),
            InputEvent::DragStart { .. } => {
                self.dragging = self.drag_pan;
                None
            }
            InputEvent::Drag { delta } => self.drag_pan.then_some(Action::Pan { delta }),
            InputEvent::DragEnd => {
                self.dragging = false;
                None
            }
            InputEvent::Scroll { delta, position } => {
                (self.wheel_zoom && delta != 0.0).then(|| Action::Zoom {
                    level: current_zoom + delta * WHEEL_ZOOM_SENSITIVITY,
                    focus_point: Some(position),
                })
            }
            InputEvent::DoubleClick { position } => {
                self.double_click_zoom.then(|| Action::Zoom {
                    level: current_zoom + DEFAULT_ZOOM_DELTA,
                    focus_point: Some(position),
                })
            }
            InputEvent::Resize { size } => Some(Action::Resize { size }),
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
