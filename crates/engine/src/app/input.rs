use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    ButtonDown,
    ButtonUp,
}

/// `Release` is reported for every button-up, whichever button it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    None,
    Left,
    Middle,
    Right,
    Release,
}

/// Pointer event in grid-cell screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    pub position: Point,
}

impl PointerEvent {
    pub fn moved(position: Point) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: PointerButton::None,
            position,
        }
    }

    pub fn pressed(button: PointerButton, position: Point) -> Self {
        Self {
            kind: PointerEventKind::ButtonDown,
            button,
            position,
        }
    }

    pub fn released(position: Point) -> Self {
        Self {
            kind: PointerEventKind::ButtonUp,
            button: PointerButton::Release,
            position,
        }
    }
}
