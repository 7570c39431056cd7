use crate::geometry::Point;

/// Pointer interaction with the plotted markers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering {
        /// Index into the view's point sequence
        index: usize,
        /// Top-left corner of the tooltip, offset from the pointer so it does
        /// not sit under the cursor
        tooltip_at: Point,
    },
}

impl HoverState {
    pub fn enter(&mut self, index: usize, pointer: Point, offset: f64) {
        *self = HoverState::Hovering {
            index,
            tooltip_at: pointer.offset(offset),
        };
    }

    pub fn leave(&mut self) {
        *self = HoverState::Idle;
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { index, .. } => Some(*index),
        }
    }

    pub fn tooltip_at(&self) -> Option<Point> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { tooltip_at, .. } => Some(*tooltip_at),
        }
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self, HoverState::Hovering { .. })
    }
}
