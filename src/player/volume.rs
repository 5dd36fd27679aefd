use ratatui::layout::{Position, Rect};

use crate::audio::Volume;

/// Pointer capture for the volume bar.
///
/// A press inside the bar starts capture and applies the volume under the
/// pointer. While captured, every move updates the volume even when the
/// pointer has left the bar. Release ends capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VolumeDrag {
    #[default]
    Idle,
    Dragging { bar: Rect },
}

impl VolumeDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, VolumeDrag::Dragging { .. })
    }

    pub fn press(&mut self, column: u16, row: u16, bar: Rect) -> Option<Volume> {
        if bar.width == 0 || !bar.contains(Position::new(column, row)) {
            return None;
        }
        *self = VolumeDrag::Dragging { bar };
        Some(volume_at(column, bar))
    }

    pub fn move_to(&mut self, column: u16) -> Option<Volume> {
        match *self {
            VolumeDrag::Dragging { bar } => Some(volume_at(column, bar)),
            VolumeDrag::Idle => None,
        }
    }

    /// End capture. Returns whether a drag was in progress.
    pub fn release(&mut self) -> bool {
        let was = self.is_dragging();
        *self = VolumeDrag::Idle;
        was
    }
}

/// Volume for a pointer at `column` over `bar`: the left edge is 0, the
/// right edge 100, anything beyond either edge is clamped.
pub fn volume_at(column: u16, bar: Rect) -> Volume {
    if bar.width <= 1 {
        return if column >= bar.x { Volume::MAX } else { Volume::new(0) };
    }
    let offset = i32::from(column) - i32::from(bar.x);
    let span = i32::from(bar.width) - 1;
    Volume::from_i32((offset * 100 + span / 2) / span)
}
