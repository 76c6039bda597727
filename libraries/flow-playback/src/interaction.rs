//! Per-control drag tracking
//!
//! While the user drags a slider, the transport keeps reporting its own
//! position/volume. Those echoes must not yank the slider out from under
//! the pointer, so each control remembers whether it is being dragged.

/// Displayed value of one slider plus its drag state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInteraction {
    value: u64,
    dragging: bool,
}

impl ControlInteraction {
    /// Control showing `value`, not dragged
    pub fn new(value: u64) -> Self {
        Self {
            value,
            dragging: false,
        }
    }

    /// User pressed the slider
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// User moved the slider
    pub fn drag_to(&mut self, value: u64) {
        self.value = value;
    }

    /// User released the slider
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Apply a transport echo; ignored while dragging
    ///
    /// Returns whether the displayed value was updated.
    pub fn apply_echo(&mut self, value: u64) -> bool {
        if self.dragging {
            return false;
        }
        self.value = value;
        true
    }

    /// Force the displayed value regardless of drag state
    pub fn reset(&mut self, value: u64) {
        self.value = value;
        self.dragging = false;
    }

    /// Value the control shows
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Check if the user is dragging this control
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
