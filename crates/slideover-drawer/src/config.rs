//! Drawer states and layout configuration.

use std::time::Duration;

/// Resting positions of the drawer panel.
///
/// Exactly one is current at any time; it flips only when a transition
/// completes, never mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawerState {
    /// Only the grab handle peeks above the screen edge.
    Collapsed,
    /// The full panel is on screen.
    Expanded,
}

impl DrawerState {
    pub fn opposite(self) -> Self {
        match self {
            DrawerState::Collapsed => DrawerState::Expanded,
            DrawerState::Expanded => DrawerState::Collapsed,
        }
    }
}

/// Layout extents and timing for a drawer, in host units (logical pixels).
///
/// The panel's position is expressed as its visible height: `handle_height`
/// when collapsed, `panel_height` when expanded. The host maps that to a
/// screen-space origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerConfig {
    /// Full extent of the panel when expanded.
    pub panel_height: f32,
    /// Extent of the always-visible grab handle when collapsed.
    pub handle_height: f32,
    /// Duration of a full collapsed<->expanded transition.
    pub duration: Duration,
    /// Corner rounding while expanded.
    pub expanded_corner_radius: f32,
    /// Corner rounding while collapsed (square by default).
    pub collapsed_corner_radius: f32,
}

impl DrawerConfig {
    /// Visible height of the panel when settled in `state`.
    pub fn visible_height(&self, state: DrawerState) -> f32 {
        match state {
            DrawerState::Collapsed => self.handle_height,
            DrawerState::Expanded => self.panel_height,
        }
    }

    /// Corner radius of the panel when settled in `state`.
    pub fn corner_radius(&self, state: DrawerState) -> f32 {
        match state {
            DrawerState::Collapsed => self.collapsed_corner_radius,
            DrawerState::Expanded => self.expanded_corner_radius,
        }
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            panel_height: 560.0,
            handle_height: 60.0,
            duration: Duration::from_secs(1),
            expanded_corner_radius: 20.0,
            collapsed_corner_radius: 0.0,
        }
    }
}
