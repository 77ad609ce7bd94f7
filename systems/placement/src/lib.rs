#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement controller that turns pointer clicks into defender placement commands.

use lane_defence_core::{CellCoord, Command, GridLayout, PointerInput};

/// Placement controller bound to a fixed grid layout.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    layout: GridLayout,
}

impl Placement {
    /// Creates a placement controller for the provided layout.
    #[must_use]
    pub const fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    /// Cell a click at the pointer position would target, if it is placeable.
    ///
    /// Clicks on the status bar and outside the grid resolve to `None`.
    #[must_use]
    pub fn target(&self, input: PointerInput) -> Option<CellCoord> {
        let cell = self.layout.cell_at(input.position?)?;
        if self.layout.is_reserved(cell) {
            return None;
        }
        Some(cell)
    }

    /// Emits a placement command for a click on a free playable cell.
    ///
    /// The `occupied` closure should mirror the world's `query::defender_at`
    /// helper so repeat clicks on a taken cell stay silent.
    pub fn handle<F>(&self, input: PointerInput, mut occupied: F, out: &mut Vec<Command>)
    where
        F: FnMut(CellCoord) -> bool,
    {
        if !input.clicked {
            return;
        }

        let Some(cell) = self.target(input) else {
            return;
        };

        if occupied(cell) {
            return;
        }

        out.push(Command::PlaceDefender { cell });
    }
}
