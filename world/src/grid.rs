//! Placement grid built once when the world is created.

use lane_defence_core::{CellCoord, FieldPoint, GridLayout, Rect};

/// Immutable set of playable cells below the status bar.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    layout: GridLayout,
    cells: Vec<(CellCoord, Rect)>,
}

impl Grid {
    pub(crate) fn new(layout: GridLayout) -> Self {
        let cells = layout
            .playable_cells()
            .map(|cell| (cell, layout.cell_bounds(cell)))
            .collect();
        Self { layout, cells }
    }

    pub(crate) const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cells highlighted by the pointer, in row-major order.
    ///
    /// A pointer resting on a shared edge touches every cell along it.
    pub(crate) fn hovered(&self, pointer: Option<FieldPoint>) -> Vec<CellCoord> {
        let Some(pointer) = pointer.map(Rect::pointer) else {
            return Vec::new();
        };
        self.cells
            .iter()
            .filter(|(_, bounds)| bounds.overlaps(&pointer))
            .map(|(cell, _)| *cell)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(GridLayout::new(8, 6, 100.0, 3.0, 1))
    }

    #[test]
    fn grid_excludes_status_bar() {
        let grid = grid();
        assert_eq!(grid.len(), 40);
        assert!(grid.hovered(Some(FieldPoint::new(50.0, 50.0))).is_empty());
    }

    #[test]
    fn hovered_cell_follows_pointer() {
        let grid = grid();
        assert_eq!(
            grid.hovered(Some(FieldPoint::new(350.0, 420.0))),
            vec![CellCoord::new(3, 4)]
        );
        assert!(grid.hovered(None).is_empty());
    }

    #[test]
    fn pointer_on_shared_edge_touches_both_cells() {
        let grid = grid();
        assert_eq!(
            grid.hovered(Some(FieldPoint::new(250.0, 299.95))),
            vec![CellCoord::new(2, 2), CellCoord::new(2, 3)]
        );
        assert_eq!(
            grid.hovered(Some(FieldPoint::new(199.95, 350.0))),
            vec![CellCoord::new(1, 3), CellCoord::new(2, 3)]
        );
    }
}
