use glam::Vec2;

/// Uniform 2D spatial hash grid over a bounded square world for broad-phase queries.
///
/// The world spans `[0, world_diameter)` on both axes and is split into
/// `cells_per_side x cells_per_side` cells. Points outside the world are clamped into
/// the border cells rather than rejected, so every payload is always findable.
///
/// The grid holds no state between collision passes: call [`clear`](Self::clear) and
/// re-[`add`](Self::add) everything each pass. Cell lists keep their allocations.
pub struct SpatialHashGrid<T> {
    cell_size: f32,
    inv_cell_size: f32,
    cells_per_side: usize,
    /// Row-major by x: `cells[x * cells_per_side + y]`.
    cells: Vec<Vec<T>>,
}

impl<T: Copy> SpatialHashGrid<T> {
    /// Create a grid covering `world_diameter` units per side with square cells of `cell_size`.
    /// `cells_per_side = floor(world_diameter / cell_size)`, never less than one.
    pub fn new(world_diameter: f32, cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive, got {}",
            cell_size
        );
        let cells_per_side = ((world_diameter / cell_size).floor() as usize).max(1);
        log::debug!(
            "spatial grid: {}x{} cells of {} units",
            cells_per_side,
            cells_per_side,
            cell_size
        );
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells_per_side,
            cells: (0..cells_per_side * cells_per_side).map(|_| Vec::new()).collect(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    /// Empty every cell, keeping allocations.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
    }

    /// Insert `payload` into the cell containing `point` (clamped into range).
    pub fn add(&mut self, point: Vec2, payload: T) {
        let cx = self.axis_cell(point.x);
        let cy = self.axis_cell(point.y);
        let idx = self.cell_index(cx, cy);
        self.cells[idx].push(payload);
    }

    /// Number of payloads currently stored.
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Visit every payload stored in a cell that overlaps the box spanned by `a` and `b`.
    ///
    /// The corners may be given in any order: per-axis min and max are taken from them.
    /// The lower edge is floored and the upper edge ceiled before conversion to cells,
    /// and both are clamped into the grid independently. The result is over-inclusive;
    /// callers do their own exact distance checks.
    pub fn query_box_with<F: FnMut(T)>(&self, a: Vec2, b: Vec2, mut callback: F) {
        let min = a.min(b);
        let max = a.max(b);
        let min_x = self.axis_cell(min.x.floor());
        let max_x = self.axis_cell(max.x.ceil());
        let min_y = self.axis_cell(min.y.floor());
        let max_y = self.axis_cell(max.y.ceil());

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                for &payload in &self.cells[self.cell_index(x, y)] {
                    callback(payload);
                }
            }
        }
    }

    /// Collecting form of [`query_box_with`](Self::query_box_with).
    pub fn query_box(&self, a: Vec2, b: Vec2) -> Vec<T> {
        let mut found = Vec::new();
        self.query_box_with(a, b, |payload| found.push(payload));
        found
    }

    /// Convert a world coordinate to a cell index clamped into the grid.
    #[inline]
    fn axis_cell(&self, coord: f32) -> usize {
        let cell = (coord * self.inv_cell_size).floor();
        // Negative and NaN coordinates land in cell 0.
        (cell.max(0.0) as usize).min(self.cells_per_side - 1)
    }

    #[inline]
    fn cell_index(&self, cx: usize, cy: usize) -> usize {
        cx * self.cells_per_side + cy
    }
}
