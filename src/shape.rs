use rand::Rng;

// ============================================================================
// Shape kinds
// ============================================================================

/// The seven canonical tetromino kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Discrete rotation states: 0°, 90°, 180°, 270° clockwise.
pub const ROTATION_STATES: usize = 4;

impl ShapeKind {
    /// Block offsets relative to the anchor at rotation 0. The y axis
    /// points up, matching the grid (row 0 is the bottom row).
    pub fn base_offsets(self) -> [(i16, i16); 4] {
        match self {
            ShapeKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            ShapeKind::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            ShapeKind::S => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            ShapeKind::Z => [(0, 0), (1, 0), (-1, 1), (0, 1)],
            ShapeKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            ShapeKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        }
    }

    /// Block offsets at the given rotation state. Each step turns the base
    /// offsets 90° clockwise around the anchor; O is rotation-symmetric and
    /// ignores the state.
    pub fn offsets(self, rotation: usize) -> [(i16, i16); 4] {
        let mut cells = self.base_offsets();
        if self == ShapeKind::O {
            return cells;
        }
        for _ in 0..(rotation % ROTATION_STATES) {
            for cell in &mut cells {
                *cell = (cell.1, -cell.0);
            }
        }
        cells
    }

    fn random() -> Self {
        let mut rng = rand::thread_rng();
        match rng.gen_range(0..7) {
            0 => ShapeKind::I,
            1 => ShapeKind::O,
            2 => ShapeKind::T,
            3 => ShapeKind::S,
            4 => ShapeKind::Z,
            5 => ShapeKind::J,
            _ => ShapeKind::L,
        }
    }
}

// ============================================================================
// Shape sources
// ============================================================================

/// Where the next shape comes from. The game draws through this seam so
/// tests can script an exact sequence.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform draw over the seven kinds.
pub struct RandomSource;

impl ShapeSource for RandomSource {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::random()
    }
}

/// Cycles through a fixed list of kinds.
pub struct SequenceSource {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl SequenceSource {
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        Self { shapes, index: 0 }
    }
}

impl ShapeSource for SequenceSource {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}
