use crate::grid::{Block, Cell, Grid, PieceId};
use crate::shape::{ShapeKind, ROTATION_STATES};

// ============================================================================
// Movement
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(self) -> (i16, i16) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
        }
    }
}

// ============================================================================
// Piece
// ============================================================================

/// The active tetromino. Its four blocks live in the grid while it falls;
/// every successful move or rotation transfers them atomically to the new
/// cells. A rejected downward move locks the piece for good.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    id: PieceId,
    kind: ShapeKind,
    anchor: Cell,
    rotation: usize,
    locked: bool,
}

impl Piece {
    /// Places a new piece at `anchor` with rotation 0. Returns `None`
    /// without touching the grid if any cell of the placement is illegal.
    pub fn spawn(grid: &mut Grid, id: PieceId, kind: ShapeKind, anchor: Cell) -> Option<Self> {
        let piece = Self {
            id,
            kind,
            anchor,
            rotation: 0,
            locked: false,
        };
        if !piece.fits(grid, &piece.cells()) {
            return None;
        }
        piece.store(grid);
        Some(piece)
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The four cells the piece currently occupies. Cells above the top
    /// row are part of the shape but carry no grid occupancy.
    pub fn cells(&self) -> [Cell; 4] {
        self.cells_at(self.anchor, self.rotation)
    }

    fn cells_at(&self, anchor: Cell, rotation: usize) -> [Cell; 4] {
        self.kind
            .offsets(rotation)
            .map(|(dx, dy)| anchor.offset(dx, dy))
    }

    /// Validity rule shared by moves and rotations: every cell must sit
    /// inside the side walls and above the floor, and must be in the free
    /// zone above the grid, empty, or already owned by this piece. One bad
    /// cell rejects the whole placement.
    fn fits(&self, grid: &Grid, cells: &[Cell; 4]) -> bool {
        cells.iter().all(|&cell| {
            if !grid.is_inside(cell) {
                return false;
            }
            if cell.y >= grid.height() {
                return true;
            }
            match grid.get(cell) {
                None => true,
                Some(block) => block.owner == self.id,
            }
        })
    }

    fn store(&self, grid: &mut Grid) {
        for cell in self.cells() {
            grid.set(
                cell,
                Block {
                    owner: self.id,
                    kind: self.kind,
                },
            );
        }
    }

    /// One step in `direction`. A rejected downward step locks the piece:
    /// no further move or rotation is accepted after that.
    pub fn try_move(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        if self.locked {
            return false;
        }
        let (dx, dy) = direction.delta();
        let moved = self.try_place(grid, self.anchor.offset(dx, dy), self.rotation);
        if !moved && direction == Direction::Down {
            self.locked = true;
        }
        moved
    }

    /// Clockwise rotation around the anchor, accepted or rejected as-is
    /// with no kick searching. O is symmetric under rotation, so there is
    /// nothing to re-check.
    pub fn try_rotate(&mut self, grid: &mut Grid) -> bool {
        if self.locked {
            return false;
        }
        if self.kind == ShapeKind::O {
            return true;
        }
        self.try_place(grid, self.anchor, (self.rotation + 1) % ROTATION_STATES)
    }

    fn try_place(&mut self, grid: &mut Grid, anchor: Cell, rotation: usize) -> bool {
        let candidate = self.cells_at(anchor, rotation);
        if !self.fits(grid, &candidate) {
            return false;
        }
        for cell in self.cells() {
            grid.clear(cell);
        }
        self.anchor = anchor;
        self.rotation = rotation;
        self.store(grid);
        true
    }
}
