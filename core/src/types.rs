/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for monster counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Signed `(dx, dy)` displacement relative to a cell.
pub type Offset = (i8, i8);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The eight surrounding displacements, diagonals included.
pub const NEIGHBOR_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub fn apply_offset(coords: Coord2, delta: Offset, bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Converts a signed position back into board coordinates when it lies inside `bounds`.
pub fn signed_to_coords((x, y): (i16, i16), (max_x, max_y): Coord2) -> Option<Coord2> {
    let x = Coord::try_from(x).ok()?;
    let y = Coord::try_from(y).ok()?;
    (x < max_x && y < max_y).then_some((x, y))
}
