use crate::Topology;

/// Compass offsets `(d_row, d_col)` in the order N, S, E, W, NE, NW, SE, SW.
const OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

/// Up to eight neighbor indices of a cell, in compass order.
///
/// Under [`Topology::Torus`] there are always exactly eight entries; on
/// grids narrower than three cells some of them repeat or point back at
/// the cell itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    indices: [usize; 8],
    len: usize,
}

impl Neighbors {
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Moves `pos` by `delta` along an axis of length `len`.
fn shift(pos: usize, delta: isize, len: usize, topology: Topology) -> Option<usize> {
    match topology {
        Topology::Torus => Some(match delta {
            -1 if pos == 0 => len - 1,
            1 if pos + 1 == len => 0,
            _ => pos.wrapping_add_signed(delta),
        }),
        Topology::Bounded => pos.checked_add_signed(delta).filter(|&moved| moved < len),
    }
}

/// Indices of the cells surrounding `index` in a row-major `rows x cols` grid.
///
/// Returns no neighbors when `index` is not a cell of such a grid, which
/// includes every index when `rows` or `cols` is zero.
pub fn neighbor_indices(index: usize, rows: usize, cols: usize, topology: Topology) -> Neighbors {
    let mut result = Neighbors {
        indices: [0; 8],
        len: 0,
    };
    if cols == 0 || index / cols >= rows {
        return result;
    }
    let row = index / cols;
    let col = index - row * cols;

    for (dr, dc) in OFFSETS {
        let (Some(r), Some(c)) = (
            shift(row, dr, rows, topology),
            shift(col, dc, cols, topology),
        ) else {
            continue;
        };
        result.indices[result.len] = r * cols + c;
        result.len += 1;
    }
    result
}
