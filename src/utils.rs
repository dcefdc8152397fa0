use std::fmt;

/// Row/column coordinate on the grid, `i` is the row and `j` the column.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Default)]
pub struct Pos {
    pub i: usize,
    pub j: usize,
}

#[macro_export]
macro_rules! pos {
    ($i:expr, $j:expr) => {
        $crate::Pos { i: $i, j: $j }
    };
}

impl Pos {
    /// moves by `(di, dj)`, wrapping around a `width` x `height` torus.
    pub fn offset(self, di: isize, dj: isize, width: usize, height: usize) -> Self {
        pos!(wrap(self.i, di, height), wrap(self.j, dj, width))
    }

    pub fn index(self, width: usize) -> usize {
        self.i * width + self.j
    }

    pub fn from_index(index: usize, width: usize) -> Self {
        pos!(index / width, index % width)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

pub fn wrap(n: usize, delta: isize, dim: usize) -> usize {
    let dim = dim as isize;
    ((n as isize + delta) % dim + dim) as usize % dim as usize
}

/// previous coordinate on a wrapping axis of length `dim`.
pub fn prev(x: usize, dim: usize) -> usize {
    if x > 0 {
        x - 1
    } else {
        dim - 1
    }
}

/// next coordinate on a wrapping axis of length `dim`.
pub fn next(x: usize, dim: usize) -> usize {
    if x < dim - 1 {
        x + 1
    } else {
        0
    }
}

#[test]
fn test_wrap() {
    assert_eq!(wrap(0, -1, 10), 9);
    assert_eq!(wrap(9, 1, 10), 0);
    assert_eq!(wrap(5, 0, 10), 5);
    assert_eq!(wrap(0, -11, 10), 9);
    assert_eq!(wrap(3, 24, 10), 7);
}

#[test]
fn test_prev_next() {
    assert_eq!(prev(0, 4), 3);
    assert_eq!(prev(3, 4), 2);
    assert_eq!(next(3, 4), 0);
    assert_eq!(next(0, 4), 1);
    for x in 0..4 {
        assert_eq!(prev(x, 4), wrap(x, -1, 4));
        assert_eq!(next(x, 4), wrap(x, 1, 4));
    }
}

#[test]
fn test_index_roundtrip() {
    let p = pos!(3, 7);
    assert_eq!(p.index(10), 37);
    assert_eq!(Pos::from_index(37, 10), p);
    assert_eq!(p.offset(-4, 5, 10, 5), pos!(4, 2));
}
