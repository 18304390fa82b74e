use rand::{distributions::Standard, prelude::Distribution, Rng};

use super::Offset;

/// Playfield entry point for a newly active piece; the top rows sit above
/// the visible window.
pub const SPAWN_POSITION: Offset = Offset::new(4, -2);
/// Off-field display slot for the upcoming piece.
pub const PREVIEW_POSITION: Offset = Offset::new(13, 2);
/// Off-field display slot for the held piece.
pub const HOLD_POSITION: Offset = Offset::new(13, 8);

// all of the types of pieces (by shape)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    O,
    I,
    T,
    L,
    J,
    S,
    Z,
}

impl Kind {
    // static array of all the different variants
    pub const ALL: [Self; 7] = [
        Self::O,
        Self::I,
        Self::T,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
    ];

    /// The cyclic rotation states, in clockwise order.
    pub fn states(&self) -> &'static [Shape] {
        match self {
            Kind::O => &O_STATES,
            Kind::I => &I_STATES,
            Kind::T => &T_STATES,
            Kind::L => &L_STATES,
            Kind::J => &J_STATES,
            Kind::S => &S_STATES,
            Kind::Z => &Z_STATES,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Kind::L => Color::Blue,
            Kind::J => Color::Green,
            Kind::S => Color::Orange,
            Kind::Z => Color::Yellow,
            Kind::T => Color::Red,
            Kind::O => Color::Pink,
            Kind::I => Color::Purple,
        }
    }
}

// this is so we can pick a random kind; uniform with replacement, no bag
impl Distribution<Kind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Kind {
        Kind::ALL[rng.gen_range(0..Kind::ALL.len())]
    }
}

/// Semantic block color; the screen mapping lives in the interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Blue,
    Green,
    Orange,
    Yellow,
    Red,
    Pink,
    Purple,
    Grey,
}

/// One rotation state: a side x side grid of cell markers, 0 for empty.
/// The marker value doubles as the kind's color id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    side: usize,
    cells: &'static [u8],
}

impl Shape {
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn at(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.side && y < self.side);
        self.cells[y * self.side + x]
    }

    /// Local offsets of the filled cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = Offset> + '_ {
        let side = self.side;
        (0..side * side)
            .map(move |index| (index % side, index / side))
            .filter(|&(x, y)| self.at(x, y) > 0)
            .map(|(x, y)| Offset::new(x as isize, y as isize))
    }
}

#[rustfmt::skip]
const L_STATES: [Shape; 4] = [
    Shape { side: 3, cells: &[0, 2, 0,  0, 2, 0,  0, 2, 2] },
    Shape { side: 3, cells: &[0, 0, 0,  2, 2, 2,  2, 0, 0] },
    Shape { side: 3, cells: &[2, 2, 0,  0, 2, 0,  0, 2, 0] },
    Shape { side: 3, cells: &[0, 0, 2,  2, 2, 2,  0, 0, 0] },
];

#[rustfmt::skip]
const J_STATES: [Shape; 4] = [
    Shape { side: 3, cells: &[0, 3, 0,  0, 3, 0,  3, 3, 0] },
    Shape { side: 3, cells: &[3, 0, 0,  3, 3, 3,  0, 0, 0] },
    Shape { side: 3, cells: &[0, 3, 3,  0, 3, 0,  0, 3, 0] },
    Shape { side: 3, cells: &[0, 0, 0,  3, 3, 3,  0, 0, 3] },
];

#[rustfmt::skip]
const S_STATES: [Shape; 2] = [
    Shape { side: 3, cells: &[0, 4, 4,  4, 4, 0,  0, 0, 0] },
    Shape { side: 3, cells: &[4, 0, 0,  4, 4, 0,  0, 4, 0] },
];

#[rustfmt::skip]
const Z_STATES: [Shape; 2] = [
    Shape { side: 3, cells: &[5, 5, 0,  0, 5, 5,  0, 0, 0] },
    Shape { side: 3, cells: &[0, 0, 5,  0, 5, 5,  0, 5, 0] },
];

#[rustfmt::skip]
const T_STATES: [Shape; 4] = [
    Shape { side: 3, cells: &[0, 0, 0,  6, 6, 6,  0, 6, 0] },
    Shape { side: 3, cells: &[0, 6, 0,  6, 6, 0,  0, 6, 0] },
    Shape { side: 3, cells: &[0, 6, 0,  6, 6, 6,  0, 0, 0] },
    Shape { side: 3, cells: &[0, 6, 0,  0, 6, 6,  0, 6, 0] },
];

#[rustfmt::skip]
const O_STATES: [Shape; 1] = [
    Shape { side: 2, cells: &[7, 7,  7, 7] },
];

// the two distinct poses alternate through a four-step cycle
#[rustfmt::skip]
const I_STATES: [Shape; 4] = [
    Shape { side: 4, cells: &[0, 8, 0, 0,  0, 8, 0, 0,  0, 8, 0, 0,  0, 8, 0, 0] },
    Shape { side: 4, cells: &[0, 0, 0, 0,  8, 8, 8, 8,  0, 0, 0, 0,  0, 0, 0, 0] },
    Shape { side: 4, cells: &[0, 8, 0, 0,  0, 8, 0, 0,  0, 8, 0, 0,  0, 8, 0, 0] },
    Shape { side: 4, cells: &[0, 0, 0, 0,  8, 8, 8, 8,  0, 0, 0, 0,  0, 0, 0, 0] },
];

/// A live piece: its kind, rotation state, and the position of its
/// bounding box (top-left, in playfield block coordinates). The y
/// coordinate can be negative while the piece is above the visible area.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub kind: Kind,
    rotation: usize,
    pub position: Offset,
}

impl Piece {
    pub fn new(kind: Kind, position: Offset) -> Self {
        Self {
            kind,
            rotation: 0,
            position,
        }
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn shape(&self) -> &'static Shape {
        &self.kind.states()[self.rotation]
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.states().len();
    }

    // direct revert; cycling forward does not round-trip for two-state pieces
    pub fn rotate_back(&mut self) {
        let count = self.kind.states().len();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Absolute playfield coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = Offset> + '_ {
        let position = self.position;
        self.shape().filled().map(move |local| position + local)
    }
}
