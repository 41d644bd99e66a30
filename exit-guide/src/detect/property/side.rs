use exit_inference::BoundingBox;
use std::fmt::{Display, Formatter};

/// Side of the walking line toward the door on which an obstacle stands.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl Side {
    /// Compares horizontal centers; an obstacle centered exactly on the door counts as right.
    pub fn of(obstacle: &BoundingBox, door: &BoundingBox) -> Self {
        if obstacle.center_x() < door.center_x() {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
