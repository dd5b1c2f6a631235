// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// Canonical description of a turn between two edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Straight,
    SlightRight,
    Right,
    SharpRight,
    UTurn,
    SharpLeft,
    Left,
    SlightLeft,
}

impl Turn {
    /// Classifies a turn degree, that is the clockwise difference between
    /// the heading after and before the turn. Values of 360 and more wrap around.
    ///
    /// The buckets are symmetric: `d` and `360 - d` map to mirrored turns.
    pub fn from_degree(turn_degree: u32) -> Self {
        match turn_degree % 360 {
            0..=10 | 350..=359 => Turn::Straight,
            11..=49 => Turn::SlightRight,
            50..=129 => Turn::Right,
            130..=169 => Turn::SharpRight,
            170..=190 => Turn::UTurn,
            191..=230 => Turn::SharpLeft,
            231..=310 => Turn::Left,
            _ => Turn::SlightLeft,
        }
    }

    /// Classifies the turn from travelling at `from_heading` to travelling at `to_heading`.
    pub fn between(from_heading: u32, to_heading: u32) -> Self {
        Self::from_degree(turn_degree(from_heading, to_heading))
    }

    /// Checks if the turn is gentle enough to be followed without an explicit instruction.
    pub fn is_slight(self) -> bool {
        matches!(self, Turn::Straight | Turn::SlightRight | Turn::SlightLeft)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Turn::SlightRight | Turn::Right | Turn::SharpRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Turn::SlightLeft | Turn::Left | Turn::SharpLeft)
    }
}

/// Returns the clockwise difference between two headings, in `[0, 360)`.
pub fn turn_degree(from_heading: u32, to_heading: u32) -> u32 {
    (to_heading % 360 + 360 - from_heading % 360) % 360
}

/// One of the 8 principal compass directions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalDirection {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CardinalDirection {
    pub fn from_heading(heading: u32) -> Self {
        match heading % 360 {
            h if h > 336 || h < 24 => CardinalDirection::North,
            h if h < 67 => CardinalDirection::NorthEast,
            h if h < 114 => CardinalDirection::East,
            h if h < 157 => CardinalDirection::SouthEast,
            h if h < 204 => CardinalDirection::South,
            h if h < 247 => CardinalDirection::SouthWest,
            h if h < 294 => CardinalDirection::West,
            _ => CardinalDirection::NorthWest,
        }
    }

    /// Position of this direction in the clockwise order, starting from north.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        let expected = [
            (0, Turn::Straight),
            (10, Turn::Straight),
            (11, Turn::SlightRight),
            (49, Turn::SlightRight),
            (50, Turn::Right),
            (90, Turn::Right),
            (129, Turn::Right),
            (130, Turn::SharpRight),
            (169, Turn::SharpRight),
            (170, Turn::UTurn),
            (180, Turn::UTurn),
            (190, Turn::UTurn),
            (191, Turn::SharpLeft),
            (230, Turn::SharpLeft),
            (231, Turn::Left),
            (270, Turn::Left),
            (310, Turn::Left),
            (311, Turn::SlightLeft),
            (349, Turn::SlightLeft),
            (350, Turn::Straight),
            (359, Turn::Straight),
            (360, Turn::Straight),
        ];

        for (degree, turn) in expected {
            assert_eq!(Turn::from_degree(degree), turn, "turn degree {}", degree);
        }
    }

    #[test]
    fn buckets_are_symmetric() {
        for d in 1..360 {
            let right = Turn::from_degree(d);
            let left = Turn::from_degree(360 - d);
            let mirrored = match right {
                Turn::Straight => Turn::Straight,
                Turn::SlightRight => Turn::SlightLeft,
                Turn::Right => Turn::Left,
                Turn::SharpRight => Turn::SharpLeft,
                Turn::UTurn => Turn::UTurn,
                Turn::SharpLeft => Turn::SharpRight,
                Turn::Left => Turn::Right,
                Turn::SlightLeft => Turn::SlightRight,
            };
            assert_eq!(left, mirrored, "turn degree {}", d);
        }
    }

    #[test]
    fn turn_between_headings() {
        assert_eq!(turn_degree(350, 80), 90);
        assert_eq!(turn_degree(80, 350), 270);
        assert_eq!(turn_degree(0, 0), 0);
        assert_eq!(Turn::between(350, 80), Turn::Right);
        assert_eq!(Turn::between(80, 350), Turn::Left);
        assert_eq!(Turn::between(90, 270), Turn::UTurn);
    }

    #[test]
    fn cardinal_directions() {
        assert_eq!(CardinalDirection::from_heading(0), CardinalDirection::North);
        assert_eq!(CardinalDirection::from_heading(23), CardinalDirection::North);
        assert_eq!(CardinalDirection::from_heading(24), CardinalDirection::NorthEast);
        assert_eq!(CardinalDirection::from_heading(90), CardinalDirection::East);
        assert_eq!(CardinalDirection::from_heading(140), CardinalDirection::SouthEast);
        assert_eq!(CardinalDirection::from_heading(180), CardinalDirection::South);
        assert_eq!(CardinalDirection::from_heading(225), CardinalDirection::SouthWest);
        assert_eq!(CardinalDirection::from_heading(270), CardinalDirection::West);
        assert_eq!(CardinalDirection::from_heading(300), CardinalDirection::NorthWest);
        assert_eq!(CardinalDirection::from_heading(336), CardinalDirection::NorthWest);
        assert_eq!(CardinalDirection::from_heading(337), CardinalDirection::North);
        assert_eq!(CardinalDirection::NorthWest.index(), 7);
    }
}
