use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::Deserialize;

/// One of the four compass directions of an axis-aligned plan.
///
/// A wall's direction names the side of its room it bounds, so north and
/// south walls run horizontally and east and west walls run vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// All directions in canonical order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns the direction facing the other way.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Returns `true` for north and south, whose walls run along the X axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// `+1` when moving outward increases the perpendicular coordinate
    /// (north, east), `-1` otherwise.
    #[must_use]
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }

    /// Returns the two directions that terminate a wall facing `self`,
    /// ordered (axis start, axis end).
    #[must_use]
    pub fn wall_ends(self) -> (Self, Self) {
        if self.is_horizontal() {
            (Self::West, Self::East)
        } else {
            (Self::South, Self::North)
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardinalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            _ => Err(s.to_owned()),
        }
    }
}

/// A room corner, used to anchor corner enclosures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Northwest,
    Northeast,
    Southwest,
    Southeast,
}

impl Corner {
    /// The north/south side the corner touches.
    #[must_use]
    pub fn vertical_side(self) -> CardinalDirection {
        match self {
            Self::Northwest | Self::Northeast => CardinalDirection::North,
            Self::Southwest | Self::Southeast => CardinalDirection::South,
        }
    }

    /// The east/west side the corner touches.
    #[must_use]
    pub fn horizontal_side(self) -> CardinalDirection {
        match self {
            Self::Northwest | Self::Southwest => CardinalDirection::West,
            Self::Northeast | Self::Southeast => CardinalDirection::East,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Northwest => "northwest",
            Self::Northeast => "northeast",
            Self::Southwest => "southwest",
            Self::Southeast => "southeast",
        }
    }
}

/// A fixed-size map keyed by [`CardinalDirection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionMap<T> {
    values: [T; 4],
}

impl<T> DirectionMap<T> {
    /// Builds a map by evaluating `f` once per direction.
    pub fn from_fn(mut f: impl FnMut(CardinalDirection) -> T) -> Self {
        Self {
            values: CardinalDirection::ALL.map(&mut f),
        }
    }

    /// Like [`DirectionMap::from_fn`], short-circuiting on the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_from_fn<E>(
        mut f: impl FnMut(CardinalDirection) -> Result<T, E>,
    ) -> Result<Self, E> {
        let [n, s, e, w] = CardinalDirection::ALL;
        Ok(Self {
            values: [f(n)?, f(s)?, f(e)?, f(w)?],
        })
    }

    /// Iterates `(direction, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CardinalDirection, &T)> {
        CardinalDirection::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<CardinalDirection> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: CardinalDirection) -> &T {
        &self.values[direction.index()]
    }
}

impl<T> IndexMut<CardinalDirection> for DirectionMap<T> {
    fn index_mut(&mut self, direction: CardinalDirection) -> &mut T {
        &mut self.values[direction.index()]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("North".parse::<CardinalDirection>().unwrap(), CardinalDirection::North);
        assert!("up".parse::<CardinalDirection>().is_err());
    }

    #[test]
    fn direction_map_indexes_by_direction() {
        let mut map = DirectionMap::from_fn(CardinalDirection::index);
        assert_eq!(map[CardinalDirection::East], 2);
        map[CardinalDirection::East] = 9;
        assert_eq!(map.iter().map(|(_, v)| *v).sum::<usize>(), 13);
    }

    #[test]
    fn corner_sides() {
        assert_eq!(Corner::Southeast.vertical_side(), CardinalDirection::South);
        assert_eq!(Corner::Southeast.horizontal_side(), CardinalDirection::East);
    }
}
