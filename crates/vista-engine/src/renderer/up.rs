use std::fmt;
use std::str::FromStr;

use glam::DVec3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Scene up direction, written `[+|-]X|Y|Z`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UpDirection {
    pub axis: Axis,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid up direction {0:?}, expected [+|-]X, Y or Z")]
pub struct InvalidUpDirection(pub String);

impl Default for UpDirection {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            positive: true,
        }
    }
}

impl UpDirection {
    pub fn vector(self) -> DVec3 {
        let v = match self.axis {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        };
        if self.positive { v } else { -v }
    }

    /// Side the default camera looks at the scene from.
    pub fn front(self) -> DVec3 {
        match self.axis {
            Axis::Z => DVec3::NEG_Y,
            Axis::X | Axis::Y => DVec3::Z,
        }
    }
}

impl FromStr for UpDirection {
    type Err = InvalidUpDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (positive, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (true, &trimmed[1..]),
            Some(b'-') => (false, &trimmed[1..]),
            _ => (true, trimmed),
        };

        let axis = match rest {
            "X" | "x" => Axis::X,
            "Y" | "y" => Axis::Y,
            "Z" | "z" => Axis::Z,
            _ => return Err(InvalidUpDirection(s.to_string())),
        };

        Ok(Self { axis, positive })
    }
}

impl fmt::Display for UpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        let axis = match self.axis {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        };
        write!(f, "{sign}{axis}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_axes() {
        assert_eq!("+Z".parse::<UpDirection>().unwrap().vector(), DVec3::Z);
        assert_eq!("-y".parse::<UpDirection>().unwrap().vector(), DVec3::NEG_Y);
        assert_eq!("X".parse::<UpDirection>().unwrap().vector(), DVec3::X);
    }

    #[test]
    fn rejects_garbage() {
        assert!("up".parse::<UpDirection>().is_err());
        assert!("+W".parse::<UpDirection>().is_err());
        assert!("".parse::<UpDirection>().is_err());
    }

    #[test]
    fn front_is_orthogonal_to_up() {
        for s in ["+X", "-X", "+Y", "-Y", "+Z", "-Z"] {
            let up: UpDirection = s.parse().unwrap();
            assert_eq!(up.vector().dot(up.front()), 0.0, "{s}");
        }
    }

    #[test]
    fn display_round_trips() {
        let up: UpDirection = "-z".parse().unwrap();
        assert_eq!(up.to_string(), "-Z");
    }
}
