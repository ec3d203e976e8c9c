// Directional input tokens shared by every input surface.

/// One of the four logical movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Error for direction tokens outside the closed set. Unknown tokens are
/// rejected before any state mutation so they never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedDirection {
    pub token: String,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Parses a bare direction token.
    pub fn parse(token: &str) -> Result<Direction, UnsupportedDirection> {
        match token {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(UnsupportedDirection {
                token: other.to_string(),
            }),
        }
    }

    /// Parses an on-screen control name ("left-arrow" style) or a bare token.
    pub fn from_control_name(name: &str) -> Result<Direction, UnsupportedDirection> {
        let token = name.strip_suffix("-arrow").unwrap_or(name);
        Direction::parse(token).map_err(|_| UnsupportedDirection {
            token: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_known_tokens() {
        for direction in Direction::ALL {
            assert_eq!(Direction::parse(direction.as_str()), Ok(direction));
        }
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = Direction::parse("forward").unwrap_err();
        assert_eq!(err.token, "forward");
    }

    #[test]
    fn accepts_arrow_control_names() {
        assert_eq!(
            Direction::from_control_name("left-arrow"),
            Ok(Direction::Left)
        );
        assert_eq!(Direction::from_control_name("up"), Ok(Direction::Up));
    }

    #[test]
    fn reports_the_full_control_name_on_failure() {
        let err = Direction::from_control_name("fire-arrow").unwrap_err();
        assert_eq!(err.token, "fire-arrow");
    }
}
