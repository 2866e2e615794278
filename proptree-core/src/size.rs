//! Size parameter (part of C10).
//!
//! Size is the budget the runner hands to a generator for "how big" a
//! structure may be; combinators like `list`/`string` interpret it, they
//! don't interpret it themselves.

use std::fmt;

/// The size parameter, always `>= 1` once clamped by [`Size::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(pub i64);

impl Size {
    pub fn new(value: i64) -> Self {
        Size(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// `max(1, size)`, the clamp every `Random::run` call applies.
    pub fn clamped(self) -> Self {
        Size(self.0.max(1))
    }

    /// Advance the 1..`ceiling` cycle, wrapping back to `1` once `ceiling`
    /// is reached.
    pub fn cycle_next(self, ceiling: i64) -> Self {
        if self.0 >= ceiling {
            Size(1)
        } else {
            Size(self.0 + 1)
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Size(((self.0 as f64) * factor).round() as i64)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Size {
    fn from(value: i64) -> Self {
        Size(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_at_ceiling() {
        assert_eq!(Size(100).cycle_next(100), Size(1));
        assert_eq!(Size(99).cycle_next(100), Size(100));
        assert_eq!(Size(1).cycle_next(100), Size(2));
    }

    #[test]
    fn cycle_respects_a_lower_ceiling() {
        assert_eq!(Size(50).cycle_next(50), Size(1));
        assert_eq!(Size(49).cycle_next(50), Size(50));
    }

    #[test]
    fn clamp_floors_at_one() {
        assert_eq!(Size(0).clamped(), Size(1));
        assert_eq!(Size(-5).clamped(), Size(1));
        assert_eq!(Size(50).clamped(), Size(50));
    }
}
