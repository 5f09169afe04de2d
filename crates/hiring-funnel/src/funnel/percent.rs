use serde::Serialize;
use std::fmt;

/// Whole-number percentage, or not applicable when the denominator was zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Percentage(Option<u32>);

impl Percentage {
    pub const NOT_APPLICABLE: Self = Self(None);

    pub const fn value(self) -> Option<u32> {
        self.0
    }

    pub const fn is_applicable(self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}%"),
            None => f.write_str("n/a"),
        }
    }
}

/// `numerator * 100 / denominator` rounded half-up on the exact ratio.
pub fn percent_of(numerator: usize, denominator: usize) -> Percentage {
    if denominator == 0 {
        return Percentage::NOT_APPLICABLE;
    }

    let numerator = numerator as u64;
    let denominator = denominator as u64;
    let rounded = (numerator * 200 + denominator) / (denominator * 2);
    Percentage(Some(u32::try_from(rounded).unwrap_or(u32::MAX)))
}

/// A count together with its share of some reference population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub count: usize,
    pub percent: Percentage,
}

impl Share {
    pub fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            percent: percent_of(count, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(percent_of(1, 3).value(), Some(33));
        assert_eq!(percent_of(2, 3).value(), Some(67));
        assert_eq!(percent_of(1, 2).value(), Some(50));
        assert_eq!(percent_of(1, 8).value(), Some(13));
        assert_eq!(percent_of(5, 8).value(), Some(63));
        assert_eq!(percent_of(0, 7).value(), Some(0));
        assert_eq!(percent_of(7, 7).value(), Some(100));
    }

    #[test]
    fn zero_denominator_is_not_applicable() {
        let pct = percent_of(3, 0);
        assert!(!pct.is_applicable());
        assert_eq!(pct.to_string(), "n/a");
        assert_eq!(Share::of(0, 0).percent, Percentage::NOT_APPLICABLE);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(percent_of(2, 3).to_string(), "67%");
    }
}
