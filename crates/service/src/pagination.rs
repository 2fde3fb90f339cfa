//! List limit helper for service layer
//!
//! The product listing accepts a raw `limit` from the query string; only a
//! positive value truncates the result.

/// Optional `limit` as received from a caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limit(pub Option<i64>);

impl Limit {
    /// `Some(n)` for a positive limit, `None` means "everything".
    pub fn normalize(self) -> Option<usize> {
        match self.0 {
            Some(n) if n > 0 => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            _ => None,
        }
    }
}

impl From<Option<i64>> for Limit {
    fn from(raw: Option<i64>) -> Self { Self(raw) }
}

#[cfg(test)]
mod tests {
    use super::Limit;

    #[test]
    fn positive_limit_is_kept() {
        assert_eq!(Limit(Some(2)).normalize(), Some(2));
    }

    #[test]
    fn zero_negative_and_missing_mean_unlimited() {
        assert_eq!(Limit(Some(0)).normalize(), None);
        assert_eq!(Limit(Some(-3)).normalize(), None);
        assert_eq!(Limit(None).normalize(), None);
        assert_eq!(Limit::default().normalize(), None);
    }
}
