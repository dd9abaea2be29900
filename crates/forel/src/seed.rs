/// Picks the point a mean-shift run starts from.
///
/// `remaining` holds the indices of the unassigned points, sorted ascending and
/// never empty. The returned index must be one of them.
pub trait SeedPolicy {
    fn seed(&self, remaining: &[usize]) -> usize;
}

/// Always starts from the first remaining point, which makes cluster ids
/// follow input order.
#[derive(Debug, Copy, Clone, Default)]
pub struct FirstRemaining;

impl SeedPolicy for FirstRemaining {
    #[inline]
    fn seed(&self, remaining: &[usize]) -> usize {
        remaining[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_remaining() {
        assert_eq!(FirstRemaining.seed(&[3, 7, 9]), 3);
        assert_eq!(FirstRemaining.seed(&[12]), 12);
    }
}
