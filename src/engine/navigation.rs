/// Tracks the focused model as a 1-based ordinal clamped to the models
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
}

impl Navigator {
    /// Navigator on model 1.
    #[must_use]
    pub fn new() -> Self {
        Self { current: 1 }
    }

    /// Focused ordinal.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Back to model 1.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Advance. Returns the new ordinal, or `None` at the last model.
    pub fn next(&mut self, count: usize) -> Option<usize> {
        let current = self.current.min(count);
        if current >= count {
            return None;
        }
        self.current = current + 1;
        Some(self.current)
    }

    /// Step back. Returns the new ordinal, or `None` at the first model.
    pub fn previous(&mut self, count: usize) -> Option<usize> {
        let current = self.current.min(count);
        if current <= 1 {
            return None;
        }
        self.current = current - 1;
        Some(self.current)
    }

    /// Jump to `ordinal` if it names a present model.
    pub fn select(&mut self, ordinal: usize, count: usize) -> Option<usize> {
        if (1..=count).contains(&ordinal) {
            self.current = ordinal;
            Some(ordinal)
        } else {
            None
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_both_ends() {
        let mut nav = Navigator::new();
        assert_eq!(nav.previous(3), None);
        assert_eq!(nav.next(3), Some(2));
        assert_eq!(nav.next(3), Some(3));
        assert_eq!(nav.next(3), None);
        assert_eq!(nav.current(), 3);
        assert_eq!(nav.previous(3), Some(2));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select(0, 3), None);
        assert_eq!(nav.select(4, 3), None);
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.select(3, 3), Some(3));
    }

    #[test]
    fn shrinking_model_count_clamps_current() {
        let mut nav = Navigator::new();
        let _ = nav.select(5, 5);
        assert_eq!(nav.next(2), None);
        assert_eq!(nav.previous(2), Some(1));
    }

    #[test]
    fn empty_scene_never_moves() {
        let mut nav = Navigator::new();
        assert_eq!(nav.next(0), None);
        assert_eq!(nav.previous(0), None);
        assert_eq!(nav.select(1, 0), None);
    }
}
