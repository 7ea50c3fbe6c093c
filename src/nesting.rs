use crate::error_handling::*;

/// Parenthesis bookkeeping for one statement.
///
/// `open_count` is the number of groups currently open; `checkpoint` is the
/// value `open_count` had when the innermost group was entered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DepthTracker {
    open_count: i32,
    checkpoint: i32,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self{open_count: 0, checkpoint: 0}
    }

    pub fn open(&mut self) {
        self.checkpoint = self.open_count;
        self.open_count += 1;
    }

    pub fn close(&mut self) -> Result<()> {
        self.open_count -= 1;
        if self.checkpoint < self.open_count || self.open_count < 0 {
            return Err(CalcError::unbalanced_parens);
        }
        self.checkpoint = self.open_count;
        Ok(())
    }

    pub fn depth(&self) -> i32 {
        self.open_count
    }

    pub fn is_balanced(&self) -> bool {
        self.open_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_groups_balance() {
        let mut tracker = DepthTracker::new();
        tracker.open();
        tracker.open();
        assert_eq!(tracker.depth(), 2);
        assert!(tracker.close().is_ok());
        assert!(tracker.close().is_ok());
        assert!(tracker.is_balanced());
    }

    #[test]
    fn close_without_open_fails() {
        let mut tracker = DepthTracker::new();
        assert_eq!(tracker.close(), Err(CalcError::unbalanced_parens));
    }

    #[test]
    fn unclosed_group_is_not_balanced() {
        let mut tracker = DepthTracker::new();
        tracker.open();
        assert!(!tracker.is_balanced());
    }
}
