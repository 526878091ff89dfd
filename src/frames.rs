/// Counts subframe loads against the number a page declared.
///
/// Text is only safe to extract once every frame has reported in, whether
/// it loaded or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTracker {
    total: usize,
    completed: usize,
}

impl FrameTracker {
    pub fn new(total: usize) -> Self {
        FrameTracker {
            total,
            completed: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Record one finished frame and report whether the page is now done.
    pub fn record_completion(&mut self) -> bool {
        if self.completed < self.total {
            self.completed += 1;
        }
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}
