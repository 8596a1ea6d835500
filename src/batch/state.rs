/// Running counters for one batch.
///
/// A new value is produced for every processed row; `success_count +
/// error_count` never exceeds `total_rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchState {
    pub total_rows: usize,
    pub processed_rows: usize,
    pub success_count: usize,
    pub error_count: usize,
}

impl BatchState {
    pub fn new(total_rows: usize) -> Self {
        BatchState {
            total_rows,
            ..Default::default()
        }
    }

    /// Counts one more row. Rows past `total_rows` are ignored.
    #[must_use]
    pub fn record(self, succeeded: bool) -> Self {
        if self.processed_rows >= self.total_rows {
            return self;
        }
        BatchState {
            processed_rows: self.processed_rows + 1,
            success_count: self.success_count + usize::from(succeeded),
            error_count: self.error_count + usize::from(!succeeded),
            ..self
        }
    }

    /// Percentage of rows processed, rounded half up. An empty batch is
    /// complete.
    pub fn progress(&self) -> u8 {
        if self.total_rows == 0 {
            return 100;
        }
        ((200 * self.processed_rows + self.total_rows) / (2 * self.total_rows)) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.processed_rows == self.total_rows
    }
}
