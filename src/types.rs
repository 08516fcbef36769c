use chrono::NaiveDateTime;
use serde::Serialize;

/// One drawing: when it happened, six main numbers and the bonus ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    pub date: Option<NaiveDateTime>,
    pub numbers: [u32; 6],
    pub bonus: u32,
}

impl Draw {
    /// Splits exactly seven ball values into main numbers and bonus.
    pub fn from_balls(date: Option<NaiveDateTime>, balls: &[u32]) -> Option<Self> {
        let [a, b, c, d, e, f, bonus] = balls else {
            return None;
        };
        Some(Draw {
            date,
            numbers: [*a, *b, *c, *d, *e, *f],
            bonus: *bonus,
        })
    }
}

/// Counters for one pass over the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub rows_seen: usize,
    pub missing_date: usize,
    pub wrong_ball_count: usize,
    pub dropped_values: usize,
    pub unparsed_dates: usize,
}

impl ExtractStats {
    pub fn skipped(&self) -> usize {
        self.missing_date + self.wrong_ball_count
    }
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub draws: Vec<Draw>,
    pub stats: ExtractStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub printed: usize,
    pub skipped: usize,
    pub stats: ExtractStats,
}
