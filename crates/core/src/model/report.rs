use chrono::{DateTime, Utc};

use crate::model::feedback::Feedback;

/// Final score for a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    score: usize,
    total: usize,
    percentage: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    history: Vec<Feedback>,
}

impl ScoreReport {
    /// Build a report from the session's feedback history.
    #[must_use]
    pub fn from_history(
        history: &[Feedback],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let score = history.iter().filter(|f| f.is_correct()).count();
        let total = history.len();

        Self {
            score,
            total,
            percentage: rounded_percentage(score, total),
            started_at,
            finished_at,
            history: history.to_vec(),
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `round(100 * score / total)`, half rounded up.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    #[must_use]
    pub fn history(&self) -> &[Feedback] {
        &self.history
    }
}

fn rounded_percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}
