use quiz_core::model::{AdvanceTrigger, Feedback, ScoreReport};

use crate::vm::time_fmt::{format_datetime, format_elapsed};

const EMPTY_SLOT_LABEL: &str = "(blank)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackCardVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    /// `None` when the answer was right.
    pub correct_answer: Option<String>,
    pub is_correct: bool,
    pub timed_out: bool,
}

impl FeedbackCardVm {
    fn from_feedback(number: usize, feedback: &Feedback) -> Self {
        let your_answer = feedback
            .selected()
            .iter()
            .map(|word| word.as_deref().unwrap_or(EMPTY_SLOT_LABEL))
            .collect::<Vec<_>>()
            .join(", ");
        let correct_answer =
            (!feedback.is_correct()).then(|| feedback.correct().join(", "));

        Self {
            number,
            question: feedback.question_text().to_string(),
            your_answer,
            correct_answer,
            is_correct: feedback.is_correct(),
            timed_out: feedback.trigger() == AdvanceTrigger::TimeUp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub score_label: String,
    pub percentage_label: String,
    pub finished_at_str: String,
    pub elapsed_str: String,
    pub cards: Vec<FeedbackCardVm>,
}

#[must_use]
pub fn map_feedback(report: &ScoreReport) -> FeedbackVm {
    let cards = report
        .history()
        .iter()
        .enumerate()
        .map(|(i, feedback)| FeedbackCardVm::from_feedback(i + 1, feedback))
        .collect();

    FeedbackVm {
        score_label: format!("{} / {}", report.score(), report.total()),
        percentage_label: format!("{}%", report.percentage()),
        finished_at_str: format_datetime(report.finished_at()),
        elapsed_str: format_elapsed(report.started_at(), report.finished_at()),
        cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::QuestionId;
    use quiz_core::time::fixed_now;

    fn feedback(selected: Vec<Option<String>>, trigger: AdvanceTrigger) -> Feedback {
        Feedback::grade(
            QuestionId::new("q"),
            "The _____________ is _____________.",
            selected,
            vec!["sky".to_string(), "blue".to_string()],
            trigger,
        )
    }

    #[test]
    fn maps_cards_and_score() {
        let history = vec![
            feedback(
                vec![Some("sky".to_string()), Some("blue".to_string())],
                AdvanceTrigger::Manual,
            ),
            feedback(vec![Some("blue".to_string()), None], AdvanceTrigger::TimeUp),
        ];
        let report = ScoreReport::from_history(
            &history,
            fixed_now(),
            fixed_now() + Duration::seconds(65),
        );
        let vm = map_feedback(&report);

        assert_eq!(vm.score_label, "1 / 2");
        assert_eq!(vm.percentage_label, "50%");
        assert_eq!(vm.elapsed_str, "1m 05s");
        assert_eq!(vm.cards.len(), 2);

        let first = &vm.cards[0];
        assert_eq!(first.number, 1);
        assert!(first.is_correct);
        assert_eq!(first.your_answer, "sky, blue");
        assert_eq!(first.correct_answer, None);

        let second = &vm.cards[1];
        assert!(!second.is_correct);
        assert!(second.timed_out);
        assert_eq!(second.your_answer, "blue, (blank)");
        assert_eq!(second.correct_answer.as_deref(), Some("sky, blue"));
    }
}
