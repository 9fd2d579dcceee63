use dioxus::prelude::*;

use crate::vm::{FeedbackCardVm, FeedbackVm};

#[component]
pub fn FeedbackList(feedback: FeedbackVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        section { class: "feedback",
            div { class: "feedback-summary",
                h2 { "Feedback" }
                p { class: "feedback-summary__score", "Score: {feedback.score_label}" }
                p { class: "feedback-summary__percentage", "{feedback.percentage_label}" }
                p { class: "feedback-card__meta",
                    "Finished {feedback.finished_at_str} in {feedback.elapsed_str}"
                }
            }
            for card in feedback.cards {
                FeedbackCard { card }
            }
            div { class: "feedback-actions",
                button {
                    class: "btn btn-primary",
                    id: "feedback-restart",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Try Again"
                }
            }
        }
    }
}

#[component]
fn FeedbackCard(card: FeedbackCardVm) -> Element {
    let class = if card.is_correct {
        "feedback-card"
    } else {
        "feedback-card feedback-card--wrong"
    };

    rsx! {
        article { class: "{class}",
            h3 { class: "feedback-card__title", "Q{card.number}: {card.question}" }
            p { "Your answer: {card.your_answer}" }
            if let Some(correct) = card.correct_answer.as_deref() {
                p { class: "feedback-card__correct", "Correct: {correct}" }
            }
            if card.timed_out {
                p { class: "feedback-card__meta", "Time ran out" }
            }
        }
    }
}
