use dioxus::prelude::*;
use dioxus_router::Link;
use futures::StreamExt;
use services::{OptionView, QuizSnapshot, SentenceView};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::feedback::FeedbackList;
use crate::views::{ViewError, ViewState};
use crate::vm::{QuizIntent, map_feedback, progress_label, start_quiz, timer_label};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const LOW_TIME_SECS: u32 = 5;
const EMPTY_BLANK_LABEL: &str = "_____";

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let state = use_signal(|| ViewState::Loading);
    let error = use_signal(|| None::<ViewError>);
    let snapshot = use_signal(|| None::<QuizSnapshot>);

    // Owns the runner for one quiz. Restarting drops it, which stops its countdown.
    let driver = use_coroutine(move |mut intents: UnboundedReceiver<QuizIntent>| {
        let quiz_loop = quiz_loop.clone();
        let mut state = state;
        let mut error = error;
        let mut snapshot = snapshot;

        async move {
            state.set(ViewState::Loading);
            let mut quiz = match start_quiz(&quiz_loop).await {
                Ok(quiz) => quiz,
                Err(err) => {
                    state.set(ViewState::Error(err));
                    return;
                }
            };
            let mut updates = quiz.subscribe();
            snapshot.set(Some(updates.borrow_and_update().clone()));
            error.set(None);
            state.set(ViewState::Ready);

            while !quiz.is_finished() {
                tokio::select! {
                    intent = intents.next() => {
                        let Some(intent) = intent else {
                            break;
                        };
                        match quiz.apply(intent) {
                            Ok(_) => error.set(None),
                            Err(err) => {
                                tracing::warn!(?intent, ?err, "quiz intent rejected");
                                error.set(Some(err));
                            }
                        }
                    }
                    Some(tick) = quiz.next_tick() => {
                        if let Err(err) = quiz.apply_tick(tick) {
                            error.set(Some(err));
                        }
                    }
                }
                if updates.has_changed().unwrap_or(false) {
                    snapshot.set(Some(updates.borrow_and_update().clone()));
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(driver, snapshot);
            }
        }
    }

    let on_restart = use_callback(move |()| {
        let mut driver = driver;
        let mut state = state;
        let mut error = error;
        let mut snapshot = snapshot;
        snapshot.set(None);
        error.set(None);
        state.set(ViewState::Loading);
        driver.restart();
    });
    let on_intent = use_callback(move |intent: QuizIntent| driver.send(intent));

    let state = state();
    let current_error = error();
    let snapshot = snapshot();
    let (progress, time_left) = snapshot
        .as_ref()
        .map(|snapshot| (progress_label(snapshot), timer_label(snapshot)))
        .unwrap_or_default();
    let timer_class = match snapshot.as_ref() {
        Some(snapshot) if snapshot.seconds_remaining <= LOW_TIME_SECS => {
            "quiz-timer quiz-timer--low"
        }
        _ => "quiz-timer",
    };

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err != ViewError::EmptyQuiz {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_restart.call(()),
                            "Retry"
                        }
                    }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back" }
                },
                ViewState::Ready => rsx! {
                    if let Some(err) = current_error {
                        div { class: "quiz-error",
                            p { "{err.message()}" }
                            if !err.is_recoverable() {
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| on_restart.call(()),
                                    "Retry"
                                }
                                Link { class: "btn btn-secondary", to: Route::Home {}, "Back" }
                            }
                        }
                    }
                    match snapshot {
                        Some(snapshot) if snapshot.is_finished() => rsx! {
                            if let Some(report) = snapshot.report.as_ref() {
                                FeedbackList { feedback: map_feedback(report), on_restart }
                            }
                            div { class: "feedback-actions",
                                Link { class: "btn btn-secondary", to: Route::Home {}, "Home" }
                            }
                        },
                        Some(snapshot) => rsx! {
                            header { class: "quiz-header",
                                h2 { "Sentence Construction" }
                                span { class: "quiz-progress", "{progress}" }
                                span { class: "{timer_class}", id: "quiz-timer", "{time_left}" }
                            }
                            if let Some(question) = snapshot.question.as_ref() {
                                div { class: "quiz-sentence",
                                    for part in question.parts.iter().cloned() {
                                        match part {
                                            SentenceView::Word(word) => rsx! {
                                                span { class: "quiz-word", "{word}" }
                                            },
                                            SentenceView::Blank { slot, word } => rsx! {
                                                BlankButton { slot, word, on_intent }
                                            },
                                        }
                                    }
                                }
                                div { class: "quiz-options",
                                    for option in question.options.iter().cloned() {
                                        OptionButton { option, on_intent }
                                    }
                                }
                            }
                            div { class: "quiz-actions",
                                button {
                                    class: "btn btn-primary",
                                    id: "quiz-next",
                                    r#type: "button",
                                    disabled: !snapshot.can_advance,
                                    onclick: move |_| on_intent.call(QuizIntent::Next),
                                    "Next"
                                }
                            }
                        },
                        None => rsx! {
                            p { "Loading..." }
                        },
                    }
                },
            }
        }
    }
}

#[component]
fn BlankButton(slot: usize, word: Option<String>, on_intent: EventHandler<QuizIntent>) -> Element {
    let (class, label) = match word.as_deref() {
        Some(word) => ("quiz-blank quiz-blank--filled", word.to_string()),
        None => ("quiz-blank", EMPTY_BLANK_LABEL.to_string()),
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::ClearSlot(slot)),
            "{label}"
        }
    }
}

#[component]
fn OptionButton(option: OptionView, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = option.index;

    rsx! {
        button {
            class: "btn quiz-option",
            r#type: "button",
            disabled: option.used,
            onclick: move |_| on_intent.call(QuizIntent::SelectWord(index)),
            "{option.word}"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    driver: Rc<RefCell<Option<Coroutine<QuizIntent>>>>,
    snapshot: Rc<RefCell<Option<Signal<Option<QuizSnapshot>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        driver: Coroutine<QuizIntent>,
        snapshot: Signal<Option<QuizSnapshot>>,
    ) {
        *self.driver.borrow_mut() = Some(driver);
        *self.snapshot.borrow_mut() = Some(snapshot);
    }

    pub(crate) fn driver(&self) -> Coroutine<QuizIntent> {
        (*self.driver.borrow()).expect("quiz driver registered")
    }

    pub(crate) fn snapshot(&self) -> Signal<Option<QuizSnapshot>> {
        (*self.snapshot.borrow()).expect("quiz snapshot registered")
    }
}
