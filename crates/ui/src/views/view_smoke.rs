use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::*;
use quiz_core::model::{AdvanceTrigger, Feedback, Question, QuestionId, ScoreReport};
use quiz_core::time::fixed_now;
use storage::{QuestionSource, SourceError};

use super::feedback::FeedbackList;
use super::test_harness::{
    ViewKind, drive_dom, sample_questions, setup_view_harness, setup_view_harness_with_source,
};
use crate::vm::{QuizIntent, map_feedback};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Home, sample_questions());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sentence Construction"), "missing title in {html}");
    assert!(
        html.contains("Time per question: 30 sec"),
        "missing time per question in {html}"
    );
    assert!(html.contains("Start"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_questions());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Time Left: 30s"), "missing timer in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("barked"), "missing sentence in {html}");
    assert!(html.contains("_____"), "missing empty blank in {html}");
    assert!(html.contains("mailman"), "missing option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_through_to_feedback() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_questions());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    harness.dispatch(QuizIntent::SelectWord(1));
    let slots = harness
        .snapshot()
        .and_then(|snapshot| snapshot.question)
        .map(|question| question.slots);
    assert_eq!(slots, Some(vec![Some("dog".to_string()), None]));

    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "advanced while incomplete: {html}");
    assert!(
        html.contains("Fill every blank before moving on."),
        "missing incomplete notice in {html}"
    );
    assert!(!html.contains("Retry"), "incomplete answer offered a restart: {html}");

    harness.dispatch(QuizIntent::SelectWord(0));
    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing second question in {html}");

    harness.dispatch(QuizIntent::SelectWord(1));
    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Feedback"), "missing feedback heading in {html}");
    assert!(html.contains("Score: 1 / 2"), "missing score in {html}");
    assert!(html.contains("50%"), "missing percentage in {html}");
    assert!(html.contains("Correct: runs"), "missing correction in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_view_smoke_moves_on_when_time_runs_out() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_questions());
    harness.rebuild();
    drive_dom(&mut harness.dom);
    assert!(harness.render().contains("Time Left: 30s"));

    harness.advance_time(Duration::from_millis(10_500)).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "moved on early: {html}");
    assert!(html.contains("Time Left: 20s"), "countdown not running in {html}");

    harness.advance_time(Duration::from_secs(20)).await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "no time-up advance in {html}");
    assert!(html.contains("Time Left: 30s"), "countdown not reset in {html}");

    harness.advance_time(Duration::from_secs(30)).await;
    let html = harness.render();
    assert!(html.contains("Score: 0 / 2"), "missing score in {html}");
    assert!(html.contains("Time ran out"), "missing time-up note in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_view_smoke_next_replaces_the_running_countdown() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_questions());
    harness.rebuild();
    drive_dom(&mut harness.dom);

    harness.advance_time(Duration::from_millis(29_500)).await;
    let html = harness.render();
    assert!(html.contains("Time Left: 1s"), "unexpected countdown in {html}");

    harness.dispatch(QuizIntent::SelectWord(1));
    harness.dispatch(QuizIntent::SelectWord(0));
    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing second question in {html}");
    assert!(html.contains("Time Left: 30s"), "countdown not reset in {html}");

    // The first question's schedule would have fired at 30s.
    harness.advance_time(Duration::from_millis(1_200)).await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "stale countdown advanced in {html}");
    assert!(html.contains("Time Left: 29s"), "unexpected countdown in {html}");

    let snapshot = harness.snapshot().unwrap();
    assert_eq!(snapshot.progress.number, 2);
    assert!(snapshot.report.is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_view_smoke_offers_a_way_out_when_time_runs_onto_a_broken_question() {
    let mut questions = sample_questions();
    questions[1] = Question::new(
        "2",
        "Only _____________ blank.",
        vec!["one".into()],
        vec!["one".into(), "two".into()],
    );
    let mut harness = setup_view_harness(ViewKind::Quiz, questions);
    harness.rebuild();
    drive_dom(&mut harness.dom);

    harness.advance_time(Duration::from_millis(30_500)).await;
    let html = harness.render();
    assert!(
        html.contains("This question has a different number of blanks than answers."),
        "missing malformed notice in {html}"
    );
    assert!(html.contains("Time Left: 0s"), "countdown not stopped in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Back"), "missing back link in {html}");

    harness.advance_time(Duration::from_secs(5)).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "stuck quiz moved in {html}");
    assert!(html.contains("Time Left: 0s"), "countdown restarted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Vec::new());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("There are no questions to practice yet."),
        "missing empty message in {html}"
    );
}

struct FailingSource;

#[async_trait]
impl QuestionSource for FailingSource {
    async fn load_questions(&self) -> Result<Vec<Question>, SourceError> {
        Err(SourceError::Io(std::io::Error::other("offline")))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_source(ViewKind::Quiz, Arc::new(FailingSource));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[component]
fn FeedbackRoot() -> Element {
    let history = vec![
        Feedback::grade(
            QuestionId::new("1"),
            "Cats _____________ milk.",
            vec![Some("drink".to_string())],
            vec!["drink".to_string()],
            AdvanceTrigger::Manual,
        ),
        Feedback::grade(
            QuestionId::new("2"),
            "Fish _____________ water.",
            vec![None],
            vec!["need".to_string()],
            AdvanceTrigger::TimeUp,
        ),
    ];
    let report =
        ScoreReport::from_history(
        &history,
        fixed_now(),
        fixed_now() + chrono::Duration::seconds(40),
    );

    rsx! {
        FeedbackList { feedback: map_feedback(&report), on_restart: move |_| {} }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn feedback_list_smoke_renders_cards() {
    let mut dom = VirtualDom::new(FeedbackRoot);
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Q1: Cats"), "missing first card in {html}");
    assert!(html.contains("Your answer: (blank)"), "missing empty answer in {html}");
    assert!(html.contains("Correct: need"), "missing correction in {html}");
    assert!(!html.contains("Correct: drink"), "correct answer shown twice in {html}");
    assert!(html.contains("Time ran out"), "missing time-up note in {html}");
    assert!(html.contains("Score: 1 / 2"), "missing score in {html}");
}
