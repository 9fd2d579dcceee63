use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Question, QuizSettings};
use quiz_core::time::fixed_now;
use services::{Clock, QuizLoopService};
use storage::{InMemoryQuestionSource, QuestionSource};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn app_name(&self) -> String {
        "Quiz Test".to_string()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Send a quiz intent to the running quiz and re-render.
    pub fn dispatch(&mut self, intent: crate::vm::QuizIntent) {
        let driver = self.quiz_handles.driver();
        self.dom.in_runtime(|| driver.send(intent));
        drive_dom(&mut self.dom);
    }

    /// Move paused tokio time forward in small steps, re-rendering after each.
    ///
    /// Requires a test runtime started with `start_paused = true`.
    pub async fn advance_time(&mut self, total: Duration) {
        let mut remaining = total;
        while !remaining.is_zero() {
            let step = remaining.min(TIME_STEP);
            tokio::time::advance(step).await;
            // Let the countdown task deliver its tick before polling the dom.
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            drive_dom(&mut self.dom);
            remaining -= step;
        }
    }

    pub fn snapshot(&self) -> Option<services::QuizSnapshot> {
        let snapshot = self.quiz_handles.snapshot();
        self.dom.in_runtime(|| snapshot.peek().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

const TIME_STEP: Duration = Duration::from_millis(100);

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            "1",
            "The _____________ barked at the _____________.",
            vec!["mailman".into(), "dog".into(), "cat".into()],
            vec!["dog".into(), "mailman".into()],
        ),
        Question::new(
            "2",
            "She _____________ every morning.",
            vec!["runs".into(), "sleeps".into()],
            vec!["runs".into()],
        ),
    ]
}

pub fn setup_view_harness(view: ViewKind, questions: Vec<Question>) -> ViewHarness {
    let source: Arc<dyn QuestionSource> = Arc::new(InMemoryQuestionSource::new(questions));
    setup_view_harness_with_source(view, source)
}

pub fn setup_view_harness_with_source(
    view: ViewKind,
    source: Arc<dyn QuestionSource>,
) -> ViewHarness {
    let quiz_loop = Arc::new(
        QuizLoopService::new(Clock::fixed(fixed_now()), source)
            .with_settings(QuizSettings::default()),
    );
    let quiz_handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { quiz_loop });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness { dom, quiz_handles }
}
