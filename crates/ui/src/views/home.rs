use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let seconds = ctx.seconds_per_question();

    rsx! {
        div { class: "page",
            section { class: "home-hero",
                h2 { class: "home-hero__title", "Sentence Construction" }
                p { class: "home-hero__rules",
                    "Select the correct words to complete the sentence by arranging the provided options in the right order."
                }
                p { class: "home-hero__time", "Time per question: {seconds} sec" }
                Link {
                    class: "btn btn-primary home-hero__start",
                    to: Route::Quiz {},
                    "Start"
                }
            }
        }
    }
}
