//! The brain activity chat page.
//!
//! The page holds the [`Orchestrator`] in a signal. Rounds start with a
//! synchronous `try_update`, run their requests on the local executor, and
//! fold the outcomes back in with a second update once every region has
//! answered.

use crate::browser;
use crate::transport::HttpTransport;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use neurochat_conversation::{
    LearningObjectives, LearningProgress, Message, Orchestrator, Round, RoundKind,
    TRANSCRIPT_FILENAME, dispatch, render_transcript,
};
use neurochat_core::{Difficulty, REGIONS, Region};

/// Main chat page.
#[component]
pub fn ChatPage() -> impl IntoView {
    let orchestrator = RwSignal::new(Orchestrator::new());
    let difficulty = RwSignal::new(Difficulty::default());
    let (activity, set_activity) = signal(String::new());
    let (notice, set_notice) = signal(Option::<String>::None);

    let run_round = move |round: Round| {
        set_notice.set(None);
        if !round.busy.is_empty() {
            set_notice.set(Some(format!(
                "Still waiting on: {}",
                round.busy.join(", ")
            )));
        }
        if round.is_empty() {
            return;
        }

        let Round { kind, pending, .. } = round;
        spawn_local(async move {
            let outcomes = dispatch(pending, &HttpTransport).await;
            let Some(report) = orchestrator.try_update(|o| o.finish(kind, outcomes)) else {
                return;
            };

            if kind == RoundKind::Activity && !report.succeeded.is_empty() {
                set_activity.set(String::new());
            }
            if let Some((region, reason)) = report.failed.first() {
                leptos::logging::warn!(
                    "{} region(s) failed; {}: {}",
                    report.failed.len(),
                    region,
                    reason
                );
                if kind == RoundKind::Summary {
                    set_notice.set(Some("Summary could not be generated".to_string()));
                }
            }
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let text = activity.get_untracked();
        let level = difficulty.get_untracked();
        if let Some(round) = orchestrator.try_update(|o| o.begin_submit(&text, level)) {
            run_round(round);
        }
    };

    let on_continue = move |_| {
        let level = difficulty.get_untracked();
        if let Some(round) = orchestrator.try_update(|o| o.begin_continue(level)) {
            run_round(round);
        }
    };

    let on_summary = move |_| {
        let level = difficulty.get_untracked();
        match orchestrator.try_update(|o| o.begin_summary(level)) {
            Some(Ok(round)) => run_round(round),
            Some(Err(e)) => set_notice.set(Some(e.to_string())),
            None => {}
        }
    };

    let on_save = move |_| {
        let text = orchestrator.with_untracked(|o| render_transcript(o.conversations()));
        if let Err(e) = browser::download_text(TRANSCRIPT_FILENAME, &text) {
            leptos::logging::warn!("save failed: {}", e);
        }
    };

    let on_share = move |_| {
        let text = orchestrator.with_untracked(|o| render_transcript(o.conversations()));
        spawn_local(async move {
            match browser::copy_text(&text).await {
                Ok(()) => browser::alert("Conversation copied to clipboard!"),
                Err(e) => {
                    leptos::logging::warn!("share failed: {}", e);
                    browser::alert("Failed to copy conversation to clipboard");
                }
            }
        });
    };

    view! {
        <div class="chat-page">
            <header class="banner">
                <h1>"🧠 Neuroscience Learning Chat"</h1>
            </header>

            <div class="chat-grid">
                <section class="card simulation">
                    <h2>"Brain Activity Simulation"</h2>
                    <div class="transcripts">
                        {move || orchestrator.with(|o| {
                            o.sessions()
                                .iter()
                                .filter_map(|session| {
                                    let region = session.region();
                                    let messages = o.conversations().get(region.name).map(<[Message]>::to_vec);
                                    let error = session.last_error().map(str::to_string);
                                    let busy = session.is_busy();
                                    if messages.is_none() && error.is_none() && !busy {
                                        return None;
                                    }
                                    Some(view! {
                                        <RegionTranscript
                                            region=region
                                            messages=messages.unwrap_or_default()
                                            error=error
                                            busy=busy
                                        />
                                    })
                                })
                                .collect_view()
                        })}
                    </div>
                    {move || notice.get().map(|msg| view! { <p class="notice">{msg}</p> })}
                    <form class="activity-form" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Enter an activity (e.g., 'solving a puzzle')"
                            prop:value=move || activity.get()
                            on:input=move |ev| set_activity.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || orchestrator.with(Orchestrator::is_busy)>
                            "Send"
                        </button>
                    </form>
                </section>

                <aside class="sidebar">
                    <DifficultyCard difficulty=difficulty/>

                    <section class="card">
                        <button
                            class="wide-btn"
                            on:click=on_continue
                            disabled=move || orchestrator.with(|o| o.conversations().is_empty())
                        >
                            "↻ Continue Conversation"
                        </button>
                    </section>

                    <RegionCatalogue/>
                    <ObjectivesCard/>
                    <ProgressCard/>

                    <section class="card">
                        <h2>"Conversation Summary"</h2>
                        {move || match orchestrator.with(|o| o.summary().map(str::to_string)) {
                            Some(summary) => view! { <p class="summary">{summary}</p> }.into_any(),
                            None => view! {
                                <button class="wide-btn" on:click=on_summary>"Generate Summary"</button>
                            }.into_any(),
                        }}
                    </section>

                    <section class="card actions">
                        <button on:click=on_save>"Save"</button>
                        <button on:click=on_share>"Share"</button>
                    </section>
                </aside>
            </div>
        </div>
    }
}

/// One region's transcript with its status.
#[component]
fn RegionTranscript(
    region: &'static Region,
    messages: Vec<Message>,
    error: Option<String>,
    busy: bool,
) -> impl IntoView {
    view! {
        <div class="region-transcript">
            <h3>{region.emoji} " " {region.name}</h3>
            <For
                each=move || messages.clone()
                key=|message| message.id
                children=|message| {
                    let class = if message.is_user() { "message user" } else { "message assistant" };
                    view! { <div class=class><p>{message.content}</p></div> }
                }
            />
            {busy.then(|| view! { <p class="thinking">"Thinking..."</p> })}
            {error.map(|reason| view! {
                <p class="region-error" title=reason>"⚠ No reply this round"</p>
            })}
        </div>
    }
}

/// Difficulty slider with its label.
#[component]
fn DifficultyCard(difficulty: RwSignal<Difficulty>) -> impl IntoView {
    view! {
        <section class="card">
            <h2>"Difficulty Level"</h2>
            <input
                type="range"
                class="difficulty-slider"
                min=Difficulty::MIN.to_string()
                max=Difficulty::MAX.to_string()
                step="1"
                prop:value=move || difficulty.get().level().to_string()
                on:input=move |ev| {
                    if let Ok(level) = event_target_value(&ev).parse::<i64>() {
                        difficulty.set(Difficulty::clamped(level));
                    }
                }
            />
            <p class="difficulty-label">
                {move || {
                    let current = difficulty.get();
                    format!("Current Level: {} ({})", current.level(), current.label())
                }}
            </p>
        </section>
    }
}

/// Region list; selecting one shows its details.
#[component]
fn RegionCatalogue() -> impl IntoView {
    let (selected, set_selected) = signal(Option::<&'static Region>::None);

    view! {
        <section class="card">
            <h2>"Brain Regions"</h2>
            <ul class="region-list">
                {REGIONS
                    .iter()
                    .map(|region| view! {
                        <li
                            class=format!("region-chip {}", region.color)
                            on:click=move |_| set_selected.set(Some(region))
                        >
                            <span class="region-emoji">{region.emoji}</span>
                            <span class="region-name">{region.name}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </section>
        {move || selected.get().map(|region| view! {
            <section class="card region-detail">
                <h2>{region.name}</h2>
                <p class="region-role">{region.role}</p>
                <p>{region.description}</p>
            </section>
        })}
    }
}

#[component]
fn ObjectivesCard() -> impl IntoView {
    let objectives = RwSignal::new(LearningObjectives::new());
    let (draft, set_draft) = signal(String::new());

    let on_add = move |ev: SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked();
        if objectives.try_update(|o| o.add(&text)).unwrap_or(false) {
            set_draft.set(String::new());
        }
    };

    view! {
        <section class="card">
            <h2>"Learning Objectives"</h2>
            <ul class="objectives">
                {move || objectives.with(|o| {
                    o.items()
                        .iter()
                        .map(|item| view! { <li>{item.clone()}</li> })
                        .collect_view()
                })}
            </ul>
            <form class="objective-form" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Add a new learning objective"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
        </section>
    }
}

#[component]
fn ProgressCard() -> impl IntoView {
    let progress = RwSignal::new(LearningProgress::default());

    view! {
        <section class="card">
            <h2>"Learning Progress"</h2>
            <div class="progress-track">
                <div
                    class="progress-bar"
                    style:width=move || format!("{}%", progress.get().percent())
                ></div>
            </div>
            <button class="wide-btn" on:click=move |_| progress.update(LearningProgress::mark)>
                "Mark Progress"
            </button>
        </section>
    }
}
