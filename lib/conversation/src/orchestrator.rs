//! Multi-region chat orchestration.
//!
//! The orchestrator drives one [`Session`] per region as a unit. Every
//! operation is split in two synchronous halves around the network:
//!
//! 1. `begin_*` appends prompts and returns the requests to send.
//! 2. [`dispatch`] performs the round-trips concurrently.
//! 3. [`Orchestrator::finish`] folds the outcomes back in.
//!
//! The split lets a reactive UI release its state between the halves. The
//! async `submit_activity`, `continue_conversation` and `generate_summary`
//! methods compose the three steps for callers that own the orchestrator.

use crate::error::{OrchestratorError, TransportError};
use crate::message::Message;
use crate::prompt::{SUMMARY_PROMPT, activity_prompt, continue_prompt};
use crate::session::Session;
use crate::transport::{CompletionRequest, CompletionTransport};
use futures::future::join_all;
use neurochat_core::{Difficulty, REGIONS, Region};
use rootcause::prelude::Report;
use tracing::{debug, warn};

/// What started a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    /// A new activity fanned out to every region.
    Activity,
    /// A follow-up for every region that already has history.
    Continue,
    /// A summary request to the first region.
    Summary,
}

/// A request ready to be sent for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRound {
    /// Region name; also the `{region}` path segment.
    pub region: String,
    /// Body to send.
    pub request: CompletionRequest,
}

/// The requests of one orchestration round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// What started the round.
    pub kind: RoundKind,
    /// One entry per region that accepted a prompt, in catalogue order.
    pub pending: Vec<PendingRound>,
    /// Regions skipped because a previous request was still in flight.
    pub busy: Vec<String>,
}

impl Round {
    fn new(kind: RoundKind) -> Self {
        Self {
            kind,
            pending: Vec::new(),
            busy: Vec::new(),
        }
    }

    /// Returns true if no request needs to be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// The result of one region's round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Region name.
    pub region: String,
    /// Reply text or the failure.
    pub result: Result<String, TransportError>,
}

/// Summary of a finished round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Regions whose reply was recorded.
    pub succeeded: Vec<String>,
    /// Regions whose round failed, with the reason.
    pub failed: Vec<(String, String)>,
    /// Regions skipped because they were busy.
    pub busy: Vec<String>,
}

impl RoundReport {
    /// Number of regions that received a request.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// One region's entry in the conversation map.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTranscript {
    /// Region name.
    pub region: String,
    /// Snapshot of the region's messages after its last successful round.
    pub messages: Vec<Message>,
}

/// Region name to message sequence, iterated in catalogue order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationMap {
    entries: Vec<RegionTranscript>,
}

impl ConversationMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a region's messages.
    ///
    /// Known regions keep catalogue order; unknown names sort after them in
    /// insertion order.
    pub fn insert(&mut self, region: impl Into<String>, messages: Vec<Message>) {
        let region = region.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.region == region) {
            entry.messages = messages;
            return;
        }

        let rank = catalogue_rank(&region);
        let at = self
            .entries
            .iter()
            .position(|e| catalogue_rank(&e.region) > rank)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, RegionTranscript { region, messages });
    }

    /// Messages recorded for a region.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<&[Message]> {
        self.entries
            .iter()
            .find(|e| e.region == region)
            .map(|e| e.messages.as_slice())
    }

    /// Entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionTranscript> {
        self.entries.iter()
    }

    /// Number of regions with a transcript.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no region has a transcript.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn catalogue_rank(region: &str) -> usize {
    Region::by_name(region).map_or(REGIONS.len(), Region::position)
}

/// Sends every pending request concurrently and collects the outcomes.
///
/// Outcomes are returned in the same order as `pending`, whatever order the
/// replies arrive in. A failure for one region does not affect the others.
pub async fn dispatch<T>(pending: Vec<PendingRound>, transport: &T) -> Vec<RoundOutcome>
where
    T: CompletionTransport + ?Sized,
{
    let calls = pending.into_iter().map(|round| async move {
        let result = transport.complete(&round.region, &round.request).await;
        RoundOutcome {
            region: round.region,
            result,
        }
    });
    join_all(calls).await
}

/// Drives one session per region.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    sessions: Vec<Session>,
    conversations: ConversationMap,
    summary: Option<String>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Creates one idle session per region in the catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: REGIONS.iter().map(Session::new).collect(),
            conversations: ConversationMap::new(),
            summary: None,
        }
    }

    /// Sessions in catalogue order.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Looks up a region's session.
    #[must_use]
    pub fn session(&self, region: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.region().name == region)
    }

    /// The aggregated per-region transcript.
    #[must_use]
    pub fn conversations(&self) -> &ConversationMap {
        &self.conversations
    }

    /// The most recent summary, if one was generated.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns true if any session is awaiting a response.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.sessions.iter().any(Session::is_busy)
    }

    /// Starts an activity round: one framed prompt per region.
    ///
    /// Blank activities produce an empty round and change nothing.
    pub fn begin_submit(&mut self, activity: &str, difficulty: Difficulty) -> Round {
        let mut round = Round::new(RoundKind::Activity);
        let activity = activity.trim();
        if activity.is_empty() {
            return round;
        }

        for session in &mut self.sessions {
            let prompt = activity_prompt(activity, session.region(), difficulty);
            Self::start(session, prompt, difficulty, &mut round);
        }
        round
    }

    /// Starts a follow-up round for every region with history.
    ///
    /// Regions with empty sessions are skipped.
    pub fn begin_continue(&mut self, difficulty: Difficulty) -> Round {
        let mut round = Round::new(RoundKind::Continue);
        let prompt = continue_prompt(difficulty);

        for session in self.sessions.iter_mut().filter(|s| !s.is_empty()) {
            Self::start(session, prompt.clone(), difficulty, &mut round);
        }
        round
    }

    /// Starts a summary round on the first region's session.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::SummaryBusy`] if that session is still
    /// awaiting a response.
    pub fn begin_summary(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<Round, Report<OrchestratorError>> {
        let mut round = Round::new(RoundKind::Summary);
        let session = self.summary_session_mut();
        let region = session.region().name.to_string();

        let request = session
            .begin_round(SUMMARY_PROMPT, difficulty)
            .map_err(|_| OrchestratorError::SummaryBusy {
                region: region.clone(),
            })?;

        round.pending.push(PendingRound { region, request });
        Ok(round)
    }

    fn start(session: &mut Session, prompt: String, difficulty: Difficulty, round: &mut Round) {
        let region = session.region().name.to_string();
        match session.begin_round(prompt, difficulty) {
            Ok(request) => round.pending.push(PendingRound { region, request }),
            Err(e) => {
                debug!(region = %region, error = %e, "skipping busy session");
                round.busy.push(region);
            }
        }
    }

    fn summary_session_mut(&mut self) -> &mut Session {
        &mut self.sessions[0]
    }

    /// Folds round-trip outcomes back into the sessions.
    ///
    /// The conversation map is rebuilt from the previous one with each
    /// successful region's entry replaced by its session's messages. Failed
    /// regions keep their previous entry.
    pub fn finish(&mut self, kind: RoundKind, outcomes: Vec<RoundOutcome>) -> RoundReport {
        let mut report = RoundReport::default();
        let mut conversations = self.conversations.clone();

        for outcome in outcomes {
            let Some(session) = self
                .sessions
                .iter_mut()
                .find(|s| s.region().name == outcome.region)
            else {
                warn!(region = %outcome.region, "outcome for unknown region");
                continue;
            };

            match outcome.result {
                Ok(reply) => {
                    session.complete_round(reply);
                    if kind == RoundKind::Summary {
                        self.summary = session.last_message().map(|m| m.content.clone());
                    } else {
                        conversations.insert(outcome.region.clone(), session.messages().to_vec());
                    }
                    report.succeeded.push(outcome.region);
                }
                Err(e) => {
                    warn!(region = %outcome.region, error = %e, "region round failed");
                    session.fail_round(e.to_string());
                    report.failed.push((outcome.region, e.to_string()));
                }
            }
        }

        self.conversations = conversations;
        report
    }

    /// Submits an activity to every region and waits for all replies.
    pub async fn submit_activity<T>(
        &mut self,
        activity: &str,
        difficulty: Difficulty,
        transport: &T,
    ) -> RoundReport
    where
        T: CompletionTransport + ?Sized,
    {
        let round = self.begin_submit(activity, difficulty);
        self.run(round, transport).await
    }

    /// Asks every region with history to continue and waits for all replies.
    pub async fn continue_conversation<T>(
        &mut self,
        difficulty: Difficulty,
        transport: &T,
    ) -> RoundReport
    where
        T: CompletionTransport + ?Sized,
    {
        let round = self.begin_continue(difficulty);
        self.run(round, transport).await
    }

    /// Asks the first region for a summary and stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if the summarizing session is busy or its
    /// round-trip fails.
    pub async fn generate_summary<T>(
        &mut self,
        difficulty: Difficulty,
        transport: &T,
    ) -> Result<String, Report<OrchestratorError>>
    where
        T: CompletionTransport + ?Sized,
    {
        let round = self.begin_summary(difficulty)?;
        let report = self.run(round, transport).await;

        if let Some((region, reason)) = report.failed.into_iter().next() {
            return Err(OrchestratorError::SummaryFailed { region, reason }.into());
        }
        Ok(self.summary.clone().unwrap_or_default())
    }

    async fn run<T>(&mut self, round: Round, transport: &T) -> RoundReport
    where
        T: CompletionTransport + ?Sized,
    {
        let Round {
            kind,
            pending,
            busy,
        } = round;

        let outcomes = dispatch(pending, transport).await;
        let mut report = self.finish(kind, outcomes);
        report.busy = busy;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::time::Duration;

    /// Transport that answers every region and records what it was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        failing: HashSet<String>,
        calls: RefCell<Vec<(String, CompletionRequest)>>,
    }

    impl ScriptedTransport {
        fn failing_for(region: &str) -> Self {
            Self {
                failing: HashSet::from([region.to_string()]),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl CompletionTransport for ScriptedTransport {
        async fn complete(
            &self,
            region: &str,
            request: &CompletionRequest,
        ) -> Result<String, TransportError> {
            self.calls
                .borrow_mut()
                .push((region.to_string(), request.clone()));
            if self.failing.contains(region) {
                return Err(TransportError::ServerError {
                    status: 500,
                    message: "Failed to generate completion".to_string(),
                });
            }
            Ok(format!("{region} reply #{}", request.messages.len()))
        }
    }

    /// Transport whose first region answers last.
    struct SlowFirstTransport;

    #[async_trait(?Send)]
    impl CompletionTransport for SlowFirstTransport {
        async fn complete(
            &self,
            region: &str,
            _request: &CompletionRequest,
        ) -> Result<String, TransportError> {
            if region == REGIONS[0].name {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            Ok(format!("{region} done"))
        }
    }

    fn level(n: u8) -> Difficulty {
        Difficulty::new(n).expect("valid difficulty")
    }

    fn user_message_counts(orchestrator: &Orchestrator) -> Vec<usize> {
        orchestrator
            .sessions()
            .iter()
            .map(|s| s.messages().iter().filter(|m| m.is_user()).count())
            .collect()
    }

    #[test]
    fn one_session_per_region() {
        let orchestrator = Orchestrator::new();
        let names: Vec<_> = orchestrator
            .sessions()
            .iter()
            .map(|s| s.region().name)
            .collect();
        let expected: Vec<_> = REGIONS.iter().map(|r| r.name).collect();
        assert_eq!(names, expected);
        assert!(orchestrator.conversations().is_empty());
    }

    #[tokio::test]
    async fn submit_fans_out_to_every_region() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();

        let report = orchestrator
            .submit_activity("solving a puzzle", level(2), &transport)
            .await;

        assert_eq!(transport.call_count(), REGIONS.len());
        assert_eq!(report.succeeded.len(), REGIONS.len());
        assert_eq!(user_message_counts(&orchestrator), vec![1; REGIONS.len()]);

        for region in &REGIONS {
            let messages = orchestrator
                .conversations()
                .get(region.name)
                .expect("recorded");
            assert_eq!(messages.len(), 2);
            assert!(messages[0].content.contains("solving a puzzle"));
            assert!(messages[0].content.contains(region.name));
            assert!(messages[0].content.contains("difficulty level 2"));
            assert_eq!(messages[1].role, MessageRole::Assistant);
        }
    }

    #[tokio::test]
    async fn requests_carry_difficulty_by_value() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();

        orchestrator
            .submit_activity("reading", level(5), &transport)
            .await;

        assert!(
            transport
                .calls
                .borrow()
                .iter()
                .all(|(_, request)| request.difficulty == level(5))
        );
    }

    #[tokio::test]
    async fn blank_activity_is_a_no_op() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();

        for blank in ["", "   ", "\n\t"] {
            let report = orchestrator
                .submit_activity(blank, level(1), &transport)
                .await;
            assert_eq!(report, RoundReport::default());
        }

        assert_eq!(transport.call_count(), 0);
        assert!(orchestrator.sessions().iter().all(Session::is_empty));
        assert!(orchestrator.conversations().is_empty());
    }

    #[tokio::test]
    async fn continue_with_empty_sessions_sends_nothing() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();

        let report = orchestrator
            .continue_conversation(level(3), &transport)
            .await;

        assert_eq!(report.attempted(), 0);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn continue_skips_regions_without_history() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.sessions[1]
            .begin_round("seed", level(1))
            .expect("idle session");
        orchestrator.sessions[1].complete_round("seeded");

        let transport = ScriptedTransport::default();
        let report = orchestrator
            .continue_conversation(level(4), &transport)
            .await;

        assert_eq!(report.succeeded, vec!["Hippocampus".to_string()]);
        assert_eq!(transport.call_count(), 1);
        let sent = &transport.calls.borrow()[0].1;
        assert!(
            sent.messages
                .last()
                .expect("prompt")
                .content
                .contains("Maintain the current difficulty level (4)")
        );
    }

    #[tokio::test]
    async fn continue_appends_to_existing_history() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();

        orchestrator
            .submit_activity("cooking", level(1), &transport)
            .await;
        orchestrator
            .continue_conversation(level(1), &transport)
            .await;

        assert_eq!(transport.call_count(), 2 * REGIONS.len());
        for transcript in orchestrator.conversations().iter() {
            assert_eq!(transcript.messages.len(), 4);
        }
    }

    #[tokio::test]
    async fn failure_in_one_region_leaves_others_intact() {
        let transport = ScriptedTransport::failing_for("Amygdala");
        let mut orchestrator = Orchestrator::new();

        let report = orchestrator
            .submit_activity("public speaking", level(3), &transport)
            .await;

        assert_eq!(report.succeeded.len(), REGIONS.len() - 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "Amygdala");

        assert!(orchestrator.conversations().get("Amygdala").is_none());
        for region in REGIONS.iter().filter(|r| r.name != "Amygdala") {
            assert_eq!(
                orchestrator
                    .conversations()
                    .get(region.name)
                    .expect("recorded")
                    .len(),
                2
            );
        }

        let amygdala = orchestrator.session("Amygdala").expect("session");
        assert!(!amygdala.is_busy());
        assert!(amygdala.last_error().is_some());
        assert_eq!(amygdala.message_count(), 1);
    }

    #[tokio::test]
    async fn failed_round_keeps_previous_transcript_entry() {
        let mut orchestrator = Orchestrator::new();
        orchestrator
            .submit_activity("swimming", level(1), &ScriptedTransport::default())
            .await;
        let before = orchestrator
            .conversations()
            .get("Cerebellum")
            .expect("recorded")
            .to_vec();

        orchestrator
            .continue_conversation(level(1), &ScriptedTransport::failing_for("Cerebellum"))
            .await;

        assert_eq!(
            orchestrator.conversations().get("Cerebellum"),
            Some(before.as_slice())
        );
        assert_eq!(
            orchestrator
                .conversations()
                .get("Hippocampus")
                .expect("recorded")
                .len(),
            4
        );
    }

    #[tokio::test]
    async fn busy_sessions_are_skipped_not_interleaved() {
        let mut orchestrator = Orchestrator::new();
        let first = orchestrator.begin_submit("running", level(1));
        assert_eq!(first.pending.len(), REGIONS.len());

        let second = orchestrator.begin_submit("jumping", level(1));
        assert!(second.is_empty());
        assert_eq!(second.busy.len(), REGIONS.len());
        assert_eq!(user_message_counts(&orchestrator), vec![1; REGIONS.len()]);

        let outcomes = dispatch(first.pending, &ScriptedTransport::default()).await;
        orchestrator.finish(first.kind, outcomes);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn outcomes_keep_catalogue_order_regardless_of_arrival() {
        let mut orchestrator = Orchestrator::new();
        let round = orchestrator.begin_submit("dancing", level(1));

        let outcomes = dispatch(round.pending, &SlowFirstTransport).await;
        let regions: Vec<_> = outcomes.iter().map(|o| o.region.as_str()).collect();
        let expected: Vec<_> = REGIONS.iter().map(|r| r.name).collect();
        assert_eq!(regions, expected);

        orchestrator.finish(round.kind, outcomes);
        let keys: Vec<_> = orchestrator
            .conversations()
            .iter()
            .map(|t| t.region.as_str())
            .collect();
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    async fn summary_uses_first_region_only() {
        let transport = ScriptedTransport::default();
        let mut orchestrator = Orchestrator::new();
        orchestrator
            .submit_activity("painting", level(2), &transport)
            .await;

        let summary = orchestrator
            .generate_summary(level(2), &transport)
            .await
            .expect("summary");

        assert_eq!(transport.call_count(), REGIONS.len() + 1);
        let (region, request) = transport.calls.borrow().last().cloned().expect("call");
        assert_eq!(region, REGIONS[0].name);
        assert_eq!(
            request.messages.last().expect("prompt").content,
            SUMMARY_PROMPT
        );
        assert_eq!(summary, "Prefrontal Cortex reply #3");
        assert_eq!(orchestrator.summary(), Some(summary.as_str()));
    }

    #[tokio::test]
    async fn summary_failure_is_reported() {
        let mut orchestrator = Orchestrator::new();
        let result = orchestrator
            .generate_summary(
                level(1),
                &ScriptedTransport::failing_for("Prefrontal Cortex"),
            )
            .await;

        assert!(result.is_err());
        assert!(orchestrator.summary().is_none());
    }

    #[test]
    fn summary_rejected_while_first_region_busy() {
        let mut orchestrator = Orchestrator::new();
        let _round = orchestrator.begin_submit("writing", level(1));
        assert!(orchestrator.begin_summary(level(1)).is_err());
    }

    #[test]
    fn conversation_map_orders_by_catalogue() {
        let mut map = ConversationMap::new();
        map.insert("Broca's Area", Vec::new());
        map.insert("Unknown Lobe", Vec::new());
        map.insert("Hippocampus", vec![Message::user("hi")]);
        map.insert("Prefrontal Cortex", Vec::new());

        let keys: Vec<_> = map.iter().map(|t| t.region.as_str()).collect();
        assert_eq!(
            keys,
            ["Prefrontal Cortex", "Hippocampus", "Broca's Area", "Unknown Lobe"]
        );

        map.insert("Hippocampus", Vec::new());
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("Hippocampus"), Some(&[][..]));
    }
}
