//! Step-advance state machine.
//!
//! Reveals the sentence one word per step. Each step asks the predictor for
//! candidates, hands them to the cloud renderer, and waits for the renderer to
//! report that its animation finished before advancing.
//!
//! ```text
//!  Idle ──start──► AwaitingCandidates ──candidates──► Animating
//!                    ▲   │ fetch_failed (stall)          │
//!                    │   └──────────┘                    │ animation_complete
//!                    └──────────── more words ◄──────────┤
//!  Completed ◄────────────── last word ◄─────────────────┘
//!      └──start──► AwaitingCandidates
//! ```
//!
//! Every fetch and render pass carries a [`StepToken`]. `start` and `retry` bump
//! it, so anything still in flight from before is recognised as stale and dropped.

use crate::api::error::PredictorError;
use crate::api::types::{CandidateWord, FetchRequest, RenderJob, StepToken};
use crate::core::sentence::{RevealState, Sentence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    AwaitingCandidates,
    Animating,
    Completed,
}

/// Side effect requested by a transition. The caller performs it.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the predictor for the next candidate set.
    Fetch(FetchRequest),
    /// Show this candidate set and animate towards the target.
    Render(RenderJob),
}

pub struct Sequencer {
    sentence: Sentence,
    reveal: RevealState,
    state: SequencerState,
    auto_advance: bool,
    completed: bool,
    token: StepToken,
    candidates: Vec<CandidateWord>,
    target: Option<String>,
}

impl Sequencer {
    pub fn new(sentence: Sentence) -> Self {
        let reveal = RevealState::initial(&sentence);
        Self {
            sentence,
            reveal,
            state: SequencerState::Idle,
            auto_advance: false,
            completed: false,
            token: StepToken::default(),
            candidates: Vec::new(),
            target: None,
        }
    }

    // -- Queries --

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn token(&self) -> StepToken {
        self.token
    }

    /// Candidate set of the step being animated. Empty otherwise.
    pub fn candidates(&self) -> &[CandidateWord] {
        &self.candidates
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether another word remains to be revealed.
    pub fn has_more(&self) -> bool {
        self.reveal.next_index() < self.sentence.len()
    }

    // -- Transitions --

    /// Start (or restart) from the first word. Valid from any state.
    pub fn start(&mut self) -> Option<Effect> {
        self.reveal = RevealState::initial(&self.sentence);
        self.candidates.clear();
        self.target = None;
        self.completed = false;
        self.token = self.token.next();

        if !self.has_more() {
            // single-word sentence: nothing to reveal
            self.finish();
            return None;
        }

        self.auto_advance = true;
        self.state = SequencerState::AwaitingCandidates;
        log::info!(
            "sequencer: started, {} words to reveal",
            self.sentence.len() - self.reveal.next_index()
        );
        Some(Effect::Fetch(self.fetch_request()))
    }

    /// Predictor answered. Ignored unless it belongs to the current step.
    pub fn candidates_received(
        &mut self,
        token: StepToken,
        candidates: Vec<CandidateWord>,
    ) -> Option<Effect> {
        if token != self.token || self.state != SequencerState::AwaitingCandidates {
            log::debug!(
                "sequencer: dropping candidates for {:?} (current {:?}, state {:?})",
                token, self.token, self.state
            );
            return None;
        }

        let target = self.sentence.word(self.reveal.next_index())?.to_owned();
        self.candidates = candidates;
        self.target = Some(target.clone());
        self.state = SequencerState::Animating;

        Some(Effect::Render(RenderJob {
            token,
            candidates: self.candidates.clone(),
            target,
        }))
    }

    /// Predictor failed. Logged; no state change, so the step stalls until
    /// `retry` or `start`.
    pub fn fetch_failed(&mut self, token: StepToken, error: &PredictorError) {
        if token != self.token {
            log::debug!("sequencer: ignoring stale fetch failure: {}", error);
            return;
        }
        log::warn!("Error generating next word: {}", error);
    }

    /// Re-issue the fetch for the current step. Only meaningful while stalled:
    /// waiting on a failed fetch, or "animating" an empty candidate set that the
    /// renderer will never complete.
    pub fn retry(&mut self) -> Option<Effect> {
        let stalled_empty = self.state == SequencerState::Animating && self.candidates.is_empty();
        if self.state != SequencerState::AwaitingCandidates && !stalled_empty {
            return None;
        }
        self.target = None;
        self.token = self.token.next();
        self.state = SequencerState::AwaitingCandidates;
        log::info!("sequencer: retrying step {}", self.reveal.next_index());
        Some(Effect::Fetch(self.fetch_request()))
    }

    /// The renderer finished animating `word`. Advances the reveal state.
    pub fn animation_complete(&mut self, token: StepToken, word: &str) -> Option<Effect> {
        if token != self.token || self.state != SequencerState::Animating {
            log::debug!("sequencer: dropping stale completion for {:?}", token);
            return None;
        }

        self.reveal.advance(word);
        self.candidates.clear();
        self.target = None;

        if !self.has_more() {
            self.finish();
            return None;
        }

        self.token = self.token.next();
        self.state = SequencerState::AwaitingCandidates;
        log::info!("sequencer: revealed \"{}\"", self.reveal.text());
        Some(Effect::Fetch(self.fetch_request()))
    }

    fn finish(&mut self) {
        self.state = SequencerState::Completed;
        self.auto_advance = false;
        self.completed = true;
        log::info!("sequencer: completed \"{}\"", self.reveal.text());
    }

    fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            token: self.token,
            current_words: self.reveal.revealed().to_vec(),
            target_word: self
                .sentence
                .word(self.reveal.next_index())
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> Sequencer {
        Sequencer::new(Sentence::parse(text).unwrap())
    }

    fn expect_fetch(effect: Option<Effect>) -> FetchRequest {
        match effect {
            Some(Effect::Fetch(req)) => req,
            other => panic!("Expected Fetch, got {:?}", other),
        }
    }

    fn expect_render(effect: Option<Effect>) -> RenderJob {
        match effect {
            Some(Effect::Render(job)) => job,
            other => panic!("Expected Render, got {:?}", other),
        }
    }

    fn cands(words: &[&str]) -> Vec<CandidateWord> {
        words.iter().map(|w| CandidateWord::new(*w, 50.0)).collect()
    }

    #[test]
    fn starts_idle() {
        let s = seq("Every word carries");
        assert_eq!(s.state(), SequencerState::Idle);
        assert!(!s.is_auto_advancing());
        assert!(!s.is_completed());
    }

    #[test]
    fn start_requests_second_word() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        assert_eq!(req.current_words, ["Every"]);
        assert_eq!(req.target_word, "word");
        assert_eq!(req.token, s.token());
        assert_eq!(s.state(), SequencerState::AwaitingCandidates);
        assert!(s.is_auto_advancing());
    }

    #[test]
    fn full_scenario_every_word_carries() {
        let mut s = seq("Every word carries");

        let req = expect_fetch(s.start());
        let job = expect_render(s.candidates_received(req.token, cands(&["word", "thing"])));
        assert_eq!(job.target, "word");
        assert_eq!(s.state(), SequencerState::Animating);

        let req = expect_fetch(s.animation_complete(job.token, "word"));
        assert_eq!(s.reveal().text(), "Every word");
        assert_eq!(s.reveal().next_index(), 2);
        assert!(!s.is_completed());
        assert_eq!(req.current_words, ["Every", "word"]);
        assert_eq!(req.target_word, "carries");

        let job = expect_render(s.candidates_received(req.token, cands(&["carries", "holds"])));
        assert!(s.animation_complete(job.token, "carries").is_none());
        assert_eq!(s.reveal().text(), "Every word carries");
        assert_eq!(s.reveal().next_index(), 3);
        assert!(s.is_completed());
        assert!(!s.is_auto_advancing());
        assert_eq!(s.state(), SequencerState::Completed);
    }

    #[test]
    fn candidates_cleared_after_step() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        let job = expect_render(s.candidates_received(req.token, cands(&["word"])));
        assert_eq!(s.candidates().len(), 1);
        assert_eq!(s.target(), Some("word"));
        s.animation_complete(job.token, "word");
        assert!(s.candidates().is_empty());
        assert_eq!(s.target(), None);
    }

    #[test]
    fn fetch_failure_changes_nothing() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        let before = s.reveal().clone();
        s.fetch_failed(req.token, &PredictorError::Network("offline".into()));
        assert_eq!(s.reveal(), &before);
        assert_eq!(s.state(), SequencerState::AwaitingCandidates);
        assert!(s.candidates().is_empty());
    }

    #[test]
    fn retry_reissues_with_fresh_token() {
        let mut s = seq("Every word carries");
        let first = expect_fetch(s.start());
        let second = expect_fetch(s.retry());
        assert!(second.token > first.token);
        assert_eq!(second.target_word, "word");
        // the orphaned response is dropped
        assert!(s.candidates_received(first.token, cands(&["word"])).is_none());
        assert!(s.candidates_received(second.token, cands(&["word"])).is_some());
    }

    #[test]
    fn retry_outside_waiting_is_noop() {
        let mut s = seq("Every word carries");
        assert!(s.retry().is_none());
        let req = expect_fetch(s.start());
        s.candidates_received(req.token, cands(&["word"]));
        assert!(s.retry().is_none());
    }

    #[test]
    fn retry_escapes_empty_candidate_stall() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        expect_render(s.candidates_received(req.token, Vec::new()));
        assert_eq!(s.state(), SequencerState::Animating);
        let again = expect_fetch(s.retry());
        assert_eq!(again.target_word, "word");
        assert_eq!(s.state(), SequencerState::AwaitingCandidates);
    }

    #[test]
    fn restart_resets_from_any_state() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        let job = expect_render(s.candidates_received(req.token, cands(&["word"])));
        s.animation_complete(job.token, "word");

        let req = expect_fetch(s.start());
        assert_eq!(s.reveal().revealed(), ["Every"]);
        assert_eq!(s.reveal().next_index(), 1);
        assert_eq!(req.target_word, "word");
        assert!(!s.is_completed());

        // restart after completion too
        let job = expect_render(s.candidates_received(req.token, cands(&["word"])));
        let req = expect_fetch(s.animation_complete(job.token, "word"));
        let job = expect_render(s.candidates_received(req.token, cands(&["carries"])));
        s.animation_complete(job.token, "carries");
        assert!(s.is_completed());
        s.start();
        assert_eq!(s.reveal().revealed(), ["Every"]);
        assert_eq!(s.reveal().next_index(), 1);
        assert_eq!(s.state(), SequencerState::AwaitingCandidates);
    }

    #[test]
    fn stale_response_after_restart_is_dropped() {
        let mut s = seq("Every word carries");
        let old = expect_fetch(s.start());
        let fresh = expect_fetch(s.start());
        assert!(s.candidates_received(old.token, cands(&["word"])).is_none());
        assert_eq!(s.state(), SequencerState::AwaitingCandidates);
        assert!(s.candidates_received(fresh.token, cands(&["word"])).is_some());
    }

    #[test]
    fn stale_completion_after_restart_is_dropped() {
        let mut s = seq("Every word carries");
        let req = expect_fetch(s.start());
        let job = expect_render(s.candidates_received(req.token, cands(&["word"])));
        s.start();
        assert!(s.animation_complete(job.token, "word").is_none());
        assert_eq!(s.reveal().next_index(), 1);
    }

    #[test]
    fn index_never_exceeds_sentence() {
        let mut s = seq("a b c d");
        let mut effect = s.start();
        let mut last_index = s.reveal().next_index();
        while let Some(Effect::Fetch(req)) = effect {
            let job = expect_render(s.candidates_received(req.token, cands(&["x"])));
            effect = s.animation_complete(job.token, &job.target);
            assert_eq!(s.reveal().next_index(), last_index + 1);
            assert!(s.reveal().next_index() <= s.sentence().len());
            last_index = s.reveal().next_index();
        }
        assert!(s.is_completed());
        assert_eq!(s.reveal().text(), "a b c d");
        // further completions are ignored
        assert!(s.animation_complete(s.token(), "e").is_none());
        assert_eq!(s.reveal().next_index(), 4);
    }

    #[test]
    fn single_word_sentence_completes_immediately() {
        let mut s = seq("Alone");
        assert!(s.start().is_none());
        assert!(s.is_completed());
        assert!(!s.is_auto_advancing());
        assert_eq!(s.reveal().text(), "Alone");
    }
}
