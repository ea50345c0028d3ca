//! Page controller: owns the view state, keeps it in step with the `v`
//! location parameter, and decides which requests to issue.
//!
//! The controller never performs I/O. Intents return an [`Effect`] for the
//! front end to execute; the result comes back through [`Controller::apply`]
//! as a [`Completion`] tagged with the generation of the effect that caused
//! it. Completions for anything but the newest request of their kind are
//! dropped.

use tracing::{debug, info, warn};

use crate::{
    location::{History, Location},
    types::{ChatResponse, LoadedVideo, Reply, SummarizeResponse},
    youtube::watch_url,
};

pub const SUMMARY_FALLBACK_ERROR: &str = "Failed to get summary";
pub const ANSWER_FALLBACK_ERROR: &str = "Failed to get answer";
pub const NO_ANSWER: &str = "No answer returned.";

/// A request the front end must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Summarize {
        generation: u64,
        url: String,
    },
    Ask {
        generation: u64,
        video_id: String,
        question: String,
    },
}

/// Decoded reply, or the message of a transport/parse failure.
pub type Outcome<T> = std::result::Result<Reply<T>, String>;

#[derive(Debug, Clone)]
pub enum Completion {
    Summarized {
        generation: u64,
        outcome: Outcome<SummarizeResponse>,
    },
    Answered {
        generation: u64,
        outcome: Outcome<ChatResponse>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowupExchange {
    pub question: String,
    pub answer: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FollowupExchange {
    fn reset_result(&mut self) {
        self.answer = None;
        self.error = None;
        self.loading = false;
    }
}

#[derive(Debug, Clone)]
struct PendingSummary {
    generation: u64,
    url: String,
}

#[derive(Debug, Clone)]
pub struct Controller {
    query: String,
    loaded: Option<LoadedVideo>,
    loading: bool,
    error: Option<String>,
    history: History,
    followup: FollowupExchange,
    next_generation: u64,
    pending_summary: Option<PendingSummary>,
    pending_answer: Option<u64>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

impl Controller {
    pub fn new(initial: Location) -> Self {
        Self {
            query: String::new(),
            loaded: None,
            loading: false,
            error: None,
            history: History::new(initial),
            followup: FollowupExchange::default(),
            next_generation: 0,
            pending_summary: None,
            pending_answer: None,
        }
    }

    /// First render: react to whatever location the page was opened with.
    pub fn open(&mut self) -> Option<Effect> {
        self.location_changed()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_followup_question(&mut self, question: impl Into<String>) {
        self.followup.question = question.into();
    }

    pub fn navigate(&mut self, location: Location) -> Option<Effect> {
        self.history.push(location);
        self.location_changed()
    }

    pub fn back(&mut self) -> Option<Effect> {
        if self.history.back() {
            self.location_changed()
        } else {
            None
        }
    }

    pub fn forward(&mut self) -> Option<Effect> {
        if self.history.forward() {
            self.location_changed()
        } else {
            None
        }
    }

    /// Bring the view in line with the current location's `v` parameter.
    pub fn location_changed(&mut self) -> Option<Effect> {
        let Some(video_id) = self.history.current().video_id().map(str::to_owned) else {
            self.clear();
            return None;
        };

        if self.loaded_video_id() == Some(video_id.as_str()) {
            debug!(%video_id, "location matches loaded video");
            return None;
        }

        self.ensure_loaded(watch_url(&video_id))
    }

    /// Form submission. Ignored while a summary is loading or the input is
    /// empty.
    pub fn submit(&mut self) -> Option<Effect> {
        if !self.can_submit() {
            return None;
        }
        self.ensure_loaded(self.query.clone())
    }

    /// Start a summary for `url` unless it is already shown or already
    /// being fetched. Equality is exact against the backend's canonical
    /// `webpage_url`. The input always ends up showing `url`.
    pub fn ensure_loaded(&mut self, url: String) -> Option<Effect> {
        self.query.clone_from(&url);

        if self
            .loaded
            .as_ref()
            .is_some_and(|loaded| loaded.info.webpage_url == url)
        {
            debug!(%url, "summary already shown");
            return None;
        }

        if self
            .pending_summary
            .as_ref()
            .is_some_and(|pending| pending.url == url)
        {
            debug!(%url, "summary already in flight");
            return None;
        }

        Some(self.begin_summary(url))
    }

    pub fn ask(&mut self) -> Option<Effect> {
        if !self.can_ask() {
            return None;
        }
        let video_id = self.loaded.as_ref()?.info.video_id.clone();

        let generation = self.next_generation();
        self.followup.answer = None;
        self.followup.error = None;
        self.followup.loading = true;
        self.pending_answer = Some(generation);

        info!(generation, %video_id, "follow-up started");
        Some(Effect::Ask {
            generation,
            video_id,
            question: self.followup.question.clone(),
        })
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Summarized {
                generation,
                outcome,
            } => self.finish_summary(generation, outcome),
            Completion::Answered {
                generation,
                outcome,
            } => self.finish_answer(generation, outcome),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn loaded(&self) -> Option<&LoadedVideo> {
        self.loaded.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn followup(&self) -> &FollowupExchange {
        &self.followup
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.query.is_empty()
    }

    pub fn can_ask(&self) -> bool {
        self.results().is_some()
            && !self.followup.loading
            && !self.followup.question.trim().is_empty()
    }

    /// The summary to render; hidden while a new one is loading.
    pub fn results(&self) -> Option<&LoadedVideo> {
        self.loaded.as_ref().filter(|_| !self.loading)
    }

    pub fn visible_answer(&self) -> Option<&str> {
        if self.followup.loading || self.followup.error.is_some() {
            return None;
        }
        self.followup.answer.as_deref()
    }

    fn loaded_video_id(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .map(|loaded| loaded.info.video_id.as_str())
    }

    fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn begin_summary(&mut self, url: String) -> Effect {
        let generation = self.next_generation();

        self.loading = true;
        self.error = None;
        self.loaded = None;
        self.followup.reset_result();
        self.pending_answer = None;
        self.pending_summary = Some(PendingSummary {
            generation,
            url: url.clone(),
        });

        info!(generation, video_url = %url, "summary started");
        Effect::Summarize { generation, url }
    }

    fn clear(&mut self) {
        if let Some(pending) = self.pending_summary.take() {
            debug!(generation = pending.generation, "summary cancelled by navigation");
        }
        self.loading = false;
        self.loaded = None;
        self.error = None;
        self.followup.reset_result();
        self.pending_answer = None;
    }

    fn finish_summary(&mut self, generation: u64, outcome: Outcome<SummarizeResponse>) {
        if self.pending_summary.as_ref().map(|p| p.generation) != Some(generation) {
            debug!(generation, "dropping stale summary");
            return;
        }
        self.pending_summary = None;
        self.loading = false;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(message) => {
                warn!(generation, error = %message, "summary request failed");
                self.error = Some(message);
                return;
            }
        };

        if let Some(video_id) = reply.body.video_id() {
            self.sync_location(video_id);
        }

        if !reply.is_success() {
            let message = reply
                .body
                .error_message()
                .unwrap_or(SUMMARY_FALLBACK_ERROR)
                .to_string();
            warn!(generation, status = reply.status, error = %message, "summary rejected");
            self.error = Some(message);
            return;
        }

        match reply.body.into_loaded() {
            Ok(loaded) => {
                info!(generation, video_id = %loaded.info.video_id, "summary loaded");
                self.query = loaded.info.webpage_url.clone();
                self.loaded = Some(loaded);
            }
            Err(e) => {
                warn!(generation, error = %e, "summary unusable");
                self.error = Some(e.to_string());
            }
        }
    }

    fn finish_answer(&mut self, generation: u64, outcome: Outcome<ChatResponse>) {
        if self.pending_answer != Some(generation) {
            debug!(generation, "dropping stale answer");
            return;
        }
        self.pending_answer = None;
        self.followup.loading = false;

        match outcome {
            Ok(reply) if reply.is_success() => {
                let answer = reply.body.answer().unwrap_or(NO_ANSWER).to_string();
                self.followup.answer = Some(answer);
            }
            Ok(reply) => {
                let message = reply
                    .body
                    .error_message()
                    .unwrap_or(ANSWER_FALLBACK_ERROR)
                    .to_string();
                warn!(generation, status = reply.status, error = %message, "follow-up rejected");
                self.followup.error = Some(message);
            }
            Err(message) => {
                warn!(generation, error = %message, "follow-up request failed");
                self.followup.error = Some(message);
            }
        }
    }

    // Pushed silently: the location now describes what was just fetched.
    fn sync_location(&mut self, video_id: &str) {
        if self.history.current().video_id() != Some(video_id) {
            debug!(video_id, "updating location");
            self.history.push(Location::with_video(video_id));
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
