use crate::{
    api::{ApiClient, ApiError, FigureSummary, GuestAskRequest},
    state::token::TokenStore,
    utils::storage::StorageArea,
};
use leptos::*;

pub const GUEST_QUESTION_LIMIT: u32 = 3;
pub const GUEST_MARKER_KEY: &str = "pit_guest_active";

const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestPhase {
    #[default]
    Booting,
    Ready,
    Sending,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskDecision {
    Send(String),
    ShowQuota,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuestSession {
    pub slug: String,
    pub phase: GuestPhase,
    pub asked: u32,
    pub transcript: Vec<ChatMessage>,
    pub figure: Option<FigureSummary>,
    pub error: Option<String>,
    pub quota_modal_open: bool,
    pub remaining_hint: Option<u32>,
}

impl GuestSession {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    pub fn quota_exhausted(&self) -> bool {
        self.asked >= GUEST_QUESTION_LIMIT
    }

    /// The server's count can only lower what the local counter allows.
    pub fn remaining(&self) -> u32 {
        let local = GUEST_QUESTION_LIMIT.saturating_sub(self.asked);
        self.remaining_hint.map_or(local, |hint| hint.min(local))
    }

    pub fn is_sending(&self) -> bool {
        self.phase == GuestPhase::Sending
    }

    pub fn started(&mut self) {
        self.phase = GuestPhase::Ready;
        self.error = None;
    }

    pub fn failed_to_start(&mut self, message: impl Into<String>) {
        self.phase = GuestPhase::Error;
        self.error = Some(message.into());
    }

    /// Moves to `Sending` only when a request should actually go out.
    pub fn decide(&mut self, message: &str) -> AskDecision {
        if self.phase != GuestPhase::Ready {
            return AskDecision::Ignore;
        }
        let message = message.trim();
        if message.is_empty() {
            return AskDecision::Ignore;
        }
        if self.quota_exhausted() {
            self.quota_modal_open = true;
            return AskDecision::ShowQuota;
        }
        self.phase = GuestPhase::Sending;
        self.error = None;
        AskDecision::Send(message.to_string())
    }

    pub fn answered(&mut self, question: String, answer: String, remaining: Option<u32>) {
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: question,
        });
        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            content: answer,
        });
        self.asked = (self.asked + 1).min(GUEST_QUESTION_LIMIT);
        self.remaining_hint = remaining;
        self.phase = GuestPhase::Ready;
    }

    /// Transcript and counter stay as they were.
    pub fn rejected(&mut self, err: &ApiError) {
        self.phase = GuestPhase::Ready;
        if err.is_quota_rejection() {
            self.quota_modal_open = true;
        } else {
            self.error = Some(ask_error_message(err));
        }
    }

    pub fn close_quota_modal(&mut self) {
        self.quota_modal_open = false;
    }
}

pub fn ask_error_message(err: &ApiError) -> String {
    if err.is_network() {
        NETWORK_ERROR_MESSAGE.to_string()
    } else if let Some(status) = err.status {
        format!("Error {}", status)
    } else {
        err.error.clone()
    }
}

pub fn mark_guest_session(store: &TokenStore) {
    if let Err(err) = store
        .backend()
        .set(StorageArea::Session, GUEST_MARKER_KEY, "1")
    {
        log::warn!("guest marker not stored: {}", err);
    }
}

pub fn has_guest_session(store: &TokenStore) -> bool {
    store
        .backend()
        .get(StorageArea::Session, GUEST_MARKER_KEY)
        .is_some_and(|value| !value.is_empty())
}

pub fn clear_guest_session(store: &TokenStore) {
    if let Err(err) = store.backend().remove(StorageArea::Session, GUEST_MARKER_KEY) {
        log::warn!("guest marker not cleared: {}", err);
    }
}

pub async fn start_guest_session(
    api: &ApiClient,
    store: &TokenStore,
    state: RwSignal<GuestSession>,
) {
    let slug = state.with_untracked(|s| s.slug.clone());
    match api.start_guest_session(&slug).await {
        Ok(started) => {
            mark_guest_session(store);
            log::info!(
                "guest session started for {} (limit {:?})",
                slug,
                started.max_questions
            );
            state.update(GuestSession::started);
        }
        Err(err) => {
            log::warn!("guest session for {} failed: {}", slug, err);
            let message = if err.is_network() {
                NETWORK_ERROR_MESSAGE.to_string()
            } else {
                err.error
            };
            state.update(|s| s.failed_to_start(message));
            return;
        }
    }

    match api.get_figure(&slug).await {
        Ok(figure) => state.update(|s| s.figure = Some(figure)),
        Err(err) => log::debug!("figure metadata unavailable for {}: {}", slug, err),
    }
}

pub async fn ask_guest_question(api: &ApiClient, state: RwSignal<GuestSession>, message: String) {
    let decision = state
        .try_update(|s| s.decide(&message))
        .unwrap_or(AskDecision::Ignore);
    let question = match decision {
        AskDecision::Send(question) => question,
        AskDecision::ShowQuota | AskDecision::Ignore => return,
    };

    let request = GuestAskRequest {
        message: question.clone(),
        source_page: None,
    };
    match api.guest_ask(&request).await {
        Ok(reply) => {
            state.update(|s| s.answered(question, reply.answer, reply.remaining_questions));
        }
        Err(err) => {
            log::warn!("guest question failed: {}", err);
            state.update(|s| s.rejected(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> GuestSession {
        let mut session = GuestSession::new("guy-fawkes");
        session.started();
        session
    }

    #[test]
    fn new_session_is_booting() {
        let session = GuestSession::new("guy-fawkes");
        assert_eq!(session.phase, GuestPhase::Booting);
        assert_eq!(session.remaining(), GUEST_QUESTION_LIMIT);
    }

    #[test]
    fn asking_before_ready_is_ignored() {
        let mut session = GuestSession::new("guy-fawkes");
        assert_eq!(session.decide("hello"), AskDecision::Ignore);
    }

    #[test]
    fn blank_message_is_ignored() {
        let mut session = ready();
        assert_eq!(session.decide("   "), AskDecision::Ignore);
        assert_eq!(session.phase, GuestPhase::Ready);
    }

    #[test]
    fn message_is_trimmed_and_session_enters_sending() {
        let mut session = ready();
        assert_eq!(
            session.decide("  why?  "),
            AskDecision::Send("why?".to_string())
        );
        assert!(session.is_sending());
        assert_eq!(session.decide("again"), AskDecision::Ignore);
    }

    #[test]
    fn fourth_question_opens_quota_without_sending() {
        let mut session = ready();
        for n in 0..GUEST_QUESTION_LIMIT {
            assert!(matches!(session.decide("q"), AskDecision::Send(_)));
            session.answered("q".into(), format!("a{}", n), None);
        }
        assert!(!session.quota_modal_open);
        assert_eq!(session.decide("one more"), AskDecision::ShowQuota);
        assert!(session.quota_modal_open);
        assert_eq!(session.phase, GuestPhase::Ready);
        assert_eq!(session.transcript.len(), 6);
    }

    #[test]
    fn server_remaining_count_only_lowers_the_local_one() {
        let mut session = ready();
        session.decide("q");
        session.answered("q".into(), "a".into(), Some(0));
        assert_eq!(session.remaining(), 0);

        let mut session = ready();
        session.decide("q");
        session.answered("q".into(), "a".into(), Some(9));
        assert_eq!(session.remaining(), 2);
    }

    #[test]
    fn server_quota_rejection_opens_modal_below_limit() {
        let mut session = ready();
        session.decide("q");
        session.rejected(&ApiError::http(429, None));
        assert!(session.quota_modal_open);
        assert_eq!(session.asked, 0);
        assert!(session.error.is_none());
        assert_eq!(session.phase, GuestPhase::Ready);
    }

    #[test]
    fn other_failures_show_inline_error() {
        let mut session = ready();
        session.decide("q");
        session.rejected(&ApiError::http(500, Some("boom".into())));
        assert_eq!(session.error.as_deref(), Some("Error 500"));
        assert!(!session.quota_modal_open);

        session.decide("q");
        session.rejected(&ApiError::request_failed("Request failed: refused"));
        assert_eq!(session.error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn guest_marker_round_trips_through_session_storage() {
        let store = TokenStore::in_memory();
        assert!(!has_guest_session(&store));
        mark_guest_session(&store);
        assert!(has_guest_session(&store));
        clear_guest_session(&store);
        assert!(!has_guest_session(&store));
    }
}
