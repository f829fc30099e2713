use crate::{
    api::{ApiClient, ApiError, AskRequest, ThreadSummary},
    state::{
        auth::use_auth,
        guest::{ChatMessage, ChatRole},
    },
};
use leptos::*;

const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
const SIGN_IN_MESSAGE: &str = "Sign in again to continue this conversation.";

/// Registered conversation; unlike the guest chat there is no question allowance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadChat {
    pub transcript: Vec<ChatMessage>,
    pub sending: bool,
    pub error: Option<String>,
}

impl ThreadChat {
    /// Trimmed question to send, or `None` when blank or a request is in flight.
    pub fn begin(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if self.sending || message.is_empty() {
            return None;
        }
        self.sending = true;
        self.error = None;
        Some(message.to_string())
    }

    pub fn answered(&mut self, question: String, answer: String) {
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: question,
        });
        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            content: answer,
        });
        self.sending = false;
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.sending = false;
        self.error = Some(message.into());
    }
}

pub fn thread_ask_error_message(err: &ApiError) -> String {
    if err.is_network() {
        return NETWORK_ERROR_MESSAGE.to_string();
    }
    match err.status {
        Some(401) => SIGN_IN_MESSAGE.to_string(),
        Some(403) => "You do not have access to this conversation.".to_string(),
        Some(404) => "This conversation no longer exists.".to_string(),
        _ => err.error.clone(),
    }
}

pub async fn ask_in_thread(
    api: &ApiClient,
    chat: RwSignal<ThreadChat>,
    token: &str,
    user_id: i64,
    thread: &ThreadSummary,
    message: String,
) {
    let Some(question) = chat.try_update(|c| c.begin(&message)).flatten() else {
        return;
    };
    let request = AskRequest {
        user_id,
        message: question.clone(),
        figure_slug: thread.figure_slug.clone(),
        thread_id: Some(thread.id),
        source_page: None,
    };
    match api.ask(token, &request).await {
        Ok(reply) => chat.update(|c| c.answered(question, reply.answer)),
        Err(err) => {
            log::warn!("question in thread {} failed: {}", thread.id, err);
            chat.update(|c| c.failed(thread_ask_error_message(&err)));
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThreadViewModel {
    pub chat: RwSignal<ThreadChat>,
    pub draft: RwSignal<String>,
    pub ask_action: Action<String, ()>,
}

impl ThreadViewModel {
    pub fn submit(&self) {
        if self.ask_action.pending().get_untracked() {
            return;
        }
        self.ask_action.dispatch(self.draft.get_untracked());
    }
}

pub fn use_thread_view_model(thread: ThreadSummary) -> ThreadViewModel {
    let auth = use_auth();
    let chat = create_rw_signal(ThreadChat::default());
    let draft = create_rw_signal(String::new());
    let thread = store_value(thread);

    let ask_action = create_action(move |message: &String| {
        let api = auth.api();
        let session = auth.state.with_untracked(|s| {
            s.token
                .clone()
                .zip(s.user.as_ref().map(|user| user.user_id))
        });
        let thread = thread.get_value();
        let message = message.clone();
        async move {
            let Some((token, user_id)) = session else {
                chat.update(|c| c.failed(SIGN_IN_MESSAGE));
                return;
            };
            let before = chat.with_untracked(|c| c.transcript.len());
            ask_in_thread(&api, chat, &token, user_id, &thread, message).await;
            if chat.with_untracked(|c| c.transcript.len()) > before {
                draft.set(String::new());
            }
        }
    });

    ThreadViewModel {
        chat,
        draft,
        ask_action,
    }
}
