use crate::{
    api::ApiClient,
    components::layout::hard_redirect,
    state::{
        auth::use_auth,
        guest::{ask_guest_question, start_guest_session, GuestSession},
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct GuestViewModel {
    pub session: RwSignal<GuestSession>,
    pub draft: RwSignal<String>,
    pub ask_action: Action<String, ()>,
}

impl GuestViewModel {
    pub fn submit(&self) {
        if self.ask_action.pending().get_untracked() {
            return;
        }
        self.ask_action.dispatch(self.draft.get_untracked());
    }

    pub fn figure_name(&self) -> String {
        self.session.with(|s| {
            s.figure
                .as_ref()
                .map(|figure| figure.name.clone())
                .unwrap_or_else(|| s.slug.clone())
        })
    }

    pub fn go_register(&self) {
        self.session.update(GuestSession::close_quota_modal);
        hard_redirect("/register");
    }

    pub fn go_home(&self) {
        self.session.update(GuestSession::close_quota_modal);
        hard_redirect("/");
    }
}

pub fn use_guest_view_model(slug: String) -> GuestViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let store = use_auth().store();
    let session = create_rw_signal(GuestSession::new(slug));
    let draft = create_rw_signal(String::new());

    let start_api = api.clone();
    create_effect(move |_| {
        let api = start_api.clone();
        let store = store.clone();
        spawn_local(async move {
            start_guest_session(&api, &store, session).await;
        });
    });

    let ask_action = create_action(move |message: &String| {
        let api = api.clone();
        let message = message.clone();
        async move {
            let before = session.with_untracked(|s| s.transcript.len());
            ask_guest_question(&api, session, message).await;
            if session.with_untracked(|s| s.transcript.len()) > before {
                draft.set(String::new());
            }
        }
    });

    GuestViewModel {
        session,
        draft,
        ask_action,
    }
}
