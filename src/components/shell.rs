use crate::api::ApiClient;
use crate::components::auth_screen::AuthScreen;
use crate::components::icons::icon_log_out;
use crate::components::workspace::ExpenseWorkspace;
use crate::config::Config;
use crate::session::{Session, SessionContext, SessionStore};
use crate::storage::LocalStorage;
use yew::prelude::*;

/// Session shell: owns the session for the lifetime of the page.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| Config::load(), ());
    let sessions = use_memo(|_| SessionStore::new(LocalStorage), ());
    let session = {
        let sessions = sessions.clone();
        use_state(move || sessions.restore())
    };

    // Stable across renders so the client handed down only changes with the token.
    let logout = {
        let sessions = sessions.clone();
        let session = session.clone();
        let logout = use_memo(
            move |_| {
                sessions.logout_callback(Callback::from(move |_| session.set(Session::default())))
            },
            (),
        );
        (*logout).clone()
    };

    let on_authenticated = {
        let sessions = sessions.clone();
        let session = session.clone();
        use_callback(
            move |next: Session, _| {
                sessions.save(&next);
                session.set(next);
            },
            (),
        )
    };

    let client = ApiClient::browser(config.api_base_url.clone())
        .with_token(session.token.clone())
        .on_unauthorized(logout.clone());

    if !session.is_authenticated() {
        return html! { <AuthScreen client={client} on_authenticated={on_authenticated} /> };
    }

    let context = SessionContext {
        session: (*session).clone(),
        logout,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            <div class="min-h-screen flex flex-col bg-[#f5f5f5]">
                <Header />
                <main class="flex-1 p-4">
                    <ExpenseWorkspace client={client} />
                </main>
            </div>
        </ContextProvider<SessionContext>>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let context = use_context::<SessionContext>();
    let Some(context) = context else {
        return html! {};
    };
    let on_logout = {
        let logout = context.logout.clone();
        Callback::from(move |_| logout.emit(()))
    };

    html! {
        <header class="bg-[#173E63] h-16 flex items-center justify-between px-6 shadow-md">
            <h1 class="text-white text-lg font-bold tracking-tight">
                { format!("Hello, {}", context.session.display_name()) }
            </h1>
            <button onclick={on_logout} class="flex items-center gap-2 px-4 py-2 rounded-xl border border-white text-white text-[13px] font-medium hover:bg-white/10 transition-colors">
                { icon_log_out() }
                <span>{"Logout"}</span>
            </button>
        </header>
    }
}
