use crate::api::ApiClient;
use crate::auth::{self, AuthAction, AuthForm, AuthMode, Registration};
use crate::session::Session;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub client: ApiClient,
    pub on_authenticated: Callback<Session>,
}

fn text_input(
    kind: &'static str,
    value: &str,
    form: &UseReducerHandle<AuthForm>,
    action: fn(String) -> AuthAction,
) -> Html {
    let dispatcher = form.dispatcher();
    html! {
        <input
            type={kind}
            required=true
            class="w-full px-4 py-2 bg-[#f1f4f9] border border-[#B2CBDE] rounded-lg text-[#173E63] focus:outline-none focus:ring-2 focus:ring-[#173E63]"
            value={value.to_string()}
            oninput={Callback::from(move |e: InputEvent| {
                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                dispatcher.dispatch(action(input.value()));
            })}
        />
    }
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let form = use_reducer(AuthForm::default);
    let is_login = form.mode == AuthMode::Login;

    let on_submit = {
        let form = form.clone();
        let client = props.client.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if form.pending {
                return;
            }

            let username = form.username.clone();
            let password = form.password.clone();
            let password2 = form.password2.clone();
            let mode = form.mode;
            let dispatcher = form.dispatcher();
            let client = client.clone();
            let on_authenticated = on_authenticated.clone();

            dispatcher.dispatch(AuthAction::Started);
            spawn_local(async move {
                let outcome = match mode {
                    AuthMode::Login => auth::login(&client, &username, &password).await,
                    AuthMode::Register => {
                        let registration =
                            auth::register(&client, &username, &password, &password2).await;
                        if registration.account_created() && !registration.login_succeeded() {
                            log::warn!("account {} exists but the follow-up login failed", username);
                        }
                        match registration {
                            Registration::LoggedIn(session) => Ok(session),
                            failed => Err(failed
                                .error_message()
                                .unwrap_or(auth::REGISTRATION_FAILED)
                                .to_string()),
                        }
                    }
                };

                match outcome {
                    Ok(session) => {
                        dispatcher.dispatch(AuthAction::Finished);
                        on_authenticated.emit(session);
                    }
                    Err(message) => dispatcher.dispatch(AuthAction::Failed(message)),
                }
            });
        })
    };

    let toggle_mode = {
        let dispatcher = form.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(AuthAction::ToggleMode))
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#D8E1E8]">
            <div class="w-full max-w-md bg-white border border-white/50 rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-black text-[#173E63] tracking-tight">{ if is_login { "Login" } else { "Register" } }</h1>
                </div>

                if let Some(msg) = &form.error {
                    <p class="text-sm text-red-500 text-center mb-4">{ msg.clone() }</p>
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-[#173E63]">{"Username"}</label>
                        { text_input("text", &form.username, &form, AuthAction::Username) }
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-[#173E63]">{"Password"}</label>
                        { text_input("password", &form.password, &form, AuthAction::Password) }
                    </div>

                    if !is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-[#173E63]">{"Confirm Password"}</label>
                            { text_input("password", &form.password2, &form, AuthAction::Password2) }
                        </div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={form.pending}
                    >
                        { if form.pending { "Please wait..." } else if is_login { "Login" } else { "Register" } }
                    </button>
                </form>

                <button
                    type="button"
                    class="mt-3 w-full border border-[#173E63] text-[#173E63] py-2 rounded-lg font-semibold hover:bg-[#173E63]/5"
                    onclick={toggle_mode}
                >
                    { if is_login { "Register" } else { "Back to Login" } }
                </button>
            </div>
        </div>
    }
}
