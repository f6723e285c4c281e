//! Login page: email + password against the session store.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::Credentials;

use crate::state::auth::AuthContext;

pub const MISSING_INPUT_MESSAGE: &str = "Please enter both email and password";

/// Trimmed credentials, or the message to show when either field is blank.
///
/// # Errors
///
/// Returns [`MISSING_INPUT_MESSAGE`] if the email or password is empty.
pub fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_INPUT_MESSAGE);
    }
    Ok(Credentials::new(email, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let input_error = RwSignal::new(None::<&'static str>);

    let navigate = use_navigate();
    Effect::new(move || {
        if state.get().is_authenticated() {
            navigate("/", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.get_untracked().is_loading() {
            return;
        }
        let credentials = match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                input_error.set(Some(message));
                return;
            }
        };
        input_error.set(None);
        auth.store.clear_error();

        #[cfg(feature = "csr")]
        {
            let store = auth.store.clone();
            leptos::task::spawn_local(async move {
                // Failures are mirrored into `last_error` by the store.
                let _ = store.login(&credentials).await;
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = credentials;
    };

    let message = move || {
        input_error
            .get()
            .map(ToOwned::to_owned)
            .or_else(|| state.get().last_error().map(ToOwned::to_owned))
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"OpenLab Management"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || state.get().is_loading()>
                        {move || if state.get().is_loading() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                {move || message().map(|m| view! { <p class="login-message">{m}</p> })}
            </div>
        </div>
    }
}
