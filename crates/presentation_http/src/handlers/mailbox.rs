//! Mailbox page handlers
//!
//! The session state machine lives here: `NoIdentity` becomes `Active` only
//! through `create`, `create` on an active session replaces the identity,
//! and the read-only views never change state. Every provider failure turns
//! into a flash message plus a redirect to a safe prior page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use domain::{EmailAddress, Identity, generate_local_part, generate_password};
use rand::Rng;
use tracing::{error, info, instrument};

use crate::{
    error::user_message,
    session,
    state::AppState,
    views::{IndexView, InboxView, MessageView, ViewError},
};

/// Flash a message and send the user to a safe prior page
fn flash_redirect(
    jar: SignedCookieJar,
    state: &AppState,
    message: &str,
    location: &str,
) -> Response {
    let jar = session::push_flash(jar, &state.cookies.flash, message);
    (jar, Redirect::to(location)).into_response()
}

/// Turn a render result into a response
///
/// The templates are embedded and compile-checked at startup, so a render
/// failure here is a bug, not a user condition.
fn page(jar: SignedCookieJar, rendered: Result<String, ViewError>) -> Response {
    match rendered {
        Ok(html) => (jar, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET `/` - current identity or the prompt to create one
pub async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mailbox = session::load_session(&jar, &state.cookies.session);
    let (jar, flashes) = session::take_flashes(jar, &state.cookies.flash);

    let view = IndexView {
        email: mailbox.identity().map(|i| i.email.to_string()),
        flashes,
    };
    page(jar, state.templates.render_index(&view))
}

/// POST `/create` - provision a disposable address and bind the session
#[instrument(skip(state, jar))]
pub async fn create(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let domains = match state.mail.list_domains().await {
        Ok(domains) => domains,
        Err(e) => return flash_redirect(jar, &state, &user_message(&e), "/"),
    };

    // An empty domain list is a distinct failure: nothing to register under
    if domains.is_empty() {
        return flash_redirect(
            jar,
            &state,
            "The provider has no mail domains available right now.",
            "/",
        );
    }

    let chosen = &domains[rand::rng().random_range(0..domains.len())];
    let password = generate_password();
    let email = match EmailAddress::from_parts(&generate_local_part(), chosen) {
        Ok(email) => email,
        Err(e) => return flash_redirect(jar, &state, &e.to_string(), "/"),
    };

    match state.mail.provision(email.as_str(), &password).await {
        Ok(token) => {
            info!(email = %email, "mailbox provisioned");
            let mailbox = session::load_session(&jar, &state.cookies.session).bind(Identity {
                email,
                password,
                token,
            });
            let jar = session::store_session(jar, &state.cookies.session, &mailbox);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => flash_redirect(jar, &state, &user_message(&e), "/"),
    }
}

/// GET `/inbox` - list messages for the bound identity
#[instrument(skip(state, jar))]
pub async fn inbox(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mailbox = session::load_session(&jar, &state.cookies.session);
    let Some(identity) = mailbox.identity().cloned() else {
        return flash_redirect(jar, &state, "No email registered - generate one first.", "/");
    };

    match state.mail.list_messages(&identity.token).await {
        Ok(messages) => {
            let (jar, flashes) = session::take_flashes(jar, &state.cookies.flash);
            let view = InboxView {
                email: identity.email.to_string(),
                flashes,
                messages: messages.into_iter().map(Into::into).collect(),
            };
            page(jar, state.templates.render_inbox(&view))
        }
        Err(e) => flash_redirect(jar, &state, &user_message(&e), "/"),
    }
}

/// GET `/message/{id}` - one message's subject, sender and bodies
#[instrument(skip(state, jar))]
pub async fn message_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: SignedCookieJar,
) -> Response {
    let mailbox = session::load_session(&jar, &state.cookies.session);
    let Some(identity) = mailbox.identity().cloned() else {
        return flash_redirect(jar, &state, "No email registered - generate one first.", "/");
    };

    match state.mail.fetch_message(&identity.token, &id).await {
        Ok(detail) => {
            let view = MessageView::from(detail);
            page(jar, state.templates.render_message(&view))
        }
        Err(e) => flash_redirect(jar, &state, &user_message(&e), "/inbox"),
    }
}
