//! Cookie-backed session and flash storage
//!
//! The signed session cookie is the entirety of durable state: it carries the
//! serialized `MailboxSession`. Flash messages live in a second signed cookie
//! that is read and cleared on the next page render. A cookie that fails to
//! parse is treated as absent, so a stale or tampered session degrades to
//! `NoIdentity` instead of erroring.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use domain::MailboxSession;
use tracing::warn;

fn build_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(name.to_owned()).path("/").build()
}

/// Read the mailbox session from the jar
pub fn load_session(jar: &SignedCookieJar, name: &str) -> MailboxSession {
    let Some(cookie) = jar.get(name) else {
        return MailboxSession::NoIdentity;
    };

    serde_json::from_str(cookie.value()).unwrap_or_else(|e| {
        warn!(error = %e, "discarding unparseable session cookie");
        MailboxSession::NoIdentity
    })
}

/// Write the mailbox session into the jar, replacing any previous value
pub fn store_session(jar: SignedCookieJar, name: &str, session: &MailboxSession) -> SignedCookieJar {
    match serde_json::to_string(session) {
        Ok(value) => jar.add(build_cookie(name, value)),
        Err(e) => {
            // Serialization of a plain enum cannot realistically fail; keep
            // the previous session rather than corrupting the cookie
            warn!(error = %e, "failed to serialize session");
            jar
        }
    }
}

/// Append a flash message for the next rendered page
pub fn push_flash(jar: SignedCookieJar, name: &str, message: &str) -> SignedCookieJar {
    let mut messages = peek_flashes(&jar, name);
    messages.push(message.to_owned());

    match serde_json::to_string(&messages) {
        Ok(value) => jar.add(build_cookie(name, value)),
        Err(e) => {
            warn!(error = %e, "failed to serialize flash messages");
            jar
        }
    }
}

/// Read and clear all pending flash messages
pub fn take_flashes(jar: SignedCookieJar, name: &str) -> (SignedCookieJar, Vec<String>) {
    let messages = peek_flashes(&jar, name);
    let jar = if messages.is_empty() {
        jar
    } else {
        jar.remove(removal_cookie(name))
    };
    (jar, messages)
}

fn peek_flashes(jar: &SignedCookieJar, name: &str) -> Vec<String> {
    jar.get(name)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}
