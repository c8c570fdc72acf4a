//! The OAuth callback orchestrator.
//!
//! Processes the provider's redirect as a staged pipeline. Each stage can
//! terminate the flow with a typed error; only the final stage redirects.
//! Cookie handling stays in the route layer: every callback response clears
//! the state cookie regardless of outcome, so a `(code, state)` pair can
//! never be replayed.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use newsbrief_providers::{FeedConnector, OAuthState};

use crate::config::CONNECTIONS_PATH;
use crate::error::{ServerError, ServerResult};
use crate::session::Identity;
use crate::users::UserStore;

/// Pipeline position, for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStage {
    AwaitingParams,
    ValidatingState,
    ExchangingCode,
    Persisting,
    Redirecting,
}

impl fmt::Display for CallbackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingParams => "awaiting_params",
            Self::ValidatingState => "validating_state",
            Self::ExchangingCode => "exchanging_code",
            Self::Persisting => "persisting",
            Self::Redirecting => "redirecting",
        };
        f.write_str(name)
    }
}

/// Query parameters of the provider redirect.
#[derive(Debug, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Runs the callback pipeline.
///
/// Returns the redirect target on success. The state verification compares
/// the incoming `state` byte-for-byte against the value stored at
/// initiation; the user is recovered from the state payload, falling back
/// to the request's own identity.
pub async fn run_callback(
    connector: &FeedConnector,
    users: &Arc<dyn UserStore>,
    params: CallbackParams,
    stored_state: Option<String>,
    identity: Option<Identity>,
) -> ServerResult<&'static str> {
    debug!(stage = %CallbackStage::AwaitingParams, "processing provider callback");
    let (code, state) = match (params.code, params.state) {
        (Some(code), Some(state)) => (code, state),
        _ => return Err(ServerError::MissingParameters),
    };

    debug!(stage = %CallbackStage::ValidatingState, "verifying state");
    match stored_state {
        Some(stored) if stored == state => {}
        _ => return Err(ServerError::InvalidState),
    }

    let user_id = match OAuthState::decode(&state) {
        Ok(decoded) => decoded.user_id,
        Err(e) => {
            warn!(error = %e, "state payload undecodable, falling back to session identity");
            match &identity {
                Some(identity) => identity.user_id.clone(),
                None => return Err(ServerError::NotAuthenticated),
            }
        }
    };

    debug!(stage = %CallbackStage::ExchangingCode, user_id, "exchanging authorization code");
    let tokens = connector.exchange_code(&code).await?;

    debug!(stage = %CallbackStage::Persisting, user_id, "persisting tokens");
    if let Err(e) = connector.store_tokens(&user_id, tokens) {
        // the user already granted access; losing the redirect now would
        // strand them on the provider's page
        warn!(user_id, error = %e, "token persistence failed, continuing");
    }
    if let Some(identity) = &identity {
        users.get_or_create(&user_id, &identity.email);
    }

    info!(stage = %CallbackStage::Redirecting, user_id, "feed account connected");
    Ok(CONNECTIONS_PATH)
}
