use crate::{
    cli::globals::GlobalArgs, firebase::FirebaseAuthenticator, front, session::SessionStore,
};
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub session_ttl_seconds: u64,
    pub globals: GlobalArgs,
}

/// Start the front service.
/// # Errors
/// Returns an error if the provider client cannot be built or the server
/// fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let authenticator =
        FirebaseAuthenticator::new(&args.globals.identity_url, args.globals.api_key.clone())
            .context("Failed to build identity provider client")?;

    let sessions = SessionStore::new(Duration::from_secs(args.session_ttl_seconds));

    let state = front::FrontState::new(Arc::new(authenticator), sessions, &args.api_url)?;

    front::new(args.port, state).await
}
