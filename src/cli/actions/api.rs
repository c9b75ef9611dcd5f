use crate::{api, cli::globals::GlobalArgs, firebase::FirebaseAuthenticator};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub globals: GlobalArgs,
}

/// Start the API service.
/// # Errors
/// Returns an error if the provider client cannot be built or the server
/// fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let verifier =
        FirebaseAuthenticator::new(&args.globals.identity_url, args.globals.api_key.clone())
            .context("Failed to build identity provider client")?;

    let state = api::ApiState {
        verifier: Arc::new(verifier),
        identity_url: args.globals.identity_url,
    };

    api::new(args.port, state).await
}
