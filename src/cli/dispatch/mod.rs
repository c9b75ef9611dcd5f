use crate::cli::{
    actions::{api, front, Action},
    commands,
    globals::GlobalArgs,
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Turn parsed matches into the action the binary will execute.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((name, sub)) if name == commands::front::NAME => Ok(Action::Front(front::Args {
            port: sub.get_one::<u16>("port").copied().unwrap_or(8080),
            api_url: sub
                .get_one::<String>("api-url")
                .cloned()
                .context("missing required argument: --api-url")?,
            session_ttl_seconds: sub
                .get_one::<u64>("session-ttl")
                .copied()
                .unwrap_or(crate::session::DEFAULT_IDLE_TIMEOUT_SECONDS),
            globals: globals_from(sub)?,
        })),
        Some((name, sub)) if name == commands::api::NAME => Ok(Action::Api(api::Args {
            port: sub.get_one::<u16>("port").copied().unwrap_or(7158),
            globals: globals_from(sub)?,
        })),
        _ => Err(anyhow::anyhow!("missing subcommand: front or api")),
    }
}

fn globals_from(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let identity_url = matches
        .get_one::<String>("identity-url")
        .cloned()
        .context("missing required argument: --identity-url")?;
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .context("missing required argument: --api-key")?;

    Ok(GlobalArgs::new(identity_url, SecretString::from(api_key)))
}
