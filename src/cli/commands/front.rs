use crate::firebase::DEFAULT_IDENTITY_URL;
use clap::{value_parser, Arg, Command};

pub const NAME: &str = "front";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Run the HTML front service")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PROMENI_FRONT_PORT")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("Identity provider web API key")
                .env("PROMENI_API_KEY")
                .required(true),
        )
        .arg(
            Arg::new("identity-url")
                .long("identity-url")
                .help("Identity provider REST base URL")
                .default_value(DEFAULT_IDENTITY_URL)
                .env("PROMENI_IDENTITY_URL"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the backend API service")
                .default_value("http://localhost:7158/")
                .env("PROMENI_API_URL"),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .help("Session idle timeout in seconds")
                .default_value("7200")
                .env("PROMENI_SESSION_TTL")
                .value_parser(value_parser!(u64)),
        )
}
