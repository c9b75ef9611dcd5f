use crate::firebase::DEFAULT_IDENTITY_URL;
use clap::{value_parser, Arg, Command};

pub const NAME: &str = "api";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Run the bearer-token protected API service")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("7158")
                .env("PROMENI_API_PORT")
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
}
