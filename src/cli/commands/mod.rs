pub mod api;
pub mod front;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("promeni")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(front::command())
        .subcommand(api::command());

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "promeni");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_front_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "promeni",
            "front",
            "--port",
            "8080",
            "--api-key",
            "web-api-key",
            "--api-url",
            "http://localhost:7158/",
            "--session-ttl",
            "3600",
        ]);

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, front::NAME);
        assert_eq!(sub.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            sub.get_one::<String>("api-key").cloned(),
            Some("web-api-key".to_string())
        );
        assert_eq!(
            sub.get_one::<String>("api-url").cloned(),
            Some("http://localhost:7158/".to_string())
        );
        assert_eq!(sub.get_one::<u64>("session-ttl").copied(), Some(3600));
        assert_eq!(
            sub.get_one::<String>("identity-url").cloned(),
            Some(crate::firebase::DEFAULT_IDENTITY_URL.to_string())
        );
    }

    #[test]
    fn test_api_args() {
        let command = new();
        let matches =
            command.get_matches_from(vec!["promeni", "api", "--api-key", "web-api-key"]);

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, api::NAME);
        assert_eq!(sub.get_one::<u16>("port").copied(), Some(7158));
        assert_eq!(
            sub.get_one::<String>("api-key").cloned(),
            Some("web-api-key".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PROMENI_API_KEY", Some("env-api-key")),
                ("PROMENI_FRONT_PORT", Some("443")),
                ("PROMENI_API_URL", Some("https://api.promeni.dev/")),
                ("PROMENI_SESSION_TTL", Some("1800")),
                ("PROMENI_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["promeni", "front"]);

                let (_, sub) = matches.subcommand().expect("subcommand");
                assert_eq!(sub.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    sub.get_one::<String>("api-key").cloned(),
                    Some("env-api-key".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>("api-url").cloned(),
                    Some("https://api.promeni.dev/".to_string())
                );
                assert_eq!(sub.get_one::<u64>("session-ttl").copied(), Some(1800));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PROMENI_LOG_LEVEL", Some(level)),
                    ("PROMENI_API_KEY", Some("env-api-key")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["promeni", "api"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PROMENI_LOG_LEVEL", None::<&str>),
                    ("PROMENI_API_KEY", Some("env-api-key")),
                ],
                || {
                    let mut args = vec!["promeni".to_string(), "api".to_string()];

                    // Add the appropriate number of "-v" flags based on the index
                    if index > 0 {
                        let v = format!("-{}", "v".repeat(index));
                        args.push(v);
                    }

                    let command = new();
                    let matches = command.get_matches_from(args);

                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }
}
