pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::gate::GIT_COMMIT_HASH)
            .into_boxed_str(),
    );

    let command = Command::new("dogana")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("DOGANA_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("verify-url")
                .short('u')
                .long("verify-url")
                .help("Identity verification endpoint, example: https://id.tld/verify")
                .env("DOGANA_VERIFY_URL")
                .required(true),
        )
        .arg(
            Arg::new("verify-timeout-ms")
                .long("verify-timeout-ms")
                .help("Identity verification timeout in milliseconds, fail closed afterwards")
                .default_value("3000")
                .env("DOGANA_VERIFY_TIMEOUT_MS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("session-cookie")
                .long("session-cookie")
                .help("Name of the cookie carrying the opaque session credential")
                .default_value("__session")
                .env("DOGANA_SESSION_COOKIE"),
        )
        .arg(
            Arg::new("sign-in-path")
                .long("sign-in-path")
                .help("Redirect target for unauthenticated requests to protected routes")
                .default_value("/sign-in")
                .env("DOGANA_SIGN_IN_PATH"),
        )
        .arg(
            Arg::new("landing-path")
                .long("landing-path")
                .help("Redirect target for authenticated requests to public-only routes")
                .default_value("/dashboard")
                .env("DOGANA_LANDING_PATH"),
        )
        .arg(
            Arg::new("public-route")
                .long("public-route")
                .help("Additional public route pattern (regex, anchored to the path component)")
                .env("DOGANA_PUBLIC_ROUTES")
                .action(ArgAction::Append)
                .value_delimiter(','),
        );

    logging::with_args(command)
}
