pub mod credentials;
pub mod endpoint;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

pub const CMD_CREATE: &str = "create";
pub const CMD_CHECK: &str = "check";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let create = Command::new(CMD_CREATE).about("Create a user through the signup service");
    let create = endpoint::with_args(create);
    let create = credentials::with_username(create);
    let create = credentials::with_password(create);

    let check = Command::new(CMD_CHECK).about("Check a password against the signup criteria");
    let check = credentials::with_password(check);

    let command = Command::new("signup-form")
        .about("Password-validating user signup")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(create)
        .subcommand(check);

    logging::with_args(command)
}
