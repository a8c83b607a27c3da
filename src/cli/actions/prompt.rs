use anyhow::{Context, Result};
use secrecy::SecretString;
use std::io::{self, BufRead, IsTerminal, Write};

/// Read a password from stdin, one line. Only the line terminator is
/// stripped: surrounding spaces are part of the password and get validated.
///
/// # Errors
/// Returns an error if stdin cannot be read.
pub fn read_password() -> Result<SecretString> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush().context("Error flushing prompt")?;
    }

    read_line(&mut stdin.lock())
}

fn read_line(reader: &mut impl BufRead) -> Result<SecretString> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Error reading password from stdin")?;

    let password = line.strip_suffix('\n').unwrap_or(&line);
    let password = password.strip_suffix('\r').unwrap_or(password);

    Ok(SecretString::from(password.to_string()))
}
