// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or environment variable.

use secrecy::SecretString;
use sealnote_core::SealnoteError;

/// Environment variable for the current password (headless use).
pub const PASSWORD_ENV_VAR: &str = "SEALNOTE_PASSWORD";

/// Environment variable for the replacement password during a password
/// change (headless use).
pub const NEW_PASSWORD_ENV_VAR: &str = "SEALNOTE_NEW_PASSWORD";

/// Get the current password from `SEALNOTE_PASSWORD` or an interactive
/// TTY prompt.
///
/// Priority:
/// 1. `SEALNOTE_PASSWORD` (for scripts and CI)
/// 2. Interactive TTY prompt via `rpassword`
///
/// Returns an error if neither source is available.
pub fn get_password(label: &str) -> Result<SecretString, SealnoteError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("{label}: ");
        let password = rpassword::read_password()
            .map_err(|e| SealnoteError::InvalidInput(format!("failed to read password: {e}")))?;
        if password.is_empty() {
            return Err(SealnoteError::InvalidInput(
                "empty password not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(password));
    }

    Err(SealnoteError::InvalidInput(format!(
        "no password provided; set {PASSWORD_ENV_VAR} or run interactively"
    )))
}

/// Get a new password with a confirmation prompt (for password change).
///
/// `SEALNOTE_NEW_PASSWORD` skips the confirmation; interactively the
/// password is asked for twice and must match.
pub fn get_new_password_with_confirm() -> Result<SecretString, SealnoteError> {
    if let Ok(password) = std::env::var(NEW_PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("New password: ");
        let first = rpassword::read_password()
            .map_err(|e| SealnoteError::InvalidInput(format!("failed to read password: {e}")))?;
        eprint!("Confirm new password: ");
        let second = rpassword::read_password()
            .map_err(|e| SealnoteError::InvalidInput(format!("failed to read password: {e}")))?;

        if first != second {
            return Err(SealnoteError::InvalidInput(
                "passwords do not match".to_string(),
            ));
        }
        if first.is_empty() {
            return Err(SealnoteError::InvalidInput(
                "empty password not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(first));
    }

    Err(SealnoteError::InvalidInput(format!(
        "no password provided; set {NEW_PASSWORD_ENV_VAR} or run interactively"
    )))
}
