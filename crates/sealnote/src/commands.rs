// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand handlers.
//!
//! Each handler owns the error-to-status conversion for its flow: the
//! user sees one message category per flow, wrong-password outcomes are
//! never distinguished from decryption failures, and the underlying
//! error detail goes to the tracing log only.

use secrecy::SecretString;
use sealnote_config::SealnoteConfig;
use sealnote_core::SealnoteError;
use sealnote_storage::SqliteRecordStore;
use sealnote_vault::{Session, get_new_password_with_confirm, get_password};
use tracing::error;

/// Report the flow outcome for a failed operation and pass the error on
/// for the exit code.
fn report(flow: &str, err: SealnoteError) -> SealnoteError {
    if err.is_probably_wrong_password() {
        eprintln!("You probably entered the wrong password.");
    } else {
        eprintln!("Failed to {flow}.");
    }
    error!(error = %err, flow, "operation failed");
    err
}

async fn open_session(
    config: &SealnoteConfig,
) -> Result<Session<SqliteRecordStore>, SealnoteError> {
    let store = SqliteRecordStore::open(&config.storage).await?;
    Ok(Session::new(store, &config.vault))
}

/// `sealnote status` -- store existence probe, no password required.
pub async fn status(config: &SealnoteConfig) -> Result<(), SealnoteError> {
    if SqliteRecordStore::store_exists(&config.storage.database_path) {
        println!("Store found at {}.", config.storage.database_path);
        println!("Log in with `sealnote show`.");
    } else {
        println!("No store yet at {}.", config.storage.database_path);
        println!("Your first login will create an account.");
    }
    Ok(())
}

/// `sealnote show` -- log in and print the decrypted payload.
pub async fn show(config: &SealnoteConfig, user: Option<&str>) -> Result<(), SealnoteError> {
    let mut session = open_session(config)
        .await
        .map_err(|e| report("open the store", e))?;
    let password = get_password("Password").map_err(|e| report("read the password", e))?;

    let text = login(&mut session, user, &password)
        .await
        .map_err(|e| report("log in", e))?;
    println!("{text}");
    Ok(())
}

/// `sealnote save` -- log in and replace the payload.
pub async fn save(
    config: &SealnoteConfig,
    user: Option<&str>,
    text: Option<String>,
) -> Result<(), SealnoteError> {
    let content = match text {
        Some(text) => text,
        None => std::io::read_to_string(std::io::stdin())
            .map_err(|e| report("read from stdin", SealnoteError::InvalidInput(e.to_string())))?,
    };

    let mut session = open_session(config)
        .await
        .map_err(|e| report("open the store", e))?;
    let password = get_password("Password").map_err(|e| report("read the password", e))?;

    login(&mut session, user, &password)
        .await
        .map_err(|e| report("log in", e))?;
    session
        .save(&content)
        .await
        .map_err(|e| report("save data", e))?;

    println!("Data saved.");
    Ok(())
}

/// `sealnote change-password` -- rotate the password and re-encrypt.
pub async fn change_password(
    config: &SealnoteConfig,
    user: Option<&str>,
) -> Result<(), SealnoteError> {
    let mut session = open_session(config)
        .await
        .map_err(|e| report("open the store", e))?;
    let current = get_password("Current password").map_err(|e| report("read the password", e))?;

    login(&mut session, user, &current)
        .await
        .map_err(|e| report("log in", e))?;

    let new_password =
        get_new_password_with_confirm().map_err(|e| report("read the new password", e))?;
    session
        .change_password(&new_password)
        .await
        .map_err(|e| report("change the password", e))?;

    println!("Sensitive data re-encrypted with credentials.");
    Ok(())
}

/// `sealnote wipe` -- destroy the store. No password required, matching
/// the original surface: wiping needs physical access, not credentials.
pub async fn wipe(config: &SealnoteConfig, yes: bool) -> Result<(), SealnoteError> {
    if !SqliteRecordStore::store_exists(&config.storage.database_path) {
        println!("No store to wipe.");
        return Ok(());
    }
    if !yes {
        eprintln!("This destroys all sealnote data irrecoverably. Re-run with --yes to confirm.");
        return Err(SealnoteError::InvalidInput(
            "wipe not confirmed".to_string(),
        ));
    }

    let mut session = open_session(config)
        .await
        .map_err(|e| report("open the store", e))?;
    session.wipe().await.map_err(|e| report("wipe the store", e))?;

    println!("All sealnote data destroyed.");
    Ok(())
}

async fn login(
    session: &mut Session<SqliteRecordStore>,
    user: Option<&str>,
    password: &SecretString,
) -> Result<String, SealnoteError> {
    session.login(user.unwrap_or_default(), password).await
}
