//! Token login for staff accounts: `lockopener auth`.

use anyhow::{Context, Result};
use console::style;

use lockopener::storage::ADMIN_TOKEN;
use lockopener::ui::Spinner;
use lockopener::ui::icons::LOCK;

use super::super::AuthCommands;
use super::AppContext;

pub async fn cmd_auth(ctx: &AppContext, command: AuthCommands) -> Result<()> {
    let store = ctx.api.store();
    let messages = ctx.messages;

    match command {
        AuthCommands::Login { username, password } => {
            let username = match username {
                Some(u) => u,
                None => dialoguer::Input::<String>::new()
                    .with_prompt(messages.username_prompt)
                    .interact_text()
                    .context("Failed to read username")?,
            };
            let password = match password {
                Some(p) => p,
                None => dialoguer::Password::new()
                    .with_prompt(messages.password_prompt)
                    .interact()
                    .context("Failed to read password")?,
            };

            let spinner = Spinner::start(messages.logging_in);
            let result = ctx.api.login(&username, &password).await;
            spinner.clear();
            let response = result.map_err(|e| match e.status() {
                Some(_) => anyhow::anyhow!(e.user_message(messages.invalid_credentials)),
                None => anyhow::Error::new(e).context(messages.connection_error),
            })?;

            store.set(ADMIN_TOKEN, &response.token)?;
            let shown = response.user.map(|u| u.username).unwrap_or(username);
            println!(
                "{}{}",
                LOCK,
                style(format!("{} {}", messages.logged_in_as, shown)).green()
            );
        }
        AuthCommands::Me => {
            if store.get(ADMIN_TOKEN)?.is_none() {
                anyhow::bail!(messages.token_login_required);
            }
            let user = ctx.api.current_user().await?;
            println!("{}", style(&user.username).bold());
            if let Some(role) = &user.role {
                println!("  role: {}", role);
            }
            if let Some(id) = &user.id {
                println!("  id:   {}", id);
            }
        }
        AuthCommands::Logout => {
            store.remove(ADMIN_TOKEN)?;
            println!("{}", messages.token_removed);
        }
    }
    Ok(())
}
