//! Staff panel commands: `lockopener admin ...`.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use console::style;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::warn;

use lockopener::api::AdminOrderQuery;
use lockopener::errors::AdminError;
use lockopener::forms::{AdminOrderForm, OrderEdit};
use lockopener::i18n::Messages;
use lockopener::schedule::ScheduledTask;
use lockopener::ui::icons::LOCK;
use lockopener::ui::{Spinner, render};
use lockopener::views::{AdminSession, AuthState, map_url};

use super::super::AdminCommands;
use super::{AppContext, clear_screen, wait_for_ctrl_c};

pub async fn cmd_admin(ctx: &AppContext, command: AdminCommands) -> Result<()> {
    let messages = ctx.messages;
    let mut session = AdminSession::new(
        ctx.api.clone(),
        ctx.messages,
        ctx.config.default_city(),
    );

    match command {
        AdminCommands::Login { username, password } => {
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

            let spinner = Spinner::start(messages.verifying_credentials);
            match session.login(&username, &password).await {
                Ok(()) => spinner.success(format!("{} {}", messages.logged_in_as, username)),
                Err(e) => {
                    spinner.clear();
                    return Err(e.into());
                }
            }
        }
        AdminCommands::Logout => {
            session.logout()?;
            println!("{}{}", LOCK, messages.credentials_removed);
        }
        AdminCommands::Orders { watch, open_map } => {
            require_login(&mut session, messages).await?;
            if let Some(id) = open_map {
                return open_order_map(&mut session, &id, messages).await;
            }
            if watch {
                watch_board(ctx, session).await?;
            } else {
                let board = session.load_board().await?;
                print!("{}", render::admin_board(&board, Utc::now(), messages));
            }
        }
        AdminCommands::Create {
            name,
            phone,
            street,
            city,
        } => {
            require_login(&mut session, messages).await?;
            let form = AdminOrderForm {
                name,
                phone,
                street,
                city,
            };
            session.create(form).await?;
            println!("{}", style(messages.order_created).green());
        }
        AdminCommands::List {
            status,
            page,
            limit,
        } => {
            require_login(&mut session, messages).await?;
            let query = AdminOrderQuery {
                status,
                page,
                limit,
            };
            let list = session.list(&query).await?;
            print!("{}", render::order_list(&list, Utc::now(), messages));
        }
        AdminCommands::Edit {
            id,
            name,
            phone,
            street,
            city,
        } => {
            require_login(&mut session, messages).await?;
            let edit = OrderEdit {
                name,
                phone,
                street,
                city,
            };
            session.edit(&id, edit).await?;
            done(messages, messages.order_updated, &id);
        }
        AdminCommands::Done { id } => {
            require_login(&mut session, messages).await?;
            if !ctx.confirm(messages.confirm_mark_done) {
                println!("{}", messages.cancelled);
                return Ok(());
            }
            session.mark_done(&id).await?;
            done(messages, messages.order_marked_done, &id);
        }
        AdminCommands::Delete { id } => {
            require_login(&mut session, messages).await?;
            if !ctx.confirm(messages.confirm_delete) {
                println!("{}", messages.cancelled);
                return Ok(());
            }
            session.delete(&id).await?;
            done(messages, messages.order_deleted, &id);
        }
        AdminCommands::Purge { id } => {
            require_login(&mut session, messages).await?;
            if !ctx.confirm(messages.confirm_delete) {
                println!("{}", messages.cancelled);
                return Ok(());
            }
            session.purge(&id).await?;
            done(messages, messages.order_deleted, &id);
        }
        AdminCommands::Get { id } => {
            require_login(&mut session, messages).await?;
            let order = session.get(&id).await?;
            print!("{}", render::admin_card(&order, Utc::now()));
        }
        AdminCommands::Assign { id, tech, eta } => {
            require_login(&mut session, messages).await?;
            session.assign(&id, &tech, eta).await?;
            done(messages, messages.technician_assigned, &tech);
        }
        AdminCommands::Status { id, status, price } => {
            require_login(&mut session, messages).await?;
            session.set_status(&id, status, price).await?;
            done(messages, messages.status_changed, &format!("{} -> {}", id, status));
        }
    }
    Ok(())
}

fn done(messages: &Messages, message: &str, subject: &str) {
    println!("{}", style(messages.for_order(message, subject)).green());
}

async fn require_login(session: &mut AdminSession, messages: &Messages) -> Result<()> {
    if let AuthState::Anonymous = session.check_auth().await? {
        bail!(messages.admin_login_required);
    }
    Ok(())
}

async fn open_order_map(session: &mut AdminSession, id: &str, messages: &Messages) -> Result<()> {
    let board = session.load_board().await?;
    let Some(order) = board.find(id) else {
        bail!(messages.for_order(messages.not_on_board, id));
    };
    let url = map_url(&order.address.street, &order.address.city);
    println!("{}", url);
    if let Err(e) = open::that(&url) {
        eprintln!("{}: {}", messages.browser_open_failed, e);
    }
    Ok(())
}

/// Redraw the board every refresh interval until Ctrl+C or until the
/// backend stops accepting the credentials.
async fn watch_board(ctx: &AppContext, session: AdminSession) -> Result<()> {
    let messages = ctx.messages;
    let session = Arc::new(Mutex::new(session));
    let expired = Arc::new(Notify::new());

    let refresh = {
        let session = session.clone();
        let expired = expired.clone();
        move || {
            let session = session.clone();
            let expired = expired.clone();
            async move {
                let result = session.lock().await.load_board().await;
                match result {
                    Ok(board) => {
                        clear_screen();
                        print!("{}", render::admin_board(&board, Utc::now(), messages));
                        println!("\n{}", style(messages.ctrl_c_to_stop).dim());
                    }
                    Err(AdminError::SessionExpired(message)) => {
                        eprintln!("{}", style(message).red());
                        expired.notify_one();
                    }
                    // Keep showing the last board.
                    Err(e) => warn!(error = %e, "Failed to refresh orders"),
                }
            }
        }
    };

    refresh().await;
    let mut task = ScheduledTask::every("admin-refresh", ctx.config.admin_refresh(), refresh);

    tokio::select! {
        result = wait_for_ctrl_c() => result?,
        _ = expired.notified() => {}
    }
    task.stop();
    Ok(())
}
