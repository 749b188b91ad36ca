//! Order detail: `lockopener view`, `lockopener status`.

use anyhow::Result;
use chrono::Utc;
use console::style;
use std::time::Duration;

use lockopener::schedule::ScheduledTask;
use lockopener::ui::{Spinner, render};
use lockopener::views::{load_order_detail, load_public_status};

use super::{AppContext, clear_screen, wait_for_ctrl_c};

pub async fn cmd_view(ctx: &AppContext, id: &str, token: Option<&str>, watch: bool) -> Result<()> {
    let messages = ctx.messages;
    // Tracked orders already know their token.
    let stored = match token {
        Some(_) => None,
        None => ctx.registry.get(id)?.map(|record| record.token),
    };
    let token = token.or(stored.as_deref());

    let spinner = Spinner::start(messages.loading_order);
    let result = load_order_detail(&ctx.api, id, token, messages).await;
    spinner.clear();
    let detail = result?;

    print!("{}", render::order_detail(&detail, Utc::now()));
    if !watch {
        return Ok(());
    }

    let mut ticker = ScheduledTask::every("elapsed-refresh", Duration::from_secs(1), move || {
        clear_screen();
        print!("{}", render::order_detail(&detail, Utc::now()));
        println!("\n{}", style(messages.ctrl_c_to_stop).dim());
        async {}
    });
    wait_for_ctrl_c().await?;
    ticker.stop();
    Ok(())
}

pub async fn cmd_status(ctx: &AppContext, id: &str) -> Result<()> {
    let spinner = Spinner::start(ctx.messages.loading_order);
    let result = load_public_status(&ctx.api, id, ctx.messages).await;
    spinner.clear();
    let status = result?;

    println!(
        "{} {}: {}",
        style(lockopener::common::short_number(id)).bold(),
        ctx.messages.current_status,
        render::status_label(status.status)
    );
    Ok(())
}
