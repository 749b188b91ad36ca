//! Tracked orders: `lockopener orders`, `lockopener forget`.

use anyhow::Result;
use chrono::Utc;
use console::style;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use lockopener::poller::StatusPoller;
use lockopener::schedule::ScheduledTask;
use lockopener::ui::icons::WARN;
use lockopener::ui::{Spinner, render};
use lockopener::views::TrackedOrders;

use super::{AppContext, clear_screen, wait_for_ctrl_c};

pub async fn cmd_orders(ctx: &AppContext, watch: bool) -> Result<()> {
    let poller = StatusPoller::new(
        Arc::new(ctx.api.clone()),
        ctx.registry.clone(),
        ctx.config.prune_policy(),
    );
    let view = Arc::new(TrackedOrders::new(poller));
    let messages = ctx.messages;

    let spinner = Spinner::start(messages.checking_status);
    let (rows, report) = view.load(Utc::now(), messages).await?;
    spinner.clear();

    if !report.failures.is_empty() {
        eprintln!(
            "{}{}",
            WARN,
            style(messages.unchecked_orders(report.failures.len())).yellow()
        );
    }

    if !watch {
        print!("{}", render::tracked_orders(&rows, messages));
        return Ok(());
    }

    let redraw = {
        let view = view.clone();
        move || match view.rows(Utc::now(), messages) {
            Ok(rows) => {
                clear_screen();
                print!("{}", render::tracked_orders(&rows, messages));
                println!("\n{}", style(messages.ctrl_c_to_stop).dim());
            }
            Err(e) => warn!(error = %e, "Failed to read tracked orders"),
        }
    };
    redraw();

    let mut sweeper = {
        let view = view.clone();
        ScheduledTask::every("order-status-poll", ctx.config.poll_interval(), move || {
            let view = view.clone();
            async move {
                if let Err(e) = view.refresh().await {
                    warn!(error = %e, "Status sweep failed");
                }
            }
        })
    };
    let mut ticker = ScheduledTask::every("elapsed-refresh", Duration::from_secs(1), move || {
        redraw();
        async {}
    });

    wait_for_ctrl_c().await?;
    ticker.stop();
    sweeper.stop();
    Ok(())
}

pub fn cmd_forget(ctx: &AppContext, id: &str) -> Result<()> {
    let message = if ctx.registry.remove(id)? {
        ctx.messages.stopped_tracking
    } else {
        ctx.messages.not_tracked
    };
    println!("{}", ctx.messages.for_order(message, &style(id).bold().to_string()));
    Ok(())
}
