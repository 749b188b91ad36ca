//! Place an order: `lockopener order`.

use anyhow::Result;
use chrono::Utc;
use console::style;

use lockopener::forms::OrderForm;
use lockopener::ui::{Spinner, render};
use lockopener::views::{Navigation, OrderSuccess, submit_order};

use super::AppContext;

pub async fn cmd_order(ctx: &AppContext, form: OrderForm) -> Result<()> {
    // Input errors are reported before the spinner starts.
    form.validate(ctx.messages)?;

    let spinner = Spinner::start(ctx.messages.sending_order);
    let result = submit_order(&ctx.api, form, ctx.messages).await;
    spinner.clear();
    let navigation = result?;

    let Navigation::OrderSuccess {
        order_id,
        view_token,
    } = navigation;
    let page = OrderSuccess::new(&ctx.registry).enter(
        Some(&order_id),
        Some(&view_token),
        Utc::now(),
        ctx.messages,
    )?;

    print!("{}", render::success_page(&page, ctx.messages));
    println!();
    println!(
        "  {}",
        style(format!("lockopener view {} --token {}", order_id, view_token)).cyan()
    );
    println!("  {}", style("lockopener orders --watch").cyan());
    println!();
    Ok(())
}
