//! Session cart commands.

use anyhow::{Context as _, Result};
use catalog_core::cart::{Cart, ShareLink, ShareToken};
use catalog_core::catalog::find_product;
use catalog_core::{CatalogError, ProductId};
use dialoguer::Confirm;
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Cart summary printed in JSON mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary<'a> {
    count: usize,
    total: f64,
    items: &'a Cart,
    /// QR payload per item, in cart order.
    qr_values: Vec<String>,
}

impl<'a> CartSummary<'a> {
    fn new(cart: &'a Cart) -> Self {
        Self {
            count: cart.len(),
            total: cart.total().0,
            items: cart,
            qr_values: cart.iter().map(|p| p.qr_value()).collect(),
        }
    }
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::List { qr: false }) {
        CartCommand::List { qr } => list(ctx, qr),
        CartCommand::Add { id, page, per_page } => add(ctx, id, page, per_page).await,
        CartCommand::Remove { index } => remove(ctx, index),
        CartCommand::Clear { yes } => clear(ctx, yes),
        CartCommand::Checkout => checkout(ctx),
        CartCommand::Share { origin } => share(ctx, origin),
        CartCommand::Open { link, page, per_page } => open(ctx, &link, page, per_page).await,
    }
}

fn print_cart(ctx: &Context, cart: &Cart) {
    ctx.output.product_rows(cart.iter().enumerate().map(|(i, p)| (i + 1, p)), |_| None);
    ctx.output.kv("Items", &cart.len().to_string());
    ctx.output.kv("Total", &cart.total().to_string());
}

/// One block per item: its row, then its QR code.
fn print_cart_with_codes(ctx: &Context, cart: &Cart) {
    for (i, product) in cart.iter().enumerate() {
        ctx.output.product_rows([(i + 1, product)], |_| None);
        ctx.output.product_qr(product);
    }
    ctx.output.kv("Items", &cart.len().to_string());
    ctx.output.kv("Total", &cart.total().to_string());
}

fn list(ctx: &Context, qr: bool) -> Result<()> {
    let session = ctx.open_session()?;
    let cart = session.cart.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary::new(&cart));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", cart.len()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
    } else if qr {
        print_cart_with_codes(ctx, &cart);
    } else {
        print_cart(ctx, &cart);
    }
    Ok(())
}

async fn add(ctx: &Context, id: i64, page: usize, per_page: Option<usize>) -> Result<()> {
    let per_page = per_page.unwrap_or(ctx.config.browse.items_per_page);
    let products = ctx.load_products(page, per_page).await?;

    let id = ProductId::new(id);
    let product = find_product(&products, id)
        .cloned()
        .ok_or(CatalogError::ProductNotFound(id))?;
    let name = product.name.clone();

    let session = ctx.open_session()?;
    let added = session.cart.try_add(product)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "added": added, "count": session.cart.len() }));
    } else if added {
        ctx.output.success(&format!("Added {} to cart ({} item(s))", name, session.cart.len()));
    } else {
        ctx.output.info(&format!("{} is already in your cart", name));
    }
    Ok(())
}

fn remove(ctx: &Context, position: usize) -> Result<()> {
    let session = ctx.open_session()?;
    let removed = position.checked_sub(1).and_then(|index| session.cart.remove(index));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "removed": removed, "count": session.cart.len() }));
        return Ok(());
    }

    match removed {
        Some(product) => ctx.output.success(&format!("Removed {}", product.name)),
        None => ctx.output.warn(&CatalogError::InvalidCartIndex(position).to_string()),
    }
    Ok(())
}

fn clear(ctx: &Context, yes: bool) -> Result<()> {
    let session = ctx.open_session()?;

    if !yes && !ctx.output.is_json() && !session.cart.is_empty() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) and end the session?", session.cart.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    session.end()?;
    ctx.output.success("Cart cleared, session ended");
    Ok(())
}

fn checkout(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let cart = session.cart.checkout()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary::new(&cart));
        return Ok(());
    }

    ctx.output.header("Checkout");
    print_cart_with_codes(ctx, &cart);
    ctx.output.kv("Session", session.session.id.as_str());
    ctx.output.kv(
        "Started",
        &session.session.started_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    Ok(())
}

fn share(ctx: &Context, origin: Option<String>) -> Result<()> {
    let origin = origin.unwrap_or_else(|| ctx.config.session.share_origin.clone());
    let session = ctx.open_session()?;
    let cart = session.cart.snapshot();

    if cart.is_empty() {
        ctx.output.warn("Cart is empty; the link will share nothing");
    }
    let link = ShareLink::build(&origin, &cart)
        .with_context(|| format!("Cannot build share link for origin '{}'", origin))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "url": link.as_str(), "token": ShareToken::encode(&cart).as_str() }));
    } else {
        println!("{}", link);
    }
    Ok(())
}

async fn open(ctx: &Context, link: &str, page: usize, per_page: Option<usize>) -> Result<()> {
    let token = ShareLink::parse(link);
    let per_page = per_page.unwrap_or(ctx.config.browse.items_per_page);
    let products = ctx.load_products(page, per_page).await?;

    let decoded = ShareToken::decode(token.as_ref().map(ShareToken::as_str), &products);
    let session = ctx.open_session()?;
    let replaced = session.cart.apply_shared(decoded);
    let cart = session.cart.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "replaced": replaced, "cart": CartSummary::new(&cart) }));
        return Ok(());
    }

    if replaced {
        ctx.output.success(&format!("Loaded shared cart ({} item(s))", cart.len()));
        print_cart(ctx, &cart);
    } else {
        ctx.output.warn("No matching products in the link; cart unchanged");
    }
    Ok(())
}
