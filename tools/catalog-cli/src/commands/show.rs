//! Product detail.

use anyhow::Result;
use catalog_core::catalog::find_product;
use catalog_core::{CatalogError, ProductId};

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let per_page = args.per_page.unwrap_or(ctx.config.browse.items_per_page);
    let products = ctx.load_products(args.page, per_page).await?;

    let id = ProductId::new(args.id);
    let product = find_product(&products, id).ok_or(CatalogError::ProductNotFound(id))?;
    let in_cart = ctx.open_session()?.cart.contains(id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "product": product, "inCart": in_cart }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Label", &product.label());
    ctx.output.kv("Price", &product.display_price());
    ctx.output.kv("Weight", &format!("{} g", product.weight));
    let d = &product.dimensions;
    ctx.output.kv("Dimensions", &format!("{} x {} x {}", d.width, d.height, d.depth));
    ctx.output.kv("Description", &product.description);
    ctx.output.kv("Rating", &format!("{:.1}", product.rating));
    ctx.output.kv("Likes", &product.likes.to_string());
    ctx.output.kv(
        "Image",
        if product.image.is_empty() { "(none)" } else { &product.image },
    );
    ctx.output.kv(
        "Availability",
        if product.in_stock { "In stock" } else { "Out of stock" },
    );
    if in_cart {
        ctx.output.info("Already in your cart");
    }

    Ok(())
}
