//! Product listing.

use anyhow::Result;
use catalog_core::search::{BrowseState, FilterState, SortPreset};
use catalog_data::ListRequest;

use super::BrowseArgs;
use crate::context::Context;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let per_page = args.per_page.unwrap_or(ctx.config.browse.items_per_page);
    let filters = filters_from_args(&args, ctx);

    let mut browse = BrowseState::new(per_page)?;
    browse.set_filters(filters);

    let loader = ctx.loader()?;
    let request = ListRequest::new(browse.filters(), browse.pagination()).with_page(args.page, per_page);
    let catalog = ctx.load_page(&loader, &request).await;
    catalog.sync_pagination(browse.pagination_mut());

    let view = browse.view(&catalog.products);
    let session = ctx.open_session()?;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    let filters = browse.filters();
    let sort_label = SortPreset::matching(filters.sort_by, filters.sort_order)
        .map(|preset| preset.display_name())
        .unwrap_or("Unsorted");
    ctx.output.header(&format!("Products ({})", sort_label));
    if view.items.is_empty() {
        ctx.output.info("No products match the current filters");
    } else {
        ctx.output.product_rows(
            view.items.iter().enumerate().map(|(i, p)| (i + 1, p)),
            |p| session.cart.contains(p.id).then_some("in cart"),
        );
    }

    ctx.output.kv(
        "Showing",
        &format!("{} of {}", view.summary.shown, view.summary.total),
    );
    ctx.output.kv("Cart", &format!("{} item(s)", session.cart.len()));
    ctx.output.pagination(&view.pagination);

    Ok(())
}

/// Translate the flags into a filter state.
fn filters_from_args(args: &BrowseArgs, ctx: &Context) -> FilterState {
    let mut filters = FilterState::default().with_preset(args.sort);

    for category in &args.categories {
        if !ctx.config.browse.categories.iter().any(|c| c == category) {
            ctx.output.warn(&format!("'{}' is not a configured category", category));
        }
        filters.categories.insert(category.clone());
    }
    if let Some(range) = args.price {
        filters.price_range = range;
    }
    if let Some(range) = args.weight {
        filters.weight_range = range;
    }
    if let Some(range) = args.size {
        filters.size_range = range;
    }
    if let Some(query) = &args.search {
        if !args.categories.is_empty() || args.price.is_some() || args.weight.is_some() || args.size.is_some() {
            ctx.output.warn("Searching by name ignores the other filters");
        }
        filters.search_query = query.clone();
    }

    filters
}
