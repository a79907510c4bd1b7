//! `storefront browse`: drives the acquisition controller the way the
//! listing view does, including the re-fetch after a store switch.

use storefront_catalog::{build_store_controller, FetchOutcome};
use storefront_core::{AppConfig, Facet, FetchRequest};

use crate::render;
use crate::BrowseArgs;

impl BrowseArgs {
    pub(crate) fn to_request(&self, default_page_size: u32) -> FetchRequest {
        FetchRequest::new()
            .with_filter(Facet::Category, self.categories.iter().cloned())
            .with_filter(Facet::Brand, self.brands.iter().cloned())
            .with_sort(self.sort)
            .with_page(self.page)
            .with_page_size(self.page_size.unwrap_or(default_page_size))
    }
}

/// Fetches and prints one listing page. Returns `false` when the final state
/// holds an error.
///
/// # Errors
///
/// Returns an error if the store clients cannot be built from `config` or
/// the JSON output cannot be serialized.
pub(crate) async fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<bool> {
    let controller = build_store_controller(config)?;
    let request = args.to_request(config.page_size);

    if controller.fetch(request.clone()).await == FetchOutcome::SwitchedToFallback {
        let state = controller.snapshot();
        if let Some(error) = &state.error {
            eprintln!("{}", render::switch_notice(error));
        }
        controller.fetch(request).await;
    }

    let state = controller.snapshot();
    tracing::debug!(
        mode = %state.mode,
        products = state.products.len(),
        error = ?state.error_kind(),
        "listing fetched"
    );
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&render::state_json(&state))?
        );
    } else {
        print!("{}", render::render_listing(&state));
    }

    Ok(state.error.is_none())
}
