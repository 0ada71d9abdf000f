//! Bookshelf application library
//!
//! The catalog domain (store contract, in-memory store, query decoding) and
//! the HTTP modules that expose it.

pub mod catalog;
pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use catalog::{MemoryCatalog, SharedCatalog};

/// Build a registry holding every catalog module bound to `catalog`.
pub fn build_registry(catalog: SharedCatalog) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog)?;
    Ok(registry)
}

/// Run the service against a fresh in-memory catalog until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let catalog: SharedCatalog = Arc::new(MemoryCatalog::new());
    let registry = build_registry(catalog).context("failed to register modules")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
