pub mod books;
pub mod collections;
mod errors;
mod openapi;
#[cfg(test)]
mod test_support;

use bookshelf_kernel::ModuleRegistry;

use crate::catalog::SharedCatalog;

/// Register every catalog module against one shared store
pub fn register_all(registry: &mut ModuleRegistry, catalog: SharedCatalog) -> anyhow::Result<()> {
    registry.register(books::create_module(catalog.clone()))?;
    registry.register(collections::create_module(catalog))?;
    Ok(())
}
