use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// What a module sees while it is brought up.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// A mountable slice of the service: a route tree, an OpenAPI fragment and
/// lifecycle hooks. The registry drives the hooks; the HTTP facade mounts
/// `routes()` under `/api/{name}`.
#[async_trait]
pub trait Module: Sync + Send {
    /// Mount segment; must be unique within a registry.
    fn name(&self) -> &'static str;

    /// Runs once, before any module starts. Failing here aborts startup.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI JSON with `paths` relative to the mount point and optional
    /// `components.schemas`.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs in reverse registration order on shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
