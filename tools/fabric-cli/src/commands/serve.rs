//! Run the storefront API server.

use anyhow::{Context as _, Result};
use fabric_api::ApiState;

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| ctx.config.server.bind.clone());
    let state = ApiState::new(ctx.data_dir(), ctx.public_dir());

    ctx.output.kv("data", &state.data_dir.display().to_string());
    ctx.output.kv("public", &state.public_dir.display().to_string());
    ctx.output.success(&format!("Serving on http://{}", bind));
    ctx.output.info("Press Ctrl+C to stop");

    fabric_api::serve(&bind, state)
        .await
        .with_context(|| format!("Server on {} failed", bind))
}
