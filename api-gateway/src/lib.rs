//! Lambda entry point shared by the API Gateway binaries.

use lambda_http::{run, service_fn, Error};
use shared::{AppContext, Config, Routes};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialise logging, build the AWS clients once and serve `routes`.
pub async fn serve(routes: Routes) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    for route in routes.entries() {
        info!(method = %route.method, path = route.path, "Registered route");
    }

    let config = Config::from_env();
    let ctx = Arc::new(AppContext::from_config(&config).await);
    let routes = Arc::new(routes);

    run(service_fn(move |event| {
        let ctx = Arc::clone(&ctx);
        let routes = Arc::clone(&routes);
        async move { routes.dispatch(&ctx, event).await }
    }))
    .await
}
