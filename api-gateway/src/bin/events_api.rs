//! Events API Lambda - Serves every event endpoint from one function.
//!
//! Endpoints:
//! - POST /event
//! - GET /events
//! - POST /subscribe

use lambda_http::Error;
use shared::Routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
    api_gateway::serve(Routes::events_api()).await
}
