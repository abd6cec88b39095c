//! Get Events Lambda - Handles GET /events.

use lambda_http::Error;
use shared::Routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
    api_gateway::serve(Routes::new().list_events()).await
}
