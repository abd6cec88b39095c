//! Subscribe User Lambda - Handles POST /subscribe.
//!
//! The topic itself emails the confirmation link; this function only
//! registers the address.

use lambda_http::Error;
use shared::Routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
    api_gateway::serve(Routes::new().subscribe()).await
}
