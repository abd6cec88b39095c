//! Create Event Lambda - Handles POST /event.
//!
//! Stores the event in the events table, then announces it on the
//! notification topic.

use lambda_http::Error;
use shared::Routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
    api_gateway::serve(Routes::new().create_event()).await
}
