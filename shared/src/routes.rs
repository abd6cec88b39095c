//! Route table for the event API.
//!
//! Endpoints:
//! - POST /event - Create an event and notify subscribers
//! - GET /events - List events, newest first (`?fromDate=` optional)
//! - POST /subscribe - Subscribe an email address to notifications
//!
//! Every path also answers `OPTIONS` preflight requests, and every response
//! carries the CORS headers for its path.

use lambda_http::http::Method;
use lambda_http::{Body, Request, RequestExt, Response};
use std::future::Future;
use std::pin::Pin;
use tracing::info;

use crate::context::AppContext;
use crate::http::{error_response, json_response, message_response, with_cors};
use crate::models::{CreateEventRequest, CreateEventResponse, SubscribeRequest};
use crate::{handlers, parse_body, Error};

/// Future returned by a route handler.
pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Response<Body>, lambda_http::Error>> + Send + 'a>>;

/// A route handler: borrows the context and request for the duration of the call.
pub type Handler = for<'a> fn(&'a AppContext, &'a Request) -> HandlerFuture<'a>;

/// One registered `(method, path) -> handler` entry.
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub handler: Handler,
}

/// Explicit registration table consulted by [`Routes::dispatch`].
#[derive(Default)]
pub struct Routes {
    routes: Vec<Route>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method` on `path`.
    pub fn route(mut self, method: Method, path: &'static str, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        self
    }

    /// `POST /event`
    pub fn create_event(self) -> Self {
        self.route(Method::POST, "/event", create_event)
    }

    /// `GET /events`
    pub fn list_events(self) -> Self {
        self.route(Method::GET, "/events", list_events)
    }

    /// `POST /subscribe`
    pub fn subscribe(self) -> Self {
        self.route(Method::POST, "/subscribe", subscribe)
    }

    /// The full event API.
    pub fn events_api() -> Self {
        Self::new().create_event().list_events().subscribe()
    }

    /// Registered entries, in registration order.
    pub fn entries(&self) -> &[Route] {
        &self.routes
    }

    fn knows(&self, path: &str) -> bool {
        self.routes.iter().any(|r| r.path == path)
    }

    /// Resolve a raw request path, dropping an API Gateway stage prefix
    /// such as `/prod` when the path is not otherwise registered.
    fn resolve<'p>(&self, raw_path: &'p str) -> Option<&'p str> {
        let path = match raw_path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if self.knows(path) {
            return Some(path);
        }

        let rest = path.strip_prefix('/')?;
        let (_, unstaged) = rest.split_once('/')?;
        let unstaged = &path[path.len() - unstaged.len() - 1..];
        self.knows(unstaged).then_some(unstaged)
    }

    /// Value of `Access-Control-Allow-Methods` for a registered path.
    pub fn allowed_methods(&self, path: &str) -> String {
        std::iter::once("OPTIONS")
            .chain(
                self.routes
                    .iter()
                    .filter(|r| r.path == path)
                    .map(|r| r.method.as_str()),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Route a request to its handler.
    pub async fn dispatch(
        &self,
        ctx: &AppContext,
        request: Request,
    ) -> Result<Response<Body>, lambda_http::Error> {
        let raw_path = request.uri().path();
        let method = request.method();

        info!("Received request: method={}, path={}", method, raw_path);

        let Some(path) = self.resolve(raw_path) else {
            return with_cors(message_response(404, "Not found")?, "OPTIONS");
        };
        let allow_methods = self.allowed_methods(path);

        if method == Method::OPTIONS {
            return with_cors(
                message_response(200, "CORS preflight request successful")?,
                &allow_methods,
            );
        }

        let route = self
            .routes
            .iter()
            .find(|r| r.path == path && r.method == method);

        let response = match route {
            Some(route) => (route.handler)(ctx, &request).await?,
            None => message_response(405, "Method not allowed")?,
        };

        with_cors(response, &allow_methods)
    }
}

/// Map a handler error to its response. Validation failures carry their own
/// message; dependency failures get the route's generic message plus the cause.
fn failure(error: &Error, message: &str) -> Result<Response<Body>, lambda_http::Error> {
    match error {
        Error::Validation(rule) => message_response(error.status_code(), rule.clone()),
        other => error_response(other.status_code(), message, other.detail()),
    }
}

fn create_event<'a>(ctx: &'a AppContext, request: &'a Request) -> HandlerFuture<'a> {
    Box::pin(async move {
        let body: CreateEventRequest = parse_body!(request.body());

        match handlers::create_event(ctx, body).await {
            Ok(event) => json_response(
                201,
                &CreateEventResponse {
                    message: "Event created successfully".to_string(),
                    event,
                },
            ),
            Err(e) => failure(&e, "Failed to create event"),
        }
    })
}

fn list_events<'a>(ctx: &'a AppContext, request: &'a Request) -> HandlerFuture<'a> {
    Box::pin(async move {
        let params = request.query_string_parameters();
        let from_date = params.first("fromDate");

        match handlers::list_events(ctx, from_date).await {
            Ok(events) => json_response(200, &events),
            Err(e) => failure(&e, "Failed to retrieve events"),
        }
    })
}

fn subscribe<'a>(ctx: &'a AppContext, request: &'a Request) -> HandlerFuture<'a> {
    Box::pin(async move {
        let body: SubscribeRequest = parse_body!(request.body());

        match handlers::subscribe(ctx, body.email.as_deref()).await {
            Ok(response) => json_response(200, &response),
            Err(e) => failure(&e, "Failed to subscribe user"),
        }
    })
}
