//! The messages application: two HTML handlers on `/messages`, a JSON view of
//! the query string, and the whitelisted pages under `public/`.
//!
//! Run from the crate root so `public/` resolves:
//!
//! ```text
//! RUST_LOG=debug cargo run --example messages
//! curl -i 'http://localhost:9999/messages?value=one&value=two'
//! curl -i -d 'value=abc' http://localhost:9999/messages
//! curl -i http://localhost:9999/classic.html
//! ```

use log::info;
use serde::Serialize;

use rawhttp::{write_json, write_response, HttpServer, Params, Request, ServerConfig, StatusCode};

#[derive(Serialize)]
struct Echo<'a> {
    method: &'a str,
    path: &'a str,
    query: &'a Params,
}

fn messages_page(request: &Request) -> String {
    let mut page = format!(
        "<h1>{} /messages</h1>\nHeaders: {}",
        request.method(),
        request.headers()
    );
    if !request.body().is_empty() {
        page.push_str(&format!("\nBody: {}", request.body()));
    }
    for (name, values) in request.query_params().iter() {
        page.push_str(&format!("\nQuery {name}: {}", values.join(", ")));
    }
    for (name, values) in request.post_params().iter() {
        page.push_str(&format!("\nForm {name}: {}", values.join(", ")));
    }
    page
}

#[tokio::main]
async fn main() -> Result<(), rawhttp::ServerError> {
    // Initialize the logger
    env_logger::init();

    let mut server = HttpServer::new(ServerConfig::default());

    server.add_handler("GET", "/messages", |request, out| {
        Box::pin(async move {
            let page = messages_page(request);
            write_response(out, StatusCode::Ok, Some("text/html"), page.as_bytes()).await
        })
    });

    server.add_handler("POST", "/messages", |request, out| {
        Box::pin(async move {
            let page = messages_page(request);
            write_response(out, StatusCode::Ok, Some("text/html"), page.as_bytes()).await
        })
    });

    server.add_handler("GET", "/messages.json", |request, out| {
        Box::pin(async move {
            let echo = Echo {
                method: request.method(),
                path: request.path(),
                query: request.query_params(),
            };
            write_json(out, StatusCode::Ok, &echo).await
        })
    });

    info!("Starting messages server, Ctrl+C to stop");
    server.start().await
}
