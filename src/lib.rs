mod api;
mod catalog;
mod models;
mod repo;

use axum::{serve::Serve, Router};
use tokio::net::TcpListener;
use tracing::info;

use api::build_api;
use catalog::InMemoryBookRepo;

pub async fn start_server(port: u16) -> Serve<TcpListener, Router, Router> {
    let repo = InMemoryBookRepo::new();

    let router = build_api(repo);

    let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
    let local_addr = listener.local_addr().unwrap();
    info!("Listening on {}", local_addr);

    axum::serve(listener, router)
}
