use book_catalog_api::start_server;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let server = start_server(port).await;
    server.await.unwrap();
}
