use std::path::Path;
use std::sync::Arc;
use virgule::Config;
use virgule_server::{controllers, AxumHost, FileRenderer};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("virgule starting...");

    let config = Config::load_default().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    println!("Routes dir: {}", config.routes_dir);

    let registry = controllers::build_registry();
    let renderer = Arc::new(FileRenderer::new());
    let mut host = AxumHost::new(renderer.clone());

    match virgule::init(&config, Path::new("."), &registry, &mut host, renderer).await {
        Ok(summary) => {
            println!(
                "Registered {} routes ({} with controllers)",
                summary.routes, summary.controllers
            );
            for uri in host.uris() {
                println!("  {} -> page", uri);
            }
            println!("Error pages: {}", host.error_template_names().join(", "));
        }
        Err(e) => {
            eprintln!("Failed to register routes: {e}");
            std::process::exit(1);
        }
    }

    let app = host.build();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("Server running at http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
