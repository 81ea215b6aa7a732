#[cfg(feature = "ssr")]
mod server {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use axum::Router;
    use deafability_web::{
        config::API_URL_ENV,
        ui::{shell, App},
    };
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use log::{info, warn};
    use tokio::signal;
    use tower::ServiceBuilder;
    use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

    pub async fn run() -> Result<()> {
        dotenv::dotenv().ok();

        let level = env_logger::Env::default().default_filter_or("debug");
        env_logger::Builder::from_env(level).init();

        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => info!("Pages will call the API at {url}"),
            _ => info!("{API_URL_ENV} not set, pages pick the API root from their host"),
        }

        let conf = get_configuration(None).context("Failed to read leptos configuration")?;
        let leptos_options = conf.leptos_options;
        let addr = leptos_options.site_addr;
        let routes = generate_route_list(App);

        let app = Router::new()
            .leptos_routes(&leptos_options, routes, {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            })
            .fallback(leptos_axum::file_and_error_handler(shell))
            .with_state(leptos_options)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(10))),
            );

        info!("Listening on http://{addr}");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to server socket {addr}"))?;

        let served = axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Failed to serve app");

        if served.is_err() {
            warn!("Server stopped with an error");
        }
        served
    }

    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
        info!("Shutting down");
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::run().await
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // The client is started by `hydrate()` in the library.
}
