use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use okapi_index::Indexer;
use okapi_server::{build_router, exit_code, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "okapi=info"
                    .parse()
                    .expect("static directive always parses"),
            ),
        )
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(exit_code::BAD_ARGUMENTS);
        }
    };

    let indexer = match Indexer::open(&cli.directory_to_index, &cli.index_path) {
        Ok(indexer) => Arc::new(indexer),
        Err(e) => {
            tracing::error!(error = %e, "failed to open index");
            std::process::exit(exit_code::FATAL_INIT);
        }
    };

    tracing::info!(
        documents = indexer.document_count(),
        total_terms = indexer.total_term_count(),
        "index ready"
    );

    let router = build_router(indexer);

    let addr = format!("0.0.0.0:{}", cli.query_port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind query port");
            std::process::exit(exit_code::FATAL_INIT);
        }
    };

    tracing::info!(addr = %addr, "okapi query server listening");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server exited with an error");
        std::process::exit(exit_code::FATAL_INIT);
    }

    std::process::exit(exit_code::SUCCESS);
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl-c");
    tracing::info!("received shutdown signal");
}
