//! Bookstore server: reads settings, prepares the store, serves the router.

use bookstore::{
    app, ensure_books_table, ensure_database_exists, AppState, BookRepository, InMemoryBookRepository,
    PgBookRepository, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookstore=info,tower_http=info")),
        )
        .init();

    let books: Arc<dyn BookRepository> = match &settings.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(url)
                .await?;
            ensure_books_table(&pool).await?;
            Arc::new(PgBookRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; books are kept in memory and lost on exit");
            Arc::new(InMemoryBookRepository::new())
        }
    };

    let state = AppState::new(books)?;
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
