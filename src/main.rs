use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tfsearch::corpus::{index_corpus, load_corpus};
use tfsearch::{DocumentStatus, SearchServer};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory TF-IDF document search", long_about = None)]
struct Args {
    /// Space-separated stop words
    #[arg(short, long, default_value = "и в на")]
    stop_words: String,

    /// JSON corpus of {id, text, status, ratings} records (.gz accepted)
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the top documents for a query
    Search {
        #[arg(short, long)]
        query: String,

        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
    },
    /// Print the query words found in one document
    Match {
        #[arg(short, long)]
        query: String,

        #[arg(long)]
        id: i32,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn build_server(args: &Args) -> Result<SearchServer> {
    let mut server =
        SearchServer::from_stop_words_text(&args.stop_words).context("Invalid stop words")?;

    if let Some(path) = &args.corpus {
        let start = Instant::now();
        let entries = load_corpus(path)?;
        index_corpus(&mut server, &entries)?;
        println!("Indexed {} documents in {:?}", entries.len(), start.elapsed());
    }

    Ok(server)
}

fn do_search(server: &SearchServer, query: &str, status: DocumentStatus, json: bool) -> Result<()> {
    let documents = server.find_top_documents_with_status(query, status)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
    } else {
        println!("{}:", status);
        for document in &documents {
            println!("{}", document);
        }
    }
    Ok(())
}

fn do_match(server: &SearchServer, query: &str, id: i32, json: bool) -> Result<()> {
    let (words, status) = server.match_document(query, id)?;

    if json {
        let value = serde_json::json!({ "id": id, "matched_terms": words, "status": status });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "{{ document_id = {}, status = {}, words = {} }}",
            id,
            status,
            words.join(" ")
        );
    }
    Ok(())
}

async fn serve(server: SearchServer, addr: SocketAddr) -> Result<()> {
    let shared = Arc::new(RwLock::new(server));
    let app = tfsearch::api::create_router(shared).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let server = build_server(&args)?;

    match &args.command {
        Command::Search { query, status } => do_search(&server, query, *status, args.json),
        Command::Match { query, id } => do_match(&server, query, *id, args.json),
        Command::Serve { addr } => serve(server, *addr).await,
    }
}
