use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "rawg-cli")]
#[command(about = "Query a running RAWG gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Gateway API key, sent as X-API-Key
    #[arg(short, long, env = "RAWG_GATEWAY_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gateway status, including an upstream probe
    Status,
    /// Local health flags
    Health,
    /// Search and list games
    Games {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    /// Details of one game
    Game { id: u64 },
    /// Screenshots of one game
    Screenshots { id: u64 },
    /// List platforms
    Platforms,
    /// List genres
    Genres,
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Status => "/api/status".to_string(),
            Commands::Health => "/api/status/health".to_string(),
            Commands::Games { .. } => "/api/games".to_string(),
            Commands::Game { id } => format!("/api/games/{id}"),
            Commands::Screenshots { id } => format!("/api/games/{id}/screenshots"),
            Commands::Platforms => "/api/platforms".to_string(),
            Commands::Genres => "/api/genres".to_string(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Commands::Games { search, page, page_size } => {
                let mut query = vec![("page", page.to_string()), ("page_size", page_size.to_string())];
                if let Some(search) = search {
                    query.push(("search", search.clone()));
                }
                query
            }
            _ => Vec::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert("x-api-key", HeaderValue::from_str(key)?);
    }

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client
        .get(url)
        .headers(headers)
        .query(&cli.command.query())
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
