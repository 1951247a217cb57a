use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pager-cli")]
#[command(about = "Query a tier of the paged record relay", long_about = None)]
struct Cli {
    /// Base address of the tier to query.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the tier is up
    Health,
    /// Fetch a page of episodes
    Episodes(PageArgs),
    /// Fetch a page of profiles
    Profiles(PageArgs),
}

#[derive(Args)]
struct PageArgs {
    /// Inclusive lower bound, e.g. 2024-01-01 or "01/01/2024 00:00:00"
    #[arg(long)]
    start: String,

    /// Inclusive upper bound
    #[arg(long)]
    end: String,

    #[arg(long, default_value_t = 1)]
    page: i64,

    #[arg(long)]
    page_size: Option<i64>,

    /// Endpoint path override
    #[arg(long)]
    path: Option<String>,
}

impl PageArgs {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("startDate", self.start.clone()),
            ("endDate", self.end.clone()),
        ];
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Health => client.get(format!("{}/health", base)),
        Commands::Episodes(args) => {
            let path = args.path.as_deref().unwrap_or("/api/episodes");
            client.get(format!("{}{}", base, path)).query(&args.query())
        }
        Commands::Profiles(args) => {
            let path = args.path.as_deref().unwrap_or("/api/profiles");
            client.get(format!("{}{}", base, path)).query(&args.query())
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(id) = res.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        eprintln!("Request ID: {}", id);
    }

    if !status.is_success() {
        eprintln!("Error: tier returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
