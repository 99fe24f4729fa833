use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use newshub::cli::{BrowseCommand, Cli, Commands, BROWSE_HELP};
use newshub::config::Config;
use newshub::domain::{Article, ArticleDetail, FetchRequest, SourceKind};
use newshub::errors::NewsResult;
use newshub::services::{Aggregator, FeedController, ViewStatus};
use newshub::sources::SourceRegistry;

const NO_ARTICLES: &str = "No articles available for this page (try with other query/source)";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> NewsResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Search {
            query,
            page,
            sources,
            json,
        } => cmd_search(&config, &query, page, sources, json).await,
        Commands::Browse { query, sources } => cmd_browse(&config, &query, sources).await,
        Commands::Sources => cmd_sources(),
    }
}

async fn cmd_search(
    config: &Config,
    query: &str,
    page: u32,
    sources: Vec<SourceKind>,
    json: bool,
) -> NewsResult<()> {
    let aggregator = Aggregator::new(SourceRegistry::from_config(config)?);
    let request = FetchRequest::new(query, page, sources)?;

    let articles = aggregator.aggregate(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("{}", NO_ARTICLES);
        return Ok(());
    }

    print_articles(&articles);
    Ok(())
}

async fn cmd_browse(config: &Config, query: &str, sources: Vec<SourceKind>) -> NewsResult<()> {
    let aggregator = Aggregator::new(SourceRegistry::from_config(config)?);
    let mut controller = FeedController::new(aggregator);

    controller.set_sources(sources);
    controller.submit_query(query);

    println!("{}\n", BROWSE_HELP);

    loop {
        controller.refresh().await;
        render(&controller);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            println!();
            return Ok(());
        }

        let command = match input.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{} (h for help)\n", e);
                continue;
            }
        };

        match command {
            BrowseCommand::Next => {
                controller.next_page();
            }
            BrowseCommand::Previous => {
                if !controller.previous_page() {
                    println!("Already on the first page.\n");
                }
            }
            BrowseCommand::Search(text) => {
                controller.submit_query(&text);
            }
            BrowseCommand::Clear => {
                controller.clear_query();
            }
            BrowseCommand::Toggle(kind) => {
                controller.toggle_source(kind);
            }
            BrowseCommand::Detail(number) => {
                match controller.state().visible_articles().get(number - 1) {
                    Some(article) => println!("\n{}\n", ArticleDetail::from_article(article).format()),
                    None => println!("No article {} on this page.\n", number),
                }
            }
            BrowseCommand::Help => println!("{}\n", BROWSE_HELP),
            BrowseCommand::Quit => return Ok(()),
        }
    }
}

fn cmd_sources() -> NewsResult<()> {
    println!("Available sources:\n");
    for kind in SourceKind::ALL {
        println!("  {}", kind);
    }
    Ok(())
}

fn render(controller: &FeedController<Aggregator>) {
    let state = controller.state();

    println!("Page {}", state.page());
    if !state.query().is_empty() {
        println!("Search results for: {}", state.query());
    }
    if !state.selected_sources().is_empty() {
        let names: Vec<&str> = state.selected_sources().iter().map(|k| k.as_str()).collect();
        println!("Sources: {}", names.join(", "));
    }
    println!();

    match controller.status() {
        ViewStatus::Loading => println!("Loading..."),
        ViewStatus::Error(message) => println!("Error: {}", message),
        ViewStatus::Empty => println!("{}", NO_ARTICLES),
        ViewStatus::Articles(articles) => print_articles(articles),
    }
    println!();
}

fn print_articles(articles: &[Article]) {
    for (i, article) in articles.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, article.title(), article.source());
        if let Some(url) = article.url() {
            println!("     {}", url);
        }
    }
}
