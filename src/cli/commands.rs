use clap::{Parser, Subcommand};

use crate::domain::SourceKind;

#[derive(Parser)]
#[command(name = "newshub")]
#[command(about = "Search NewsAPI, The Guardian and The New York Times in one feed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one page of merged results and print it
    Search {
        /// Search text (empty shows the latest articles)
        #[arg(default_value = "")]
        query: String,

        /// Page to fetch, starting at 1
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Only query this source (repeatable: newsapi, guardian, nytimes)
        #[arg(short, long = "source", value_parser = parse_source)]
        sources: Vec<SourceKind>,

        /// Print articles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Page through results interactively
    Browse {
        /// Initial search text
        #[arg(default_value = "")]
        query: String,

        /// Only query this source (repeatable: newsapi, guardian, nytimes)
        #[arg(short, long = "source", value_parser = parse_source)]
        sources: Vec<SourceKind>,
    },

    /// List the available news sources
    Sources,
}

fn parse_source(s: &str) -> Result<SourceKind, String> {
    s.parse()
}

/// One line of input in a browse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Search(String),
    Clear,
    Toggle(SourceKind),
    Detail(usize),
    Help,
    Quit,
}

impl std::str::FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "n" | "next" => Ok(BrowseCommand::Next),
            "p" | "prev" | "previous" => Ok(BrowseCommand::Previous),
            "s" | "search" => Ok(BrowseCommand::Search(arg.to_string())),
            "c" | "clear" => Ok(BrowseCommand::Clear),
            "t" | "toggle" => arg.parse().map(BrowseCommand::Toggle),
            "d" | "detail" => arg
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(BrowseCommand::Detail)
                .ok_or_else(|| format!("Expected an article number, got {:?}", arg)),
            "h" | "help" | "?" => Ok(BrowseCommand::Help),
            "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

pub const BROWSE_HELP: &str = "Commands:
  n            next page
  p            previous page
  s <text>     search (blank text clears the search)
  c            clear search
  t <source>   toggle a source filter (newsapi, guardian, nytimes)
  d <number>   show article details
  h            this help
  q            quit";
