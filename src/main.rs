//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::Site;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "Markdown blog content pipeline with a content-hash render cache", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Include unpublished posts (development mode)
    #[arg(long, global = true)]
    drafts: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible posts, newest first
    List,

    /// List all tags across visible posts
    Tags,

    /// Print the rendered content of a post
    Show {
        /// Document identifier (filename without extension)
        id: String,
    },

    /// Print the path entries used for static-site generation
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = cli.cwd.map_or_else(std::env::current_dir, Ok)?;
    let site = Site::new(&base_dir)?.with_dev_mode(cli.drafts);
    let repo = site.repository();

    match cli.command {
        Commands::List => {
            let posts = repo.get_sorted_posts()?;
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}]",
                    post.metadata.date.as_deref().unwrap_or("undated"),
                    post.title(),
                    post.filename
                );
            }
        }

        Commands::Tags => {
            let tags = repo.get_tags()?;
            println!("Tags ({}):", tags.len());
            for tag in &tags {
                println!("  {}", tag);
            }
        }

        Commands::Show { id } => {
            let post = repo.get_post(&id)?;
            println!("{}", post.content);
        }

        Commands::Paths => {
            for path in repo.get_post_paths()? {
                println!("post: {}", path);
            }
            for tag in repo.get_tag_paths()? {
                println!("tag: {}", tag);
            }
        }
    }

    Ok(())
}
