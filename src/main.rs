use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use postboard::api::HttpPostsApi;
use postboard::config::Config;
use postboard::logging::init_tracing;
use postboard::request::{RequestCoordinator, Settled};
use postboard::{BlogState, BlogStore, Post, PostDraft};

#[derive(Debug, Parser)]
#[command(name = "postboard", version, about = "Manage posts on a remote blog API")]
struct Cli {
    /// Path to config.toml (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch and print every post.
    List,
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        published: bool,
    },
    /// Edit fields of an existing post.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// Delete a post.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate().context("validating --base-url")?;
    }

    let api = Arc::new(HttpPostsApi::new(&config.api)?);
    let store = BlogStore::new(BlogState::with_posts(config.posts.clone()));
    let coordinator = RequestCoordinator::new(api, Arc::new(store.clone()));

    run(cli.command, &store, &coordinator).await
}

async fn run(command: Command, store: &BlogStore, coordinator: &RequestCoordinator) -> Result<()> {
    match command {
        Command::List => {
            coordinator.fetch_posts().wait().await?;
            print_posts(&store.get_state());
        }
        Command::Create {
            title,
            description,
            published,
        } => {
            let draft = PostDraft::new(title)
                .with_description(description)
                .published(published);
            let settled = coordinator.create_post(draft).wait().await?;
            report(settled)?;
        }
        Command::Update {
            id,
            title,
            description,
            published,
        } => {
            coordinator.fetch_posts().wait().await?;
            let Some(mut post) = store.get_state().post(&id).cloned() else {
                bail!("no post with id '{}'", id);
            };
            if let Some(title) = title {
                post.title = title;
            }
            if let Some(description) = description {
                post.description = description;
            }
            if let Some(published) = published {
                post.published = published;
            }
            let settled = coordinator.update_post(id, post).wait().await?;
            report(settled)?;
        }
        Command::Delete { id } => {
            coordinator.delete_post(id.clone()).wait().await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn report(settled: Settled) -> Result<()> {
    match settled {
        Settled::Fulfilled(payload) => {
            println!("{:?}", payload);
            Ok(())
        }
        Settled::Rejected(errors) => {
            for (field, message) in &errors.error {
                eprintln!("  {}: {}", field, message);
            }
            bail!("the server rejected the post")
        }
        Settled::Cancelled => bail!("request was cancelled"),
    }
}

fn print_posts(state: &BlogState) {
    if state.is_empty() {
        println!("No posts.");
        return;
    }
    for post in &state.items {
        println!("{}", format_post(post));
    }
}

fn format_post(post: &Post) -> String {
    let marker = if post.published { "*" } else { " " };
    format!("{} {}  {}", marker, post.id, post.title)
}
