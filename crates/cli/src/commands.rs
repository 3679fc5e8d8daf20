//! CLI commands

use anyhow::{Result, anyhow};
use clap::{Subcommand, ValueEnum};
use forum_core::config::CONFIG_FILE_NAME;
use forum_core::{ClientConfig, FileTokenStore, PostForm, default_data_dir};
use forum_frontend_common::{Action, ApiOutcome, AppStore, ForumApi, ThreadFeed};
use forum_http::types::{ProfileUpdate, Thread, VoteDirection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Forum(ForumCommands),

    /// Generate default configuration files
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ForumCommands {
    /// Log in and keep the session token in the data directory
    Login {
        username: String,

        #[arg(long, env = "FORUM_PASSWORD")]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Create an account
    Signup {
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "FORUM_PASSWORD")]
        password: String,
    },

    /// Show who is logged in
    Whoami,

    /// List threads
    Threads {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        search: Option<String>,

        /// Only threads started by this user
        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        sort: Option<String>,

        /// Threads per page (defaults to the configured page size)
        #[arg(long)]
        limit: Option<u32>,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a thread with its comments and score
    Thread { id: i64 },

    /// Start a new thread
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        category: String,
    },

    /// Edit one of your threads
    Edit {
        id: i64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        category: String,
    },

    /// Delete one of your threads
    Delete { id: i64 },

    /// Comment operations
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Vote on a thread
    Vote { thread_id: i64, direction: VoteArg },

    /// Save a thread
    Save { thread_id: i64 },

    /// Remove a thread from your saved threads
    Unsave { thread_id: i64 },

    /// Show a profile, or update yours
    Profile {
        /// Defaults to the logged-in user
        username: Option<String>,

        /// Rename your account
        #[arg(long)]
        rename: Option<String>,

        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// List comments on a thread
    List { thread_id: i64 },

    /// Comment on a thread
    Add { thread_id: i64, content: String },

    /// Edit one of your comments
    Edit {
        thread_id: i64,
        comment_id: i64,
        content: String,
    },

    /// Delete one of your comments
    Delete { thread_id: i64, comment_id: i64 },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate client configuration file
    Generate {
        /// Output file path (defaults to FORUM_STATE_DIR/forum.toml)
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum VoteArg {
    Up,
    Down,
    /// Retract your vote
    None,
}

impl Commands {
    pub async fn execute(self, data_dir: Option<PathBuf>) -> Result<()> {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        debug!("Using data directory {}", data_dir.display());

        match self {
            Commands::Config { command } => command.execute(data_dir),
            Commands::Forum(command) => command.execute(data_dir).await,
        }
    }
}

impl ForumCommands {
    pub async fn execute(self, data_dir: PathBuf) -> Result<()> {
        let config = ClientConfig::load(&data_dir)?;
        let tokens = Arc::new(FileTokenStore::new(config.token_path(&data_dir)));
        let api = ForumApi::new(&config, tokens, AppStore::default())?;
        let session = api.sync();
        debug!(?session, "Session at startup");

        match self {
            ForumCommands::Login { username, password } => {
                let session = finish(api.login(&username, &password).await)?;
                let expiry = session
                    .token_expiry
                    .and_then(|exp| chrono::DateTime::from_timestamp(exp, 0))
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_default();
                println!("Logged in as {username} until {expiry}");
            }
            ForumCommands::Logout => {
                finish(api.logout())?;
                println!("Logged out");
            }
            ForumCommands::Signup {
                username,
                email,
                password,
            } => {
                finish(api.signup(&username, &email, &password).await)?;
                println!("Account {username} created, you can now log in");
            }
            ForumCommands::Whoami => match session.user() {
                Some(username) => println!("{username}"),
                None => println!("Not logged in"),
            },
            ForumCommands::Threads {
                category,
                search,
                author,
                sort,
                limit,
                pages,
                json,
            } => {
                let store = api.store().clone();
                store.dispatch(Action::ResetFilters);
                if let Some(category) = category {
                    store.dispatch(Action::SetCategory(category));
                }
                if let Some(search) = search {
                    store.dispatch(Action::SetSearchQuery(search));
                }
                if let Some(sort) = sort {
                    store.dispatch(Action::SetSort(sort));
                }

                let mut feed = ThreadFeed::new(api, limit.unwrap_or(config.page_size));
                if let Some(author) = author {
                    feed = feed.by_author(author);
                }
                finish(feed.reset().await)?;
                while feed.page() < pages && feed.has_more() {
                    finish(feed.load_more().await)?;
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(feed.items())?);
                } else {
                    print_threads(feed.items());
                }
            }
            ForumCommands::Thread { id } => {
                let thread = finish(api.get_thread(id).await)?;
                let votes = finish(api.count_votes(id).await)?;
                let comments = finish(api.list_comments(id).await)?;

                println!("{} [{}] by {}", thread.title, thread.category, thread.username);
                println!("{} | score {}", thread.created_at.to_rfc3339(), votes.votes);
                if let Some(username) = session.user() {
                    let state = finish(api.vote_state(username, id).await)?;
                    let saved = finish(api.is_saved(id).await)?;
                    println!("your vote {} | saved {saved}", state.vote);
                }
                println!();
                println!("{}", thread.content);
                println!();
                for comment in comments {
                    println!("#{} {}: {}", comment.id, comment.username, comment.content);
                }
            }
            ForumCommands::Post {
                title,
                content,
                category,
            } => {
                let form = PostForm {
                    title,
                    content,
                    category,
                };
                report(api.post_thread(&form).await)?;
            }
            ForumCommands::Edit {
                id,
                title,
                content,
                category,
            } => {
                let form = PostForm {
                    title,
                    content,
                    category,
                };
                report(api.edit_thread(id, &form).await)?;
            }
            ForumCommands::Delete { id } => report(api.delete_thread(id).await)?,
            ForumCommands::Comment { command } => command.execute(&api).await?,
            ForumCommands::Vote {
                thread_id,
                direction,
            } => {
                let outcome = match direction {
                    VoteArg::Up => api.cast_vote(thread_id, VoteDirection::Up).await,
                    VoteArg::Down => api.cast_vote(thread_id, VoteDirection::Down).await,
                    VoteArg::None => api.retract_vote(thread_id).await,
                };
                report(outcome)?;
                let votes = finish(api.count_votes(thread_id).await)?;
                println!("Score is now {}", votes.votes);
            }
            ForumCommands::Save { thread_id } => report(api.save_thread(thread_id).await)?,
            ForumCommands::Unsave { thread_id } => report(api.unsave_thread(thread_id).await)?,
            ForumCommands::Profile {
                username,
                rename,
                bio,
            } => {
                let username = username
                    .or_else(|| session.user().map(str::to_string))
                    .ok_or_else(|| anyhow!("Not logged in, pass a username"))?;
                let profile = finish(api.get_profile(&username).await)?;

                if rename.is_some() || bio.is_some() {
                    let update = ProfileUpdate {
                        username: rename.unwrap_or(profile.username),
                        bio: bio.unwrap_or(profile.bio),
                    };
                    report(api.update_profile(&update).await)?;
                    if let Some(session) = api.store().session().user() {
                        info!("Session user is now {session}");
                    }
                } else {
                    println!("{}", profile.username);
                    if !profile.bio.is_empty() {
                        println!("{}", profile.bio);
                    }
                    println!("email: {}", profile.email);
                    println!("joined: {}", profile.joined);
                }
            }
        }

        Ok(())
    }
}

impl CommentCommands {
    pub async fn execute(self, api: &ForumApi) -> Result<()> {
        match self {
            CommentCommands::List { thread_id } => {
                for comment in finish(api.list_comments(thread_id).await)? {
                    println!(
                        "#{} {} ({}): {}",
                        comment.id,
                        comment.username,
                        comment.created_at.to_rfc3339(),
                        comment.content
                    );
                }
            }
            CommentCommands::Add { thread_id, content } => {
                let comment = finish(api.post_comment(thread_id, &content).await)?;
                println!("Comment #{} posted", comment.id);
            }
            CommentCommands::Edit {
                thread_id,
                comment_id,
                content,
            } => report(api.edit_comment(thread_id, comment_id, &content).await)?,
            CommentCommands::Delete {
                thread_id,
                comment_id,
            } => report(api.delete_comment(thread_id, comment_id).await)?,
        }
        Ok(())
    }
}

impl ConfigCommands {
    pub fn execute(self, data_dir: PathBuf) -> Result<()> {
        match self {
            ConfigCommands::Generate { output, force } => {
                let config_path = output.unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME));
                config::generate_default_config(&config_path, force)?;
                info!("Generated client configuration at {}", config_path.display());
                println!("{}", config_path.display());
            }
        }
        Ok(())
    }
}

/// Payload of a successful outcome, or its message (and field errors) as an error
fn finish<T>(outcome: ApiOutcome<T>) -> Result<T> {
    if !outcome.success {
        let mut message = outcome.message;
        for (field, error) in outcome.field_errors.iter() {
            message.push_str(&format!("\n  {field}: {error}"));
        }
        return Err(anyhow!(message));
    }
    outcome
        .payload
        .ok_or_else(|| anyhow!("Server returned no data"))
}

/// Print the message of a payload-less outcome
fn report(outcome: ApiOutcome<()>) -> Result<()> {
    let message = outcome.message.clone();
    finish(outcome)?;
    println!("{message}");
    Ok(())
}

fn print_threads(threads: &[Thread]) {
    if threads.is_empty() {
        println!("No threads");
        return;
    }
    for thread in threads {
        println!(
            "{:>6}  {:<16} {:<12} {}",
            thread.id, thread.username, thread.category, thread.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::FieldErrors;

    #[test]
    fn failed_outcome_lists_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        let err = finish::<()>(ApiOutcome::invalid(errors)).unwrap_err();
        assert_eq!(err.to_string(), "Title is required\n  title: Title is required");
    }

    #[test]
    fn successful_outcome_yields_payload() {
        assert_eq!(finish(ApiOutcome::ok("done", 3)).unwrap(), 3);
        assert!(finish::<()>(ApiOutcome::failure("nope")).is_err());
    }
}
