//! Planet Minecraft client CLI
//!
//! Fetches forum threads, submissions, members and wall posts and prints them
//! as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pmc::{
    error::Result,
    models::{
        BlogCategory, Category, Config, Submission, SubmissionFeed, SubmissionType, Thread,
        ThreadFeed, User, WallPost,
    },
    services::Site,
};
use serde::Serialize;

/// pmc - Planet Minecraft reader
#[derive(Parser, Debug)]
#[command(name = "pmc", version, about = "Read-only Planet Minecraft client")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip listing rows by this member (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load one forum thread
    Thread { url: String },

    /// List forum threads
    Threads {
        /// Category name or path, e.g. `introductions`
        #[arg(long)]
        category: Option<Category>,
        /// hot, newest, active or best
        #[arg(long)]
        feed: Option<ThreadFeed>,
        /// Search keywords
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 10)]
        amount: usize,
    },

    /// Load one submission
    Submission { url: String },

    /// List submissions
    Submissions {
        /// projects, skins, texture_packs, servers, mods or blogs
        #[arg(long = "type", default_value = "projects")]
        submission_type: SubmissionType,
        /// trending, updated, new, best, views or downloads
        #[arg(long)]
        feed: Option<SubmissionFeed>,
        /// Blog category, for `--type blogs`
        #[arg(long)]
        blog_category: Option<BlogCategory>,
        /// Search keywords
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 10)]
        amount: usize,
    },

    /// Load a member profile
    User {
        url: String,
        /// Also load the member's forum threads
        #[arg(long)]
        threads: bool,
        /// Also load the member's submissions
        #[arg(long)]
        submissions: bool,
    },

    /// List posts on a member's wall
    Wall {
        /// Member profile URL
        url: String,
        #[arg(long, default_value_t = 10)]
        amount: usize,
        /// Load every post on the first wall page instead of listing
        #[arg(long)]
        full: bool,
    },

    /// Validate the configuration and its selectors
    Validate,
}

/// Initialize logging based on verbosity flag, falling back to the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(cli.verbose, &config.logging.level);

    let mut site = Site::new(&config)?;
    site.ignore_everywhere(cli.ignore.as_slice())?;

    match cli.command {
        Command::Thread { url } => {
            let thread = site.forums().get(&url)?;
            print_json(thread.as_ref())?;
        }

        Command::Threads {
            category,
            feed,
            search,
            amount,
        } => {
            let forums = site.forums();
            let threads = match (search, category) {
                (Some(q), Some(c)) => forums.search_category_threads(c, &q, amount)?,
                (Some(q), None) => forums.search_threads(&q, amount)?,
                (None, Some(c)) => match feed {
                    Some(f) => forums.get_feed_category(c, f, amount)?,
                    None => forums.get_category(c, amount)?,
                },
                (None, None) => {
                    forums.get_feed_threads(feed.unwrap_or(ThreadFeed::Newest), amount)?
                }
            };
            log::info!("Listed {} threads", threads.len());
            let threads: Vec<&Thread> = threads.iter().map(AsRef::as_ref).collect();
            print_json(&threads)?;
        }

        Command::Submission { url } => {
            let submission = site.submissions().get(&url)?;
            print_json(submission.as_ref())?;
        }

        Command::Submissions {
            submission_type,
            feed,
            blog_category,
            search,
            amount,
        } => {
            let loader = site.submissions();
            let feed = feed.unwrap_or(SubmissionFeed::New);
            let submissions = match search {
                Some(q) => loader.search_submissions_feed(&q, submission_type, feed, amount)?,
                None if submission_type == SubmissionType::Blogs => {
                    loader.get_blogs_feed(blog_category.unwrap_or_default(), feed, amount)?
                }
                None => loader.get_type_feed(submission_type, feed, amount)?,
            };
            log::info!("Listed {} submissions", submissions.len());
            let submissions: Vec<&Submission> = submissions.iter().map(AsRef::as_ref).collect();
            print_json(&submissions)?;
        }

        Command::User {
            url,
            threads,
            submissions,
        } => {
            let user = site.users().get(&url)?;
            let threads = if threads {
                user.load_threads(site.forums())?
                    .iter()
                    .map(AsRef::as_ref)
                    .collect()
            } else {
                Vec::<&Thread>::new()
            };
            let submissions = if submissions {
                user.load_submissions(site.submissions())?
                    .iter()
                    .map(AsRef::as_ref)
                    .collect()
            } else {
                Vec::<&Submission>::new()
            };
            print_json(&serde_json::json!({
                "user": user.as_ref(),
                "threads": threads,
                "submissions": submissions,
            }))?;
        }

        Command::Wall { url, amount, full } => {
            let profile = User::reference(url);
            let walls = site.walls();
            let posts = if full {
                walls.load_user_wall_posts(&profile)?
            } else {
                walls.get_wall_posts(&profile, amount)?
            };
            log::info!("Listed {} wall posts", posts.len());
            let posts: Vec<&WallPost> = posts.iter().map(AsRef::as_ref).collect();
            print_json(&posts)?;
        }

        // Building the site already checked the settings and compiled every selector
        Command::Validate => log::info!("Configuration OK"),
    }

    Ok(())
}
