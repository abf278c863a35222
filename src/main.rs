// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shutter Quest command line client
//!
//! Renders each screen of the photo scavenger hunt as text and drives quest
//! creation and completion from photo files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shutter_quest::{
    config::Config,
    models::QuestId,
    services::CapturedImage,
    views::{
        CompletedListView, CompletedQuestView, CreateQuestView, HomeView, PendingListView,
        PendingQuestView, QuestScreen, QUEST_NOT_FOUND, START_QUEST_WARNING,
    },
    AppState,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shutter-quest")]
#[command(about = "Shutter Quest - photo scavenger hunt client")]
#[command(version)]
struct Cli {
    /// API base URL (overrides SHUTTER_QUEST_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct UserArgs {
    /// User to act as
    #[arg(short, long, env = "SHUTTER_QUEST_USER")]
    user: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[command(flatten)]
        user: UserArgs,
        #[arg(long, env = "SHUTTER_QUEST_PASSWORD")]
        password: String,
    },

    /// Check credentials and show the main menu
    Login {
        #[command(flatten)]
        user: UserArgs,
        #[arg(long, env = "SHUTTER_QUEST_PASSWORD")]
        password: String,
    },

    /// Show the point total
    Points {
        #[command(flatten)]
        user: UserArgs,
        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// List quests waiting for you
    Pending {
        #[command(flatten)]
        user: UserArgs,
    },

    /// List quests you have finished
    Completed {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Show results for a completed quest
    Quest { quest_id: QuestId },

    /// Fetch a participant's photo for a completed quest
    Photo {
        quest_id: QuestId,
        participant: String,
        /// Write the photo to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Create a quest: invite users, then submit your photo of the prompt
    Create {
        #[command(flatten)]
        user: UserArgs,
        /// User to invite (repeatable)
        #[arg(long = "invite")]
        invites: Vec<String>,
        /// Photo of the prompt
        #[arg(long)]
        photo: PathBuf,
    },

    /// Complete a pending quest with your photo
    Complete {
        #[command(flatten)]
        user: UserArgs,
        quest_id: QuestId,
        #[arg(long)]
        photo: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url)?;
    }
    tracing::debug!(api_url = %config.api_url, "Using API");

    let app = AppState::new(config)?;

    match cli.command {
        Commands::Register { user, password } => {
            app.session
                .sign_up(app.api.as_ref(), &user.user, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Registered {}", user.user);
        }
        Commands::Login { user, password } => {
            app.session
                .sign_in(app.api.as_ref(), &user.user, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            app.session.refresh_points(app.api.as_ref()).await;
            print!("{}", HomeView::from_session(&app.session));
        }
        Commands::Points { user, watch } => {
            app.session.login(&user.user);
            if watch {
                watch_points(&app).await?;
            } else {
                app.session.refresh_points(app.api.as_ref()).await;
                println!("{}", HomeView::from_session(&app.session).points_label());
            }
        }
        Commands::Pending { user } => {
            app.session.login(&user.user);
            print!("{}", PendingListView::load(app.api.as_ref(), &app.session).await);
        }
        Commands::Completed { user } => {
            app.session.login(&user.user);
            print!("{}", CompletedListView::load(app.api.as_ref(), &app.session).await);
        }
        Commands::Quest { quest_id } => {
            print!("{}", CompletedQuestView::load(app.api.as_ref(), quest_id).await);
        }
        Commands::Photo {
            quest_id,
            participant,
            out,
        } => show_photo(&app, quest_id, &participant, out).await?,
        Commands::Create {
            user,
            invites,
            photo,
        } => {
            app.session.login(&user.user);
            create_quest(&app, &invites, photo).await?;
        }
        Commands::Complete {
            user,
            quest_id,
            photo,
        } => {
            app.session.login(&user.user);
            complete_quest(&app, quest_id, photo).await?;
        }
    }

    Ok(())
}

/// Print the point total on every refresh and cue increases.
async fn watch_points(app: &AppState) -> Result<()> {
    let mut changes = app.session.subscribe();
    let mut increases = app.session.subscribe_increases();
    let _poller = app
        .start_points_polling()
        .context("No user to poll points for")?;

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let label = HomeView::from_session(&app.session).points_label();
                println!("{}", label);
            }
            Ok(increase) = increases.recv() => {
                // Terminal bell stands in for the sound cue
                println!("\x07+{} points!", increase.current - increase.previous);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

async fn show_photo(
    app: &AppState,
    quest_id: QuestId,
    participant: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let review = match CompletedQuestView::load(app.api.as_ref(), quest_id).await {
        CompletedQuestView::Found(review) => review,
        CompletedQuestView::NotFound => bail!(QUEST_NOT_FOUND),
    };

    let photo = review.photo(app.api.as_ref(), participant).await;
    print!("{}", photo);

    if let (Some(path), Some(bytes)) = (out, photo.bytes()) {
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

async fn create_quest(app: &AppState, invites: &[String], photo: PathBuf) -> Result<()> {
    let mut view = CreateQuestView::new(&app.session)?;
    for candidate in invites {
        if !view.add_invite(app.api.as_ref(), candidate).await {
            bail!(
                "{}: {}",
                candidate,
                view.error().unwrap_or("could not invite")
            );
        }
    }
    print!("{}", view);
    eprintln!("{}", START_QUEST_WARNING);

    let flow = view.start(app.api.as_ref()).await;
    run_quest_screen(app, QuestScreen::open(flow), photo).await
}

async fn complete_quest(app: &AppState, quest_id: QuestId, photo: PathBuf) -> Result<()> {
    let flow = match PendingQuestView::open(app.api.as_ref(), &app.session, quest_id).await {
        PendingQuestView::Ready(flow) => flow,
        PendingQuestView::NotFound => bail!(QUEST_NOT_FOUND),
    };
    eprintln!("{}", START_QUEST_WARNING);
    run_quest_screen(app, QuestScreen::open(flow), photo).await
}

async fn run_quest_screen(app: &AppState, mut screen: QuestScreen, photo: PathBuf) -> Result<()> {
    print!("{}", screen);

    let image = CapturedImage::from_file(&photo).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    screen.capture(image)?;

    let result = screen.submit(app.api.as_ref()).await;
    print!("{}", screen);
    result.map(|_| ()).map_err(|e| anyhow::anyhow!(e.user_message()))
}

/// Initialize logging on stderr; JSON when `LOG_FORMAT=json`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "shutter_quest=debug" } else { "shutter_quest=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
