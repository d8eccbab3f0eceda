use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marquee_core::model::{DarkThemeMode, ImageSize, MediaType};

#[derive(Parser, Debug)]
#[command(
    name = "marqueectl",
    version,
    about = "Browse TMDB movies, shows and people from the terminal"
)]
pub struct Cli {
    /// Configuration file (defaults to $MARQUEE_CONFIG or the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// .env file to load before reading the environment
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Response language, e.g. `fr-FR`; overrides configuration
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch remote image configuration and show it with theme preferences
    Config,
    /// Today's trending titles or people
    Trending {
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Popular titles or people
    Popular {
        #[arg(value_enum)]
        kind: ListKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Movies now in theatres
    NowPlaying {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Shows airing today
    AiringToday {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Page through unfiltered discovery
    Discover {
        #[arg(value_enum)]
        kind: TitleKind,
        /// Maximum number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Full details with credits and videos
    Details {
        #[arg(value_enum)]
        kind: TitleKind,
        id: u64,
    },
    /// Backdrops, posters and logos for a title
    Images {
        #[arg(value_enum)]
        kind: TitleKind,
        id: u64,
    },
    /// Person details, or combined credits with --credits
    Person {
        id: u64,
        #[arg(long)]
        credits: bool,
    },
    /// Search movies, shows and people
    Search {
        query: String,
        /// Maximum number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Sign in through the TMDB website and print the new session
    Login,
    /// Favorite / watchlist / rating state of a title
    AccountState {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(value_enum)]
        kind: TitleKind,
        id: u64,
    },
    /// Add a title to favorites (or remove it with --remove)
    Favorite {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(value_enum)]
        kind: TitleKind,
        id: u64,
        #[arg(long)]
        remove: bool,
    },
    /// Add a title to the watchlist (or remove it with --remove)
    Watchlist {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(value_enum)]
        kind: TitleKind,
        id: u64,
        #[arg(long)]
        remove: bool,
    },
    /// Delete a session
    Logout {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Set the dark theme preference
    Theme {
        #[arg(value_enum)]
        mode: ThemeArg,
    },
    /// Turn dynamic (artwork derived) theming on or off
    DynamicTheme {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Build an image URL, e.g. `image-url poster:w500 /abc.jpg`
    ImageUrl {
        size: ImageSize,
        path: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Session id printed by `login` (falls back to $TMDB_SESSION_ID)
    #[arg(long)]
    pub session: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Movie,
    Tv,
    Person,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    Movie,
    Tv,
}

impl From<TitleKind> for MediaType {
    fn from(kind: TitleKind) -> Self {
        match kind {
            TitleKind::Movie => MediaType::Movie,
            TitleKind::Tv => MediaType::Tv,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    System,
    Light,
    Dark,
}

impl From<ThemeArg> for DarkThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::System => DarkThemeMode::FollowSystem,
            ThemeArg::Light => DarkThemeMode::Light,
            ThemeArg::Dark => DarkThemeMode::Dark,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}
