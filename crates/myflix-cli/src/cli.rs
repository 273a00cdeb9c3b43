//! Command-line client for the myFlix movie catalog.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use myflix_client::DEFAULT_API_URL;
use myflix_client::config::DEFAULT_TIMEOUT_SECS;
use myflix_telemetry::{LogFormat, LoggingConfig, init_logging};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, ContextOptions, default_session_file, parse_url};
use crate::commands::account::{
    handle_login, handle_logout, handle_register, handle_whoami,
};
use crate::commands::favourites::{
    handle_fav_add, handle_fav_check, handle_fav_ids, handle_fav_list, handle_fav_remove,
    handle_fav_toggle,
};
use crate::commands::movies::{
    handle_director, handle_genre, handle_movie_list, handle_movie_show,
};
use crate::commands::profile::{handle_profile_delete, handle_profile_show, handle_profile_update};

const DEFAULT_CLI_LOG_LEVEL: &str = "error";

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let trace_id = Uuid::new_v4().to_string();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: LogFormat::from_name(&cli.log_format),
        service: "myflix-cli",
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let command_name = command_label(&cli.command);
    let result = dispatch(cli, &trace_id).await;

    match result {
        Ok(()) => {
            tracing::debug!(command = command_name, trace_id, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            tracing::debug!(command = command_name, trace_id, exit_code, "command failed");
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let ctx = AppContext::build(ContextOptions {
        api_url: cli.api_url,
        timeout_secs: cli.timeout,
        session_file: cli.session_file.unwrap_or_else(default_session_file),
        trace_id: trace_id.to_string(),
        output: cli.output,
    })?;

    match cli.command {
        Command::Register(args) => handle_register(&ctx, args).await,
        Command::Login(args) => handle_login(&ctx, args).await,
        Command::Logout => handle_logout(&ctx),
        Command::Whoami => handle_whoami(&ctx),
        Command::Movies(movies) => match movies {
            MoviesCommand::Ls(args) => handle_movie_list(&ctx, args).await,
            MoviesCommand::Show(args) => handle_movie_show(&ctx, args).await,
            MoviesCommand::Genre(args) => handle_genre(&ctx, args).await,
            MoviesCommand::Director(args) => handle_director(&ctx, args).await,
        },
        Command::Fav(fav) => match fav {
            FavCommand::Ls => handle_fav_list(&ctx).await,
            FavCommand::Ids => handle_fav_ids(&ctx).await,
            FavCommand::Add(args) => handle_fav_add(&ctx, args).await,
            FavCommand::Rm(args) => handle_fav_remove(&ctx, args).await,
            FavCommand::Toggle(args) => handle_fav_toggle(&ctx, args).await,
            FavCommand::Check(args) => handle_fav_check(&ctx, &args),
        },
        Command::Profile(profile) => match profile {
            ProfileCommand::Show => handle_profile_show(&ctx).await,
            ProfileCommand::Update(args) => handle_profile_update(&ctx, args).await,
            ProfileCommand::Delete(args) => handle_profile_delete(&ctx, args).await,
        },
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Register(_) => "register",
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Movies(MoviesCommand::Ls(_)) => "movies_ls",
        Command::Movies(MoviesCommand::Show(_)) => "movies_show",
        Command::Movies(MoviesCommand::Genre(_)) => "movies_genre",
        Command::Movies(MoviesCommand::Director(_)) => "movies_director",
        Command::Fav(FavCommand::Ls) => "fav_ls",
        Command::Fav(FavCommand::Ids) => "fav_ids",
        Command::Fav(FavCommand::Add(_)) => "fav_add",
        Command::Fav(FavCommand::Rm(_)) => "fav_rm",
        Command::Fav(FavCommand::Toggle(_)) => "fav_toggle",
        Command::Fav(FavCommand::Check(_)) => "fav_check",
        Command::Profile(ProfileCommand::Show) => "profile_show",
        Command::Profile(ProfileCommand::Update(_)) => "profile_update",
        Command::Profile(ProfileCommand::Delete(_)) => "profile_delete",
    }
}

#[derive(Parser)]
#[command(name = "myflix", about = "Browse the myFlix catalog and manage your favourites")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "MYFLIX_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "MYFLIX_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "MYFLIX_SESSION_FILE",
        help = "Where the login session is kept (defaults to ~/.config/myflix/session.json)"
    )]
    pub(crate) session_file: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "MYFLIX_LOG_LEVEL",
        default_value = DEFAULT_CLI_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(long, global = true, env = "MYFLIX_LOG_FORMAT", default_value = "pretty")]
    pub(crate) log_format: String,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and store the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the logged-in account from the stored session.
    Whoami,
    #[command(subcommand)]
    Movies(MoviesCommand),
    #[command(subcommand)]
    Fav(FavCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

/// Catalog queries.
#[derive(Subcommand)]
pub(crate) enum MoviesCommand {
    Ls(MovieListArgs),
    Show(MovieShowArgs),
    Genre(NameArgs),
    Director(NameArgs),
}

/// Favourites management.
#[derive(Subcommand)]
pub(crate) enum FavCommand {
    Ls,
    Ids,
    Add(MovieIdArgs),
    Rm(MovieIdArgs),
    Toggle(MovieIdArgs),
    Check(MovieIdArgs),
}

/// Account profile.
#[derive(Subcommand)]
pub(crate) enum ProfileCommand {
    Show,
    Update(ProfileUpdateArgs),
    Delete(ProfileDeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, value_parser = parse_birthday_arg, help = "Date of birth (YYYY-MM-DD)")]
    pub(crate) birthday: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct MovieListArgs {
    #[arg(long, help = "Only list featured movies")]
    pub(crate) featured: bool,
    #[arg(long, help = "Only list movies in this genre")]
    pub(crate) genre: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct MovieShowArgs {
    #[arg(help = "Movie title")]
    pub(crate) title: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct NameArgs {
    #[arg(help = "Name to look up")]
    pub(crate) name: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct MovieIdArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) movie_id: String,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ProfileUpdateArgs {
    #[arg(long)]
    pub(crate) username: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long, value_parser = parse_birthday_arg, help = "Date of birth (YYYY-MM-DD)")]
    pub(crate) birthday: Option<NaiveDate>,
    #[arg(long, help = "Prompt for a new password")]
    pub(crate) change_password: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ProfileDeleteArgs {
    #[arg(long, help = "Confirm permanent deletion of the account")]
    pub(crate) yes: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_birthday_arg(value: &str) -> Result<NaiveDate, String> {
    myflix_api_models::parse_birthday(value)
}
