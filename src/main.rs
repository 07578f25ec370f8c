use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotshift::{cli, config};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize one of the two Spotify accounts
    Auth(AuthOptions),

    /// Transfer library state from the source account to the target account
    Transfer(TransferOptions),

    /// Export listening data from the source account to a text report
    Export(ExportOptions),

    /// Mirror the source account's playlists into Jellyfin
    Mirror,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Which account to authorize
    #[clap(long, value_enum, default_value_t = AccountArg::Source)]
    pub account: AccountArg,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AccountArg {
    Source,
    Target,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Transfer library state between the two accounts")]
pub struct TransferOptions {
    /// Transfer followed artists
    #[clap(long)]
    pub artists: bool,

    /// Transfer subscribed podcasts
    #[clap(long)]
    pub podcasts: bool,

    /// Transfer playlists (matched by name)
    #[clap(long)]
    pub playlists: bool,

    /// Transfer saved albums
    #[clap(long)]
    pub albums: bool,

    /// Transfer liked tracks
    #[clap(long)]
    pub tracks: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Report file path
    #[clap(long)]
    pub output: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => {
            let role = match opt.account {
                AccountArg::Source => config::AccountRole::Source,
                AccountArg::Target => config::AccountRole::Target,
            };
            cli::auth(role).await;
        }
        Command::Transfer(opt) => {
            cli::transfer(cli::TransferCategories {
                artists: opt.artists,
                podcasts: opt.podcasts,
                playlists: opt.playlists,
                albums: opt.albums,
                tracks: opt.tracks,
            })
            .await;
        }
        Command::Export(opt) => cli::export(opt.output).await,
        Command::Mirror => cli::mirror().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
