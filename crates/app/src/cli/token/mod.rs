use clap::{Args, Subcommand};
use jiff::Timestamp;
use storefront_app::auth::ApiTokenMetadata;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a bearer token for a user
    Create(create::CreateTokenArgs),
    /// Show every token a user holds
    List(list::ListTokensArgs),
    /// Revoke a token by id
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

fn print_metadata(token: &ApiTokenMetadata) {
    println!("token_uuid: {}", token.uuid);
    println!("user_uuid: {}", token.user_uuid);
    println!("token_version: {}", token.version.as_i16());
    println!("created_at: {}", token.created_at);
    println!("last_used_at: {}", or_label(token.last_used_at, "never"));
    println!("expires_at: {}", or_label(token.expires_at, "none"));
    println!("revoked_at: {}", or_label(token.revoked_at, "active"));
}

fn or_label(value: Option<Timestamp>, label: &str) -> String {
    value.map_or_else(|| label.to_string(), |timestamp| timestamp.to_string())
}
