use clap::Args;
use storefront_app::{auth::PgAuthService, domain::users::models::UserUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User UUID whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,

    /// Hide revoked tokens
    #[arg(long)]
    active_only: bool,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let auth = PgAuthService::new(args.database.connect().await?);

    let tokens: Vec<_> = auth
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?
        .into_iter()
        .filter(|token| !args.active_only || token.revoked_at.is_none())
        .collect();

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
    }

    for token in &tokens {
        super::print_metadata(token);
        println!();
    }

    Ok(())
}
