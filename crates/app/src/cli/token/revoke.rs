use clap::Args;
use storefront_app::auth::PgAuthService;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let revoked = PgAuthService::new(args.database.connect().await?)
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    let outcome = if revoked { "revoked" } else { "was not active" };

    println!("token {}: {outcome}", args.token_uuid);

    Ok(())
}
