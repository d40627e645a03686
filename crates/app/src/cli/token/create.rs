use clap::Args;
use jiff::Timestamp;
use storefront_app::{auth::PgAuthService, domain::users::models::UserUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User UUID the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional expiry as an RFC 3339 timestamp
    #[arg(long, value_parser = parse_future_timestamp)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let auth = PgAuthService::new(args.database.connect().await?);

    let issued = auth
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    super::print_metadata(&issued.metadata);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

fn parse_future_timestamp(raw: &str) -> Result<Timestamp, String> {
    let timestamp = raw
        .parse::<Timestamp>()
        .map_err(|error| format!("invalid timestamp: {error}"))?;

    if timestamp <= Timestamp::now() {
        return Err("expiry must be in the future".to_string());
    }

    Ok(timestamp)
}
