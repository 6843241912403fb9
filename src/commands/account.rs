//! Account command - Provision staff sign-in accounts.

use std::sync::Arc;

use crate::cli::args::{AccountAction, AccountArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator};

/// Execute the account command
pub async fn execute(args: AccountArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    let auth = Authenticator::new(uow, config);

    match args.action {
        AccountAction::Create {
            email,
            password,
            name,
        } => {
            let account = auth.create_account(email, password, name).await?;
            println!("Created account {} <{}>", account.id, account.email);
        }
    }

    Ok(())
}
