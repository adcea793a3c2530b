mod market;
mod portfolio;

use std::sync::Arc;

use gfolio_core::{Credentials, GfolioConfig, HttpClient, MarketData, ReqwestHttpClient, Session};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub const EMAIL_VAR: &str = "GFOLIO_EMAIL";
pub const PASSWORD_VAR: &str = "GFOLIO_PASSWORD";

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let mut config = GfolioConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    match &cli.command {
        Command::Portfolios => {
            let mut session = login(config, http_client).await?;
            portfolio::list(&mut session).await
        }
        Command::Positions(args) => {
            let mut session = login(config, http_client).await?;
            portfolio::positions(&mut session, args).await
        }
        Command::Create(args) => {
            let mut session = login(config, http_client).await?;
            portfolio::create(&mut session, args).await
        }
        Command::Delete(args) => {
            let mut session = login(config, http_client).await?;
            portfolio::delete(&mut session, args).await
        }
        Command::Quotes(args) => market::quotes(&MarketData::new(config, http_client), args).await,
        Command::Ticks(args) => market::ticks(&MarketData::new(config, http_client), args).await,
        Command::Financials(args) => {
            market::financials(&MarketData::new(config, http_client), args).await
        }
        Command::Snapshot(args) => {
            market::snapshot(&MarketData::new(config, http_client), args).await
        }
    }
}

async fn login(config: GfolioConfig, http_client: Arc<dyn HttpClient>) -> Result<Session, CliError> {
    let credentials = credentials_from_env(&config, |name| std::env::var(name).ok())?;
    let mut session = Session::new(credentials, config, http_client);
    session.login().await?;
    tracing::info!(email = session.credentials().email(), "logged in");
    Ok(session)
}

fn credentials_from_env<F>(config: &GfolioConfig, lookup: F) -> Result<Credentials, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let email = lookup(EMAIL_VAR)
        .filter(|value| !value.trim().is_empty())
        .ok_or(CliError::MissingCredentials {
            variable: EMAIL_VAR,
        })?;
    let password = lookup(PASSWORD_VAR).ok_or(CliError::MissingCredentials {
        variable: PASSWORD_VAR,
    })?;
    Ok(Credentials::from_config(email, password, config))
}
