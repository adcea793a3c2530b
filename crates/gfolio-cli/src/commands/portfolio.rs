use gfolio_core::{DeleteOutcome, Portfolio, Position, Session};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{CreateArgs, TitleArgs};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PortfoliosResponseData<'a> {
    portfolios: Vec<&'a Portfolio>,
}

#[derive(Debug, Serialize)]
struct PositionsResponseData<'a> {
    portfolio: &'a str,
    positions: Vec<&'a Position>,
}

#[derive(Debug, Serialize)]
struct DeleteResponseData {
    title: String,
    deleted: bool,
}

pub async fn list(session: &mut Session) -> Result<Value, CliError> {
    let titles = session.list_portfolios().await?;
    let portfolios = titles
        .iter()
        .filter_map(|title| session.portfolios().get(title))
        .collect::<Vec<_>>();
    Ok(serde_json::to_value(PortfoliosResponseData { portfolios })?)
}

pub async fn positions(session: &mut Session, args: &TitleArgs) -> Result<Value, CliError> {
    session.list_portfolios().await?;
    let titles = session.refresh_positions(&args.title).await?;

    let portfolio = session
        .portfolios()
        .get(&args.title)
        .ok_or_else(|| CliError::Command(format!("portfolio '{}' vanished", args.title)))?;
    let positions = titles
        .iter()
        .filter_map(|title| portfolio.positions.get(title))
        .collect::<Vec<_>>();

    Ok(serde_json::to_value(PositionsResponseData {
        portfolio: &args.title,
        positions,
    })?)
}

pub async fn create(session: &mut Session, args: &CreateArgs) -> Result<Value, CliError> {
    let portfolio = session.create_portfolio(&args.title, &args.currency).await?;
    Ok(serde_json::to_value(portfolio)?)
}

pub async fn delete(session: &mut Session, args: &TitleArgs) -> Result<Value, CliError> {
    session.list_portfolios().await?;
    let outcome = session.delete_portfolio(&args.title).await?;
    if matches!(outcome, DeleteOutcome::NotFound) {
        tracing::warn!(title = %args.title, "no portfolio with that title");
    }

    Ok(serde_json::to_value(DeleteResponseData {
        title: args.title.clone(),
        deleted: outcome.is_deleted(),
    })?)
}
