//! Portfolio and position feed operations on an authenticated [`Session`].

use crate::domain::{validate_currency_code, Portfolio};
use crate::http_client::HttpRequest;
use crate::normalize::{portfolio_from_document, portfolios_from_feed, positions_from_feed};
use crate::session::{Session, CONTENT_TYPE_ATOM, CONTENT_TYPE_FORM};
use crate::{FinanceError, ValidationError};

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Portfolio),
    /// The title is not in the local store; nothing was sent.
    NotFound,
}

impl DeleteOutcome {
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

pub(crate) fn with_json_alt(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}alt=json")
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Atom entry body for a portfolio create request.
pub fn portfolio_entry_xml(title: &str, currency_code: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
<entry xmlns='http://www.w3.org/2005/Atom' xmlns:gf='http://schemas.google.com/finance/2007'>\
<title type='text'>{}</title>\
<gf:portfolioData currencyCode='{}'/>\
</entry>",
        escape_xml(title),
        escape_xml(currency_code)
    )
}

impl Session {
    /// Fetch the portfolios feed and merge every entry into the store.
    /// Returns the fetched titles in feed order.
    pub async fn list_portfolios(&mut self) -> Result<Vec<String>, FinanceError> {
        self.require_token()?;

        let url = with_json_alt(&self.config().portfolios_url);
        let response = self.send(HttpRequest::get(url)).await?;
        if response.status != 200 {
            return Err(FinanceError::Http {
                status: response.status,
            });
        }

        let portfolios = portfolios_from_feed(&response.body)?;
        let titles = portfolios
            .iter()
            .map(|portfolio| portfolio.title.clone())
            .collect::<Vec<_>>();
        for portfolio in portfolios {
            self.store_mut().upsert(portfolio);
        }
        tracing::info!(count = titles.len(), "portfolios loaded");
        Ok(titles)
    }

    /// Fetch the positions feed of a stored portfolio and merge them into it.
    /// Returns the fetched position titles in feed order.
    pub async fn refresh_positions(&mut self, title: &str) -> Result<Vec<String>, FinanceError> {
        self.require_token()?;

        let feed_href = self
            .portfolios()
            .get(title)
            .map(|portfolio| portfolio.feed_href.clone())
            .ok_or_else(|| FinanceError::UnknownPortfolio {
                title: title.to_owned(),
            })?;

        let response = self.send(HttpRequest::get(with_json_alt(&feed_href))).await?;
        if response.status != 200 {
            return Err(FinanceError::Http {
                status: response.status,
            });
        }

        let positions = positions_from_feed(&response.body)?;
        let titles = positions
            .iter()
            .map(|position| position.title.clone())
            .collect::<Vec<_>>();
        self.store_mut().merge_positions(title, positions);
        tracing::info!(portfolio = title, count = titles.len(), "positions loaded");
        Ok(titles)
    }

    /// Create a portfolio upstream and store the echoed entry. The title and
    /// currency code are validated before anything is sent.
    pub async fn create_portfolio(
        &mut self,
        title: &str,
        currency_code: &str,
    ) -> Result<Portfolio, FinanceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let currency_code = validate_currency_code(currency_code)?;
        self.require_token()?;

        let request = HttpRequest::post(with_json_alt(&self.config().portfolios_url))
            .with_body(portfolio_entry_xml(title, &currency_code));

        self.set_content_type(CONTENT_TYPE_ATOM);
        let response = self.send(request).await;
        self.set_content_type(CONTENT_TYPE_FORM);
        let response = response?;

        if response.status != 201 {
            return Err(FinanceError::Http {
                status: response.status,
            });
        }

        let portfolio = portfolio_from_document(&response.body)?;
        self.store_mut().upsert(portfolio.clone());
        tracing::info!(title = %portfolio.title, currency = %currency_code, "portfolio created");
        Ok(portfolio)
    }

    /// Delete a stored portfolio by title. An unknown title is a local no-op
    /// reported as [`DeleteOutcome::NotFound`].
    pub async fn delete_portfolio(&mut self, title: &str) -> Result<DeleteOutcome, FinanceError> {
        let Some(href) = self
            .portfolios()
            .get(title)
            .map(|portfolio| portfolio.href.clone())
        else {
            tracing::warn!(title, "no portfolio with this title; nothing deleted");
            return Ok(DeleteOutcome::NotFound);
        };
        self.require_token()?;

        let response = self.send(HttpRequest::delete(href)).await?;
        if response.status != 200 {
            return Err(FinanceError::Http {
                status: response.status,
            });
        }

        let removed = self.store_mut().remove(title);
        tracing::info!(title, "portfolio deleted");
        Ok(removed.map_or(DeleteOutcome::NotFound, DeleteOutcome::Deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_alt_respects_existing_query() {
        assert_eq!(
            with_json_alt("https://example.test/feed"),
            "https://example.test/feed?alt=json"
        );
        assert_eq!(
            with_json_alt("https://example.test/feed?returns=true"),
            "https://example.test/feed?returns=true&alt=json"
        );
    }

    #[test]
    fn entry_xml_escapes_title() {
        let body = portfolio_entry_xml("Tom & Jerry's <fund>", "EUR");
        assert!(body.contains("<title type='text'>Tom &amp; Jerry&apos;s &lt;fund&gt;</title>"));
        assert!(body.contains("<gf:portfolioData currencyCode='EUR'/>"));
    }
}
