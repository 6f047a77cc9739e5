use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::config::Config;
use crate::crawler::models::{FieldPair, SearchQuery};
use crate::crawler::{fetcher, parser};
use crate::storage::table::Table;

/// The site paginates its search results in fixed chunks.
pub const RESULTS_PER_PAGE: u32 = 20;

pub struct ScrapingService {
    cfg: Config,
    query: SearchQuery,
    client: reqwest::Client,
    table: Table,
    num_pages: u32,
}

impl ScrapingService {
    /// Fetches the first results page to size the run. A failed fetch or an
    /// unreadable banner falls back to a single page instead of aborting.
    pub async fn new(cfg: Config, query: SearchQuery) -> Self {
        let client = fetcher::build_client(&cfg);

        let url = query.results_url(&cfg.base_url);
        let num_pages = match fetcher::fetch_html(&client, &url).await {
            Ok(html) => match parser::parse_result_count(&html) {
                Ok(total) => {
                    let pages = page_count(total, query.page_limit);
                    info!(total, pages, "Sized the run from the result banner");
                    pages
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Falling back to a single page");
                    1
                }
            },
            Err(e) => {
                warn!(url = %url, error = %e, "First results page unreachable, assuming one page");
                1
            }
        };

        Self {
            cfg,
            query,
            client,
            table: Table::new(),
            num_pages,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Walks every results page in order. Page and listing failures are
    /// logged and skipped; the run itself never aborts.
    pub async fn run(&mut self) {
        for page in 1..=self.num_pages {
            info!(page, total = self.num_pages, "Scraping results page");

            let url = self.query.page_url(&self.cfg.base_url, page);
            let html = match fetcher::fetch_html(&self.client, &url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(page, error = %e, "Skipping unfetchable results page");
                    continue;
                }
            };

            let links = parser::extract_expose_links(&html, &self.cfg.base_url);
            info!(page, count = links.len(), "Found listing links");

            for link in &links {
                self.scrape_listing(link).await;

                // polite delay between detail pages
                sleep(Duration::from_millis(self.cfg.listing_delay_ms)).await;
            }

            // polite delay between result pages
            sleep(Duration::from_millis(self.cfg.page_delay_ms)).await;
        }

        info!(rows = self.table.rows(), "All pages processed");
    }

    /// One listing. The link is recorded before the fetch so even an
    /// unreachable detail page leaves a row behind.
    async fn scrape_listing(&mut self, link: &str) {
        let mut pairs = vec![FieldPair::text("Link", link)];

        match fetcher::fetch_html(&self.client, link).await {
            Ok(html) => parser::extract_listing_fields(&html, link, &mut pairs),
            Err(e) => {
                warn!(url = link, error = %e, "Detail page unreachable, keeping link-only row")
            }
        }

        self.table.append(&pairs);
    }
}

pub fn page_count(total_results: u32, limit: Option<u32>) -> u32 {
    let pages = total_results.div_ceil(RESULTS_PER_PAGE);
    limit.map_or(pages, |cap| pages.min(cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_clamps() {
        assert_eq!(page_count(1234, None), 62);
        assert_eq!(page_count(1234, Some(5)), 5);
        assert_eq!(page_count(20, None), 1);
        assert_eq!(page_count(21, None), 2);
        assert_eq!(page_count(0, None), 0);
        assert_eq!(page_count(5, Some(99)), 1);
    }
}
