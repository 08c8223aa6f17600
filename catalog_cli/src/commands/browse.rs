//! Interactive browsing session on stdin.
//!
//! Free text is the search box: each line replaces its contents and the
//! listing follows once typing has settled. Lines starting with `:` are
//! commands. Listing requests run as tasks; a response is only shown while
//! its query is still the active one.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use catalog_lib::pagination::PageWindow;
use catalog_lib::sort::sort_products;
use catalog_lib::types::{ProductID, ProductsResponse};
use catalog_lib::validation;
use catalog_lib::{
    AddressState, AddressUpdate, CachedClient, CartCounter, CatalogConfig, CatalogError,
    LocalStorage, QueryKey, ResponseGate, SearchBox, SortKey, SortOrder, ALL_CATEGORIES,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::output::{
    print_empty_results, print_product_detail, print_products, render_filters, render_page_bar,
    render_summary, OutputFormat,
};

const HELP: &str = "\
Type to search (an empty line clears the search). Commands:
  :page N              go to page N
  :next / :prev        next or previous page
  :category SLUG       filter by category (no slug for all)
  :sort KEY ORDER      sort by price|title|rating, asc|desc (no args for default)
  :clear               clear search, category and sort
  :open ID             show product details
  :add                 add one item to the cart
  :retry               reload the current page
  :help                show this help
  :quit                exit";

#[derive(Args)]
pub struct BrowseArgs {
    /// Start from a shared address, e.g. "page=2&category=beauty&q=lip"
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Search(String),
    Page(u32),
    Next,
    Previous,
    Category(String),
    Sort(Option<(SortKey, SortOrder)>),
    Clear,
    Open(ProductID),
    Add,
    Retry,
    Help,
    Quit,
}

/// Parses one input line. Anything not starting with `:` is search text.
pub fn parse_command(line: &str) -> Result<Command, CatalogError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Ok(Command::Search(String::new()));
        }
        return Ok(Command::Search(validation::validate_search(line)?));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    let command = match (name, args.as_slice()) {
        ("page" | "p", [n]) => {
            let page = n
                .parse::<i64>()
                .map_err(|_| CatalogError::InvalidInput(format!("invalid page '{}'", n)))?;
            Command::Page(validation::validate_page(page)?)
        }
        ("next" | "n", []) => Command::Next,
        ("prev" | "previous", []) => Command::Previous,
        ("category" | "c", []) => Command::Category(ALL_CATEGORIES.to_string()),
        ("category" | "c", [slug]) => Command::Category(validation::validate_category(slug)?),
        ("sort", []) => Command::Sort(None),
        ("sort", [key, order]) => {
            Command::Sort(validation::validate_sort(Some(*key), Some(*order))?)
        }
        ("clear", []) => Command::Clear,
        ("open" | "o", [id]) => Command::Open(validation::validate_product_id(id)?),
        ("add", []) => Command::Add,
        ("retry" | "r", []) => Command::Retry,
        ("help" | "h" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => {
            return Err(CatalogError::InvalidInput(format!(
                "unknown command ':{}'. Type :help for a list",
                rest.trim()
            )))
        }
    };
    Ok(command)
}

type FetchResult = (QueryKey, Result<ProductsResponse, CatalogError>);

/// View state of one browsing session.
pub struct Browser<'a, S> {
    client: Arc<CachedClient>,
    cart: &'a CartCounter<S>,
    format: OutputFormat,
    limit: u32,
    address: AddressState,
    search: SearchBox,
    gate: ResponseGate,
    /// Pagination of the last listing shown.
    window: Option<PageWindow>,
    /// Queries with a request still in flight.
    in_flight: HashSet<QueryKey>,
    results: mpsc::UnboundedSender<FetchResult>,
}

impl<'a, S: LocalStorage> Browser<'a, S> {
    /// Returns the browser with the receivers for settled search text and
    /// finished listing requests.
    pub fn new(
        client: Arc<CachedClient>,
        cart: &'a CartCounter<S>,
        config: &CatalogConfig,
        format: OutputFormat,
        address: AddressState,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<String>,
        mpsc::UnboundedReceiver<FetchResult>,
    ) {
        let (search, settled) = SearchBox::new(&address, config.debounce);
        let (results, results_rx) = mpsc::unbounded_channel();
        (
            Self {
                client,
                cart,
                format,
                limit: config.page_size,
                address,
                search,
                gate: ResponseGate::new(),
                window: None,
                in_flight: HashSet::new(),
                results,
            },
            settled,
            results_rx,
        )
    }

    pub fn address(&self) -> &AddressState {
        &self.address
    }

    /// Requests the listing for the current address unless it is already
    /// the active query.
    pub fn refresh(&mut self) {
        let key = self.address.query_key();
        if self.gate.activate(key.clone()) {
            self.fetch(key);
        }
    }

    /// Re-issues the active query. Returns false while its request is still
    /// in flight.
    pub fn retry(&mut self) -> bool {
        match self.gate.active().cloned() {
            Some(key) => self.fetch(key),
            None => {
                self.refresh();
                true
            }
        }
    }

    fn fetch(&mut self, key: QueryKey) -> bool {
        if !self.in_flight.insert(key.clone()) {
            return false;
        }
        tracing::debug!("fetching {}", key);
        eprintln!("Loading...");
        let query = self.address.to_product_query(self.limit);
        let client = Arc::clone(&self.client);
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = client.get_products(&query).await;
            // The session may have ended while the request was in flight.
            let _ = results.send((key, result));
        });
        true
    }

    fn navigate(&mut self, update: AddressUpdate) {
        self.address.apply(update);
        self.search.on_address_changed(&self.address);
        self.refresh();
    }

    /// Handles settled search text from the debouncer.
    pub fn on_settled(&mut self, value: &str) {
        if self.search.on_settled(value, &mut self.address) {
            self.search.on_address_changed(&self.address);
            self.refresh();
        }
    }

    /// Shows a finished listing request. Returns false when the response
    /// was stale and dropped.
    pub fn on_result(&mut self, (key, result): FetchResult) -> Result<bool> {
        self.in_flight.remove(&key);
        if !self.gate.accept(&key) {
            return Ok(false);
        }

        if let Some(filters) = render_filters(&self.address.active_filters()) {
            eprintln!("{}", filters);
        }

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                println!("Failed to load products");
                println!("{}", e);
                eprintln!("Type :retry to try again.");
                return Ok(true);
            }
        };

        let window = PageWindow::new(key.page, resp.total, self.limit);
        self.window = Some(window);
        eprintln!("{}", render_summary(resp.total, &window));

        let products = sort_products(&resp.products, key.sort_by, key.order);
        if products.is_empty() {
            print_empty_results();
        } else {
            print_products(&products, self.format)?;
            eprintln!("{}", render_page_bar(&window));
        }
        eprintln!("Address: ?{}", self.address.to_query_string());
        Ok(true)
    }

    /// Applies one command. Returns false when the session should end.
    pub async fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Search(text) => self.search.on_input(&text),
            Command::Page(page) => match self.window {
                Some(window) if page > window.pages() => {
                    eprintln!("Page {} is out of range (1-{})", page, window.pages());
                }
                _ => self.navigate(AddressUpdate::page(page)),
            },
            Command::Next => match self.window.and_then(|w| w.next()) {
                Some(page) => self.navigate(AddressUpdate::page(page)),
                None => eprintln!("Already on the last page"),
            },
            Command::Previous => match self.window.and_then(|w| w.previous()) {
                Some(page) => self.navigate(AddressUpdate::page(page)),
                None => eprintln!("Already on the first page"),
            },
            Command::Category(slug) => self.navigate(AddressUpdate::category(&slug)),
            Command::Sort(sort) => self.navigate(AddressUpdate::sort(sort)),
            Command::Clear => {
                self.address.clear_filters();
                self.search.on_address_changed(&self.address);
                self.refresh();
            }
            Command::Open(id) => match self.client.get_product(id).await {
                Ok(product) => print_product_detail(&product, self.format)?,
                Err(e) => {
                    println!("Failed to load product");
                    println!("{}", e);
                }
            },
            Command::Add => {
                let count = self.cart.increment();
                eprintln!("Added to cart ({} items)", count);
            }
            Command::Retry => {
                if !self.retry() {
                    eprintln!("Still loading...");
                }
            }
            Command::Help => eprintln!("{}", HELP),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

pub async fn run<S: LocalStorage>(
    args: &BrowseArgs,
    client: Arc<CachedClient>,
    cart: &CartCounter<S>,
    config: &CatalogConfig,
    format: OutputFormat,
) -> Result<()> {
    let address = AddressState::parse(args.address.as_deref().unwrap_or(""));
    let (mut browser, mut settled, mut results) =
        Browser::new(client, cart, config, format, address);

    eprintln!("Cart: {} items. Type :help for commands.", cart.read());
    browser.refresh();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(command) => {
                        if !browser.handle(command).await? {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            Some(value) = settled.recv() => browser.on_settled(&value),
            Some(result) = results.recv() => {
                browser.on_result(result)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_lib::{MemoryCache, MemoryStorage};
    use std::time::Duration;

    #[test]
    fn plain_text_is_search() {
        assert_eq!(
            parse_command("  red lipstick ").unwrap(),
            Command::Search("red lipstick".to_string())
        );
        assert_eq!(parse_command("").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command(":page 7").unwrap(), Command::Page(7));
        assert_eq!(parse_command(":next").unwrap(), Command::Next);
        assert_eq!(parse_command(":prev").unwrap(), Command::Previous);
        assert_eq!(parse_command(":quit\n").unwrap(), Command::Quit);
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command(":category Laptops").unwrap(),
            Command::Category("laptops".to_string())
        );
        assert_eq!(
            parse_command(":category").unwrap(),
            Command::Category("all".to_string())
        );
        assert_eq!(
            parse_command(":sort rating desc").unwrap(),
            Command::Sort(Some((SortKey::Rating, SortOrder::Desc)))
        );
        assert_eq!(parse_command(":sort").unwrap(), Command::Sort(None));
        assert_eq!(parse_command(":open 78").unwrap(), Command::Open(78));
    }

    #[test]
    fn rejects_bad_commands() {
        for line in [":page 0", ":page two", ":sort price", ":open -1", ":fly", ":next 2"] {
            assert!(parse_command(line).is_err(), "line {:?}", line);
        }
    }

    fn offline_client() -> Arc<CachedClient> {
        Arc::new(CachedClient::with_base_url(
            "http://127.0.0.1:1",
            MemoryCache::new(Duration::from_secs(60)),
        ))
    }

    #[tokio::test]
    async fn failed_listing_is_shown_for_active_query() {
        let cart = CartCounter::new(MemoryStorage::new());
        let config = CatalogConfig::default();
        let (mut browser, _settled, mut results) = Browser::new(
            offline_client(),
            &cart,
            &config,
            OutputFormat::Table,
            AddressState::default(),
        );

        browser.refresh();
        let result = results.recv().await.unwrap();
        assert!(result.1.is_err());
        assert!(browser.on_result(result).unwrap());
    }

    #[tokio::test]
    async fn superseded_listing_is_dropped() {
        let cart = CartCounter::new(MemoryStorage::new());
        let config = CatalogConfig::default();
        let (mut browser, _settled, mut results) = Browser::new(
            offline_client(),
            &cart,
            &config,
            OutputFormat::Table,
            AddressState::default(),
        );

        browser.refresh();
        browser
            .handle(Command::Category("laptops".to_string()))
            .await
            .unwrap();
        assert_eq!(browser.address().category, "laptops");

        let mut shown = Vec::new();
        for _ in 0..2 {
            let result = results.recv().await.unwrap();
            let category = result.0.category.clone();
            shown.push((category, browser.on_result(result).unwrap()));
        }
        shown.sort();
        assert_eq!(
            shown,
            vec![("all".to_string(), false), ("laptops".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn retry_waits_for_pending_request() {
        let cart = CartCounter::new(MemoryStorage::new());
        let config = CatalogConfig::default();
        let (mut browser, _settled, mut results) = Browser::new(
            offline_client(),
            &cart,
            &config,
            OutputFormat::Table,
            AddressState::default(),
        );

        browser.refresh();
        assert!(!browser.retry());
        let result = results.recv().await.unwrap();
        assert!(browser.on_result(result).unwrap());
        assert!(results.try_recv().is_err());

        assert!(browser.retry());
        let result = results.recv().await.unwrap();
        assert!(result.1.is_err());
        assert!(browser.on_result(result).unwrap());
    }

    #[tokio::test]
    async fn add_increments_cart() {
        let cart = CartCounter::new(MemoryStorage::new());
        let config = CatalogConfig::default();
        let (mut browser, _settled, _results) = Browser::new(
            offline_client(),
            &cart,
            &config,
            OutputFormat::Table,
            AddressState::default(),
        );
        assert!(browser.handle(Command::Add).await.unwrap());
        assert!(browser.handle(Command::Add).await.unwrap());
        assert!(!browser.handle(Command::Quit).await.unwrap());
        assert_eq!(cart.read(), 2);
    }
}
