//! Derived views over the product list: filter, sort, paginate.
//!
//! Everything here is a pure function of `(products, filters, sort, page)`;
//! no memoization, no hidden state, no mutation of the store's list. The
//! display collaborator recomputes the view on every change and renders the
//! returned page. `ViewState` bundles the collaborator-side selection rules
//! (filter changes reset the page, sort changes do not) so they live next to
//! the engine they drive.

use crate::catalog::model::Product;
use std::cmp::Ordering;

/// Items shown per page.
pub const PAGE_SIZE: usize = 6;

#[derive(Clone, Debug, Default, PartialEq)]
/// Filter selection. Filters are ANDed; an absent or empty value matches
/// every product.
pub struct Filters {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Case-insensitive substring match against any variation color.
    pub color: Option<String>,
    /// Inclusive lower bound; any variation price may satisfy the range.
    pub min_price: Option<f64>,
    /// Inclusive upper bound.
    pub max_price: Option<f64>,
}

impl Filters {
    fn matches(&self, product: &Product) -> bool {
        let matches_name = match active(&self.name) {
            Some(needle) => contains_ignore_case(&product.name, needle),
            None => true,
        };

        let matches_color = match active(&self.color) {
            Some(needle) => product
                .variations
                .iter()
                .any(|v| contains_ignore_case(&v.color, needle)),
            None => true,
        };

        let matches_price = match (self.min_price, self.max_price) {
            (None, None) => true,
            (min, max) => {
                let min = min.unwrap_or(0.0);
                let max = max.unwrap_or(f64::INFINITY);
                product
                    .variations
                    .iter()
                    .any(|v| v.price >= min && v.price <= max)
            }
        };

        matches_name && matches_color && matches_price
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|text| !text.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Column a view is ordered by.
pub enum SortKey {
    Name,
    /// Orders by each product's cheapest variation price.
    Price,
    /// Orders by each product's smallest variation stock count.
    Stock,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Current sort selection. `key: None` leaves the input order untouched.
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub order: SortOrder,
}

impl SortSpec {
    /// Apply a sort-button press: reselecting the active key flips the
    /// direction, a new key starts ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.order = self.order.flipped();
        } else {
            self.key = Some(key);
            self.order = SortOrder::Ascending;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One page of the filtered, ordered catalog.
pub struct PageView {
    pub items: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Compute the page of products a display surface should render.
///
/// Filtering, ordering, and slicing happen on a copy; the input slice is
/// never reordered. `total_pages` has a floor of 1 so pagination controls
/// can always render a current page, and an out-of-range `page` yields an
/// empty item list rather than an error.
pub fn view(products: &[Product], filters: &Filters, sort: &SortSpec, page: usize) -> PageView {
    view_with_page_size(products, filters, sort, page, PAGE_SIZE)
}

/// `view` with an explicit page size, for surfaces that render a different
/// grid density.
pub fn view_with_page_size(
    products: &[Product],
    filters: &Filters,
    sort: &SortSpec,
    page: usize,
    page_size: usize,
) -> PageView {
    let page_size = page_size.max(1);

    let mut matches: Vec<Product> = products
        .iter()
        .filter(|product| filters.matches(product))
        .cloned()
        .collect();
    sort_products(&mut matches, sort);

    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size).max(1);

    let start = page.saturating_mul(page_size);
    let items = if start >= total_matches {
        Vec::new()
    } else {
        let end = (start + page_size).min(total_matches);
        matches[start..end].to_vec()
    };

    PageView {
        items,
        page,
        total_pages,
        total_matches,
    }
}

fn sort_products(products: &mut [Product], sort: &SortSpec) {
    let Some(key) = sort.key else {
        return;
    };
    let descending = sort.order == SortOrder::Descending;

    // Stable sort, so equal keys keep their insertion order in both
    // directions. Missing variations sort last under price/stock.
    products.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Price => a
                .min_price()
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.min_price().unwrap_or(f64::INFINITY)),
            SortKey::Stock => a
                .min_stock()
                .unwrap_or(u32::MAX)
                .cmp(&b.min_stock().unwrap_or(u32::MAX)),
        };
        if descending { ordering.reverse() } else { ordering }
    });
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Filter, sort, and page selection a display surface carries between
/// renders.
pub struct ViewState {
    filters: Filters,
    sort: SortSpec,
    page: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the filter selection; the view lands back on the first page.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        self.page = 0;
    }

    /// Press a sort button. The current page is preserved.
    pub fn select_sort(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Evaluate the selection against the current product list.
    pub fn view(&self, products: &[Product]) -> PageView {
        view(products, &self.filters, &self.sort, self.page)
    }
}
