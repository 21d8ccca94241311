pub mod asin;
pub mod client;
pub mod error;
pub mod page;
pub mod price;
pub mod product;
mod rank;
mod retry;
mod selectors;
pub mod search;

pub use client::{FetchedPage, SiteClient};
pub use error::ScraperError;
pub use product::{parse_product_page, ProductExtract};
pub use search::{parse_search_page, SearchOutcome};
