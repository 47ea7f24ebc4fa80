pub mod fetcher;
pub mod heuristics;
pub mod parser;

pub use fetcher::ReqwestFetcher;
pub use heuristics::{LabelSplitExtractor, MarkerTitlePredicate, split_title};
pub use parser::HtmlListingParser;
