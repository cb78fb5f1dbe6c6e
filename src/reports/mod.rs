//! The reports page and its chart generation.

mod charts;
mod page;

pub use page::get_reports_page;
