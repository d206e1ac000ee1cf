pub mod blog;
pub mod errors;
pub mod fixtures;
pub mod records;
pub mod registry;
pub mod table;

pub use blog::{BlogSortBy, SortDirection, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use errors::RepositoryError;
pub use fixtures::Fixtures;
pub use records::*;
pub use registry::Registry;
pub use table::{Record, Table};

#[cfg(test)]
mod test_helpers;
