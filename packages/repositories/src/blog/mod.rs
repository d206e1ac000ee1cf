mod read;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BlogSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
