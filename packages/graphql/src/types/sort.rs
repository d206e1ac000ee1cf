use async_graphql::Enum;
use repositories::blog;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum BlogSortBy {
    #[default]
    #[graphql(name = "CREATED_AT")]
    CreatedAt,
    #[graphql(name = "UPDATED_AT")]
    UpdatedAt,
    #[graphql(name = "TITLE")]
    Title,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SortDirection {
    #[graphql(name = "ASC")]
    Asc,
    #[default]
    #[graphql(name = "DESC")]
    Desc,
}

impl From<BlogSortBy> for blog::BlogSortBy {
    fn from(s: BlogSortBy) -> Self {
        match s {
            BlogSortBy::CreatedAt => blog::BlogSortBy::CreatedAt,
            BlogSortBy::UpdatedAt => blog::BlogSortBy::UpdatedAt,
            BlogSortBy::Title => blog::BlogSortBy::Title,
        }
    }
}

impl From<SortDirection> for blog::SortDirection {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Asc => blog::SortDirection::Asc,
            SortDirection::Desc => blog::SortDirection::Desc,
        }
    }
}
