use models::blogs::Blog;
use std::cmp::Ordering;

use super::{BlogSortBy, SortDirection, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::records::BlogRepository;

fn compare(a: &Blog, b: &Blog, sort_by: BlogSortBy) -> Ordering {
    let primary = match sort_by {
        BlogSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        BlogSortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        BlogSortBy::Title => a.title.cmp(&b.title),
    };
    // ids break ties so equal keys still list in a stable order
    primary.then_with(|| a.id.cmp(&b.id))
}

impl BlogRepository {
    /// Blogs ordered by `sort_by`, at most `first` of them (default 20, capped at 100)
    pub fn list(&self, sort_by: BlogSortBy, sort_dir: SortDirection, first: Option<usize>) -> Vec<Blog> {
        let limit = first.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let mut blogs = self.all();
        blogs.sort_by(|a, b| match sort_dir {
            SortDirection::Asc => compare(a, b, sort_by),
            SortDirection::Desc => compare(b, a, sort_by),
        });
        blogs.truncate(limit);
        blogs
    }
}
