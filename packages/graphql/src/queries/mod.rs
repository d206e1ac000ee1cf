use async_graphql::MergedObject;
mod blogs;

#[derive(MergedObject, Default)]
pub struct Queries(blogs::BlogQueries);
