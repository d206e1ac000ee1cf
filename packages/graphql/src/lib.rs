pub mod types;
pub mod queries;
pub mod mutations;
pub mod serializers;
pub mod utilities;
pub mod errors;

use async_graphql::{EmptySubscription, Schema};
use repositories::Registry;

pub use serializers::Serializers;

pub type AppSchema = Schema<queries::Queries, mutations::Mutations, EmptySubscription>;

/// Schema with the registry and its serializers attached as context data.
/// The requester is supplied per request as `Requester` data.
pub fn build_schema(registry: Registry) -> AppSchema {
    let serializers = Serializers::new(&registry);
    Schema::build(queries::Queries::default(), mutations::Mutations::default(), EmptySubscription)
        .data(registry)
        .data(serializers)
        .finish()
}

#[cfg(test)]
pub mod test_helpers;
