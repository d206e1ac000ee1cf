pub mod permissions;
pub mod serializers;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use permissions::*;
pub use validation::*;
