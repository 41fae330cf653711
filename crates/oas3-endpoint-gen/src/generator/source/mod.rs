mod contracts;
mod routes;
mod schema_types;

#[cfg(test)]
mod tests;

pub use contracts::{ContractRegistry, placeholder_contract};
pub use routes::{OperationFilter, RouteSource};
pub use schema_types::TypeMapper;
