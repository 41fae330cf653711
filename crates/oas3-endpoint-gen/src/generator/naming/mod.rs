pub mod constants;
pub mod identifiers;
pub mod units;

#[cfg(test)]
mod tests;
