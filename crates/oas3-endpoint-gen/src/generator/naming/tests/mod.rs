mod identifiers;
mod units;
