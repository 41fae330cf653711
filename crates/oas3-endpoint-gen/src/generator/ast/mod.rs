mod content;
mod contracts;
mod documentation;
mod parsed_path;
mod route;
mod status_codes;
pub mod ts;

#[cfg(test)]
mod tests;

pub use content::ContentCategory;
pub use contracts::{ContractKind, ContractOrigin, DataContract, EnumMember};
pub use documentation::Documentation;
pub use parsed_path::{ParsedPath, PathParseError, PathSegment};
pub use route::{ParamKind, RawRoute, RequestBody, Route, RouteParam, RouteResponse, UnitParam};
pub use status_codes::StatusKey;
pub use ts::{Emit, TsLiteral, TsPrimitive, TsProp, TsType};
