pub const INPUT_SUFFIX: &str = "Input";
pub const PARAMS_SUFFIX: &str = "Params";

/// Group assigned to routes that do not match the grouping rule.
pub const CATCH_ALL_GROUP: &str = "other";

pub const ENDPOINTS_DIR: &str = "endpoints";
pub const INDEX_FILE: &str = "index";
pub const DATA_CONTRACTS_FILE: &str = "data-contracts";
pub const META_INFO_FILE: &str = "meta-info";
pub const EXPORTS_FILE: &str = "__exports";
pub const TS_EXTENSION: &str = "ts";

pub const DEFAULT_RUNTIME_MODULE: &str = "@oas3-endpoints/runtime";
pub const ENDPOINT_SYMBOL: &str = "Endpoint";
pub const HTTP_CLIENT_SYMBOL: &str = "http";
pub const QUERY_CLIENT_SYMBOL: &str = "queryClient";
pub const HTTP_RESPONSE_TYPE: &str = "HttpResponse";
pub const HTTP_MULTISTATUS_RESPONSE_TYPE: &str = "HttpMultistatusResponse";
pub const REQUEST_PARAMS_TYPE: &str = "RequestParams";

pub const GROUP_ENUM: &str = "Group";
pub const TAG_ENUM: &str = "Tag";
pub const META_ENUM_SUFFIX: &str = "Meta";
pub const NAMESPACE_CONST: &str = "namespace";

pub const BODY_PARAM: &str = "body";
pub const QUERY_PARAM: &str = "query";
pub const COMBINED_PARAM: &str = "params";
pub const REQUEST_PARAMS_PARAM: &str = "requestParams";
