use crate::generator::ast::{RouteResponse, StatusKey, TsProp, TsType};

/// Which generic response wrapper a route uses, with its type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
  /// `HttpResponse<Data, Error>`
  Simple { data: TsType, error: TsType },
  /// `HttpMultistatusResponse<{ <code>: { data; error } }, DefaultData, DefaultError>`
  MultiStatus {
    statuses: Vec<(u16, TsType, TsType)>,
    default_data: TsType,
    default_error: TsType,
  },
}

impl ResponseShape {
  /// The simple shape is only used when at most one explicit status code is
  /// declared and it is a success status. Anything else keeps per-status typing.
  #[must_use]
  pub fn from_responses(responses: &[RouteResponse]) -> Self {
    let explicit = responses
      .iter()
      .filter_map(|r| r.status.code().map(|code| (code, r)))
      .collect::<Vec<_>>();

    let has_success = responses.iter().any(|r| r.status.is_success());
    let fallback_data = fallback_data(responses, has_success);
    let fallback_error = fallback_error(responses, has_success);

    match explicit.as_slice() {
      [] => Self::Simple {
        data: fallback_data,
        error: fallback_error,
      },
      [(_, only)] if only.status.is_success() => Self::Simple {
        data: only.ty.clone(),
        error: fallback_error,
      },
      _ => Self::MultiStatus {
        statuses: explicit
          .iter()
          .map(|(code, r)| {
            if r.status.is_success() {
              (*code, r.ty.clone(), TsType::null())
            } else {
              (*code, TsType::null(), r.ty.clone())
            }
          })
          .collect(),
        default_data: fallback_data,
        default_error: fallback_error,
      },
    }
  }

  /// Renders the wrapper type using the given local names for the runtime
  /// `HttpResponse` and `HttpMultistatusResponse` types.
  #[must_use]
  pub fn to_type(&self, simple_name: &str, multi_name: &str) -> TsType {
    match self {
      Self::Simple { data, error } => TsType::generic(simple_name, vec![data.clone(), error.clone()]),
      Self::MultiStatus {
        statuses,
        default_data,
        default_error,
      } => {
        let table = statuses
          .iter()
          .map(|(code, data, error)| {
            let pair = TsType::Object(vec![
              TsProp::new("data", data.clone(), false),
              TsProp::new("error", error.clone(), false),
            ]);
            TsProp::new(code.to_string(), pair, false)
          })
          .collect();
        TsType::generic(
          multi_name,
          vec![TsType::Object(table), default_data.clone(), default_error.clone()],
        )
      }
    }
  }

  #[must_use]
  pub const fn is_multi_status(&self) -> bool {
    matches!(self, Self::MultiStatus { .. })
  }
}

/// `2XX` range bodies, or `default` when no success status exists, else `void`.
fn fallback_data(responses: &[RouteResponse], has_success: bool) -> TsType {
  let ranges = responses
    .iter()
    .filter(|r| r.status == StatusKey::Range(2))
    .map(|r| r.ty.clone())
    .collect::<Vec<_>>();
  if !ranges.is_empty() {
    return TsType::union(ranges);
  }
  if !has_success && let Some(default) = responses.iter().find(|r| r.status.is_default()) {
    return default.ty.clone();
  }
  TsType::void()
}

/// `default` (when a success status exists) and non-success ranges, else `any`.
fn fallback_error(responses: &[RouteResponse], has_success: bool) -> TsType {
  let errors = responses
    .iter()
    .filter(|r| match r.status {
      StatusKey::Default => has_success,
      StatusKey::Range(class) => class != 2,
      StatusKey::Code(_) => false,
    })
    .map(|r| r.ty.clone())
    .collect::<Vec<_>>();
  if errors.is_empty() { TsType::any() } else { TsType::union(errors) }
}
