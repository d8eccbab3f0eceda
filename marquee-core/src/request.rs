use std::fmt;

use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::routes::{QueryDefault, Route};
use crate::transport::HttpRequest;

/// Values substituted for parameters a caller leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub language: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            language: crate::locale::language_tag(),
        }
    }
}

/// Collects path, query and body values for one [`Route`].
///
/// Nothing is validated until [`build`](Self::build), so a builder can be
/// assembled fluently and the first problem reported once.
pub struct RequestBuilder<T> {
    route: Route<T>,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    body: Option<Result<serde_json::Value, String>>,
}

impl<T> fmt::Debug for RequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("route", &self.route)
            .field("path_params", &self.path_params)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

impl<T> RequestBuilder<T> {
    pub(crate) fn new(route: Route<T>) -> Self {
        Self {
            route,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn route(&self) -> &Route<T> {
        &self.route
    }

    /// Fill a `{name}` placeholder in the path template.
    pub fn path(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    pub fn query_opt(
        self,
        name: &'static str,
        value: Option<impl Into<String>>,
    ) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn json(mut self, body: &impl Serialize) -> Self {
        self.body =
            Some(serde_json::to_value(body).map_err(|err| err.to_string()));
        self
    }

    /// Resolve the request against the route table.
    pub fn build(self, defaults: &RequestDefaults) -> ApiResult<HttpRequest> {
        let route = self.route;
        let path = resolve_path(route.path, &self.path_params)?;

        for (name, _) in &self.query {
            if route.param(name).is_none() {
                return Err(ApiError::InvalidRequest(format!(
                    "{route} does not accept query parameter `{name}`"
                )));
            }
        }

        let mut query = Vec::with_capacity(route.params.len());
        for param in route.params {
            let supplied = self
                .query
                .iter()
                .rev()
                .find(|(name, _)| *name == param.name)
                .map(|(_, value)| value.clone());

            let value = match (supplied, param.default) {
                (Some(value), _) => Some(value),
                (None, QueryDefault::Required) => {
                    return Err(ApiError::InvalidRequest(format!(
                        "{route} requires query parameter `{}`",
                        param.name
                    )));
                }
                (None, QueryDefault::Optional) => None,
                (None, QueryDefault::Language) => Some(defaults.language.clone()),
                (None, QueryDefault::Page) => Some("1".to_string()),
                (None, QueryDefault::Fixed(value)) => Some(value.to_string()),
            };

            if let Some(value) = value {
                query.push((param.name.to_string(), value));
            }
        }

        let body = match (self.body, route.body) {
            (Some(Ok(body)), true) => Some(body),
            (Some(Err(err)), _) => {
                return Err(ApiError::InvalidRequest(format!(
                    "failed to encode body for {route}: {err}"
                )));
            }
            (None, true) => {
                return Err(ApiError::InvalidRequest(format!(
                    "{route} requires a JSON body"
                )));
            }
            (Some(Ok(_)), false) => {
                return Err(ApiError::InvalidRequest(format!(
                    "{route} does not take a body"
                )));
            }
            (None, false) => None,
        };

        Ok(HttpRequest {
            method: route.method,
            path,
            query,
            body,
        })
    }
}

fn resolve_path(
    template: &str,
    params: &[(&'static str, String)],
) -> ApiResult<String> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            return Err(ApiError::InvalidRequest(format!(
                "unterminated placeholder in `{template}`"
            )));
        };
        let name = &rest[start + 1..start + len];
        let value = params
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| {
                ApiError::InvalidRequest(format!(
                    "missing path parameter `{name}` for `{template}`"
                ))
            })?;

        if value.trim().is_empty() || value.contains(['/', '?', '#']) {
            return Err(ApiError::InvalidRequest(format!(
                "invalid value `{value}` for path parameter `{name}`"
            )));
        }

        path.push_str(&rest[..start]);
        path.push_str(value);
        rest = &rest[start + len + 1..];
    }
    path.push_str(rest);

    Ok(path)
}

#[cfg(test)]
mod tests {
    use marquee_model::{FavoriteRequest, MediaType};

    use super::*;
    use crate::routes::{self, Method};

    fn defaults() -> RequestDefaults {
        RequestDefaults {
            language: "de-DE".into(),
        }
    }

    fn query_value<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
        request
            .query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn omitted_page_and_language_use_defaults() {
        let request = routes::movie::POPULAR.request().build(&defaults()).unwrap();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "movie/popular");
        assert_eq!(query_value(&request, "page"), Some("1"));
        assert_eq!(query_value(&request, "language"), Some("de-DE"));
    }

    #[test]
    fn details_fill_id_and_append_to_response() {
        let request = routes::tv::DETAILS
            .request()
            .path("id", 1399)
            .query("language", "fr-FR")
            .build(&defaults())
            .unwrap();

        assert_eq!(request.path, "tv/1399");
        assert_eq!(query_value(&request, "language"), Some("fr-FR"));
        assert_eq!(
            query_value(&request, "append_to_response"),
            Some("credits,videos")
        );
    }

    #[test]
    fn missing_required_query_is_rejected() {
        let err = routes::search::MULTI
            .request()
            .build(&defaults())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(msg) if msg.contains("query")));
    }

    #[test]
    fn unfilled_placeholder_is_rejected() {
        let err = routes::movie::IMAGES
            .request()
            .build(&defaults())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn undeclared_query_parameter_is_rejected() {
        let err = routes::configuration::GET
            .request()
            .query("page", "2")
            .build(&defaults())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn body_routes_carry_json() {
        let request = routes::account::FAVORITE
            .request()
            .path("account_id", 42)
            .query("session_id", "abc")
            .json(&FavoriteRequest {
                media_type: MediaType::Movie,
                media_id: 550,
                favorite: true,
            })
            .build(&defaults())
            .unwrap();

        assert_eq!(request.path, "account/42/favorite");
        let body = request.body.expect("body");
        assert_eq!(body["media_type"], "movie");
        assert_eq!(body["media_id"], 550);
        assert_eq!(body["favorite"], true);

        let err = routes::account::FAVORITE
            .request()
            .path("account_id", 42)
            .query("session_id", "abc")
            .build(&defaults())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
