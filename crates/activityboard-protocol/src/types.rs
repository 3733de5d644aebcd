//! Request and reply types for the activities API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use activityboard_core::message::GENERIC_ERROR;
use activityboard_core::{Activity, ActivityCatalog, ActivityDetails};

use crate::error::{ProtocolError, ProtocolResult};

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Requests the client can send to the activities API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// `GET /activities`
    ListActivities,

    /// `GET /activities/{name}`
    GetActivity { name: String },

    /// `POST /activities/{activity}/signup?email={email}`
    Signup { activity: String, email: String },

    /// `DELETE /activities/{activity}/signup?email={email}`
    Unregister { activity: String, email: String },
}

impl Request {
    pub fn list_activities() -> Self {
        Self::ListActivities
    }

    pub fn get_activity(name: impl Into<String>) -> Self {
        Self::GetActivity { name: name.into() }
    }

    pub fn signup(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self::Signup {
            activity: activity.into(),
            email: email.into(),
        }
    }

    pub fn unregister(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self::Unregister {
            activity: activity.into(),
            email: email.into(),
        }
    }

    /// Returns the HTTP method for this request.
    pub fn method(&self) -> Method {
        match self {
            Self::ListActivities | Self::GetActivity { .. } => Method::Get,
            Self::Signup { .. } => Method::Post,
            Self::Unregister { .. } => Method::Delete,
        }
    }

    /// Returns the path and query, with the activity name and email
    /// percent-encoded.
    pub fn path_and_query(&self) -> String {
        match self {
            Self::ListActivities => "/activities".to_string(),
            Self::GetActivity { name } => format!("/activities/{}", urlencoding::encode(name)),
            Self::Signup { activity, email } | Self::Unregister { activity, email } => format!(
                "/activities/{}/signup?email={}",
                urlencoding::encode(activity),
                urlencoding::encode(email)
            ),
        }
    }

    /// Resolves this request against the API base URL.
    ///
    /// The base may carry a path prefix (`https://host/api/`); the endpoint
    /// is appended to it.
    pub fn url(&self, base: &Url) -> ProtocolResult<Url> {
        let base = base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, self.path_and_query()))?)
    }
}

/// Returns the `detail` of an error body if it is a non-empty string.
///
/// Validation failures carry a structured `detail`, which is not shown.
fn detail_text(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// The outcome of a signup or unregister request as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reply {
    /// 2xx with `{message}`.
    Accepted { message: String },
    /// Non-2xx, with `{detail}` when the server supplied a string detail.
    Rejected { status: u16, detail: Option<String> },
}

impl Reply {
    /// Classifies a mutation reply from its status code and body.
    ///
    /// Any JSON body is accepted. A 2xx `message` that is not a string is
    /// shown as its JSON text; a non-2xx body without a string `detail`
    /// falls back to the generic text.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Serialization`] if the body is not JSON,
    /// whatever the status.
    pub fn from_parts(status: u16, body: &[u8]) -> ProtocolResult<Self> {
        let body: Value = serde_json::from_slice(body)?;
        if is_success(status) {
            let message = match body.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Ok(Self::Accepted { message })
        } else {
            Ok(Self::Rejected {
                status,
                detail: detail_text(&body),
            })
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Returns the text to show the user for this reply.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Accepted { message } => message,
            Self::Rejected { detail, .. } => detail.as_deref().unwrap_or(GENERIC_ERROR),
        }
    }
}

/// Decodes the `GET /activities` reply.
///
/// # Errors
///
/// Returns [`ProtocolError::Status`] for a non-2xx status, or
/// [`ProtocolError::Serialization`] for a body that is not an activity map.
pub fn decode_catalog(status: u16, body: &[u8]) -> ProtocolResult<ActivityCatalog> {
    check_status(status, body)?;
    Ok(serde_json::from_slice(body)?)
}

/// Decodes the `GET /activities/{name}` reply.
pub fn decode_activity(name: &str, status: u16, body: &[u8]) -> ProtocolResult<Activity> {
    check_status(status, body)?;
    let details: ActivityDetails = serde_json::from_slice(body)?;
    Ok(Activity::from_details(name, details))
}

fn check_status(status: u16, body: &[u8]) -> ProtocolResult<()> {
    if is_success(status) {
        return Ok(());
    }
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|b| detail_text(&b));
    Err(ProtocolError::Status { status, detail })
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod request_tests {
        use super::*;

        #[test]
        fn list_activities() {
            let request = Request::list_activities();
            assert_eq!(request.method(), Method::Get);
            assert_eq!(request.path_and_query(), "/activities");
        }

        #[test]
        fn signup_is_percent_encoded() {
            let request = Request::signup("Chess Club", "b@x.com");
            assert_eq!(request.method(), Method::Post);
            assert_eq!(
                request.path_and_query(),
                "/activities/Chess%20Club/signup?email=b%40x.com"
            );
        }

        #[test]
        fn unregister_is_percent_encoded() {
            let request = Request::unregister("Chess Club", "a+tag@x.com");
            assert_eq!(request.method(), Method::Delete);
            assert_eq!(
                request.path_and_query(),
                "/activities/Chess%20Club/signup?email=a%2Btag%40x.com"
            );
        }

        #[test]
        fn path_separators_in_names_are_encoded() {
            let request = Request::get_activity("Art/Design & Co?");
            assert_eq!(request.path_and_query(), "/activities/Art%2FDesign%20%26%20Co%3F");
        }

        #[test]
        fn url_keeps_base_path_prefix() {
            let base = Url::parse("https://school.example/api/").unwrap();
            let url = Request::signup("Chess Club", "b@x.com").url(&base).unwrap();
            assert_eq!(
                url.as_str(),
                "https://school.example/api/activities/Chess%20Club/signup?email=b%40x.com"
            );
        }

        #[test]
        fn url_without_prefix() {
            let base = Url::parse("http://127.0.0.1:8000").unwrap();
            let url = Request::list_activities().url(&base).unwrap();
            assert_eq!(url.as_str(), "http://127.0.0.1:8000/activities");
        }

        #[test]
        fn query_decodes_back_to_email() {
            let base = Url::parse("http://127.0.0.1:8000").unwrap();
            let url = Request::signup("Chess Club", "b@x.com").url(&base).unwrap();
            let pairs: Vec<_> = url.query_pairs().collect();
            assert_eq!(pairs.len(), 1);
            assert_eq!(pairs[0].0, "email");
            assert_eq!(pairs[0].1, "b@x.com");
        }
    }

    mod reply_tests {
        use super::*;

        #[test]
        fn accepted() {
            let reply = Reply::from_parts(200, br#"{"message":"Signed up"}"#).unwrap();
            assert_eq!(
                reply,
                Reply::Accepted {
                    message: "Signed up".into()
                }
            );
            assert_eq!(reply.display_text(), "Signed up");
        }

        #[test]
        fn rejected_with_detail() {
            let reply = Reply::from_parts(400, br#"{"detail":"Already signed up"}"#).unwrap();
            assert!(!reply.is_accepted());
            assert_eq!(reply.display_text(), "Already signed up");
        }

        #[test]
        fn rejected_without_detail_uses_fallback() {
            let reply = Reply::from_parts(500, b"{}").unwrap();
            assert_eq!(reply.display_text(), GENERIC_ERROR);
        }

        #[test]
        fn structured_detail_uses_fallback() {
            let body = br#"{"detail":[{"loc":["query","email"],"msg":"field required"}]}"#;
            let reply = Reply::from_parts(422, body).unwrap();
            assert_eq!(
                reply,
                Reply::Rejected {
                    status: 422,
                    detail: None
                }
            );
            assert_eq!(reply.display_text(), GENERIC_ERROR);
        }

        #[test]
        fn json_string_body_is_a_rejection() {
            let reply = Reply::from_parts(400, b"\"Nope\"").unwrap();
            assert_eq!(
                reply,
                Reply::Rejected {
                    status: 400,
                    detail: None
                }
            );
            assert_eq!(reply.display_text(), GENERIC_ERROR);
        }

        #[test]
        fn non_string_message_is_shown_as_json() {
            let reply = Reply::from_parts(200, br#"{"message":123}"#).unwrap();
            assert_eq!(reply.display_text(), "123");
        }

        #[test]
        fn success_without_message_object() {
            let reply = Reply::from_parts(201, b"[]").unwrap();
            assert_eq!(
                reply,
                Reply::Accepted {
                    message: String::new()
                }
            );
        }

        #[test]
        fn non_json_body_is_an_error() {
            let result = Reply::from_parts(502, b"<html>Bad Gateway</html>");
            assert!(matches!(result, Err(ProtocolError::Serialization(_))));
        }

        #[test]
        fn reply_serializes_with_outcome_tag() {
            let reply = Reply::Rejected {
                status: 404,
                detail: Some("Activity not found".into()),
            };
            insta::assert_json_snapshot!(reply, @r#"
            {
              "outcome": "rejected",
              "status": 404,
              "detail": "Activity not found"
            }
            "#);
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn catalog() {
            let body = br#"{"Chess Club": {"description":"d","schedule":"Mon","max_participants":2,"participants":["a@x.com"]}}"#;
            let catalog = decode_catalog(200, body).unwrap();
            assert_eq!(catalog.len(), 1);
            assert_eq!(catalog.get("Chess Club").unwrap().spots_left(), 1);
        }

        #[test]
        fn catalog_error_status() {
            let err = decode_catalog(503, br#"{"detail":"maintenance"}"#).unwrap_err();
            match err {
                ProtocolError::Status { status, detail } => {
                    assert_eq!(status, 503);
                    assert_eq!(detail.as_deref(), Some("maintenance"));
                }
                other => panic!("expected status error, got {other:?}"),
            }
        }

        #[test]
        fn catalog_parse_error() {
            assert!(matches!(
                decode_catalog(200, b"not json"),
                Err(ProtocolError::Serialization(_))
            ));
        }

        #[test]
        fn single_activity() {
            let body = br#"{"description":"d","schedule":"Mon","max_participants":12,"participants":[]}"#;
            let activity = decode_activity("Chess Club", 200, body).unwrap();
            assert_eq!(activity.name, "Chess Club");
            assert_eq!(activity.spots_left(), 12);
        }

        #[test]
        fn single_activity_not_found() {
            let err = decode_activity("Nope", 404, br#"{"detail":"Activity not found"}"#).unwrap_err();
            assert_eq!(err.to_string(), "server returned 404: Activity not found");
        }
    }
}
