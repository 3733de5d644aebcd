//! HTTP contract of the activities API.
//!
//! The client speaks four endpoints:
//!
//! | request | method | path |
//! |---|---|---|
//! | [`Request::ListActivities`] | `GET` | `/activities` |
//! | [`Request::GetActivity`] | `GET` | `/activities/{name}` |
//! | [`Request::Signup`] | `POST` | `/activities/{name}/signup?email={email}` |
//! | [`Request::Unregister`] | `DELETE` | `/activities/{name}/signup?email={email}` |
//!
//! Mutations answer `{"message": ...}` on success and `{"detail": ...}` on
//! failure; [`Reply::from_parts`] classifies them.
//!
//! # Example
//!
//! ```rust
//! use activityboard_protocol::{Reply, Request};
//!
//! let request = Request::signup("Chess Club", "b@x.com");
//! assert_eq!(request.path_and_query(), "/activities/Chess%20Club/signup?email=b%40x.com");
//!
//! let reply = Reply::from_parts(400, br#"{"detail":"Already signed up"}"#).unwrap();
//! assert_eq!(reply.display_text(), "Already signed up");
//! ```

mod error;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use types::{Method, Reply, Request, decode_activity, decode_catalog};
