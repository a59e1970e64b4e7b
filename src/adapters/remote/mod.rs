//! Authoritative member source adapters.

mod http_member_source;

pub use http_member_source::HttpMemberSource;
