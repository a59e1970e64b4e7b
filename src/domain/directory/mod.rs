//! Directory-wide views that are not tied to a single member.

mod card_report;

pub use card_report::CardReport;
