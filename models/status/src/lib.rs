extern crate serde;
extern crate serde_derive;
extern crate serde_json;

mod about;
mod encoding;
mod severity;
mod status;

pub use self::about::AboutResponse;
pub use self::about::Dependency;
pub use self::about::ABOUT_FIELD_NA;
pub use self::about::ABOUT_PROTOCOL_HTTP;
pub use self::about::HOST_UNKNOWN;
pub use self::about::VERSION_NA;
pub use self::encoding::serialize_status_list;
pub use self::encoding::translate_status_list;
pub use self::encoding::EncodedStatus;
pub use self::severity::InvalidSeverity;
pub use self::severity::Severity;
pub use self::status::Status;
pub use self::status::StatusList;
