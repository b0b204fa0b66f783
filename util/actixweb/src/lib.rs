mod logging;
mod status;

pub use self::logging::LoggingMiddleware;
pub use self::status::configure;
pub use self::status::into_http_response;
pub use self::status::STATUS_RESOURCE;
