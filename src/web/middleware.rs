pub use self::error::ErrorMiddleware;
pub use self::sentry::SentryMiddleware;
pub use self::timeit::TimeItMiddleware;

mod error;
mod sentry;
mod timeit;
