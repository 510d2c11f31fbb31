pub(crate) mod error_handler;
pub(crate) mod misc;
pub(crate) mod notification_time;
pub(crate) mod validation;

pub use error_handler::AppError;
pub use misc::*;
pub use notification_time::next_birthday_notification;
pub use validation::validate_past_date;
pub use validation::validate_timezone;
pub use validation::ValidatedBody;
