pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;
pub const DEFAULT_QUERY_LIMIT: u64 = 1000;

// pub const NOTIFICATION_JOB_INTERVAL: u64 = 5;
// pub const RECOVERY_JOB_INTERVAL: u64 = 60;
pub const NOTIFICATION_JOB_INTERVAL: u64 = 60;
pub const RECOVERY_JOB_INTERVAL: u64 = 24 * 60 * 60;

// selection windows on nextNotification, in seconds
pub const NOTIFICATION_WINDOW_SECS: u64 = 60;
pub const RECOVERY_WINDOW_SECS: u64 = 24 * 60 * 60;

pub const CONCURRENCY_LIMIT: usize = 10;
pub const MAX_SEND_ATTEMPTS: u32 = 3;
pub const SEND_TIMEOUT_SECS: u64 = 5;
// backoff before retry attempt 2, 3, ... in seconds
pub const RETRY_BACKOFF_SECS: [u64; 3] = [30, 60, 120];

pub const EMAIL_SERVICE_URL: &str =
    "https://email-service.digitalenvision.com.au/send-email";

pub const MSG_KIND_BIRTHDAY: &str = "birthday";
pub const MSG_KIND_ANNIVERSARY: &str = "anniversary";

pub const DB_NAME: &str = "birthdaybuzz";

pub const COLL_USERS: &str = "users";
