use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer};
use std::time::{SystemTime, UNIX_EPOCH};

use super::AppError;
use crate::constants::*;

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Returns the outbound messaging endpoint, overridable from environment
pub fn email_service_url() -> String {
    std::env::var("EMAIL_SERVICE_URL").unwrap_or(EMAIL_SERVICE_URL.to_owned())
}

/// Parse the given value as ObjectId
pub fn parse_object_id(id: &str, error_message: &str) -> Result<ObjectId, AppError> {
    let oid = ObjectId::parse_str(id).map_err(|err| {
        tracing::debug!("{:?}", err);
        AppError::BadRequestErr(error_message.into())
    })?;
    Ok(oid)
}

/// Deserialize helper for ObjectId field
pub fn deserialize_helper<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Option::<ObjectId>::deserialize(deserializer)?;
    match val {
        None => Ok(None),
        Some(val) => Ok(Some(val.to_hex())),
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn test_get_epoch_ts() {
        let d = Duration::from_secs(1);
        let t1 = get_epoch_ts();
        thread::sleep(d);
        let t2 = get_epoch_ts();
        assert_eq!(t1 > 0, true);
        assert_eq!(t2 > 0, true);
        assert_eq!(t1 + 1 <= t2, true);
    }

    #[test]
    fn test_parse_object_id_invalid() {
        let result = parse_object_id("not-an-object-id", "bad id");
        assert!(matches!(result, Err(AppError::BadRequestErr(msg)) if msg == "bad id"));
    }

    #[test]
    fn test_parse_object_id_valid() {
        let oid = ObjectId::new();
        let parsed = parse_object_id(&oid.to_hex(), "bad id").unwrap();
        assert_eq!(parsed, oid);
    }
}
