use axum::{
    async_trait,
    extract::FromRequest,
    http::{Request, StatusCode},
    Json, RequestExt,
};
use chrono::{NaiveDate, Utc};
use validator::{Validate, ValidationError};

use crate::models::GenericResponse;

/// Custom validator function to check the birthday is not in the future
pub fn validate_past_date(date: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *date > today {
        let mut err = ValidationError::new("birthday");
        err.message = Some("Birthday cannot be a future date".into());
        return Err(err);
    }

    Ok(())
}

/// Custom validator function to check the location is a known IANA timezone
pub fn validate_timezone(location: &str) -> Result<(), ValidationError> {
    if location.parse::<chrono_tz::Tz>().is_err() {
        let mut err = ValidationError::new("location");
        err.message = Some(format!("Invalid timezone: {location}").into());
        return Err(err);
    }

    Ok(())
}

pub struct ValidatedBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedBody<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<(), B>,
{
    type Rejection = (StatusCode, Json<GenericResponse>);

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = req.extract::<Json<T>, _>().await.map_err(|_| {
            let response = GenericResponse {
                success: false,
                message: "Invalid JSON body".to_owned(),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(response))
        })?;
        data.validate().map_err(|err| {
            let response = GenericResponse {
                success: false,
                message: format!("Invalid JSON body: {err}"),
            };
            (StatusCode::BAD_REQUEST, Json(response))
        })?;
        Ok(Self(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_past_date() {
        let past = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        assert!(validate_past_date(&past).is_ok());
        let today = Utc::now().date_naive();
        assert!(validate_past_date(&today).is_ok());
        let future = today + chrono::Duration::days(2);
        assert!(validate_past_date(&future).is_err());
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("Asia/Jakarta").is_ok());
        assert!(validate_timezone("Australia/Melbourne").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("Mars/Olympus_Mons").is_err());
        assert!(validate_timezone("").is_err());
    }
}
