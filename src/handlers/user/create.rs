use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::database::AppDatabase;
use crate::{
    constants::*,
    models::{
        user::{MessageStatus, User},
        GenericResponse,
    },
    utils::{
        get_epoch_ts, next_birthday_notification, validate_past_date, validate_timezone, AppError,
        ValidatedBody,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    #[validate(length(min = 1, max = 50))]
    first_name: String,

    #[validate(length(min = 1, max = 50))]
    last_name: String,

    #[validate(email)]
    email: String,

    #[validate(custom(function = "validate_past_date"))]
    birthday: NaiveDate,

    #[validate(custom(function = "validate_timezone"))]
    location: String,
}

impl CreateUserReq {
    fn create_user(&self) -> anyhow::Result<User> {
        let next = next_birthday_notification(self.birthday, &self.location)?;
        let mut user = User::default();
        user.first_name = self.first_name.to_owned();
        user.last_name = self.last_name.to_owned();
        user.email = self.email.to_owned();
        user.birthday = self.birthday;
        user.location = self.location.to_owned();
        user.next_notification = next.timestamp() as u64;
        user.message_status = MessageStatus::PENDING;
        user.created_ts = Some(get_epoch_ts());
        Ok(user)
    }
}

/// Create user
///
/// Creates an user with a freshly computed next notification time
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserReq,
    responses(
        (status = StatusCode::CREATED, description = "User created", body = GenericResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse)
    ),
    tag = "BirthdayBuzz User API"
)]
pub async fn create_user_handler(
    State(db): State<Arc<AppDatabase>>,
    ValidatedBody(body): ValidatedBody<CreateUserReq>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    // check if email already exists in the DB
    check_uniq_email(&db, body.email.as_str()).await?;
    let user = body.create_user()?;
    db.insert_one::<User>(DB_NAME, COLL_USERS, &user, None)
        .await?;
    // return successful response
    let response = (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "User created"})),
    );
    Ok(response)
}

/// check if the given email already exists in the users collection
pub async fn check_uniq_email(db: &Arc<AppDatabase>, email: &str) -> Result<(), AppError> {
    let filter = Some(doc! {"email": email});
    let result = db
        .find_one::<Document>(DB_NAME, COLL_USERS, filter, None)
        .await?;
    if result.is_some() {
        let err = format!("User already exists with same email: {}", email);
        let err = AppError::BadRequestErr(err);
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_from_req() {
        let body = CreateUserReq {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test.user@gmail.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            location: "Asia/Jakarta".to_string(),
        };
        let user = body.create_user().unwrap();
        assert_eq!(user._id, None);
        assert_eq!(user.message_status, MessageStatus::PENDING);
        assert_eq!(user.birthday, body.birthday);
        assert!(user.next_notification > get_epoch_ts());
        assert!(user.created_ts.is_some());
        assert_eq!(user.updated_ts, None);
    }

    #[test]
    fn test_create_user_invalid_location_errors() {
        let body = CreateUserReq {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test.user@gmail.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            location: "Nowhere/Land".to_string(),
        };
        assert!(body.create_user().is_err());
    }
}
