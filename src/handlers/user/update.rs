use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::create::check_uniq_email;
use crate::database::AppDatabase;
use crate::{
    constants::*,
    models::{
        user::{MessageStatus, User},
        GenericResponse,
    },
    utils::{
        get_epoch_ts, next_birthday_notification, parse_object_id, validate_past_date,
        validate_timezone, AppError, ValidatedBody,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_past_date"))]
    birthday: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_timezone"))]
    location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub data: User,
}

/// Update user
///
/// Update firstName, lastName, email, birthday or location of an user.
/// The next notification time is recomputed and the message status reset
/// to PENDING so the dispatcher picks up the edited record again.
#[utoipa::path(
    put,
    path = "/api/v1/user/{id}",
    request_body = UpdateUserReq,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = StatusCode::OK, description = "Update successful", body = UpdateUserResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "User not found", body = GenericResponse)
    ),
    tag = "BirthdayBuzz User API"
)]
pub async fn update_user_handler(
    State(db): State<Arc<AppDatabase>>,
    Path(user_id): Path<String>,
    ValidatedBody(body): ValidatedBody<UpdateUserReq>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    // bad request if all params are none
    if body.first_name.is_none()
        && body.last_name.is_none()
        && body.email.is_none()
        && body.birthday.is_none()
        && body.location.is_none()
    {
        let err = "firstName/lastName/email/birthday/location is required";
        let err = AppError::BadRequestErr(err.into());
        return Err(err);
    }
    let oid = parse_object_id(&user_id, "not able to parse user id")?;
    let filter = doc! {"_id": oid};
    let user = db
        .find_one::<User>(DB_NAME, COLL_USERS, Some(filter.clone()), None)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    // check if email already exists in the DB for some other user
    if let Some(email) = &body.email {
        if email != &user.email {
            check_uniq_email(&db, email).await?;
        }
    }
    // recompute the notification time from the merged birthday and location
    let birthday = body.birthday.unwrap_or(user.birthday);
    let location = body.location.clone().unwrap_or_else(|| user.location.clone());
    let next = next_birthday_notification(birthday, &location)?;
    let status = MessageStatus::PENDING.to_bson()?;
    let ts = get_epoch_ts() as i64;
    let mut set_obj = doc! {
        "nextNotification": next.timestamp(),
        "messageStatus": status,
        "updatedTs": ts
    };
    if let Some(first_name) = &body.first_name {
        set_obj.insert("firstName", first_name);
    }
    if let Some(last_name) = &body.last_name {
        set_obj.insert("lastName", last_name);
    }
    if let Some(email) = &body.email {
        set_obj.insert("email", email);
    }
    if let Some(birthday) = &body.birthday {
        set_obj.insert("birthday", birthday.to_string());
    }
    if let Some(location) = &body.location {
        set_obj.insert("location", location);
    }
    let update = doc! {"$set": set_obj};
    let mut options = FindOneAndUpdateOptions::default();
    options.return_document = Some(ReturnDocument::After);
    let options = Some(options);
    let user = db
        .find_one_and_update::<User>(DB_NAME, COLL_USERS, filter, update, options)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let res = UpdateUserResponse {
        success: true,
        data: user,
    };
    Ok(Json(res))
}
