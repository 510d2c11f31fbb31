use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::doc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::AppDatabase;
use crate::{
    constants::*,
    models::GenericResponse,
    utils::{parse_object_id, AppError},
};

/// Delete user
///
/// Deletes the user record, the scheduler simply stops selecting it
#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = StatusCode::OK, description = "Delete successful", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "User not found", body = GenericResponse)
    ),
    tag = "BirthdayBuzz User API"
)]
pub async fn delete_user_handler(
    State(db): State<Arc<AppDatabase>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let oid = parse_object_id(&user_id, "not able to parse user id")?;
    let filter = doc! {"_id": oid};
    let result = db.delete_one(DB_NAME, COLL_USERS, filter, None).await?;
    if result.deleted_count == 0 {
        let err = AppError::NotFound("User not found".into());
        return Err(err);
    }
    let res = json!({"success": true, "message": "User deleted successfully"});
    Ok(Json(res))
}
