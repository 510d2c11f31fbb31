use mongodb::{bson::doc, options::FindOptions};
use std::sync::Arc;

use super::dispatch::batch::send_messages_in_batches;
use crate::{
    constants::*,
    database::AppDatabase,
    models::user::{MessageStatus, User},
    utils::get_epoch_ts,
};

/// Daily recovery cycle: retries users left in failed or pending status whose
/// notification time fell inside the last day. Long-overdue records outside
/// the window are not picked up here.
pub async fn recover_unsent_messages(db: &Arc<AppDatabase>) {
    let (Ok(failed), Ok(pending)) = (
        MessageStatus::FAILED.to_bson(),
        MessageStatus::PENDING.to_bson(),
    ) else {
        tracing::debug!("not able to convert MessageStatus to bson");
        return;
    };
    let now = get_epoch_ts() as i64;
    let window_start = now - RECOVERY_WINDOW_SECS as i64;
    let filter = doc! {
        "messageStatus": {"$in": [failed, pending]},
        "nextNotification": {"$gte": window_start, "$lte": now},
    };
    let options = FindOptions::builder()
        .sort(Some(doc! {"nextNotification": 1}))
        .limit(Some(DEFAULT_QUERY_LIMIT as i64))
        .build();
    let users = match db
        .find::<User>(DB_NAME, COLL_USERS, Some(filter), Some(options))
        .await
    {
        Ok(users) => users,
        Err(err) => {
            tracing::error!("error in unsent message recovery sweep: {:?}", err);
            return;
        }
    };
    if users.is_empty() {
        return;
    }
    tracing::debug!("recovering unsent messages for {} users", users.len());
    send_messages_in_batches(db, &users, MSG_KIND_BIRTHDAY).await;
}
