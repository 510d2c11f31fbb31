use mongodb::{bson::doc, options::FindOptions};
use std::sync::Arc;

use super::dispatch::batch::send_messages_in_batches;
use crate::{
    constants::*,
    database::AppDatabase,
    models::user::{MessageStatus, User},
    utils::get_epoch_ts,
};

/// One primary sweep cycle: selects pending users whose notification time
/// falls inside the most recent window and hands them to the batch dispatcher.
pub async fn send_due_messages(db: &Arc<AppDatabase>) {
    let Ok(status) = MessageStatus::PENDING.to_bson() else {
        tracing::debug!("not able to convert MessageStatus to bson");
        return;
    };
    let now = get_epoch_ts() as i64;
    let window_start = now - NOTIFICATION_WINDOW_SECS as i64;
    let filter = doc! {
        "messageStatus": status,
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
            // store unavailable, skip this cycle, the next tick retries naturally
            tracing::error!("error in birthday notification sweep: {:?}", err);
            return;
        }
    };
    if users.is_empty() {
        return;
    }
    tracing::debug!("dispatching birthday messages to {} users", users.len());
    send_messages_in_batches(db, &users, MSG_KIND_BIRTHDAY).await;
}
