use std::sync::Arc;

use super::send_message::send_message;
use crate::{constants::*, database::AppDatabase, models::user::User};

/// Sends messages to the given users in groups of `CONCURRENCY_LIMIT`.
/// Groups run in input order and a group fully finishes before the next one
/// starts, so at most one group's worth of deliveries is in flight at a time.
/// A failed delivery never aborts its siblings or later groups.
pub async fn send_messages_in_batches(db: &Arc<AppDatabase>, users: &[User], kind: &str) {
    for batch in users.chunks(CONCURRENCY_LIMIT) {
        let sends = batch.iter().map(|user| send_message(db, user, kind));
        let results = futures::future::join_all(sends).await;
        for (user, result) in batch.iter().zip(results) {
            if let Err(err) = result {
                tracing::error!("failed to send message to {}: {:?}", user.email, err);
            }
        }
    }
}
