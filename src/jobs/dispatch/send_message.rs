use mongodb::bson::{doc, oid::ObjectId};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

use super::message::generate_message;
use super::retry::{AttemptOutcome, NextStep, RetryState, TerminalOutcome};
use crate::{
    constants::*,
    database::AppDatabase,
    models::user::{MessageStatus, User},
    utils::{email_service_url, get_epoch_ts, next_birthday_notification},
};

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    email: &'a str,
    message: &'a str,
}

/// Delivers one message to the user, driving the retry protocol to a terminal
/// outcome and persisting that outcome exactly once. Delivery failures are
/// absorbed here, only persistence failures surface to the dispatcher.
pub async fn send_message(db: &Arc<AppDatabase>, user: &User, kind: &str) -> anyhow::Result<()> {
    let message = generate_message(user, kind);
    let client = reqwest::Client::new();
    let url = email_service_url();
    let mut state = RetryState::new();
    loop {
        let outcome = attempt_send(&client, &url, &user.email, &message).await;
        match state.record(outcome) {
            NextStep::RetryAfter(delay) => {
                tracing::error!(
                    "error sending message to user {} (attempt {}), retrying in {}s",
                    user.email,
                    state.attempts(),
                    delay.as_secs()
                );
                sleep(delay).await;
            }
            NextStep::Terminal(terminal) => {
                return finalize_delivery(db, user, terminal).await;
            }
        }
    }
}

/// One outbound call, classified. This never errors, the classification is
/// the whole result.
pub async fn attempt_send(
    client: &reqwest::Client,
    url: &str,
    email: &str,
    message: &str,
) -> AttemptOutcome {
    let payload = SendMessagePayload { email, message };
    let result = client
        .post(url)
        .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
        .json(&payload)
        .send()
        .await;
    match result {
        Ok(res) => classify_status(res.status()),
        Err(err) => match err.status() {
            Some(status) if status.is_client_error() => AttemptOutcome::PermanentRejection,
            _ => AttemptOutcome::TransientError,
        },
    }
}

// success is exactly 200, a 4xx is a permanent rejection, everything else
// (5xx, unexpected 2xx/3xx) counts as transient
fn classify_status(status: reqwest::StatusCode) -> AttemptOutcome {
    if status == reqwest::StatusCode::OK {
        AttemptOutcome::Delivered
    } else if status.is_client_error() {
        AttemptOutcome::PermanentRejection
    } else {
        AttemptOutcome::TransientError
    }
}

/// The single persistence write for a finished delivery
async fn finalize_delivery(
    db: &Arc<AppDatabase>,
    user: &User,
    terminal: TerminalOutcome,
) -> anyhow::Result<()> {
    let id = user
        ._id
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("user record without _id"))?;
    let oid = ObjectId::parse_str(id)?;
    let ts = get_epoch_ts() as i64;
    let update = match terminal {
        TerminalOutcome::Sent => {
            let next = next_birthday_notification(user.birthday, &user.location)?;
            tracing::info!("message sent successfully to user {}", user.email);
            // the record cycles back to pending for next year's occurrence
            let status = MessageStatus::PENDING.to_bson()?;
            doc! {"$set": {
                "messageStatus": status,
                "nextNotification": next.timestamp(),
                "updatedTs": ts
            }}
        }
        TerminalOutcome::FailedPermanent => {
            tracing::error!("permanent failure sending message to user {}", user.email);
            let status = MessageStatus::FAILED_PERMANENT.to_bson()?;
            doc! {"$set": {"messageStatus": status, "updatedTs": ts}}
        }
        TerminalOutcome::Failed => {
            tracing::error!(
                "failed to send message to user {} after {} attempts",
                user.email,
                MAX_SEND_ATTEMPTS
            );
            let status = MessageStatus::FAILED.to_bson()?;
            doc! {"$set": {"messageStatus": status, "updatedTs": ts}}
        }
    };
    db.update_one(DB_NAME, COLL_USERS, doc! {"_id": oid}, update, None)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Router};
    use std::net::SocketAddr;

    use super::*;

    async fn serve_status(status: StatusCode) -> String {
        let app = Router::new().route("/send-email", post(move || async move { status }));
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let server = axum::Server::bind(&addr).serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{addr}/send-email")
    }

    #[tokio::test]
    async fn test_attempt_send_200_is_delivered() {
        let url = serve_status(StatusCode::OK).await;
        let client = reqwest::Client::new();
        let outcome = attempt_send(&client, &url, "test.user@gmail.com", "hello").await;
        assert_eq!(outcome, AttemptOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_attempt_send_404_is_permanent() {
        let url = serve_status(StatusCode::NOT_FOUND).await;
        let client = reqwest::Client::new();
        let outcome = attempt_send(&client, &url, "test.user@gmail.com", "hello").await;
        assert_eq!(outcome, AttemptOutcome::PermanentRejection);
    }

    #[tokio::test]
    async fn test_attempt_send_500_is_transient() {
        let url = serve_status(StatusCode::INTERNAL_SERVER_ERROR).await;
        let client = reqwest::Client::new();
        let outcome = attempt_send(&client, &url, "test.user@gmail.com", "hello").await;
        assert_eq!(outcome, AttemptOutcome::TransientError);
    }

    #[tokio::test]
    async fn test_attempt_send_unreachable_is_transient() {
        let client = reqwest::Client::new();
        let outcome =
            attempt_send(&client, "http://127.0.0.1:1/send-email", "a@b.com", "hello").await;
        assert_eq!(outcome, AttemptOutcome::TransientError);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::OK), AttemptOutcome::Delivered);
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            AttemptOutcome::PermanentRejection
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            AttemptOutcome::PermanentRejection
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            AttemptOutcome::TransientError
        );
        // only an exact 200 counts as success
        assert_eq!(
            classify_status(StatusCode::CREATED),
            AttemptOutcome::TransientError
        );
    }
}
