use crate::constants::*;
use crate::models::user::User;

/// Generates the message text for a given message kind.
/// Unknown kinds produce an empty string, callers decide whether to send.
pub fn generate_message(user: &User, kind: &str) -> String {
    match kind {
        MSG_KIND_BIRTHDAY => format!(
            "Hey, {} {}, it’s your birthday",
            user.first_name, user.last_name
        ),
        MSG_KIND_ANNIVERSARY => format!(
            "Happy Anniversary, {} {}!",
            user.first_name, user.last_name
        ),
        _ => String::new(),
    }
}
