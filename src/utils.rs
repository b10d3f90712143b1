//! Pure helpers used by the demonstration routes.

use crate::response::MessageBody;

pub const HOME_MESSAGE: &str = "Welcome to the Flask App";

/// Checked sum; `None` on i64 overflow.
pub fn add_numbers(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b)
}

pub fn get_home_message() -> MessageBody {
    MessageBody {
        message: HOME_MESSAGE.to_string(),
    }
}
