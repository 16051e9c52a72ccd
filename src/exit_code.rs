use crate::error::SubmitError;

pub fn exit_code_for_error(err: &SubmitError) -> i32 {
    match err {
        SubmitError::InvalidUrl(_) => 3,
        SubmitError::Config(_) => 2,
        SubmitError::FileAccess { .. } => 37,
        SubmitError::Timeout => 28,
        SubmitError::AuthRejected { .. } => 67,
        SubmitError::RequestRejected { .. } | SubmitError::ServerError { .. } => 22,
        SubmitError::Ssl(message) => ssl_exit_code(message),
        SubmitError::Io(_) => 23,
        SubmitError::Transport(err) => transport_exit_code(err),
    }
}

fn transport_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_builder() {
        return 2;
    }
    56
}

fn ssl_exit_code(message: &str) -> i32 {
    let lower = message.to_ascii_lowercase();
    if lower.contains("ca certificate") {
        return 77;
    }
    35
}
