//! HTTP response handling and formatting

use crate::error::{Result, SubmitError};
use reqwest::StatusCode;

/// Line break marker the evaluation CGI puts between result lines
pub const LINE_BREAK_TAG: &str = "<br />";

/// Replace every literal `<br />` with a newline. Other spellings
/// (`<br>`, `<br/>`) are left untouched.
pub fn replace_line_breaks(body: &str) -> String {
    body.replace(LINE_BREAK_TAG, "\n")
}

/// Map a response status onto success or a rejection error carrying the
/// (already formatted) body.
pub fn classify_status(status: StatusCode, body: String) -> Result<String> {
    if status.is_success() {
        return Ok(body);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(SubmitError::AuthRejected { status, body })
        }
        s if s.is_server_error() => Err(SubmitError::ServerError { status, body }),
        _ => Err(SubmitError::RequestRejected { status, body }),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_status, replace_line_breaks};
    use crate::error::SubmitError;
    use reqwest::StatusCode;

    #[test]
    fn replace_line_breaks_handles_every_occurrence() {
        let text = replace_line_breaks("Result:<br />OK<br />Done");
        assert_eq!(text, "Result:\nOK\nDone");
        assert!(!text.contains("<br />"));
    }

    #[test]
    fn replace_line_breaks_is_single_complete_pass() {
        let inputs = [
            "<br /><br /><br />",
            "a<br /<br />>b",
            "<br /><br />x<br />",
            "",
        ];
        for input in inputs {
            let once = replace_line_breaks(input);
            assert_eq!(replace_line_breaks(&once), once, "input {:?}", input);
        }
        assert_eq!(replace_line_breaks("a<br /<br />>b"), "a<br /\n>b");
    }

    #[test]
    fn replace_line_breaks_passes_clean_text_through() {
        let raw = "P@10 0.3100\n<br>alpha-nDCG<br/> 0.41 <b>ok</b>";
        assert_eq!(replace_line_breaks(raw), raw);
    }

    #[test]
    fn classify_status_accepts_2xx() {
        let body = classify_status(StatusCode::OK, "ok".to_string()).expect("success");
        assert_eq!(body, "ok");
        assert!(classify_status(StatusCode::ACCEPTED, String::new()).is_ok());
    }

    #[test]
    fn classify_status_separates_rejections() {
        let err = classify_status(StatusCode::UNAUTHORIZED, "denied".to_string())
            .expect_err("401");
        assert!(matches!(err, SubmitError::AuthRejected { .. }));
        assert_eq!(err.body(), Some("denied"));

        let err = classify_status(StatusCode::FORBIDDEN, String::new()).expect_err("403");
        assert!(matches!(err, SubmitError::AuthRejected { .. }));

        let err = classify_status(StatusCode::NOT_FOUND, String::new()).expect_err("404");
        assert!(matches!(err, SubmitError::RequestRejected { .. }));

        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, String::new())
            .expect_err("500");
        assert!(matches!(err, SubmitError::ServerError { .. }));
    }
}
