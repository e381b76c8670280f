use lobby_derive::lobby_error;
use std::borrow::Cow;

#[lobby_error]
pub enum UploadError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected upload{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<Vec<u8>, UploadError> {
    let data = std::fs::read("/definitely/not/here").context("Reading upload")?;
    Ok(data)
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.context_note(), Some("Reading upload"));
    assert!(err.to_string().contains("(Reading upload)"));

    let internal: UploadError = "boom".into();
    assert!(internal.context_note().is_none());

    let rejected: Result<(), UploadError> =
        Err(UploadError::Rejected { message: "bad extension".into(), context: None });
    let rejected = rejected.context("Validating file").unwrap_err();
    assert_eq!(rejected.to_string(), "Rejected upload (Validating file): bad extension");
}
