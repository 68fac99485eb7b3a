use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflinksError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Image error: {0}")]
    Image(Box<image::ImageError>),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Set your API key first.")]
    MissingApiKey,

    #[error("Please verify the website first!")]
    WebsiteNotVerified,

    #[error("Could not find matching row in CSV for save!")]
    RowNotFound,

    #[error("{0}")]
    Custom(String),
}

impl From<std::io::Error> for ReflinksError {
    fn from(error: std::io::Error) -> Self {
        ReflinksError::Io(Box::new(error))
    }
}

impl From<csv::Error> for ReflinksError {
    fn from(error: csv::Error) -> Self {
        ReflinksError::Csv(Box::new(error))
    }
}

impl From<reqwest::Error> for ReflinksError {
    fn from(error: reqwest::Error) -> Self {
        ReflinksError::Reqwest(Box::new(error))
    }
}

impl From<image::ImageError> for ReflinksError {
    fn from(error: image::ImageError) -> Self {
        ReflinksError::Image(Box::new(error))
    }
}
