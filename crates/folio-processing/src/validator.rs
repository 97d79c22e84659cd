use folio_core::AppError;

/// Upload validation errors, checked before any I/O happens
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid title: {0}")]
    InvalidTitle(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            ValidationError::InvalidContentType { .. } => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            ValidationError::EmptyFile | ValidationError::InvalidTitle(_) => {
                AppError::ValidationFailed(err.to_string())
            }
        }
    }
}

const MAX_TITLE_CHARS: usize = 255;

/// Validator for uploaded photos
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Compare the declared content type against the allow-list, ignoring case
    /// and any parameters (`image/jpeg; charset=binary`).
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        if !self.allowed_content_types.iter().any(|ct| ct == &normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_title(&self, title: &str) -> Result<(), ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidTitle(
                "title must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::InvalidTitle(format!(
                "title must be at most {} characters",
                MAX_TITLE_CHARS
            )));
        }
        Ok(())
    }

    /// Run every upload check in order: size, content type, title.
    pub fn validate(
        &self,
        size: usize,
        content_type: &str,
        title: &str,
    ) -> Result<(), ValidationError> {
        self.validate_file_size(size)?;
        self.validate_content_type(content_type)?;
        self.validate_title(title)?;
        Ok(())
    }
}
