// ============================================================================
// VALIDATION - Input checks that run before any network call
// ============================================================================
// A failed check becomes a warning toast; controller state is left alone.
// ============================================================================

use thiserror::Error;

use crate::models::document::{file_extension, SelectedFile};
use crate::utils::constants::{
    ALLOWED_UPLOAD_EXTENSIONS, MIN_DOCUMENTS_FOR_STYLE_LEARNING, MIN_PASSWORD_LENGTH,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Carries the whole message so each field gets its own particle
    #[error("{0}")]
    Required(&'static str),

    #[error("파일을 선택해주세요.")]
    NoFileSelected,

    #[error("지원하지 않는 파일 형식입니다. (txt, docx, pdf만 가능)")]
    UnsupportedExtension { file_name: String },

    #[error("파일 크기는 {}MB 이하여야 합니다.", .max_bytes / (1024 * 1024))]
    FileTooLarge { size: u64, max_bytes: u64 },

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    #[error("비밀번호는 {min}자 이상이어야 합니다.")]
    PasswordTooShort { min: usize },

    #[error("참조 문서를 선택해주세요.")]
    NoReferenceDocument,

    #[error("문체 학습을 위해서는 최소 {required}개의 문서가 필요합니다.")]
    NotEnoughDocuments { available: usize, required: usize },

    #[error("문서를 먼저 선택해주세요.")]
    NoDocumentSelected,
}

pub fn require(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(message));
    }
    Ok(())
}

/// Extension allow-list (case-insensitive) and size ceiling
pub fn validate_upload(
    file: Option<&SelectedFile>,
    max_bytes: u64,
) -> Result<&SelectedFile, ValidationError> {
    let file = file.ok_or(ValidationError::NoFileSelected)?;
    validate_upload_meta(&file.name, file.size, max_bytes)?;
    Ok(file)
}

/// Same checks from the name and size alone, before any bytes are read
pub fn validate_upload_meta(name: &str, size: u64, max_bytes: u64) -> Result<(), ValidationError> {
    let allowed = file_extension(name)
        .map(|ext| ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(ValidationError::UnsupportedExtension {
            file_name: name.to_string(),
        });
    }

    if size > max_bytes {
        return Err(ValidationError::FileTooLarge { size, max_bytes });
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    require(email, "이메일을 입력해주세요.")?;
    require(password, "비밀번호를 입력해주세요.")
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    require(username, "사용자 이름을 입력해주세요.")?;
    require(email, "이메일을 입력해주세요.")?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_style_corpus(available: usize) -> Result<(), ValidationError> {
    if available < MIN_DOCUMENTS_FOR_STYLE_LEARNING {
        return Err(ValidationError::NotEnoughDocuments {
            available,
            required: MIN_DOCUMENTS_FOR_STYLE_LEARNING,
        });
    }
    Ok(())
}
