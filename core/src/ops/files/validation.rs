//! Name validation for new and renamed resources

use thiserror::Error;

/// Errors that can occur during name validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameValidationError {
	#[error("name cannot be empty")]
	Empty,

	#[error("name cannot contain path separators (/ or \\)")]
	ContainsPathSeparator,

	#[error("name cannot be '.' or '..'")]
	InvalidDotName,

	#[error("name contains a control character")]
	ControlCharacter,

	#[error("name exceeds maximum length of {0} bytes")]
	TooLong(usize),
}

/// Maximum name length the content server accepts
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate a folder or file name before it is sent to the content server
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
	if name.is_empty() {
		return Err(NameValidationError::Empty);
	}

	if name.contains('/') || name.contains('\\') {
		return Err(NameValidationError::ContainsPathSeparator);
	}

	if name == "." || name == ".." {
		return Err(NameValidationError::InvalidDotName);
	}

	if name.chars().any(char::is_control) {
		return Err(NameValidationError::ControlCharacter);
	}

	if name.len() > MAX_NAME_LENGTH {
		return Err(NameValidationError::TooLong(MAX_NAME_LENGTH));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_valid_names() {
		assert!(validate_name("program.sas").is_ok());
		assert!(validate_name("my flow.flw").is_ok());
		assert!(validate_name(".hidden").is_ok());
		assert!(validate_name("report-name_123").is_ok());
		assert!(validate_name("日本語ファイル.sas").is_ok());
	}

	#[test]
	fn test_empty_name() {
		assert_eq!(validate_name(""), Err(NameValidationError::Empty));
	}

	#[test]
	fn test_path_separators() {
		assert_eq!(
			validate_name("path/to/file"),
			Err(NameValidationError::ContainsPathSeparator)
		);
		assert_eq!(
			validate_name("path\\to\\file"),
			Err(NameValidationError::ContainsPathSeparator)
		);
	}

	#[test]
	fn test_dot_names() {
		assert_eq!(validate_name("."), Err(NameValidationError::InvalidDotName));
		assert_eq!(validate_name(".."), Err(NameValidationError::InvalidDotName));
	}

	#[test]
	fn test_control_characters() {
		assert_eq!(
			validate_name("tab\there"),
			Err(NameValidationError::ControlCharacter)
		);
	}

	#[test]
	fn test_surrounding_whitespace_is_allowed() {
		assert!(validate_name(" draft.sas").is_ok());
		assert!(validate_name("notes.sas ").is_ok());
	}

	#[test]
	fn test_too_long() {
		let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
		assert_eq!(
			validate_name(&long_name),
			Err(NameValidationError::TooLong(MAX_NAME_LENGTH))
		);
	}
}
