use std::path::Path;

pub mod error;

/// Last component of `path` as an owned string, used to name the remote
/// counterpart of a local file or directory.
///
/// Falls back to the whole path when there is no final component (e.g. `/` or `..`).
pub fn display_name(path: impl AsRef<Path>) -> String {
	let path = path.as_ref();
	path.file_name().map_or_else(
		|| path.to_string_lossy().into_owned(),
		|name| name.to_string_lossy().into_owned(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_name_uses_last_component() {
		assert_eq!(display_name("/tmp/reports/q1.sas"), "q1.sas");
		assert_eq!(display_name("reports/"), "reports");
		assert_eq!(display_name("/"), "/");
	}
}
