//! Handler for `strata locate`.

use crate::error::Error;
use crate::fs::FileSystem;
use crate::yaml::{parse_document, Position};
use std::path::Path;

/// Position of the node at `pointer` in the document at `file`.
/// A leading `#` on the pointer is ignored.
pub fn execute<F: FileSystem>(fs: &F, file: &Path, pointer: &str) -> Result<Position, Error> {
    let content = fs.read_to_string(file)?;
    let root = parse_document(&content, "")?;
    let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
    root.pointer(pointer)
        .map(|node| node.position())
        .ok_or_else(|| Error::invalid_document(format!("no node at '{pointer}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fs::OsFileSystem;
    use std::io::Write;

    fn document(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_locates_with_and_without_hash() {
        let file = document("openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      operationId: list\n");
        let position = execute(&OsFileSystem, file.path(), "/paths/~1pets/get/operationId").unwrap();
        assert_eq!(position, Position { line: 5, column: 20 });
        let position = execute(&OsFileSystem, file.path(), "#/paths/~1pets").unwrap();
        assert_eq!(position.line, 4);
    }

    #[test]
    fn test_missing_pointer_is_an_error() {
        let file = document("openapi: 3.0.0\n");
        let err = execute(&OsFileSystem, file.path(), "/info").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidDocument));
        assert!(err.to_string().contains("'/info'"));
    }
}
