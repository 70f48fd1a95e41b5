//! Line reading for apt and dpkg text files.

use std::io::{self, BufRead};

/// Lines of a reader with the line ending stripped.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the read. Only real I/O errors are returned.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        LossyLines {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(bytes: &[u8]) -> Vec<String> {
        LossyLines::new(bytes).map(Result::unwrap).collect()
    }

    #[test]
    fn test_strips_line_endings() {
        assert_eq!(collect(b"a\nb\r\n\nc"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"Maintainer: Jos\xe9\nPackage: a\n");

        assert_eq!(lines[0], "Maintainer: Jos\u{fffd}");
        assert_eq!(lines[1], "Package: a");
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(b"").is_empty());
    }
}
