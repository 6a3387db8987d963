use std::io::BufRead as _;

/// A numbered line of a JSON Lines file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonlLine {
    /// 1-based position of the line in the file
    pub number: usize,
    pub text: String,
}

/// Reads a JSON Lines file one line at a time, without holding more than the current line.
///
/// Decoding is left to the caller so that it can decide, per line, what a bad entry means.
pub struct JsonlReader<R> {
    lines: std::io::Lines<std::io::BufReader<R>>,
    number: usize,
}

impl<R> JsonlReader<R>
where
    R: std::io::Read,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: std::io::BufReader::new(reader).lines(),
            number: 0,
        }
    }
}

impl JsonlReader<std::fs::File> {
    /// Open the JSON Lines file at the given path.
    pub fn open<P>(path: P) -> std::io::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let file = std::fs::File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R> Iterator for JsonlReader<R>
where
    R: std::io::Read,
{
    type Item = std::io::Result<JsonlLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.number += 1;
        Some(line.map(|text| JsonlLine {
            number: self.number,
            text,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_numbered_from_one() {
        let input = "{\"a\":1}\n\n{\"b\":2}\r\n";
        let lines: Vec<JsonlLine> = JsonlReader::new(input.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            vec![
                JsonlLine {
                    number: 1,
                    text: "{\"a\":1}".to_string()
                },
                JsonlLine {
                    number: 2,
                    text: String::new()
                },
                JsonlLine {
                    number: 3,
                    text: "{\"b\":2}".to_string()
                },
            ],
            lines
        );
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let input: &[u8] = &[b'{', 0xff, b'}', b'\n'];
        let mut reader = JsonlReader::new(input);
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(JsonlReader::open("/this/path/does/not/exist.jsonl").is_err());
    }
}
