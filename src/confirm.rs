use std::io::{self, BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// Confirmation strategies
// ---------------------------------------------------------------------------

/// Answers a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Always answers yes (`--force`).
pub struct AlwaysYes;

/// Always answers no (`--no-clobber`).
pub struct AlwaysNo;

impl Confirm for AlwaysYes {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

impl Confirm for AlwaysNo {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// Asks on `output` and reads answers from `input` until one is
/// recognised. End of input counts as "no".
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        writeln!(self.output, "{question} [y/n]")?;
        self.output.flush()?;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => {
                    writeln!(self.output, "Please respond with 'y' or 'n'.")?;
                    self.output.flush()?;
                }
            }
        }
    }
}

/// Interpret a yes/no answer, case-insensitively.
pub fn parse_answer(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Overwrite guard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Safe to write.
    Write,
    /// Target is a regular file and the overwrite was declined.
    Declined,
    /// Target exists but is not a regular file; never written.
    NotAFile,
}

/// Decide whether `path` may be written.
///
/// Only an existing regular file reaches `confirm`.
pub fn check_target(path: &Path, confirm: &mut dyn Confirm) -> io::Result<WriteDecision> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WriteDecision::Write),
        Err(e) => return Err(e),
    };
    if !meta.is_file() {
        return Ok(WriteDecision::NotAFile);
    }
    let question = format!("The file {} exists, do you wish to overwrite?", path.display());
    Ok(if confirm.confirm(&question)? {
        WriteDecision::Write
    } else {
        WriteDecision::Declined
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records whether it was asked.
    struct Spy {
        answer: bool,
        asked: usize,
    }

    impl Confirm for Spy {
        fn confirm(&mut self, _question: &str) -> io::Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    #[test]
    fn answers_are_parsed_like_strtobool() {
        for s in ["y", "Yes", "TRUE", "on", "1", " t\n"] {
            assert_eq!(parse_answer(s), Some(true), "{s}");
        }
        for s in ["n", "No", "false", "OFF", "0", "f"] {
            assert_eq!(parse_answer(s), Some(false), "{s}");
        }
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn prompt_repeats_until_answer() {
        let mut out = Vec::new();
        let answer = Prompt::new(&b"what\nyes\n"[..], &mut out)
            .confirm("Overwrite?")
            .unwrap();
        assert!(answer);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Overwrite? [y/n]\n"));
        assert!(text.contains("Please respond with 'y' or 'n'."));
    }

    #[test]
    fn prompt_end_of_input_is_no() {
        let mut out = Vec::new();
        assert!(!Prompt::new(&b""[..], &mut out).confirm("Overwrite?").unwrap());
    }

    #[test]
    fn missing_target_is_written_without_asking() {
        let dir = tempfile::tempdir().unwrap();
        let mut spy = Spy { answer: false, asked: 0 };
        let decision = check_target(&dir.path().join("out.png"), &mut spy).unwrap();
        assert_eq!(decision, WriteDecision::Write);
        assert_eq!(spy.asked, 0);
    }

    #[test]
    fn existing_file_asks_and_respects_answer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"old").unwrap();

        let mut spy = Spy { answer: false, asked: 0 };
        assert_eq!(check_target(&path, &mut spy).unwrap(), WriteDecision::Declined);
        assert_eq!(spy.asked, 1);

        let mut spy = Spy { answer: true, asked: 0 };
        assert_eq!(check_target(&path, &mut spy).unwrap(), WriteDecision::Write);
        assert_eq!(spy.asked, 1);
    }

    #[test]
    fn force_and_no_clobber_strategies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"old").unwrap();

        assert_eq!(check_target(&path, &mut AlwaysYes).unwrap(), WriteDecision::Write);
        assert_eq!(check_target(&path, &mut AlwaysNo).unwrap(), WriteDecision::Declined);
    }

    #[test]
    fn directory_target_is_refused_without_asking() {
        let dir = tempfile::tempdir().unwrap();
        let mut spy = Spy { answer: true, asked: 0 };
        assert_eq!(check_target(dir.path(), &mut spy).unwrap(), WriteDecision::NotAFile);
        assert_eq!(spy.asked, 0);
        assert_eq!(check_target(dir.path(), &mut AlwaysYes).unwrap(), WriteDecision::NotAFile);
    }
}
