//! Line classification
//!
//! Decides which simulated instruction a source line represents. Matching is
//! purely textual on the trimmed line; there is no lexer behind it.
//!
//! # Priority
//!
//! A line can match several patterns (`printf("return\n");`), so the checks run
//! in a fixed order:
//!
//! 1. [`Instruction::Fork`]: contains `fork()`
//! 2. [`Instruction::Terminate`]: contains `return` or starts with `}`, and the
//!    scope heuristic accepts it
//! 3. [`Instruction::Output`]: starts with `printf`
//! 4. [`Instruction::NoOp`]: everything else, including `getpid()`/`getppid()`

/// A simulated instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Fork,
    /// `printf` call; carries the first string literal, `None` if there isn't one
    Output(Option<String>),
    Terminate,
    NoOp,
}

/// Maps a source line to an [`Instruction`].
///
/// The engine only talks to this trait, so the scope handling can be swapped for a
/// block-depth tracker without touching the scheduler.
pub trait LineClassifier {
    fn classify(&self, lines: &[String], index: usize) -> Instruction;
}

/// Text-pattern classifier with the non-nesting scope heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl LineClassifier for HeuristicClassifier {
    fn classify(&self, lines: &[String], index: usize) -> Instruction {
        let Some(raw) = lines.get(index) else {
            return Instruction::NoOp;
        };
        let line = raw.trim();

        if line.contains("fork()") {
            Instruction::Fork
        } else if is_termination_pattern(line) && is_end_of_scope(lines, index) {
            Instruction::Terminate
        } else if line.starts_with("printf") {
            Instruction::Output(extract_format_spec(line))
        } else {
            Instruction::NoOp
        }
    }
}

fn is_termination_pattern(line: &str) -> bool {
    line.contains("return") || line.starts_with('}')
}

/// Whether a termination-looking line ends the process.
///
/// Accepts a line starting with `return`, a bare `}`, or the last line of the
/// source. Block depth is not tracked, so any bare `}` ends the process.
pub fn is_end_of_scope(lines: &[String], index: usize) -> bool {
    let line = lines.get(index).map(|l| l.trim()).unwrap_or_default();
    if line.starts_with("return") || line == "}" {
        return true;
    }
    index + 1 >= lines.len()
}

/// Pull the first string literal following `printf` out of a line.
///
/// Escape sequences are kept verbatim (`\n` stays two characters); the literal
/// ends at the next `"`. Returns `None` if the literal is missing or unterminated.
pub fn extract_format_spec(line: &str) -> Option<String> {
    let after_call = &line[line.find("printf")? + "printf".len()..];
    let open = after_call.find('"')?;
    let body = &after_call[open + 1..];
    let close = body.find('"')?;
    Some(body[..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    fn classify_at(src: &[&str], index: usize) -> Instruction {
        HeuristicClassifier.classify(&lines(src), index)
    }

    #[test]
    fn test_fork_detected_anywhere_on_line() {
        assert_eq!(classify_at(&["fork();"], 0), Instruction::Fork);
        assert_eq!(
            classify_at(&["    pid_t child_pid = fork();", "x;"], 0),
            Instruction::Fork
        );
    }

    #[test]
    fn test_fork_beats_return() {
        assert_eq!(classify_at(&["return fork();"], 0), Instruction::Fork);
    }

    #[test]
    fn test_printf_extracts_literal() {
        assert_eq!(
            classify_at(&[r#"printf("hi %d\n", getpid());"#, "x;"], 0),
            Instruction::Output(Some(r"hi %d\n".to_string()))
        );
    }

    #[test]
    fn test_printf_without_literal() {
        assert_eq!(
            classify_at(&["printf(msg);", "x;"], 0),
            Instruction::Output(None)
        );
        assert_eq!(
            classify_at(&[r#"printf("unterminated);"#, "x;"], 0),
            Instruction::Output(None)
        );
    }

    #[test]
    fn test_terminate_on_return_and_bare_brace() {
        let src = ["int main() {", "return 0;", "}", "x;"];
        assert_eq!(classify_at(&src, 1), Instruction::Terminate);
        assert_eq!(classify_at(&src, 2), Instruction::Terminate);
    }

    #[test]
    fn test_terminate_beats_printf_on_last_line() {
        let src = ["x;", r#"printf("return\n");"#];
        assert_eq!(classify_at(&src, 1), Instruction::Terminate);
    }

    #[test]
    fn test_rejected_terminate_falls_through() {
        // matches the pattern, but the heuristic says it's not the end of scope
        let src = ["} else {", "if (x) return;", r#"printf("no return\n");"#, "x;"];
        assert_eq!(classify_at(&src, 0), Instruction::NoOp);
        assert_eq!(classify_at(&src, 1), Instruction::NoOp);
        assert_eq!(
            classify_at(&src, 2),
            Instruction::Output(Some(r"no return\n".to_string()))
        );
    }

    #[test]
    fn test_last_line_brace_variant_terminates() {
        assert_eq!(classify_at(&["x;", "} // end"], 1), Instruction::Terminate);
    }

    #[test]
    fn test_informational_calls_are_noops() {
        assert_eq!(classify_at(&["int p = getpid();", "x;"], 0), Instruction::NoOp);
        assert_eq!(classify_at(&["int q = getppid();", "x;"], 0), Instruction::NoOp);
        assert_eq!(classify_at(&["", "x;"], 0), Instruction::NoOp);
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        assert_eq!(classify_at(&["fork();"], 5), Instruction::NoOp);
    }
}
