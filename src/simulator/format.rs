//! `printf` rendering for simulated output
//!
//! Only `%d` is understood, and its value is chosen by looking at the *whole*
//! source line rather than the argument list:
//!
//! | line mentions | `%d` becomes                       |
//! |---------------|------------------------------------|
//! | `getpid()`    | the process's PID                  |
//! | `getppid()`   | the process's PPID                 |
//! | `child_pid`   | the last `fork()` return, if any   |
//! | otherwise     | `?`                                |
//!
//! Only the literal variable name `child_pid` is recognised for fork results.

use crate::process::ProcessRecord;

/// Shown in place of output when the `printf` literal could not be extracted
pub const PRINTF_PARSE_ERROR: &str = "Error parsing printf";

/// Substituted for a `%d` that can't be resolved
pub const UNRESOLVED_PLACEHOLDER: char = '?';

/// Render one `printf` line as `process` would print it.
///
/// `format_spec` is the literal pulled out by the classifier; `line` is the full
/// source line, used to pick the substitution for `%d`.
pub fn render(format_spec: Option<&str>, line: &str, process: &ProcessRecord) -> String {
    let Some(spec) = format_spec else {
        return PRINTF_PARSE_ERROR.to_string();
    };

    let text = spec.replace("\\n", "\n");
    let substitution = placeholder_value(line, process);
    text.replace("%d", &substitution).trim().to_string()
}

fn placeholder_value(line: &str, process: &ProcessRecord) -> String {
    if line.contains("getpid()") {
        process.pid.to_string()
    } else if line.contains("getppid()") {
        process.ppid.to_string()
    } else if let Some(ret) = process
        .last_fork_return
        .filter(|_| line.contains("child_pid"))
    {
        ret.to_string()
    } else {
        UNRESOLVED_PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc_with(pid: u32, ppid: u32, fork_ret: Option<u32>) -> ProcessRecord {
        let mut p = ProcessRecord::root(pid);
        p.ppid = ppid;
        p.last_fork_return = fork_ret;
        p
    }

    #[test]
    fn test_plain_text_trimmed() {
        let p = proc_with(1, 0, None);
        assert_eq!(render(Some(r"  hi\n"), r#"printf("  hi\n");"#, &p), "hi");
    }

    #[test]
    fn test_interior_newline_kept() {
        let p = proc_with(1, 0, None);
        assert_eq!(
            render(Some(r"a\nb\n"), r#"printf("a\nb\n");"#, &p),
            "a\nb"
        );
    }

    #[test]
    fn test_getpid_and_getppid() {
        let p = proc_with(4, 2, None);
        assert_eq!(
            render(Some(r"me=%d\n"), r#"printf("me=%d\n", getpid());"#, &p),
            "me=4"
        );
        assert_eq!(
            render(Some(r"parent=%d\n"), r#"printf("parent=%d\n", getppid());"#, &p),
            "parent=2"
        );
    }

    #[test]
    fn test_getpid_wins_over_getppid() {
        let p = proc_with(4, 2, None);
        let line = r#"printf("%d %d\n", getpid(), getppid());"#;
        assert_eq!(render(Some(r"%d %d\n"), line, &p), "4 4");
    }

    #[test]
    fn test_child_pid_uses_fork_return() {
        let line = r#"printf("child=%d\n", child_pid);"#;
        assert_eq!(render(Some(r"child=%d\n"), line, &proc_with(1, 0, Some(2))), "child=2");
        assert_eq!(render(Some(r"child=%d\n"), line, &proc_with(2, 1, Some(0))), "child=0");
        assert_eq!(render(Some(r"child=%d\n"), line, &proc_with(1, 0, None)), "child=?");
    }

    #[test]
    fn test_other_variable_unresolved() {
        let p = proc_with(1, 0, Some(3));
        let line = r#"printf("pid=%d\n", pid);"#;
        assert_eq!(render(Some(r"pid=%d\n"), line, &p), "pid=?");
    }

    #[test]
    fn test_missing_literal_reports_error() {
        let p = proc_with(1, 0, None);
        assert_eq!(render(None, "printf(msg);", &p), PRINTF_PARSE_ERROR);
    }
}
