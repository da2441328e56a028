//! Classification of the backend's log output.
//!
//! Matching is plain substring search. Only the server-running marker moves
//! the readiness state; progress lines are forwarded to the loading view as
//! information. A single line can be both.

const SERVER_MARKER: &str = "Uvicorn";
const SERVER_RUNNING_WORD: &str = "running";
const PROGRESS_WORDS: [&str; 4] = ["加载", "完成", "Loading", "loaded"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "STDOUT",
            Self::Stderr => "STDERR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct LineClass {
    pub(crate) progress: bool,
    pub(crate) server_running: bool,
}

pub(crate) fn classify_backend_line(line: &str) -> LineClass {
    LineClass {
        progress: PROGRESS_WORDS.iter().any(|word| line.contains(word)),
        server_running: line.contains(SERVER_MARKER) && line.contains(SERVER_RUNNING_WORD),
    }
}

/// Splits a chunk read from a pipe into trimmed, non-empty lines.
pub(crate) fn split_output_lines(chunk: &str) -> impl Iterator<Item = &str> {
    chunk
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER_ONLY: LineClass = LineClass {
        progress: false,
        server_running: true,
    };
    const PROGRESS_ONLY: LineClass = LineClass {
        progress: true,
        server_running: false,
    };

    #[test]
    fn uvicorn_running_line_is_the_readiness_marker() {
        assert_eq!(
            classify_backend_line("INFO:     Uvicorn running on http://127.0.0.1:8088 (Press CTRL+C to quit)"),
            MARKER_ONLY
        );
    }

    #[test]
    fn marker_match_is_case_sensitive_and_needs_both_words() {
        for line in [
            "uvicorn running",
            "Uvicorn Running",
            "INFO: Started Uvicorn",
            "worker running",
        ] {
            assert_eq!(classify_backend_line(line), LineClass::default(), "{line}");
        }
    }

    #[test]
    fn marker_line_with_progress_words_is_both() {
        assert_eq!(
            classify_backend_line("加载完成, Uvicorn running"),
            LineClass {
                progress: true,
                server_running: true,
            }
        );
    }

    #[test]
    fn loading_vocabulary_is_progress() {
        assert_eq!(classify_backend_line("正在加载指标数据..."), PROGRESS_ONLY);
        assert_eq!(classify_backend_line("指标初始化完成"), PROGRESS_ONLY);
        assert_eq!(classify_backend_line("Loading indicators"), PROGRESS_ONLY);
        assert_eq!(classify_backend_line("GET /api/stock 200"), LineClass::default());
    }

    #[test]
    fn split_output_lines_trims_and_drops_blank_lines() {
        let lines: Vec<&str> = split_output_lines("  first \r\n\n second\r\n").collect();
        assert_eq!(lines, vec!["first", "second"]);
    }
}
