//! Line-oriented protocol with an external candidate solver.
//!
//! The candidate is spawned as a child process. It receives the puzzle on
//! stdin (one value per line), answers with an item count and that many
//! `ROW COL TYPE` lines on stdout, and may write freely to stderr, which is
//! drained to our own stderr. Every read goes through a channel fed by a
//! reader thread so a hung or silent solver trips a timeout instead of
//! blocking the grader forever.

use std::{
    fmt::Write as _,
    io::{self, BufRead, BufReader, Read, Write as _},
    process::{Child, Command, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::Duration,
};

use lumigrid_engine::Instance;
use lumigrid_evaluator::ReplayItem;

/// Protocol-tier failures. All of them are fatal: the run is aborted with
/// this error's message and the invalid sentinel score.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    #[display("failed to start solver process: {source}")]
    Spawn { source: io::Error },
    #[display("failed to send the puzzle to the solver: {source}")]
    SendRequest { source: io::Error },
    #[display("failed to read from the solver: {source}")]
    Read { source: io::Error },
    #[display("the solver produced no response within {seconds} seconds")]
    Timeout { seconds: u64 },
    #[display("the solver exited without completing its response")]
    Disconnected,
    #[display("the first response line must be the item count, got {line:?}")]
    BadItemCount { line: String },
    #[display("the response contained {count} items, more than the {max} board cells")]
    TooManyItems { count: usize, max: usize },
    #[display("item {index}: each response line must be formatted as \"ROW COL TYPE\"")]
    BadTokenCount { index: usize },
    #[display("item {index}: ROW and COL must be integers")]
    BadCoordinate { index: usize },
    #[display("item {index}: the item type must be a single character")]
    BadTypeToken { index: usize },
}

/// Runs one request/response exchange and returns the candidate's item list.
///
/// `exec` is split on whitespace into program and arguments. The child is
/// killed when this function returns, successful or not.
pub fn run_solver(
    exec: &str,
    instance: &Instance,
    timeout: Duration,
) -> Result<Vec<ReplayItem>, SolverError> {
    let mut child = spawn(exec)?;
    let result = exchange(&mut child.child, instance, timeout);
    drop(child);
    result
}

/// Renders the request: board height and rows, then costs and budgets, one
/// value per line. The width is implied by the row length.
fn render_request(instance: &Instance) -> String {
    let mut request = String::new();
    writeln!(request, "{}", instance.target.height()).unwrap();
    for row in instance.target.rows() {
        writeln!(request, "{row}").unwrap();
    }
    writeln!(request, "{}", instance.costs.lantern).unwrap();
    writeln!(request, "{}", instance.costs.mirror).unwrap();
    writeln!(request, "{}", instance.costs.obstacle).unwrap();
    writeln!(request, "{}", instance.budgets.max_mirrors).unwrap();
    writeln!(request, "{}", instance.budgets.max_obstacles).unwrap();
    request
}

fn parse_item_count(line: &str, max: usize) -> Result<usize, SolverError> {
    let count: usize = line
        .trim()
        .parse()
        .map_err(|_| SolverError::BadItemCount {
            line: line.to_owned(),
        })?;
    if count > max {
        return Err(SolverError::TooManyItems { count, max });
    }
    Ok(count)
}

/// Parses one `ROW COL TYPE` line. Exactly three space-separated tokens,
/// integer coordinates, single-character type; anything else is fatal.
pub fn parse_item_line(index: usize, line: &str) -> Result<ReplayItem, SolverError> {
    let tokens: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(' ').collect();
    let [row, col, kind] = tokens[..] else {
        return Err(SolverError::BadTokenCount { index });
    };
    let row: i32 = row
        .parse()
        .map_err(|_| SolverError::BadCoordinate { index })?;
    let col: i32 = col
        .parse()
        .map_err(|_| SolverError::BadCoordinate { index })?;
    let mut chars = kind.chars();
    let (Some(glyph), None) = (chars.next(), chars.next()) else {
        return Err(SolverError::BadTypeToken { index });
    };
    Ok(ReplayItem { row, col, glyph })
}

struct SolverProcess {
    child: Child,
}

impl Drop for SolverProcess {
    fn drop(&mut self) {
        // The solver may still be running (timeout path); reap it so it
        // cannot outlive the grader.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn(exec: &str) -> Result<SolverProcess, SolverError> {
    let mut tokens = exec.split_whitespace();
    let program = tokens.next().unwrap_or_default();
    let child = Command::new(program)
        .args(tokens)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| SolverError::Spawn { source })?;
    Ok(SolverProcess { child })
}

fn exchange(
    child: &mut Child,
    instance: &Instance,
    timeout: Duration,
) -> Result<Vec<ReplayItem>, SolverError> {
    let Some(mut stdin) = child.stdin.take() else {
        return Err(SolverError::Disconnected);
    };
    let Some(stdout) = child.stdout.take() else {
        return Err(SolverError::Disconnected);
    };
    if let Some(stderr) = child.stderr.take() {
        forward_stderr(stderr);
    }

    let lines = read_lines(stdout);
    stdin
        .write_all(render_request(instance).as_bytes())
        .and_then(|()| stdin.flush())
        .map_err(|source| SolverError::SendRequest { source })?;
    drop(stdin);

    let next_line = |lines: &Receiver<io::Result<String>>| -> Result<String, SolverError> {
        match lines.recv_timeout(timeout) {
            Ok(Ok(line)) => Ok(line),
            Ok(Err(source)) => Err(SolverError::Read { source }),
            Err(RecvTimeoutError::Timeout) => Err(SolverError::Timeout {
                seconds: timeout.as_secs(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::Disconnected),
        }
    };

    let max = instance.target.height() * instance.target.width();
    let count = parse_item_count(&next_line(&lines)?, max)?;
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        items.push(parse_item_line(index, &next_line(&lines)?)?);
    }
    Ok(items)
}

/// Feeds solver stdout lines into a channel so reads can be bounded with
/// `recv_timeout`. The thread ends when the solver closes its stdout.
fn read_lines<R: Read + Send + 'static>(reader: R) -> Receiver<io::Result<String>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Copies solver stderr through to our stderr, line-buffered.
fn forward_stderr<R: Read + Send + 'static>(reader: R) {
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            match line {
                Ok(line) => eprintln!("[solver] {line}"),
                Err(_) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use lumigrid_engine::{Budgets, CostModel, TargetGrid};

    use super::*;

    fn instance() -> Instance {
        Instance {
            target: TargetGrid::parse(&["..2", "X.."]).unwrap(),
            costs: CostModel {
                lantern: 7,
                mirror: 12,
                obstacle: 9,
            },
            budgets: Budgets {
                max_mirrors: 2,
                max_obstacles: 1,
            },
        }
    }

    #[test]
    fn test_render_request_wire_format() {
        assert_eq!(
            render_request(&instance()),
            "2\n..2\nX..\n7\n12\n9\n2\n1\n",
        );
    }

    #[test]
    fn test_parse_item_count() {
        assert_eq!(parse_item_count("3", 6).unwrap(), 3);
        assert_eq!(parse_item_count("0", 6).unwrap(), 0);
        assert!(matches!(
            parse_item_count("7", 6),
            Err(SolverError::TooManyItems { count: 7, max: 6 }),
        ));
        for line in ["", "x", "-1", "2 3"] {
            assert!(matches!(
                parse_item_count(line, 6),
                Err(SolverError::BadItemCount { .. }),
            ));
        }
    }

    #[test]
    fn test_parse_item_line() {
        assert_eq!(
            parse_item_line(0, "1 2 4").unwrap(),
            ReplayItem {
                row: 1,
                col: 2,
                glyph: '4',
            },
        );
        assert_eq!(
            parse_item_line(0, "0 0 \\").unwrap(),
            ReplayItem {
                row: 0,
                col: 0,
                glyph: '\\',
            },
        );
        // Negative coordinates parse here; the placement validator rejects
        // them as out of bounds.
        assert_eq!(parse_item_line(0, "-1 0 X").unwrap().row, -1);
    }

    #[test]
    fn test_parse_item_line_rejects_malformed() {
        assert!(matches!(
            parse_item_line(4, "1 2"),
            Err(SolverError::BadTokenCount { index: 4 }),
        ));
        assert!(matches!(
            parse_item_line(0, "1 2 X trailing"),
            Err(SolverError::BadTokenCount { index: 0 }),
        ));
        // Double space yields an empty token, which is a token-count error
        // per the strict single-space format.
        assert!(matches!(
            parse_item_line(0, "1  2 X"),
            Err(SolverError::BadTokenCount { index: 0 }),
        ));
        assert!(matches!(
            parse_item_line(1, "a 2 X"),
            Err(SolverError::BadCoordinate { index: 1 }),
        ));
        assert!(matches!(
            parse_item_line(2, "1 2 XX"),
            Err(SolverError::BadTypeToken { index: 2 }),
        ));
        assert!(matches!(
            parse_item_line(3, "1 2 "),
            Err(SolverError::BadTypeToken { index: 3 }),
        ));
    }
}
