//! One-shot background file loading and saving
//!
//! Each worker runs at most one job at a time on its own thread and hands the
//! result back through a channel that the UI thread polls every frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Errors surfaced by file jobs
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0} is already in progress")]
    Busy(&'static str),
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} worker stopped before reporting a result")]
    WorkerLost(&'static str),
    #[error("Could not start {0} worker: {1}")]
    Spawn(&'static str, #[source] std::io::Error),
}

/// Work handed to a background thread
#[derive(Debug, Clone)]
pub enum FileJob {
    Load(PathBuf),
    Save {
        path: PathBuf,
        contents: String,
        /// Document revision the contents were taken at
        revision: u64,
        /// Which document the contents belong to
        generation: u64,
    },
}

/// Successful completion of a [`FileJob`]
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Loaded { path: PathBuf, contents: String },
    Saved {
        path: PathBuf,
        revision: u64,
        generation: u64,
    },
}

pub type FileResult = Result<FileOutcome, FileError>;

/// Background worker with a busy flag
#[derive(Debug)]
pub struct FileWorker {
    name: &'static str,
    pending: Option<Receiver<FileResult>>,
}

impl FileWorker {
    pub fn new(name: &'static str) -> Self {
        Self { name, pending: None }
    }

    /// Whether a job is in flight
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start `job` on a new thread. `notify` runs on that thread after the
    /// result has been sent.
    pub fn start<F>(&mut self, job: FileJob, notify: F) -> Result<(), FileError>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_busy() {
            return Err(FileError::Busy(self.name));
        }

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("{}-worker", self.name))
            .spawn(move || {
                let result = run_job(job);
                if tx.send(result).is_err() {
                    tracing::debug!("File job finished after its receiver was dropped");
                }
                notify();
            })
            .map_err(|e| FileError::Spawn(self.name, e))?;

        self.pending = Some(rx);
        Ok(())
    }

    /// Take the job result if it has arrived (non-blocking)
    pub fn poll(&mut self) -> Option<FileResult> {
        let rx = self.pending.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FileError::WorkerLost(self.name)),
        };
        self.pending = None;
        Some(result)
    }
}

fn run_job(job: FileJob) -> FileResult {
    match job {
        FileJob::Load(path) => {
            let contents = read_text(&path)?;
            tracing::info!("Loaded {} ({} bytes)", path.display(), contents.len());
            Ok(FileOutcome::Loaded { path, contents })
        }
        FileJob::Save {
            path,
            contents,
            revision,
            generation,
        } => {
            fs::write(&path, contents.as_bytes()).map_err(|source| FileError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Saved {} ({} bytes)", path.display(), contents.len());
            Ok(FileOutcome::Saved {
                path,
                revision,
                generation,
            })
        }
    }
}

/// Read a file as text, dropping a UTF-8 byte order mark and replacing
/// invalid sequences.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    Ok(String::from_utf8_lossy(body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait(worker: &mut FileWorker) -> FileResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = worker.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "worker did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_load_reports_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello\nworld").unwrap();

        let mut worker = FileWorker::new("Open");
        worker.start(FileJob::Load(path.clone()), || {}).unwrap();
        assert!(worker.is_busy());

        let outcome = wait(&mut worker).unwrap();
        assert_eq!(
            outcome,
            FileOutcome::Loaded {
                path,
                contents: "hello\nworld".to_string()
            }
        );
        assert!(!worker.is_busy());
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut worker = FileWorker::new("Save");
        let job = FileJob::Save {
            path: path.clone(),
            contents: "saved text".to_string(),
            revision: 7,
            generation: 2,
        };
        worker.start(job, || {}).unwrap();

        let outcome = wait(&mut worker).unwrap();
        assert_eq!(
            outcome,
            FileOutcome::Saved {
                path: path.clone(),
                revision: 7,
                generation: 2
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "saved text");
    }

    #[test]
    fn test_busy_worker_refuses_second_job() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();

        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let mut worker = FileWorker::new("Open");
        worker
            .start(FileJob::Load(path.clone()), move || {
                let _ = gate_rx.recv();
            })
            .unwrap();

        let err = worker.start(FileJob::Load(path), || {}).unwrap_err();
        assert!(matches!(err, FileError::Busy("Open")));

        gate_tx.send(()).unwrap();
        assert!(wait(&mut worker).is_ok());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = FileWorker::new("Open");
        worker
            .start(FileJob::Load(dir.path().join("missing.txt")), || {})
            .unwrap();

        let err = wait(&mut worker).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_notify_runs_after_result_is_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        let mut worker = FileWorker::new("Open");
        worker
            .start(FileJob::Load(path), move || {
                let _ = done_tx.send(());
            })
            .unwrap();

        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(worker.poll(), Some(Ok(FileOutcome::Loaded { .. }))));
    }

    #[test]
    fn test_read_text_strips_bom_and_replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, [0xEF, 0xBB, 0xBF, b'h', b'i', 0xFF]).unwrap();
        assert_eq!(read_text(&path).unwrap(), "hi\u{FFFD}");
    }
}
