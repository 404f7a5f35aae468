//! Media picker state: current selection and simulated upload progress.
//!
//! The picker component only forwards DOM events here; everything it emits
//! to its parent comes out of [`MediaSelection`].

use crate::config::{MAX_PHOTO_SIZE, UPLOAD_PROGRESS_STEP};

/// Upload progress in percent; `None` while no file is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadProgress(Option<u8>);

impl UploadProgress {
    pub fn percent(&self) -> Option<u8> {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == Some(100)
    }

    /// Restarts from 0 %.
    pub fn start(&mut self) {
        self.0 = Some(0);
    }

    /// Advances one step, capped at 100. Returns `true` once complete.
    pub fn tick(&mut self) -> bool {
        let next = self
            .0
            .unwrap_or(0)
            .saturating_add(UPLOAD_PROGRESS_STEP)
            .min(100);
        self.0 = Some(next);
        next >= 100
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// One simulated upload, superseded by the next select or clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadRun(u64);

/// Result of advancing an upload run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Running,
    Done,
    /// The run was superseded; stop ticking.
    Cancelled,
}

/// Outcome of a file pick. `Accepted` carries the file back untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<F> {
    Accepted { file: F, run: UploadRun },
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaSelection {
    name: Option<String>,
    error: Option<String>,
    progress: UploadProgress,
    run: u64,
    max_size: f64,
}

impl Default for MediaSelection {
    fn default() -> Self {
        Self::new(MAX_PHOTO_SIZE)
    }
}

impl MediaSelection {
    pub fn new(max_size: f64) -> Self {
        Self {
            name: None,
            error: None,
            progress: UploadProgress::default(),
            run: 0,
            max_size,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    /// Takes a picked file. Oversized files are refused and the current
    /// selection is left as it was.
    pub fn select<F>(&mut self, file: F, name: &str, size: f64) -> Selection<F> {
        if size > self.max_size {
            let message = format!(
                "{} is too large ({:.1} MB, max {:.0} MB)",
                name,
                size / 1024.0 / 1024.0,
                self.max_size / 1024.0 / 1024.0
            );
            self.error = Some(message.clone());
            return Selection::Rejected(message);
        }

        self.run += 1;
        self.name = Some(name.to_string());
        self.error = None;
        self.progress.start();
        Selection::Accepted {
            file,
            run: UploadRun(self.run),
        }
    }

    /// Drops the selection and stops any running upload. Returns what the
    /// parent receives: always `None`.
    pub fn clear<F>(&mut self) -> Option<F> {
        self.run += 1;
        self.name = None;
        self.error = None;
        self.progress.clear();
        None
    }

    pub fn tick(&mut self, run: UploadRun) -> Tick {
        if run.0 != self.run {
            return Tick::Cancelled;
        }
        if self.progress.tick() {
            Tick::Done
        } else {
            Tick::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_runs_to_completion() {
        let mut progress = UploadProgress::default();
        assert_eq!(progress.percent(), None);

        progress.start();
        assert_eq!(progress.percent(), Some(0));

        let mut ticks = 0;
        while !progress.tick() {
            ticks += 1;
            assert!(ticks < 20, "progress never completed");
        }
        assert_eq!(ticks + 1, 10);
        assert!(progress.is_complete());

        // further ticks stay capped
        assert!(progress.tick());
        assert_eq!(progress.percent(), Some(100));
    }

    #[test]
    fn test_clear_resets_to_none() {
        let mut progress = UploadProgress::default();
        progress.start();
        progress.tick();
        progress.tick();
        assert_eq!(progress.percent(), Some(20));

        progress.clear();
        assert_eq!(progress.percent(), None);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_tick_without_start_begins_at_zero() {
        let mut progress = UploadProgress::default();
        assert!(!progress.tick());
        assert_eq!(progress.percent(), Some(10));
    }

    // JPEG magic bytes stand in for a browser `File`
    fn photo() -> Vec<u8> {
        vec![0xff, 0xd8, 0xff]
    }

    #[test]
    fn test_select_hands_file_back_unchanged() {
        let mut media = MediaSelection::new(1024.0);

        let Selection::Accepted { file, .. } = media.select(photo(), "ganesha.jpg", 3.0) else {
            panic!("small file rejected");
        };
        assert_eq!(file, photo());
        assert_eq!(media.name(), Some("ganesha.jpg"));
        assert_eq!(media.progress().percent(), Some(0));
    }

    #[test]
    fn test_clear_emits_none_and_resets_progress() {
        let mut media = MediaSelection::new(1024.0);
        let Selection::Accepted { run, .. } = media.select(photo(), "ganesha.jpg", 3.0) else {
            panic!("small file rejected");
        };
        media.tick(run);
        media.tick(run);

        assert_eq!(media.clear::<Vec<u8>>(), None);
        assert_eq!(media.name(), None);
        assert_eq!(media.progress().percent(), None);
        assert_eq!(media.tick(run), Tick::Cancelled);
        assert_eq!(media.progress().percent(), None);
    }

    #[test]
    fn test_new_selection_cancels_previous_run() {
        let mut media = MediaSelection::new(1024.0);
        let Selection::Accepted { run: first, .. } = media.select(photo(), "a.jpg", 3.0) else {
            panic!("small file rejected");
        };
        media.tick(first);

        let Selection::Accepted { run: second, .. } = media.select(photo(), "b.jpg", 3.0) else {
            panic!("small file rejected");
        };
        assert_eq!(media.progress().percent(), Some(0));
        assert_eq!(media.tick(first), Tick::Cancelled);
        assert_eq!(media.progress().percent(), Some(0));

        let mut ticks = 1;
        while media.tick(second) == Tick::Running {
            ticks += 1;
        }
        assert_eq!(ticks, 10);
        assert!(media.progress().is_complete());
        assert_eq!(media.name(), Some("b.jpg"));
    }

    #[test]
    fn test_oversized_file_is_not_emitted() {
        let mut media = MediaSelection::new(1024.0 * 1024.0);
        let Selection::Accepted { .. } = media.select(photo(), "small.jpg", 10.0) else {
            panic!("small file rejected");
        };

        let outcome = media.select(photo(), "huge.tif", 5.0 * 1024.0 * 1024.0);
        let Selection::Rejected(message) = outcome else {
            panic!("oversized file accepted");
        };
        assert!(message.contains("huge.tif"));
        assert_eq!(media.error(), Some(message.as_str()));
        assert_eq!(media.name(), Some("small.jpg"));
    }
}
