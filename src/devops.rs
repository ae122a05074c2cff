//! DevOps command-center console and the maintenance progress meter.

use crate::content::{PipelineStage, MAINTENANCE_MILESTONES, MAINTENANCE_START, PIPELINE_STAGES};
use rand::Rng;

/// Seconds between revealed console lines.
pub const LINE_INTERVAL_SECONDS: f32 = 0.8;

/// Milliseconds between maintenance progress ticks.
pub const PROGRESS_TICK_MS: u32 = 200;

/// Largest random step a single progress tick may add.
pub const MAX_PROGRESS_STEP: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTone {
    Success,
    Info,
    Cloud,
    Alert,
    Plain,
}

impl LogTone {
    pub fn classify(line: &str) -> Self {
        if line.contains("[SUCCESS]") {
            Self::Success
        } else if line.contains("[INFO]") {
            Self::Info
        } else if line.contains("[AWS]") {
            Self::Cloud
        } else if line.contains("[ALERT]") {
            Self::Alert
        } else {
            Self::Plain
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#4ade80",
            Self::Info => "#60a5fa",
            Self::Cloud => "#f59e0b",
            Self::Alert => "#f472b6",
            Self::Plain => "#e5e7eb",
        }
    }
}

/// Active pipeline stage and how much of its log has been revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageConsole {
    active: usize,
    elapsed: f32,
}

impl StageConsole {
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn stage(&self) -> &'static PipelineStage {
        &PIPELINE_STAGES[self.active]
    }

    /// Switches stage and restarts the reveal. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= PIPELINE_STAGES.len() {
            return false;
        }
        self.active = index;
        self.elapsed = 0.0;
        true
    }

    pub fn advance(&mut self, seconds: f32) {
        self.elapsed += seconds.max(0.0);
    }

    pub fn visible(&self) -> &'static [&'static str] {
        let logs = self.stage().logs;
        let shown = (self.elapsed / LINE_INTERVAL_SECONDS).floor() as usize;
        &logs[..shown.min(logs.len())]
    }

    pub fn is_finished(&self) -> bool {
        self.visible().len() == self.stage().logs.len()
    }

    /// "Stage 01" style caption for the stage list.
    pub fn stage_label(index: usize) -> String {
        format!("Stage {:02}", index + 1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaintenanceProgress {
    percent: f32,
}

impl MaintenanceProgress {
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Whole percent shown next to the bar.
    pub fn display_percent(&self) -> u8 {
        self.percent.floor() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_complete() {
            return;
        }
        let step = rng.random_range(0.0..MAX_PROGRESS_STEP);
        self.advance_by(step);
    }

    pub fn advance_by(&mut self, step: f32) {
        self.percent = (self.percent + step.max(0.0)).min(100.0);
    }

    /// Message of the latest milestone reached so far.
    pub fn status(&self) -> &'static str {
        let reached = self.display_percent();
        MAINTENANCE_MILESTONES
            .iter()
            .rev()
            .find(|milestone| milestone.percent <= reached)
            .map_or(MAINTENANCE_START, |milestone| milestone.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn tones_follow_tags() {
        assert_eq!(LogTone::classify("[SUCCESS] Build completed"), LogTone::Success);
        assert_eq!(LogTone::classify("[INFO] Minifying"), LogTone::Info);
        assert_eq!(LogTone::classify("[AWS] Provisioning"), LogTone::Cloud);
        assert_eq!(LogTone::classify("[ALERT] Anomalies"), LogTone::Alert);
        assert_eq!(LogTone::classify("[LOGS] 200 OK"), LogTone::Plain);
        assert_eq!(LogTone::Plain.color(), "#e5e7eb");
    }

    #[test]
    fn console_reveals_a_line_per_interval_and_restarts_on_select() {
        let mut console = StageConsole::default();
        assert!(console.visible().is_empty());
        console.advance(0.79);
        assert!(console.visible().is_empty());
        console.advance(0.02);
        assert_eq!(console.visible(), &["> git add ."]);
        console.advance(60.0);
        assert!(console.is_finished());
        assert_eq!(console.visible().len(), 5);

        assert!(console.select(2));
        assert!(console.visible().is_empty());
        assert_eq!(console.stage().status, "TERRAFORM APPLY");
        assert!(!console.select(9));
        assert_eq!(console.active(), 2);
        assert_eq!(StageConsole::stage_label(0), "Stage 01");
    }

    #[test]
    fn status_tracks_latest_milestone() {
        let mut progress = MaintenanceProgress::default();
        assert_eq!(progress.status(), MAINTENANCE_START);
        progress.advance_by(12.4);
        assert_eq!(progress.status(), "Backing up databases...");
        progress.advance_by(40.0);
        assert_eq!(progress.display_percent(), 52);
        assert_eq!(progress.status(), "Updating security protocols...");
        progress.advance_by(500.0);
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.status(), "Rebooting systems...");
    }

    #[test]
    fn random_ticks_stay_bounded_and_finish() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut progress = MaintenanceProgress::default();
        let mut previous = 0.0;
        for _ in 0..1_000 {
            progress.tick(&mut rng);
            assert!(progress.percent() >= previous);
            assert!(progress.percent() - previous < MAX_PROGRESS_STEP);
            previous = progress.percent();
        }
        assert!(progress.is_complete());
    }
}
