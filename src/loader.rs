//! Intro loader variants and the clocks that decide when each one is done.

/// Seconds the loader overlay takes to fade once it completes.
pub const FADE_OUT_SECONDS: f32 = 0.5;

/// Hard upper bound on how long any loader may hold the page.
pub const SAFETY_TIMEOUT_SECONDS: f32 = 15.0;

pub const TERMINAL_SOURCE: &str = "import React from 'react';\n\nconst Portfolio = () => {\n  return <DigitalTransformation />;\n};\n\nexport default Portfolio;";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoaderVariant {
    Terminal,
    Cloud,
    Constellation,
    Assembler,
    Globe,
    Architect,
    Kubernetes,
    Pipeline,
    Truck,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusStep {
    pub at: f32,
    pub text: &'static str,
}

const CLOUD_STATUS: [StatusStep; 3] = [
    StatusStep {
        at: 0.0,
        text: "ESTABLISHING SECURE CONNECTION...",
    },
    StatusStep {
        at: 1.5,
        text: "VERIFYING ENCRYPTION KEYS...",
    },
    StatusStep {
        at: 3.0,
        text: "ACCESS GRANTED",
    },
];

const CONSTELLATION_STATUS: [StatusStep; 3] = [
    StatusStep {
        at: 0.0,
        text: "MAPPING DIGITAL UNIVERSE...",
    },
    StatusStep {
        at: 1.5,
        text: "CONNECTING NODES...",
    },
    StatusStep {
        at: 3.0,
        text: "SYSTEM INITIALIZED",
    },
];

impl LoaderVariant {
    pub const ALL: [Self; 9] = [
        Self::Terminal,
        Self::Cloud,
        Self::Constellation,
        Self::Assembler,
        Self::Globe,
        Self::Architect,
        Self::Kubernetes,
        Self::Pipeline,
        Self::Truck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Terminal => "Cinematic Terminal",
            Self::Cloud => "Cloud Fortress",
            Self::Constellation => "Code Constellation",
            Self::Assembler => "Container Assembly",
            Self::Globe => "Global Uplink",
            Self::Architect => "Digital Architect",
            Self::Kubernetes => "Neon Helm",
            Self::Pipeline => "Infinite Pipeline",
            Self::Truck => "Delivery Truck",
        }
    }

    pub fn headline(self) -> Option<&'static str> {
        match self {
            Self::Assembler => Some("INITIALIZING SYSTEM"),
            Self::Globe => Some("Global Connectivity"),
            Self::Architect => Some("Architecting"),
            Self::Kubernetes => Some("KUBERNETES"),
            Self::Pipeline => Some("CI/CD PIPELINE"),
            Self::Truck => Some("DELIVERING UPDATES..."),
            Self::Terminal | Self::Cloud | Self::Constellation => None,
        }
    }

    pub fn caption(self) -> Option<&'static str> {
        match self {
            Self::Terminal => Some("TERMINAL ACCESS GRANTED"),
            Self::Assembler => Some("ORCHESTRATING CONTAINERS..."),
            Self::Globe => Some("ESTABLISHING SECURE UPLINK..."),
            Self::Architect => Some("TRANSFORMING DIGITAL LANDSCAPE..."),
            Self::Kubernetes => Some("Pods: INITIALIZING"),
            Self::Pipeline => Some("BUILDING... TESTING... DEPLOYING..."),
            Self::Cloud | Self::Constellation | Self::Truck => None,
        }
    }

    pub fn status_schedule(self) -> &'static [StatusStep] {
        match self {
            Self::Cloud => &CLOUD_STATUS,
            Self::Constellation => &CONSTELLATION_STATUS,
            _ => &[],
        }
    }

    /// Seconds after mount at which the variant finishes on its own.
    pub fn natural_completion(self) -> f32 {
        match self {
            Self::Terminal => Typewriter::terminal().completion(),
            Self::Cloud => 3.8,
            Self::Constellation => 4.0,
            Self::Assembler => 2.5,
            Self::Globe | Self::Architect | Self::Kubernetes | Self::Pipeline => 3.0,
            Self::Truck => 4.5,
        }
    }

    /// Whether the overlay offers a manual "enter" button.
    pub fn skippable(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

/// Types a fixed source text one character per tick behind a prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typewriter {
    source: &'static str,
    char_interval: f32,
    tail: f32,
}

impl Typewriter {
    pub const PROMPT: &'static str = "> ";
    pub const CARET: &'static str = "_";

    pub const fn new(source: &'static str, char_interval: f32, tail: f32) -> Self {
        Self {
            source,
            char_interval,
            tail,
        }
    }

    pub const fn terminal() -> Self {
        Self::new(TERMINAL_SOURCE, 0.03, 0.8)
    }

    fn len(&self) -> usize {
        self.source.chars().count()
    }

    pub fn typed_chars(&self, elapsed: f32) -> usize {
        if self.char_interval <= 0.0 {
            return self.len();
        }
        let ticks = (elapsed.max(0.0) / self.char_interval).floor() as usize;
        ticks.min(self.len())
    }

    /// Prompt, the typed prefix, then the caret.
    pub fn visible(&self, elapsed: f32) -> String {
        let typed: String = self.source.chars().take(self.typed_chars(elapsed)).collect();
        format!("{}{typed}{}", Self::PROMPT, Self::CARET)
    }

    /// Typing stops on the tick after the last character lands.
    pub fn typing_done_at(&self) -> f32 {
        (self.len() + 1) as f32 * self.char_interval
    }

    pub fn completion(&self) -> f32 {
        self.typing_done_at() + self.tail
    }
}

/// Tracks one loader run: status text and a completion that fires once.
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderClock {
    variant: LoaderVariant,
    natural: f32,
    auto_complete: bool,
    completed: bool,
}

impl LoaderClock {
    pub fn new(variant: LoaderVariant) -> Self {
        Self::with_natural(variant, variant.natural_completion())
    }

    /// A clock whose natural completion lands at `natural` seconds instead of
    /// the variant's own timing. The safety timeout still caps it.
    pub fn with_natural(variant: LoaderVariant, natural: f32) -> Self {
        Self {
            variant,
            natural,
            auto_complete: true,
            completed: false,
        }
    }

    /// A clock that never completes by itself and ignores the enter button;
    /// the review screen decides when it is done.
    pub fn manual(variant: LoaderVariant) -> Self {
        Self {
            auto_complete: false,
            ..Self::new(variant)
        }
    }

    pub fn variant(&self) -> LoaderVariant {
        self.variant
    }

    pub fn deadline(&self) -> f32 {
        self.natural.min(SAFETY_TIMEOUT_SECONDS)
    }

    pub fn status(&self, elapsed: f32) -> Option<&'static str> {
        self.variant
            .status_schedule()
            .iter()
            .rev()
            .find(|step| elapsed >= step.at)
            .map(|step| step.text)
    }

    /// Returns true exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, elapsed: f32) -> bool {
        if self.completed || !self.auto_complete || elapsed < self.deadline() {
            return false;
        }
        self.completed = true;
        log::info!(
            "loader {} completed after {elapsed:.2}s",
            self.variant.name()
        );
        true
    }

    /// Completes immediately; false if the run had already completed.
    pub fn skip(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        log::info!("loader {} skipped", self.variant.name());
        true
    }

    /// The "ENTER SYSTEM" button. Skips an automatic run; a manual run stays
    /// on screen.
    pub fn enter(&mut self) -> bool {
        self.auto_complete && self.skip()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

/// Review mode that flips between a handful of loader concepts.
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderSwitcher {
    variants: &'static [LoaderVariant],
    index: usize,
}

impl Default for LoaderSwitcher {
    fn default() -> Self {
        Self::new(&Self::REVIEW)
    }
}

impl LoaderSwitcher {
    pub const REVIEW: [LoaderVariant; 3] = [
        LoaderVariant::Terminal,
        LoaderVariant::Cloud,
        LoaderVariant::Constellation,
    ];

    pub fn new(variants: &'static [LoaderVariant]) -> Self {
        Self { variants, index: 0 }
    }

    pub fn current(&self) -> LoaderVariant {
        self.variants
            .get(self.index)
            .copied()
            .unwrap_or(LoaderVariant::Terminal)
    }

    pub fn next(&mut self) {
        if !self.variants.is_empty() {
            self.index = (self.index + 1) % self.variants.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.variants.is_empty() {
            self.index = (self.index + self.variants.len() - 1) % self.variants.len();
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} / {} : {}",
            self.index + 1,
            self.variants.len(),
            self.current().name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let typewriter = Typewriter::terminal();
        assert_eq!(typewriter.visible(0.0), "> _");
        assert_eq!(typewriter.visible(0.031), "> i_");
        assert_eq!(typewriter.visible(0.095), "> imp_");
        assert_eq!(
            typewriter.visible(100.0),
            format!("> {TERMINAL_SOURCE}_")
        );
    }

    #[test]
    fn terminal_completes_after_typing_plus_tail() {
        let typewriter = Typewriter::terminal();
        let expected = (TERMINAL_SOURCE.len() + 1) as f32 * 0.03 + 0.8;
        assert!((typewriter.completion() - expected).abs() < 1e-4);
        assert!(typewriter.completion() < SAFETY_TIMEOUT_SECONDS);
    }

    #[test]
    fn clock_fires_once_at_deadline() {
        let mut clock = LoaderClock::new(LoaderVariant::Cloud);
        assert!(!clock.poll(3.7));
        assert!(clock.poll(3.8));
        assert!(!clock.poll(10.0));
        assert!(clock.is_complete());
        assert!(!clock.skip());
    }

    #[test]
    fn skip_preempts_natural_completion() {
        let mut clock = LoaderClock::new(LoaderVariant::Terminal);
        assert!(clock.skip());
        assert!(!clock.poll(60.0));
    }

    #[test]
    fn manual_clock_never_auto_completes() {
        let mut clock = LoaderClock::manual(LoaderVariant::Globe);
        assert!(!clock.poll(120.0));
        assert!(clock.skip());
    }

    #[test]
    fn enter_button_is_inert_while_reviewing() {
        let mut clock = LoaderClock::manual(LoaderVariant::Terminal);
        assert!(!clock.enter());
        assert!(!clock.enter());
        assert!(!clock.is_complete());

        let mut clock = LoaderClock::new(LoaderVariant::Terminal);
        assert!(clock.enter());
        assert!(!clock.enter());
        assert!(clock.is_complete());
    }

    #[test]
    fn safety_timeout_caps_a_slow_run() {
        let mut clock = LoaderClock::with_natural(LoaderVariant::Terminal, 40.0);
        assert_eq!(clock.deadline(), SAFETY_TIMEOUT_SECONDS);
        assert!(!clock.poll(14.9));
        assert!(clock.poll(15.0));
        assert!(!clock.poll(40.0));
        assert!(!clock.skip());
    }

    #[test]
    fn status_follows_schedule() {
        let clock = LoaderClock::new(LoaderVariant::Constellation);
        assert_eq!(clock.status(0.0), Some("MAPPING DIGITAL UNIVERSE..."));
        assert_eq!(clock.status(1.6), Some("CONNECTING NODES..."));
        assert_eq!(clock.status(3.2), Some("SYSTEM INITIALIZED"));
        assert_eq!(LoaderClock::new(LoaderVariant::Globe).status(1.0), None);
    }

    #[test]
    fn every_variant_finishes_within_safety_timeout() {
        for variant in LoaderVariant::ALL {
            let clock = LoaderClock::new(variant);
            assert!(clock.deadline() <= SAFETY_TIMEOUT_SECONDS, "{variant:?}");
            assert!(clock.deadline() > 0.0);
        }
    }

    #[test]
    fn switcher_wraps_both_ways() {
        let mut switcher = LoaderSwitcher::default();
        assert_eq!(switcher.label(), "1 / 3 : Cinematic Terminal");
        switcher.prev();
        assert_eq!(switcher.current(), LoaderVariant::Constellation);
        switcher.next();
        switcher.next();
        assert_eq!(switcher.label(), "2 / 3 : Cloud Fortress");
    }
}
