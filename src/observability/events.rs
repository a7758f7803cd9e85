//! Observable events for aerofilter
//!
//! Every log line emitted by the engines carries one of these as its
//! `event` field so that logs can be matched without parsing messages.

use std::fmt;

/// Observable compilation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registry
    /// Registry built and frozen
    RegistryBuilt,
    /// Engine configuration loaded from disk
    ConfigLoaded,

    // Filtering
    /// Composite predicate compiled
    FilterCompiled,
    /// Criterion skipped because its value is empty
    CriterionSkipped,
    /// Criterion skipped because its field is not registered
    UnknownFieldIgnored,

    // Sorting
    /// Ordering compiled
    SortCompiled,
    /// Sort criterion skipped because its field is not registered
    SortFieldIgnored,

    // Failures
    /// Compilation rejected the request
    CompileRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RegistryBuilt => "REGISTRY_BUILT",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::FilterCompiled => "FILTER_COMPILED",
            Event::CriterionSkipped => "CRITERION_SKIPPED",
            Event::UnknownFieldIgnored => "UNKNOWN_FIELD_IGNORED",
            Event::SortCompiled => "SORT_COMPILED",
            Event::SortFieldIgnored => "SORT_FIELD_IGNORED",
            Event::CompileRejected => "COMPILE_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
