//! Structured faults raised during a tick.
//!
//! Nothing in the tick path unwinds on a gameplay condition. Components
//! record a [`Fault`] instead; recording logs it once and keeps it for
//! inspection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// A packet's type has no entry in the subscription table.
    UnmappedEventType,
    /// A packet's type is known but nobody is subscribed right now.
    NoSubscribers,
    /// A turret was asked to fire with no rounds left, or while destroyed.
    OutOfAmmo,
    /// A click arrived while no turret could fire.
    NoArmedTurret,
    /// A spawn needed a city or turret to aim at and none was alive.
    MissingTarget,
    /// A timed event was scheduled with a negative delay.
    InvalidDelay,
    /// Level data could not be read or parsed.
    LevelLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl FaultKind {
    pub fn severity(&self) -> Severity {
        match self {
            FaultKind::NoSubscribers | FaultKind::NoArmedTurret => Severity::Warning,
            FaultKind::UnmappedEventType
            | FaultKind::OutOfAmmo
            | FaultKind::MissingTarget
            | FaultKind::InvalidDelay
            | FaultKind::LevelLoad => Severity::Error,
        }
    }
}

/// A recorded fault with a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    pub kind: FaultKind,
    pub message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Emit this fault through the `log` facade at its severity.
    pub fn log(&self) {
        match self.severity() {
            Severity::Warning => log::warn!("{self}"),
            Severity::Error => log::error!("{self}"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Accumulates faults for a run.
#[derive(Debug, Default, Clone)]
pub struct FaultLog {
    faults: Vec<Fault>,
}

impl FaultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `fault` and keep it.
    pub fn record(&mut self, fault: Fault) {
        fault.log();
        self.faults.push(fault);
    }

    /// Shorthand for `record(Fault::new(kind, message))`.
    pub fn raise(&mut self, kind: FaultKind, message: impl Into<String>) {
        self.record(Fault::new(kind, message));
    }

    /// Keep faults that were already logged elsewhere.
    pub fn extend_logged(&mut self, faults: impl IntoIterator<Item = Fault>) {
        self.faults.extend(faults);
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.faults.iter()
    }

    /// Number of recorded faults of `kind`.
    pub fn count(&self, kind: FaultKind) -> usize {
        self.faults.iter().filter(|f| f.kind == kind).count()
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }
}
