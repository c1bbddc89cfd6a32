//! Resident-memory guard shared by every strategy.
//!
//! Checking memory and allocating are not atomic, so the guard trips at
//! `limit - reserve` rather than at the limit itself. The reserve must be large
//! enough to absorb whatever one expansion step allocates after a passing check.

use std::cell::Cell;

use tracing::warn;

use crate::errors::ProbeError;

pub const DEFAULT_MEMORY_RESERVE_BYTES: u64 = 50_000_000;

const STATUS_PATH: &str = "/proc/self/status";
const STATM_PATH: &str = "/proc/self/statm";

/// Source of the process's current resident set size.
pub trait MemoryProbe {
    fn resident_bytes(&self) -> Result<u64, ProbeError>;
}

impl<F> MemoryProbe for F
where
    F: Fn() -> u64,
{
    fn resident_bytes(&self) -> Result<u64, ProbeError> {
        Ok(self())
    }
}

/// Resident set size of this process from procfs (Linux).
///
/// Reads `VmRSS` from `/proc/self/status`, which the kernel reports in kB
/// whatever the page size. With an explicit page size it reads the resident
/// page count from `/proc/self/statm` instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcRssProbe {
    page_size: Option<u64>,
}

impl ProcRssProbe {
    pub fn new() -> Self {
        Self { page_size: None }
    }

    pub fn with_page_size(page_size: u64) -> Self {
        Self { page_size: Some(page_size) }
    }
}

impl MemoryProbe for ProcRssProbe {
    fn resident_bytes(&self) -> Result<u64, ProbeError> {
        match self.page_size {
            None => {
                let content = read_proc(STATUS_PATH)?;
                let kib = parse_status_vm_rss_kib(&content)
                    .ok_or_else(|| ProbeError::Parse { path: STATUS_PATH, content: content.clone() })?;
                Ok(kib.saturating_mul(1024))
            }
            Some(page_size) => {
                let content = read_proc(STATM_PATH)?;
                let pages = parse_statm_resident(&content)
                    .ok_or_else(|| ProbeError::Parse { path: STATM_PATH, content: content.clone() })?;
                Ok(pages.saturating_mul(page_size))
            }
        }
    }
}

fn read_proc(path: &'static str) -> Result<String, ProbeError> {
    std::fs::read_to_string(path).map_err(|source| ProbeError::Io { path, source })
}

// status: one "Key:\tvalue" per line; "VmRSS:    1234 kB"
fn parse_status_vm_rss_kib(content: &str) -> Option<u64> {
    let line = content.lines().find_map(|l| l.strip_prefix("VmRSS:"))?;
    let mut parts = line.split_whitespace();
    let value = parts.next()?.parse().ok()?;
    match parts.next() {
        Some("kB") | None => Some(value),
        Some(_) => None,
    }
}

// statm: size resident shared text lib data dt (all in pages)
fn parse_statm_resident(content: &str) -> Option<u64> {
    content.split_whitespace().nth(1)?.parse().ok()
}

/// Reading that tripped the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trip {
    pub resident_bytes: u64,
    pub ceiling_bytes: u64,
}

/// Polling check of resident memory against `limit - reserve`.
pub struct MemoryGuard {
    probe: Option<Box<dyn MemoryProbe>>,
    ceiling_bytes: u64,
    polls: Cell<u64>,
    probe_failed: Cell<bool>,
}

impl MemoryGuard {
    pub fn new<P: MemoryProbe + 'static>(probe: P, limit_bytes: u64, reserve_bytes: u64) -> Self {
        Self {
            probe: Some(Box::new(probe)),
            ceiling_bytes: limit_bytes.saturating_sub(reserve_bytes),
            polls: Cell::new(0),
            probe_failed: Cell::new(false),
        }
    }

    /// A guard that never trips and never polls.
    pub fn unlimited() -> Self {
        Self { probe: None, ceiling_bytes: u64::MAX, polls: Cell::new(0), probe_failed: Cell::new(false) }
    }

    pub fn ceiling_bytes(&self) -> u64 {
        self.ceiling_bytes
    }

    /// Number of probe readings taken so far.
    pub fn polls(&self) -> u64 {
        self.polls.get()
    }

    /// Poll the probe once. Returns the reading when resident memory exceeds the ceiling.
    pub fn check(&self) -> Option<Trip> {
        let probe = self.probe.as_ref()?;
        self.polls.set(self.polls.get() + 1);
        match probe.resident_bytes() {
            Ok(resident_bytes) if resident_bytes > self.ceiling_bytes => {
                Some(Trip { resident_bytes, ceiling_bytes: self.ceiling_bytes })
            }
            Ok(_) => None,
            Err(err) => {
                if !self.probe_failed.replace(true) {
                    warn!(error = %err, "memory probe failed; guard disabled for this reading");
                }
                None
            }
        }
    }

    pub fn is_tripped(&self) -> bool {
        self.check().is_some()
    }
}

impl std::fmt::Debug for MemoryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGuard")
            .field("enabled", &self.probe.is_some())
            .field("ceiling_bytes", &self.ceiling_bytes)
            .field("polls", &self.polls.get())
            .finish()
    }
}
