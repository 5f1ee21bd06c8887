//! Countdown state machine for the OTP verification session
//!
//! A verification session tracks two independent countdowns from issuance
//! time: the resend cooldown and the code expiry window. The pure state
//! machine lives in [`OtpTimerState`]; [`CountdownSession`] owns the two
//! 1-second interval tasks that drive it and releases them deterministically
//! when the session is verified or dropped.
//!
//! The timers are advisory: expiry here only changes what is displayed, while
//! the authoritative accept/reject decision stays with the verification
//! endpoint.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::DomainResult;
use ss_shared::config::OtpConfig;

use super::types::IssueOtpResult;

/// Tick interval for both countdowns
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Display phase of a verification session
///
/// A session only exists once a code has been issued, so every phase is
/// post-issuance; before that there is simply no session to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPhase {
    /// Counting down, resend not yet available
    ResendLocked,
    /// Counting down, resend available
    ResendUnlocked,
    /// Submitted code accepted; terminal
    Verified,
    /// Expiry window elapsed; the code should no longer verify
    Expired,
}

/// State of the two per-session countdowns
///
/// Invariants: both counters only ever decrease between issuance events and
/// are never negative; resend becomes allowed exactly when the resend counter
/// reaches zero, independent of the expiry counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpTimerState {
    resend_remaining_ms: u64,
    expiry_remaining_ms: u64,
    phase: OtpPhase,
}

impl OtpTimerState {
    /// Start both countdowns at their configured full values
    pub fn begin(config: &OtpConfig) -> Self {
        let mut state = Self {
            resend_remaining_ms: config.resend_interval_ms(),
            expiry_remaining_ms: config.expiry_ms(),
            phase: OtpPhase::ResendLocked,
        };
        state.update_phase();
        state
    }

    /// Milliseconds until resend unlocks
    pub fn resend_remaining_ms(&self) -> u64 {
        self.resend_remaining_ms
    }

    /// Milliseconds until the code should be treated as expired
    pub fn expiry_remaining_ms(&self) -> u64 {
        self.expiry_remaining_ms
    }

    /// Current display phase
    pub fn phase(&self) -> OtpPhase {
        self.phase
    }

    /// Resend is allowed exactly when the resend counter has reached zero
    pub fn resend_allowed(&self) -> bool {
        self.resend_remaining_ms == 0 && self.phase != OtpPhase::Verified
    }

    /// Whether the session has reached its terminal state
    pub fn is_verified(&self) -> bool {
        self.phase == OtpPhase::Verified
    }

    /// Advance both countdowns by one tick
    pub fn tick(&mut self) {
        self.tick_resend();
        self.tick_expiry();
    }

    /// Advance only the resend countdown by one tick
    pub fn tick_resend(&mut self) {
        if self.phase == OtpPhase::Verified {
            return;
        }
        self.resend_remaining_ms = self.resend_remaining_ms.saturating_sub(TICK_INTERVAL_MS);
        self.update_phase();
    }

    /// Advance only the expiry countdown by one tick
    pub fn tick_expiry(&mut self) {
        if self.phase == OtpPhase::Verified {
            return;
        }
        self.expiry_remaining_ms = self.expiry_remaining_ms.saturating_sub(TICK_INTERVAL_MS);
        self.update_phase();
    }

    /// Restart both countdowns for a resend
    ///
    /// Legal only while resend is unlocked; a locked resend is a no-op and
    /// returns false. On success both counters return to their full
    /// configured values regardless of how much expiry time was left.
    pub fn resend(&mut self, config: &OtpConfig) -> bool {
        if !self.resend_allowed() {
            return false;
        }
        *self = Self::begin(config);
        true
    }

    /// Record a successful verification; terminal
    pub fn mark_verified(&mut self) {
        self.phase = OtpPhase::Verified;
    }

    fn update_phase(&mut self) {
        if self.phase == OtpPhase::Verified {
            return;
        }
        self.phase = if self.expiry_remaining_ms == 0 {
            OtpPhase::Expired
        } else if self.resend_remaining_ms == 0 {
            OtpPhase::ResendUnlocked
        } else {
            OtpPhase::ResendLocked
        };
    }
}

/// Read handle onto a running session's timer state
///
/// Display code holds one of these and samples it once per render; it does
/// not keep the timers alive.
#[derive(Clone)]
pub struct CountdownHandle {
    state: Arc<Mutex<OtpTimerState>>,
}

impl CountdownHandle {
    /// Snapshot the current timer state
    pub fn snapshot(&self) -> OtpTimerState {
        lock_state(&self.state).clone()
    }
}

/// Owner of one verification session's countdown timers
///
/// Spawns one interval task per countdown on construction and aborts both
/// deterministically on [`CountdownSession::mark_verified`] or on drop, so an
/// abandoned session leaves no orphaned timers behind.
pub struct CountdownSession {
    state: Arc<Mutex<OtpTimerState>>,
    config: OtpConfig,
    tickers: Vec<JoinHandle<()>>,
}

/// Which counter a ticker task drives
#[derive(Clone, Copy)]
enum TickTarget {
    Resend,
    Expiry,
}

impl CountdownSession {
    /// Start a new session with both countdowns at their full values
    pub fn start(config: OtpConfig) -> Self {
        let state = Arc::new(Mutex::new(OtpTimerState::begin(&config)));
        let tickers = vec![
            Self::spawn_ticker(Arc::clone(&state), TickTarget::Resend),
            Self::spawn_ticker(Arc::clone(&state), TickTarget::Expiry),
        ];
        Self {
            state,
            config,
            tickers,
        }
    }

    /// Get a read handle for display code
    pub fn handle(&self) -> CountdownHandle {
        CountdownHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Snapshot the current timer state
    pub fn snapshot(&self) -> OtpTimerState {
        lock_state(&self.state).clone()
    }

    /// Request a resend, dispatching a new issuance if the cooldown allows
    ///
    /// The counters are re-locked synchronously before the issuance future is
    /// awaited, so a second request arriving while the first is in flight is
    /// a no-op. Returns Ok(false) when the cooldown gate rejected the
    /// request without dispatching.
    pub async fn request_resend<F, Fut>(&self, issue: F) -> DomainResult<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<IssueOtpResult>>,
    {
        {
            let mut state = lock_state(&self.state);
            if !state.resend(&self.config) {
                debug!(event = "resend_suppressed", "Resend requested while locked");
                return Ok(false);
            }
        }

        issue().await?;
        Ok(true)
    }

    /// Record a successful verification and tear down both timers
    pub fn mark_verified(&mut self) {
        lock_state(&self.state).mark_verified();
        for ticker in self.tickers.drain(..) {
            ticker.abort();
        }
    }

    fn spawn_ticker(state: Arc<Mutex<OtpTimerState>>, target: TickTarget) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
            // The first tick of a tokio interval completes immediately;
            // consume it so the counters start moving one period in
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut state = lock_state(&state);
                match target {
                    TickTarget::Resend => state.tick_resend(),
                    TickTarget::Expiry => state.tick_expiry(),
                }
                if state.is_verified() {
                    break;
                }
            }
        })
    }
}

impl Drop for CountdownSession {
    fn drop(&mut self) {
        for ticker in self.tickers.drain(..) {
            ticker.abort();
        }
    }
}

fn lock_state(state: &Mutex<OtpTimerState>) -> MutexGuard<'_, OtpTimerState> {
    // A panicked ticker cannot leave the state half-updated; recover the guard
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
