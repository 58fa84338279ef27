// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Signal handling: SIGINT and SIGTERM.
//
// The handlers only store into atomics shared with the editing session.
// SIGINT raises the interrupt flag, which long-running command groups poll
// between steps. SIGTERM records `128 + signo` as the requested exit code,
// which the session treats as a close request.
//
// Handlers cannot capture state, so the shared atomics live in a `OnceLock`
// filled at installation time. Reading an initialised `OnceLock` is a plain
// atomic load, which is async-signal-safe.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, OnceLock};

/// The atomics a signal may write to.
#[derive(Debug, Clone)]
pub struct SignalTargets {
    /// Set by SIGINT.
    pub interrupt: Arc<AtomicBool>,
    /// Set to `128 + SIGTERM` on termination; 0 while running.
    pub terminate: Arc<AtomicI32>,
}

static TARGETS: OnceLock<SignalTargets> = OnceLock::new();

/// Exit code conventionally reported for a process ended by `signo`.
#[must_use]
pub const fn exit_code_for(signo: i32) -> i32 {
    128 + signo
}

/// Install SIGINT and SIGTERM handlers writing into `targets`.
///
/// Returns `false` if handlers were already installed; the first set of
/// targets stays in effect.
pub fn install(targets: SignalTargets) -> bool {
    if TARGETS.set(targets).is_err() {
        return false;
    }
    install_handlers();
    true
}

#[cfg(unix)]
fn install_handlers() {
    for signo in [libc::SIGINT, libc::SIGTERM] {
        unsafe {
            let mut sa: libc::sigaction = std::mem::zeroed();
            sa.sa_sigaction = signal_handler as *const () as usize;
            sa.sa_flags = libc::SA_RESTART;
            libc::sigemptyset(&raw mut sa.sa_mask);
            libc::sigaction(signo, &raw const sa, std::ptr::null_mut());
        }
    }
}

#[cfg(unix)]
extern "C" fn signal_handler(signo: libc::c_int) {
    deliver(signo);
}

#[cfg(not(unix))]
fn install_handlers() {
    // No-op on non-unix platforms.
}

/// Record the arrival of `signo` in the installed targets.
fn deliver(signo: i32) {
    let Some(targets) = TARGETS.get() else {
        return;
    };
    #[cfg(unix)]
    match signo {
        libc::SIGINT => targets.interrupt.store(true, Ordering::Relaxed),
        libc::SIGTERM => targets.terminate.store(exit_code_for(signo), Ordering::Relaxed),
        _ => {}
    }
    #[cfg(not(unix))]
    let _ = (targets, signo);
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_adds_128() {
        assert_eq!(exit_code_for(15), 143);
        assert_eq!(exit_code_for(2), 130);
    }

    #[cfg(unix)]
    #[test]
    fn delivered_signals_reach_targets() {
        let targets = SignalTargets {
            interrupt: Arc::new(AtomicBool::new(false)),
            terminate: Arc::new(AtomicI32::new(0)),
        };
        // Another test may have installed first; use whichever set won.
        install(targets);
        let installed = TARGETS.get().unwrap().clone();

        deliver(libc::SIGINT);
        assert!(installed.interrupt.swap(false, Ordering::Relaxed));

        deliver(libc::SIGTERM);
        assert_eq!(installed.terminate.swap(0, Ordering::Relaxed), 143);
    }

    #[test]
    fn second_install_is_rejected() {
        let make = || SignalTargets {
            interrupt: Arc::new(AtomicBool::new(false)),
            terminate: Arc::new(AtomicI32::new(0)),
        };
        install(make());
        assert!(!install(make()));
    }
}
