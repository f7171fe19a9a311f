//! Fatal-fault capture.
//!
//! On a fatal memory-fault signal the process dumps a bounded call-stack
//! trace to the raw log descriptor and terminates. The handler runs under
//! async-signal-safety constraints: no allocation, no buffered I/O, direct
//! `write(2)` only. Frame addresses are emitted raw (hex); symbolization
//! would allocate and is left to offline tooling.
#![allow(unsafe_code)]

use std::os::fd::RawFd;
use std::sync::atomic::{AtomicI32, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::{AppError, Result};

/// Maximum stack frames emitted per fault.
const MAX_FRAMES: usize = 10;

// A signal handler cannot reach the session context, so the crash
// descriptor is the one piece of process-wide state in the shell.
static CRASH_FD: AtomicI32 = AtomicI32::new(-1);

/// Install the fault handler for SIGSEGV and SIGBUS, writing to `fd`.
///
/// `SA_RESETHAND` restores the default disposition on entry, so a fault
/// inside the handler terminates the process instead of recursing.
///
/// # Errors
///
/// Returns `AppError::Backend` if the handler cannot be registered.
pub fn install(fd: RawFd) -> Result<()> {
    CRASH_FD.store(fd, Ordering::SeqCst);

    let action = SigAction::new(
        SigHandler::Handler(on_fatal_signal),
        SaFlags::SA_RESETHAND,
        SigSet::empty(),
    );
    for signal in [Signal::SIGSEGV, Signal::SIGBUS] {
        // SAFETY: the handler only touches atomics, fixed buffers, and
        // async-signal-safe syscalls.
        unsafe { sigaction(signal, &action) }
            .map_err(|err| AppError::Backend(format!("cannot install {signal} handler: {err}")))?;
    }
    Ok(())
}

extern "C" fn on_fatal_signal(signo: libc::c_int) {
    let fd = CRASH_FD.load(Ordering::Relaxed);
    if fd >= 0 {
        raw_write(fd, b"fatal signal ");
        let mut buf = [0u8; 24];
        raw_write(fd, format_dec(unsigned(signo), &mut buf));
        raw_write(fd, b", call stack:\n");

        let mut depth = 0usize;
        // SAFETY: single-threaded fault path; trace_unsynchronized walks
        // frames without allocating, which is the whole point of using it
        // here.
        unsafe {
            backtrace::trace_unsynchronized(|frame| {
                raw_write(fd, b"  #");
                raw_write(fd, format_dec(depth as u64, &mut buf));
                raw_write(fd, b" 0x");
                raw_write(fd, format_hex(frame.ip() as usize as u64, &mut buf));
                raw_write(fd, b"\n");
                depth += 1;
                depth < MAX_FRAMES
            });
        }
    }

    // SAFETY: _exit is async-signal-safe; never resume after a fault.
    unsafe { libc::_exit(1) }
}

fn unsigned(value: libc::c_int) -> u64 {
    if value < 0 {
        0
    } else {
        value as u64
    }
}

fn raw_write(fd: RawFd, bytes: &[u8]) {
    // SAFETY: plain write(2) on a descriptor we opened; short or failed
    // writes are unrecoverable here and deliberately ignored.
    let _ = unsafe { libc::write(fd, bytes.as_ptr().cast(), bytes.len()) };
}

/// Format a decimal value into `buf` without allocating.
///
/// Exposed for the crash path and its tests; `buf` must hold at least 20
/// bytes.
#[must_use]
pub fn format_dec(mut value: u64, buf: &mut [u8]) -> &[u8] {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + u8::try_from(value % 10).unwrap_or(0);
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[pos..]
}

/// Format a hexadecimal value into `buf` without allocating.
///
/// Exposed for the crash path and its tests; `buf` must hold at least 16
/// bytes.
#[must_use]
pub fn format_hex(mut value: u64, buf: &mut [u8]) -> &[u8] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGITS[(value & 0xf) as usize];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    &buf[pos..]
}
