//! Raw-byte input sources and the escape-sequence key decoder.

mod decoder;
pub use decoder::{ESCAPE_TIMEOUT, KEY_POLL_INTERVAL, KeyDecoder};

use anyhow::{Result, bail};
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use std::io::Read;
use std::thread;
use std::time::Duration;

/// Capacity of the stdin byte channel. Far beyond what a human types
/// between frames; a paste burst parks the pump thread, never the editor.
pub const BYTE_CHANNEL_CAP: usize = 1024;

/// A source of raw terminal bytes with bounded waits.
pub trait ByteSource {
    /// Wait up to `timeout` for the next byte. `Ok(None)` means nothing
    /// arrived in time; `Err` means the source is gone for good.
    fn read_timeout(&mut self, timeout: Duration) -> Result<Option<u8>>;
}

/// Bytes pumped off `stdin` by a background thread into a bounded channel.
///
/// The pump owns nothing but the descriptor read loop and a sender; all
/// editor state stays with the consuming thread. `recv_timeout` on the
/// channel is what gives the decoder its liveness bound.
pub struct StdinByteSource {
    rx: Receiver<u8>,
}

impl StdinByteSource {
    pub fn spawn() -> Result<Self> {
        let (tx, rx) = bounded(BYTE_CHANNEL_CAP);
        // Detached: the pump exits on EOF or once the receiver is dropped.
        let _pump = thread::Builder::new()
            .name("stdin-pump".into())
            .spawn(move || {
                let mut stdin = std::io::stdin().lock();
                let mut byte = [0u8; 1];
                loop {
                    match stdin.read(&mut byte) {
                        Ok(0) => break,
                        Ok(_) => {
                            if tx.send(byte[0]).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            tracing::error!(target: "input", error = %e, "stdin_read_failed");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self { rx })
    }
}

impl ByteSource for StdinByteSource {
    fn read_timeout(&mut self, timeout: Duration) -> Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(b) => Ok(Some(b)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => bail!("terminal input stream closed"),
        }
    }
}
