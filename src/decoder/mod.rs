//! Stream synchronizer
//!
//! Recovers discrete validated frames from a continuous byte stream that
//! arrives in arbitrary chunks. Owns the receive accumulator, the link
//! liveness state, and the bounded per-channel histories; the pure frame
//! codec in [`crate::protocol`] does the validation.
//!
//! The decoder is push-based and synchronous. It carries no timer of its
//! own: the hosting task schedules a single-shot countdown of
//! [`DecoderConfig::timeout`] after each decoded sample and calls
//! [`StreamDecoder::on_timeout`] when it fires, which keeps the core fully
//! testable without an event loop.

mod history;

pub use history::{ChannelHistory, SamplePoint};

use crate::protocol::frame::{decode_frame, CHANNEL_COUNT, FRAME_LEN, SYNC_MARKER};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Consumed-prefix length at which the accumulator is physically compacted.
const COMPACT_THRESHOLD: usize = 4096;

/// Link liveness as observed from validated frame arrivals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkState {
    /// No frame observed yet since construction or reset
    Unknown,
    /// A frame validated within the timeout window
    Active,
    /// The timeout elapsed with no validated frame
    TimedOut,
}

/// Stream decoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Points retained per channel (sliding visualization window)
    pub history_capacity: usize,
    /// Liveness countdown restarted on every validated frame
    pub timeout: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            history_capacity: 200,
            timeout: Duration::from_millis(400),
        }
    }
}

/// Events raised by the decoder, consumed by display/log collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    /// A frame validated and its payload was decoded
    SampleDecoded {
        /// Monotonically increasing global sample index
        index: u64,
        /// One value per channel, in channel order
        values: [u8; CHANNEL_COUNT],
    },
    /// The link liveness state changed
    LivenessChanged(LinkState),
}

/// Outcome of scanning the unconsumed region for a candidate frame.
enum Scan {
    /// Fewer than [`FRAME_LEN`] bytes pending; wait for more input.
    Pending,
    /// No sync marker anywhere in the pending bytes; trim.
    NoMarker,
    /// Marker found but the frame after it has not fully arrived.
    Incomplete,
    /// A full candidate starts at this absolute buffer offset.
    Candidate(usize),
}

/// Stateful frame synchronizer over a chunked byte stream.
///
/// Feed raw chunks with [`push`](Self::push) as they arrive; every call
/// drains as many complete frames as the accumulator holds and returns the
/// resulting events in order.
pub struct StreamDecoder {
    /// Accumulator of received bytes; `buf[cursor..]` is unconsumed.
    buf: Vec<u8>,
    cursor: usize,
    histories: Vec<ChannelHistory>,
    sample_index: u64,
    link: LinkState,
    rejected: u64,
    config: DecoderConfig,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl StreamDecoder {
    /// Create a decoder with the given configuration.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            buf: Vec::new(),
            cursor: 0,
            histories: (0..CHANNEL_COUNT)
                .map(|_| ChannelHistory::new(config.history_capacity))
                .collect(),
            sample_index: 0,
            link: LinkState::Unknown,
            rejected: 0,
            config,
        }
    }

    /// Append a received chunk and extract every complete frame.
    ///
    /// Returns the events produced by this chunk, in order. Candidates that
    /// fail validation are dropped without an event; the stream always
    /// resynchronizes past the entire 16-byte candidate, never from one byte
    /// after its marker. That trades a small chance of skipping a valid
    /// frame overlapping a corrupt candidate for bounded recovery with no
    /// re-scan of already inspected bytes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<DecoderEvent> {
        self.buf.extend_from_slice(chunk);
        let mut events = Vec::new();

        loop {
            match self.scan() {
                Scan::Pending | Scan::Incomplete => break,
                Scan::NoMarker => {
                    self.trim_desynchronized();
                    break;
                }
                Scan::Candidate(start) => {
                    let candidate = &self.buf[start..start + FRAME_LEN];
                    match decode_frame(candidate) {
                        Ok(values) => self.record_sample(values, &mut events),
                        Err(err) => {
                            self.rejected += 1;
                            debug!(%err, rejected = self.rejected, "corrupt frame discarded");
                        }
                    }
                    // Consume through the candidate whether or not it validated.
                    self.cursor = start + FRAME_LEN;
                    self.compact_if_due();
                }
            }
        }

        events
    }

    /// Record that the liveness countdown elapsed with no validated frame.
    ///
    /// Invoked by the hosting task's timer. Purely a state transition:
    /// buffered bytes are untouched and a later valid frame flips the link
    /// back to [`LinkState::Active`].
    pub fn on_timeout(&mut self) -> Option<DecoderEvent> {
        if self.link == LinkState::TimedOut {
            return None;
        }
        debug!("liveness countdown elapsed");
        self.link = LinkState::TimedOut;
        Some(DecoderEvent::LivenessChanged(LinkState::TimedOut))
    }

    /// Clear all connection-scoped state for a reconnect.
    ///
    /// Empties the accumulator and histories, rewinds the sample index, and
    /// returns liveness to [`LinkState::Unknown`] so stale data never leaks
    /// across connections. The host must also cancel its pending countdown.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        for history in &mut self.histories {
            history.clear();
        }
        self.sample_index = 0;
        self.link = LinkState::Unknown;
        self.rejected = 0;
    }

    /// Current link liveness.
    #[must_use]
    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Index the next decoded sample will receive.
    #[must_use]
    pub fn sample_index(&self) -> u64 {
        self.sample_index
    }

    /// Number of candidates dropped for checksum mismatch.
    #[must_use]
    pub fn rejected_frames(&self) -> u64 {
        self.rejected
    }

    /// Received bytes not yet consumed by frame extraction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// History for one channel (`0..CHANNEL_COUNT`).
    #[must_use]
    pub fn history(&self, channel: usize) -> Option<&ChannelHistory> {
        self.histories.get(channel)
    }

    /// Histories for all channels, in channel order.
    #[must_use]
    pub fn histories(&self) -> &[ChannelHistory] {
        &self.histories
    }

    /// Liveness countdown the hosting task should schedule.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Locate the next candidate frame in the unconsumed region.
    fn scan(&self) -> Scan {
        let pending = &self.buf[self.cursor..];
        if pending.len() < FRAME_LEN {
            return Scan::Pending;
        }

        match pending.windows(SYNC_MARKER.len()).position(|w| w == SYNC_MARKER) {
            None => Scan::NoMarker,
            Some(offset) if pending.len() - offset < FRAME_LEN => Scan::Incomplete,
            Some(offset) => Scan::Candidate(self.cursor + offset),
        }
    }

    fn record_sample(&mut self, values: [u8; CHANNEL_COUNT], events: &mut Vec<DecoderEvent>) {
        let index = self.sample_index;
        for (history, &value) in self.histories.iter_mut().zip(values.iter()) {
            history.push(index, value);
        }
        self.sample_index += 1;
        trace!(index, payload = %hex::encode(values), "frame validated");

        if self.link != LinkState::Active {
            self.link = LinkState::Active;
            events.push(DecoderEvent::LivenessChanged(LinkState::Active));
        }
        events.push(DecoderEvent::SampleDecoded { index, values });
    }

    /// Trim a marker-less accumulator.
    ///
    /// A `'$'` near the tail may be the first byte of a marker split across
    /// chunks, so everything before the last `'$'` is dropped and that byte
    /// kept. Without any `'$'` no pending byte can start a frame and the
    /// whole region is dropped.
    fn trim_desynchronized(&mut self) {
        let pending = &self.buf[self.cursor..];
        let dropped = match pending.iter().rposition(|&b| b == b'$') {
            Some(pos) => {
                self.cursor += pos;
                pos
            }
            None => {
                let len = pending.len();
                self.cursor = self.buf.len();
                len
            }
        };
        if dropped > 0 {
            debug!(dropped, "no sync marker, accumulator trimmed");
        }
        self.compact_if_due();
    }

    /// Physically drop the consumed prefix once it grows past the threshold,
    /// so the accumulator never reallocates per frame yet stays bounded.
    fn compact_if_due(&mut self) {
        if self.cursor >= COMPACT_THRESHOLD {
            self.buf.drain(..self.cursor);
            self.cursor = 0;
        }
    }
}
