//! Async serial link hosting a stream decoder
//!
//! Owns the port read loop and the single-shot liveness countdown. Each read
//! chunk is pushed into the decoder; each decoded sample restarts the
//! countdown; when it fires, the decoder's timeout transition runs. Decoder
//! events are fanned out over a broadcast channel.

use super::TransportError;
use crate::decoder::{DecoderConfig, DecoderEvent, StreamDecoder};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{info, warn};

/// Serial parity setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SerialParity {
    /// No parity
    #[default]
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

impl From<SerialParity> for Parity {
    fn from(parity: SerialParity) -> Self {
        match parity {
            SerialParity::None => Parity::None,
            SerialParity::Even => Parity::Even,
            SerialParity::Odd => Parity::Odd,
        }
    }
}

/// Serial port configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port name (e.g., COM3, /dev/ttyUSB0)
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Data bits (5, 6, 7, 8)
    pub data_bits: u8,
    /// Stop bits (1, 2)
    pub stop_bits: u8,
    /// Parity
    pub parity: SerialParity,
}

impl SerialConfig {
    /// Create a configuration with 8N1 defaults.
    #[must_use]
    pub fn new(port: &str, baud_rate: u32) -> Self {
        Self {
            port: port.to_string(),
            baud_rate,
            data_bits: 8,
            stop_bits: 1,
            parity: SerialParity::None,
        }
    }
}

/// List the names of the serial ports present on the system.
///
/// # Errors
///
/// Returns [`TransportError::Enumeration`] when the platform enumeration
/// fails.
pub fn available_port_names() -> Result<Vec<String>, TransportError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}

/// An open serial connection pumping bytes through a [`StreamDecoder`].
///
/// The decoder lives on a dedicated task, so calls into it are naturally
/// serialized; consumers observe it through [`subscribe`](Self::subscribe).
pub struct SerialLink {
    event_tx: broadcast::Sender<DecoderEvent>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SerialLink {
    /// Open the port and start the read loop.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] when the port cannot be opened with
    /// the requested settings.
    pub fn open(config: &SerialConfig, decoder: DecoderConfig) -> Result<Self, TransportError> {
        let port = tokio_serial::new(&config.port, config.baud_rate)
            .data_bits(match config.data_bits {
                5 => DataBits::Five,
                6 => DataBits::Six,
                7 => DataBits::Seven,
                _ => DataBits::Eight,
            })
            .stop_bits(if config.stop_bits == 2 {
                StopBits::Two
            } else {
                StopBits::One
            })
            .parity(config.parity.into())
            .flow_control(FlowControl::None)
            .open_native_async()
            .map_err(|source| TransportError::Open {
                port: config.port.clone(),
                source,
            })?;

        info!(port = %config.port, baud = config.baud_rate, "serial link opened");

        let (event_tx, _) = broadcast::channel(256);
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(read_loop(
            port,
            StreamDecoder::new(decoder),
            event_tx.clone(),
            stop_rx,
        ));

        Ok(Self {
            event_tx,
            stop_tx,
            task,
        })
    }

    /// Subscribe to decoder events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DecoderEvent> {
        self.event_tx.subscribe()
    }

    /// Stop the read loop and close the port.
    pub async fn close(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
        info!("serial link closed");
    }
}

async fn read_loop(
    mut port: SerialStream,
    mut decoder: StreamDecoder,
    event_tx: broadcast::Sender<DecoderEvent>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let timeout = decoder.timeout();
    let mut deadline: Option<Instant> = None;
    let mut buf = BytesMut::with_capacity(4096);

    loop {
        tokio::select! {
            read = port.read_buf(&mut buf) => match read {
                Ok(0) => {
                    info!("serial port closed by peer");
                    break;
                }
                Ok(_) => {
                    for event in decoder.push(&buf) {
                        if matches!(event, DecoderEvent::SampleDecoded { .. }) {
                            deadline = Some(Instant::now() + timeout);
                        }
                        let _ = event_tx.send(event);
                    }
                    buf.clear();
                }
                Err(err) => {
                    warn!(%err, "serial read failed");
                    break;
                }
            },
            () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                if deadline.is_some() =>
            {
                deadline = None;
                if let Some(event) = decoder.on_timeout() {
                    let _ = event_tx.send(event);
                }
            },
            _ = stop_rx.changed() => break,
        }
    }
}
