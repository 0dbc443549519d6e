//! Frame delivery sinks
//!
//! The pacer hands encoded parts to a [`FrameSink`] and never touches the
//! transport directly. A failed send is a normal termination signal, not a
//! fault: the sink reports the consumer's state through a `Result`.

use bytes::Bytes;
use tokio::sync::mpsc;

/// Why a delivery could not be handed to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The remote side is gone; the session should end
    Disconnected,
    /// The consumer is momentarily not keeping up; drop this frame only
    Backpressure,
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Disconnected => write!(f, "Consumer disconnected"),
            SinkError::Backpressure => write!(f, "Consumer not keeping up"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Destination for encoded stream parts
pub trait FrameSink: Send {
    /// Attempt to hand one part to the consumer without blocking
    fn try_send(&self, part: Bytes) -> Result<(), SinkError>;
}

/// Sink backed by a bounded channel
///
/// The receiving half feeds the HTTP response body; when the viewer
/// disconnects the transport drops the receiver and the next `try_send`
/// reports [`SinkError::Disconnected`]. A full buffer reports
/// [`SinkError::Backpressure`] instead, distinguishing a dead consumer
/// from a momentarily slow one.
pub struct ChannelSink {
    tx: mpsc::Sender<Result<Bytes, std::io::Error>>,
}

impl ChannelSink {
    /// Create a sink and its receiving half with the given frame capacity
    pub fn channel(
        capacity: usize,
    ) -> (Self, mpsc::Receiver<Result<Bytes, std::io::Error>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl FrameSink for ChannelSink {
    fn try_send(&self, part: Bytes) -> Result<(), SinkError> {
        self.tx.try_send(Ok(part)).map_err(|e| match e {
            mpsc::error::TrySendError::Closed(_) => SinkError::Disconnected,
            mpsc::error::TrySendError::Full(_) => SinkError::Backpressure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_receive() {
        let (sink, mut rx) = ChannelSink::channel(4);

        sink.try_send(Bytes::from_static(b"part")).unwrap();

        let received = rx.try_recv().unwrap().unwrap();
        assert_eq!(received, Bytes::from_static(b"part"));
    }

    #[test]
    fn test_full_buffer_is_backpressure() {
        let (sink, _rx) = ChannelSink::channel(1);

        sink.try_send(Bytes::from_static(b"a")).unwrap();
        let err = sink.try_send(Bytes::from_static(b"b")).unwrap_err();
        assert_eq!(err, SinkError::Backpressure);
    }

    #[test]
    fn test_dropped_receiver_is_disconnected() {
        let (sink, rx) = ChannelSink::channel(4);
        drop(rx);

        let err = sink.try_send(Bytes::from_static(b"a")).unwrap_err();
        assert_eq!(err, SinkError::Disconnected);
    }
}
