use crate::CameraError;
use restyle_base::Tensor;
use tokio::sync::watch;

// errors cross the thread boundary as text; CameraError is not Clone
type FrameSlot = Option<Result<Tensor<u8>, String>>;

/// Capture-thread side of a single-slot frame channel.
pub struct FramePublisher {
    tx: watch::Sender<FrameSlot>,
}

/// Consumer side: waits for a frame newer than the last one it read.
pub struct FrameSubscriber {
    rx: watch::Receiver<FrameSlot>,
}

/// Create a channel that only ever holds the most recent frame.
pub fn latest_frame_channel() -> (FramePublisher, FrameSubscriber) {
    let (tx, rx) = watch::channel(None);
    (FramePublisher { tx }, FrameSubscriber { rx })
}

impl FramePublisher {
    /// Replace the held frame. Returns `false` once the subscriber is gone.
    pub fn publish(&self, frame: Result<Tensor<u8>, CameraError>) -> bool {
        self.tx
            .send(Some(frame.map_err(|e| e.to_string())))
            .is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl FrameSubscriber {
    pub async fn next(&mut self) -> Result<Tensor<u8>, CameraError> {
        loop {
            self.rx
                .changed()
                .await
                .map_err(|_| CameraError::Channel("capture thread stopped".to_string()))?;
            if let Some(slot) = self.rx.borrow_and_update().clone() {
                return slot.map_err(CameraError::Stream);
            }
        }
    }
}
