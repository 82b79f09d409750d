//! Handle for communicating with the delivery engine actor.

use courier_core::{ChannelKind, ChannelView, MessageId};
use tokio::sync::{mpsc, oneshot};

use super::commands::DeliveryEngineCommand;
use crate::errors::EngineError;

/// Handle for communicating with the delivery engine actor.
///
/// Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct DeliveryEngineHandle {
    sender: mpsc::Sender<DeliveryEngineCommand>,
}

impl DeliveryEngineHandle {
    /// Creates a new handle with the given command sender.
    pub fn new(sender: mpsc::Sender<DeliveryEngineCommand>) -> Self {
        Self { sender }
    }

    /// Submits content to a channel.
    ///
    /// Returns the new message id, or `None` when the content is blank and
    /// the submission was ignored.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor is no longer running
    pub async fn submit(
        &self,
        channel: ChannelKind,
        content: impl Into<String>,
    ) -> Result<Option<MessageId>, EngineError> {
        let (responder, rx) = oneshot::channel();
        let cmd = DeliveryEngineCommand::Submit {
            channel,
            content: content.into(),
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| EngineError::Shutdown)?;

        rx.await.map_err(|_| EngineError::Shutdown)
    }

    /// Submits content to the reliable channel.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor is no longer running
    pub async fn submit_reliable(
        &self,
        content: impl Into<String>,
    ) -> Result<Option<MessageId>, EngineError> {
        self.submit(ChannelKind::Reliable, content).await
    }

    /// Submits content to the unreliable channel.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor is no longer running
    pub async fn submit_unreliable(
        &self,
        content: impl Into<String>,
    ) -> Result<Option<MessageId>, EngineError> {
        self.submit(ChannelKind::Unreliable, content).await
    }

    /// Empties the message store and resets both channels' stats.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor is no longer running
    pub async fn clear_all(&self) -> Result<(), EngineError> {
        let (responder, rx) = oneshot::channel();
        let cmd = DeliveryEngineCommand::ClearAll { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| EngineError::Shutdown)?;

        rx.await.map_err(|_| EngineError::Shutdown)
    }

    /// Gets a channel's messages in submission order together with its stats.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor is no longer running
    pub async fn channel_view(&self, channel: ChannelKind) -> Result<ChannelView, EngineError> {
        let (responder, rx) = oneshot::channel();
        let cmd = DeliveryEngineCommand::GetChannelView { channel, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| EngineError::Shutdown)?;

        rx.await.map_err(|_| EngineError::Shutdown)
    }

    /// Shuts down the engine actor gracefully.
    ///
    /// After this call every operation returns `EngineError::Shutdown`.
    ///
    /// # Errors
    /// - `EngineError::Shutdown` - Engine actor had already stopped
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        let (responder, rx) = oneshot::channel();
        let cmd = DeliveryEngineCommand::Shutdown { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| EngineError::Shutdown)?;

        rx.await.map_err(|_| EngineError::Shutdown)
    }

    /// Checks if the engine actor is still running.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}
