//! Actor implementation for the delivery engine.

use courier_core::CourierConfig;
use tokio::sync::mpsc;

use super::commands::DeliveryEngineCommand;
use super::core::DeliveryEngine;
use super::handle::DeliveryEngineHandle;
use crate::channels::ScheduledCompletion;
use crate::errors::EngineError;

/// Spawns the delivery engine actor and returns its handle.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
/// - `EngineError::Configuration` - Configuration failed validation
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), courier_sim::EngineError> {
/// use courier_core::CourierConfig;
/// use courier_sim::spawn_delivery_engine;
///
/// let handle = spawn_delivery_engine(CourierConfig::for_testing())?;
/// let id = handle.submit_reliable("ping").await?;
/// assert!(id.is_some());
/// # Ok(())
/// # }
/// ```
pub fn spawn_delivery_engine(config: CourierConfig) -> Result<DeliveryEngineHandle, EngineError> {
    let engine = DeliveryEngine::new(&config)?;
    Ok(spawn_engine_actor(engine))
}

/// Spawns an actor around an already constructed engine.
pub fn spawn_engine_actor(engine: DeliveryEngine) -> DeliveryEngineHandle {
    let (sender, receiver) = mpsc::channel(100);
    let (completion_sender, completion_receiver) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        run_actor_loop(engine, receiver, completion_sender, completion_receiver).await;
    });

    DeliveryEngineHandle::new(sender)
}

/// Runs the main actor message processing loop.
///
/// Stops on a shutdown command or when every handle has been dropped.
/// Completion timers hold their own sender, so the completion channel
/// never closes while the actor runs.
async fn run_actor_loop(
    mut engine: DeliveryEngine,
    mut receiver: mpsc::Receiver<DeliveryEngineCommand>,
    completion_sender: mpsc::UnboundedSender<DeliveryEngineCommand>,
    mut completion_receiver: mpsc::UnboundedReceiver<DeliveryEngineCommand>,
) {
    tracing::debug!("Delivery engine actor started (seed {})", engine.seed());

    loop {
        tokio::select! {
            command = receiver.recv() => {
                let Some(command) = command else { break };
                if !handle_command(&mut engine, command, &completion_sender) {
                    break;
                }
            }
            Some(command) = completion_receiver.recv() => {
                if !handle_command(&mut engine, command, &completion_sender) {
                    break;
                }
            }
        }
    }

    tracing::debug!("Delivery engine actor stopped");
}

/// Handles a single command for the delivery engine.
/// Returns true to continue processing, false to shutdown.
fn handle_command(
    engine: &mut DeliveryEngine,
    command: DeliveryEngineCommand,
    completion_sender: &mpsc::UnboundedSender<DeliveryEngineCommand>,
) -> bool {
    match command {
        DeliveryEngineCommand::Submit {
            channel,
            content,
            responder,
        } => {
            let id = engine.submit(channel, &content).map(|completion| {
                let id = completion.id;
                schedule_completion(completion, completion_sender.clone());
                id
            });
            let _ = responder.send(id);
        }

        DeliveryEngineCommand::ClearAll { responder } => {
            engine.clear_all();
            let _ = responder.send(());
        }

        DeliveryEngineCommand::GetChannelView { channel, responder } => {
            let _ = responder.send(engine.channel_view(channel));
        }

        DeliveryEngineCommand::Shutdown { responder } => {
            tracing::debug!("Delivery engine actor shutting down");
            let _ = responder.send(());
            return false;
        }

        DeliveryEngineCommand::Complete { completion } => {
            engine.complete(&completion);
        }
    }

    true
}

/// Starts the timer for one completion.
///
/// The timer is never cancelled. If the actor is gone by the time it fires
/// the completion is dropped.
fn schedule_completion(
    completion: ScheduledCompletion,
    completion_sender: mpsc::UnboundedSender<DeliveryEngineCommand>,
) {
    tokio::spawn(async move {
        tokio::time::sleep(completion.delay).await;
        let _ = completion_sender.send(DeliveryEngineCommand::Complete { completion });
    });
}
