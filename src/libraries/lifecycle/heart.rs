use futures::{
    channel::mpsc::{channel, Receiver, Sender},
    executor::block_on,
    future, pin_mut,
    prelude::*,
    select,
};
use log::{debug, error, warn};
use std::fmt::{self, Formatter};
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};

/// Reason for the process to shut down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathReason {
    Killed(String),
    Terminated,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, w: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::Killed(reason) => write!(w, "Killed ({})", reason),
            DeathReason::Terminated => write!(w, "Terminated due to external signal"),
        }
    }
}

/// Keeps the process alive until it is killed or receives a termination signal
pub struct Heart {
    rx: Receiver<String>,
}

impl Heart {
    pub fn new() -> (Self, HeartStone) {
        let (tx, rx) = channel(2);
        (Self { rx }, HeartStone { remote: tx })
    }

    pub async fn death(&mut self) -> DeathReason {
        debug!("Heart starts beating");

        let terminated = Heart::termination_signal().fuse();
        pin_mut!(terminated);

        let reason = select! {
            reason = self.rx.next() => reason.map(DeathReason::Killed),
            () = terminated.as_mut() => Some(DeathReason::Terminated),
        };

        match reason {
            Some(reason) => reason,
            // Every stone is gone, only a signal can stop us now
            None => {
                terminated.await;
                DeathReason::Terminated
            }
        }
    }

    async fn termination_signal() {
        let ctrl_c = ctrl_c().fuse();

        let sigterm = async {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Unable to listen for SIGTERM: {}", e);
                    future::pending::<()>().await;
                }
            }
        }
        .fuse();

        pin_mut!(sigterm, ctrl_c);

        select! {
            () = sigterm => (),
            _ = ctrl_c => (),
        };
    }
}

/// Remote control that can stop a [`Heart`]
#[derive(Clone)]
pub struct HeartStone {
    remote: Sender<String>,
}

impl HeartStone {
    pub async fn kill(&mut self, reason: String) {
        if let Err(e) = self.remote.send(reason).await {
            error!("Failed to interact with Heart: {}", e);
        }
    }

    /// Kills the heart from a thread outside of the async runtime
    pub fn kill_blocking(&mut self, reason: String) {
        block_on(self.kill(reason))
    }
}
