/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

enum HubCommand {
    Subscribe(oneshot::Sender<(u64, mpsc::UnboundedReceiver<Bytes>)>),
    Unsubscribe(u64),
    Publish(Bytes),
    SubscriberCount(oneshot::Sender<usize>),
}

/// Handle to a broadcast hub task.
///
/// The hub state is owned by a single spawned task and all access goes
/// through its command channel. The task ends once every handle and every
/// subscription is gone.
#[derive(Clone)]
pub struct Hub {
    cmd_sender: mpsc::UnboundedSender<HubCommand>,
}

impl Hub {
    pub fn spawn() -> Self {
        let (cmd_sender, cmd_receiver) = mpsc::unbounded_channel();
        let driver = HubDriver {
            next_id: 0,
            subscribers: HashMap::new(),
            cmd_receiver,
        };
        tokio::spawn(driver.into_running());
        Hub { cmd_sender }
    }

    /// Register a new subscriber. Returns None if the hub task is gone.
    pub async fn subscribe(&self) -> Option<Subscription> {
        let (rsp_sender, rsp_receiver) = oneshot::channel();
        self.cmd_sender
            .send(HubCommand::Subscribe(rsp_sender))
            .ok()?;
        let (id, receiver) = rsp_receiver.await.ok()?;
        Some(Subscription {
            id,
            receiver,
            cmd_sender: self.cmd_sender.clone(),
        })
    }

    /// Send a message to every current subscriber.
    ///
    /// The payload is handed over as owned bytes, so the caller can not
    /// touch the buffer again after publishing.
    pub fn publish(&self, msg: Bytes) {
        let _ = self.cmd_sender.send(HubCommand::Publish(msg));
    }

    pub async fn subscriber_count(&self) -> usize {
        let (rsp_sender, rsp_receiver) = oneshot::channel();
        if self
            .cmd_sender
            .send(HubCommand::SubscriberCount(rsp_sender))
            .is_err()
        {
            return 0;
        }
        rsp_receiver.await.unwrap_or(0)
    }
}

/// Receiving side of a hub registration. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<Bytes>,
    cmd_sender: mpsc::UnboundedSender<HubCommand>,
}

impl Subscription {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn recv(&mut self) -> Option<Bytes> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.cmd_sender.send(HubCommand::Unsubscribe(self.id));
    }
}

struct HubDriver {
    next_id: u64,
    subscribers: HashMap<u64, mpsc::UnboundedSender<Bytes>>,
    cmd_receiver: mpsc::UnboundedReceiver<HubCommand>,
}

impl HubDriver {
    async fn into_running(mut self) {
        while let Some(cmd) = self.cmd_receiver.recv().await {
            match cmd {
                HubCommand::Subscribe(rsp_sender) => {
                    let id = self.next_id;
                    self.next_id += 1;
                    let (msg_sender, msg_receiver) = mpsc::unbounded_channel();
                    if rsp_sender.send((id, msg_receiver)).is_ok() {
                        self.subscribers.insert(id, msg_sender);
                    }
                }
                HubCommand::Unsubscribe(id) => {
                    self.subscribers.remove(&id);
                }
                HubCommand::Publish(msg) => {
                    // drop subscribers that went away without unsubscribing
                    self.subscribers
                        .retain(|_, sender| sender.send(msg.clone()).is_ok());
                }
                HubCommand::SubscriberCount(rsp_sender) => {
                    let _ = rsp_sender.send(self.subscribers.len());
                }
            }
        }
    }
}
