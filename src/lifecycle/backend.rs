use crate::clients::{ChannelClient, UserClient};
use crate::config::BindingConfig;
use crate::{channel_actor, user_actor};
use tokio::task::JoinHandle;
use tracing::info;

/// Clients for every backend store.
#[derive(Clone)]
pub struct BackendClients {
    pub users: UserClient,
    pub channels: ChannelClient,
}

/// The running backend stores.
///
/// # Example
///
/// ```ignore
/// let backend = Backend::start(&BindingConfig::default());
/// backend.clients().users.insert_user(User::new("01A", "dos", "7624")).await?;
///
/// // Drains both stores once every other client clone is gone
/// backend.shutdown().await;
/// ```
pub struct Backend {
    clients: BackendClients,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl Backend {
    /// Spawns the user and channel actors on the current runtime.
    ///
    /// Neither store depends on the other, so both run with an empty context.
    pub fn start(config: &BindingConfig) -> Self {
        let (user_actor, users) = user_actor::new(config);
        let (channel_actor, channels) = channel_actor::new(config);

        let user_handle = tokio::spawn(user_actor.run(()));
        let channel_handle = tokio::spawn(channel_actor.run(()));
        info!(
            buffer = config.channel_buffer,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Backend started"
        );

        Self {
            clients: BackendClients { users, channels },
            handles: vec![user_handle, channel_handle],
        }
    }

    pub fn clients(&self) -> &BackendClients {
        &self.clients
    }

    /// Detach the actors; they keep running for as long as a client clone exists.
    pub fn into_clients(self) -> BackendClients {
        self.clients
    }

    /// Gracefully shuts down the backend by dropping its clients and awaiting the actors.
    pub async fn shutdown(self) {
        info!("Shutting down backend");
        drop(self.clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Actor task failed");
            }
        }
        info!("Backend stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[tokio::test]
    async fn test_shutdown_waits_for_actors() {
        let backend = Backend::start(&BindingConfig::default());
        let users = backend.clients().users.clone();
        users.insert_user(User::new("01A", "dos", "7624")).await.unwrap();
        drop(users);

        tokio::time::timeout(std::time::Duration::from_secs(1), backend.shutdown())
            .await
            .unwrap();
    }
}
