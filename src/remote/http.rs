use super::{ExecutionControl, PROGRAM_PATH, ProgramRequest, SLOTS_PATH, SlotStore};
use crate::config::Settings;
use crate::error::RemoteError;
use crate::workspace::Slot;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Builds the blocking client shared by the slot store and the executor.
pub fn build_client(settings: &Settings) -> Result<Client, RemoteError> {
    Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()
        .map_err(|e| RemoteError::Transport {
            endpoint: settings.server_url.clone(),
            message: e.to_string(),
        })
}

fn transport(endpoint: &str, err: reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

fn check_status(endpoint: &str, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Slot list stored by the editor server.
pub struct HttpSlotStore {
    client: Client,
    endpoint: String,
}

impl HttpSlotStore {
    pub fn new(settings: &Settings) -> Result<Self, RemoteError> {
        Ok(Self::with_client(build_client(settings)?, settings))
    }

    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint(SLOTS_PATH),
        }
    }
}

impl SlotStore for HttpSlotStore {
    fn fetch_all(&self) -> Result<Vec<Slot>, RemoteError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching slots");
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| transport(&self.endpoint, e))?;
        check_status(&self.endpoint, response)?
            .json::<Vec<Slot>>()
            .map_err(|e| RemoteError::Decode {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })
    }

    fn store_all(&mut self, slots: &[Slot]) -> Result<(), RemoteError> {
        tracing::debug!(endpoint = %self.endpoint, slots = slots.len(), "storing slots");
        let response = self
            .client
            .post(&self.endpoint)
            .json(slots)
            .send()
            .map_err(|e| transport(&self.endpoint, e))?;
        check_status(&self.endpoint, response)?;
        Ok(())
    }
}

/// Program executor behind the editor server.
pub struct HttpExecutor {
    client: Client,
    endpoint: String,
}

impl HttpExecutor {
    pub fn new(settings: &Settings) -> Result<Self, RemoteError> {
        Ok(Self::with_client(build_client(settings)?, settings))
    }

    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint(PROGRAM_PATH),
        }
    }

    fn post(&self, request: &ProgramRequest<'_>) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| transport(&self.endpoint, e))?;
        check_status(&self.endpoint, response)?;
        Ok(())
    }
}

impl ExecutionControl for HttpExecutor {
    fn start(&self, script: &str) -> Result<(), RemoteError> {
        tracing::info!(endpoint = %self.endpoint, bytes = script.len(), "starting program");
        self.post(&ProgramRequest::start(script))
    }

    fn stop(&self) -> Result<(), RemoteError> {
        tracing::info!(endpoint = %self.endpoint, "stopping program");
        self.post(&ProgramRequest::stop())
    }
}
