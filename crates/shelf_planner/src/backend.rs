//! Worker thread talking to the recommendation backend.
//!
//! The UI never blocks on the network: requests go into a channel, a
//! dedicated thread owns the blocking HTTP client, and responses come back
//! over a second channel that the app polls once per frame. One request is
//! in flight per form at most; the submit buttons are disabled while their
//! request is pending, so responses can be matched to forms by variant.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use log::{debug, error, info};
use serde::de::DeserializeOwned;

use shelf_core::api::{
    BulkResponse, CabinetPayload, ModelChoice, OptimizationGoal, PlaygroundResponse,
    PredictRequest, PredictResponse,
};
use shelf_core::config::PlannerConfig;

#[derive(Debug, Clone)]
pub enum BackendRequest {
    Predict {
        product_name: String,
        model: ModelChoice,
    },
    PredictBulk {
        csv_path: PathBuf,
        model: ModelChoice,
    },
    Playground {
        cabinets: Vec<CabinetPayload>,
        csv_path: PathBuf,
        model: ModelChoice,
        goal: OptimizationGoal,
    },
}

#[derive(Debug)]
pub enum BackendResponse {
    Predict(Result<PredictResponse, String>),
    Bulk(Result<BulkResponse, String>),
    Playground(Result<PlaygroundResponse, String>),
}

pub struct BackendClient {
    tx: Sender<BackendRequest>,
    rx: Receiver<BackendResponse>,
}

impl BackendClient {
    pub fn spawn(config: &PlannerConfig) -> Self {
        let (req_tx, req_rx) = channel::<BackendRequest>();
        let (res_tx, res_rx) = channel::<BackendResponse>();

        let base_url = config.backend.base_url.trim_end_matches('/').to_string();
        let connect_timeout = Duration::from_secs(config.backend.connect_timeout_secs);

        thread::spawn(move || {
            let client = match reqwest::blocking::Client::builder()
                .connect_timeout(connect_timeout)
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to build HTTP client: {e}");
                    return;
                }
            };

            while let Ok(request) = req_rx.recv() {
                let response = dispatch(&client, &base_url, request);
                if res_tx.send(response).is_err() {
                    // UI side is gone, stop the worker
                    break;
                }
            }
        });

        Self {
            tx: req_tx,
            rx: res_rx,
        }
    }

    pub fn submit(&self, request: BackendRequest) {
        if self.tx.send(request).is_err() {
            error!("Backend worker is no longer running");
        }
    }

    /// Non-blocking poll, called once per frame by the app.
    pub fn try_recv(&self) -> Option<BackendResponse> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: Duration) -> Option<BackendResponse> {
        self.rx.recv_timeout(timeout).ok()
    }
}

fn dispatch(
    client: &reqwest::blocking::Client,
    base_url: &str,
    request: BackendRequest,
) -> BackendResponse {
    match request {
        BackendRequest::Predict {
            product_name,
            model,
        } => {
            info!("POST /predict ({product_name})");
            BackendResponse::Predict(post_predict(client, base_url, &product_name, model))
        }
        BackendRequest::PredictBulk { csv_path, model } => {
            info!("POST /predict_bulk ({})", csv_path.display());
            BackendResponse::Bulk(post_bulk(client, base_url, &csv_path, model))
        }
        BackendRequest::Playground {
            cabinets,
            csv_path,
            model,
            goal,
        } => {
            info!(
                "POST /playground_recommend ({} shelves, {})",
                cabinets.len(),
                csv_path.display()
            );
            BackendResponse::Playground(post_playground(
                client, base_url, &cabinets, &csv_path, model, goal,
            ))
        }
    }
}

fn post_predict(
    client: &reqwest::blocking::Client,
    base_url: &str,
    product_name: &str,
    model: ModelChoice,
) -> Result<PredictResponse, String> {
    let body = PredictRequest {
        product_name: product_name.to_string(),
        model_choice: model,
    };
    let response = client
        .post(format!("{base_url}/predict"))
        .json(&body)
        .send()
        .map_err(|e| e.to_string())?;
    decode(response)
}

fn post_bulk(
    client: &reqwest::blocking::Client,
    base_url: &str,
    csv_path: &PathBuf,
    model: ModelChoice,
) -> Result<BulkResponse, String> {
    let form = reqwest::blocking::multipart::Form::new()
        .file("csv_file", csv_path)
        .map_err(|e| format!("Could not read '{}': {}", csv_path.display(), e))?
        .text("model_choice", model.as_wire());

    let response = client
        .post(format!("{base_url}/predict_bulk"))
        .multipart(form)
        .send()
        .map_err(|e| e.to_string())?;
    decode(response)
}

fn post_playground(
    client: &reqwest::blocking::Client,
    base_url: &str,
    cabinets: &[CabinetPayload],
    csv_path: &PathBuf,
    model: ModelChoice,
    goal: OptimizationGoal,
) -> Result<PlaygroundResponse, String> {
    let cabinets_json = serde_json::to_string(cabinets).map_err(|e| e.to_string())?;
    let form = reqwest::blocking::multipart::Form::new()
        .text("cabinets", cabinets_json)
        .file("csv_file", csv_path)
        .map_err(|e| format!("Could not read '{}': {}", csv_path.display(), e))?
        .text("model_choice", model.as_wire())
        .text("time_goal", goal.as_wire());

    let response = client
        .post(format!("{base_url}/playground_recommend"))
        .multipart(form)
        .send()
        .map_err(|e| e.to_string())?;
    decode(response)
}

/// Decodes a JSON body regardless of HTTP status: the backend reports
/// application errors as JSON with an `error` field, sometimes on non-2xx
/// statuses. Only an undecodable body falls back to the status line.
fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, String> {
    let status = response.status();
    let text = response.text().map_err(|e| e.to_string())?;
    debug!("response status {} ({} bytes)", status, text.len());

    match serde_json::from_str::<T>(&text) {
        Ok(decoded) => Ok(decoded),
        Err(_) if !status.is_success() => Err(format!("HTTP error! status: {}", status.as_u16())),
        Err(e) => Err(format!("Invalid response body: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_backend_reports_transport_error() {
        // Nothing listens on port 1, the connection is refused immediately
        let mut config = PlannerConfig::default();
        config.backend.base_url = "http://127.0.0.1:1".to_string();
        config.backend.connect_timeout_secs = 1;

        let client = BackendClient::spawn(&config);
        client.submit(BackendRequest::Predict {
            product_name: "süt".to_string(),
            model: ModelChoice::NaiveBayes,
        });

        match client.recv_timeout(Duration::from_secs(10)) {
            Some(BackendResponse::Predict(Err(_))) => {}
            other => panic!("expected a transport error, got {other:?}"),
        }
    }
}
