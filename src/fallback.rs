use tracing::{debug, warn};

use crate::chat::{ChatClient, ChatMessage, ChatRequest};
use crate::error::Error;

/// Try each model in rank order and return the first successful completion.
///
/// A 404 for the first model means it is unavailable to this account and the
/// next one is tried silently. Every other failure is logged and remembered,
/// and the next model is still tried. `None` means the list was exhausted and
/// the caller should use its local fallback.
pub fn complete_ranked(
    client: &dyn ChatClient,
    models: &[String],
    messages: &[ChatMessage],
    temperature: Option<f32>,
) -> Option<String> {
    let mut last_error: Option<Error> = None;

    for (rank, model) in models.iter().enumerate() {
        let request = ChatRequest {
            model: model.clone(),
            messages: messages.to_vec(),
            temperature,
        };

        match client.complete(&request) {
            Ok(text) => return Some(text),
            Err(e) if rank == 0 && e.is_not_found() => {
                debug!(model = %model, "model not available, trying next");
            }
            Err(e) => {
                warn!(model = %model, error = %e, "API call failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => warn!(error = %e, "all model attempts failed"),
        None => warn!("all model attempts failed"),
    }
    None
}
