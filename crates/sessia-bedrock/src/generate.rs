use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::info;
use uuid::Uuid;

use sessia_core::models::ai_report::{AiReportContent, ReportKind};
use sessia_core::models::client::Client as ClientRecord;
use sessia_core::models::session::Session;

use crate::error::AgentError;
use crate::parse::parse_content;
use crate::prompt;

/// Run one agent invocation: assemble the prompt pair for `kind`, invoke
/// the Converse API, and parse the structured response.
///
/// The caller persists the result as an AiReport; this function has no
/// side effects beyond the model call.
pub async fn generate_report_content(
    config: &aws_config::SdkConfig,
    model_id: &str,
    kind: ReportKind,
    record: &ClientRecord,
    sessions: &[Session],
    instructions: Option<&str>,
) -> Result<AiReportContent, AgentError> {
    let client = Client::new(config);

    let invocation_id = Uuid::new_v4();
    info!(invocation_id = %invocation_id, model = model_id, kind = %kind, "starting report generation");

    let system_prompt = prompt::system_prompt(kind);
    let user_message = prompt::user_message(record, sessions, instructions);

    let response_text = invoke_converse(&client, model_id, &system_prompt, &user_message).await?;

    let content = parse_content(kind, &response_text)?;

    info!(invocation_id = %invocation_id, kind = %kind, "report generation complete");

    Ok(content)
}

/// Core invocation using the Bedrock Converse API. Returns the response
/// text.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<String, AgentError> {
    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(
            Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(user_message.to_string()))
                .build()
                .map_err(|e| AgentError::Invocation(e.to_string()))?,
        )
        .send()
        .await
        .map_err(|e| AgentError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| AgentError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    Ok(response_text)
}
