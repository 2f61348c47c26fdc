use aws_config::SdkConfig;
use aws_sdk_s3::Client as S3Client;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    /// Ambient AWS config, handed to the agent boundary per invocation.
    pub aws_config: SdkConfig,
    pub bucket: String,
    /// Bedrock inference profile used for all agent invocations.
    pub model_id: String,
}
