//! Process-wide S3 client.
//!
//! The Lambda handler pool shares one lazily-initialized client. The
//! `OnceCell` memoizes the in-flight initialization future, so concurrent
//! cold-start callers await the same connection attempt instead of racing
//! to build duplicate clients.

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use tokio::sync::OnceCell;

static S3_CLIENT: OnceCell<Client> = OnceCell::const_new();

/// The shared S3 client, initialized on first use.
pub async fn shared_client() -> &'static Client {
    S3_CLIENT
        .get_or_init(|| async {
            let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            tracing::info!("initialized shared S3 client");
            Client::new(&config)
        })
        .await
}

/// Build a standalone client from the ambient AWS config. Used by tools
/// that manage their own lifecycle; request paths use [`shared_client`].
pub async fn build_client() -> Client {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    Client::new(&config)
}
