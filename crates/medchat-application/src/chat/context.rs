use super::controller::ChatController;
use medchat_core::context::ContextBadge;
use medchat_core::error::Result;

impl ChatController {
    /// Fetches the patient context, caches it and updates the badge.
    ///
    /// When the service cannot be reached or answers garbage the badge
    /// reads "Context unavailable"; other failures leave it as it was.
    pub async fn load_context(&self) -> Result<()> {
        match self.api.fetch_context().await {
            Ok(context) => {
                tracing::info!(
                    language = context.preferred_language.as_deref().unwrap_or("-"),
                    cancer_type = context.main_cancer_type.as_deref().unwrap_or("-"),
                    fallback = context.is_fallback,
                    "Loaded chat context"
                );
                self.view.set_context_badge(&context.badge());
                self.state.write().await.context = Some(context);
                Ok(())
            }
            Err(err) => {
                if err.is_network() || err.is_serialization() {
                    self.view.set_context_badge(&ContextBadge::unavailable());
                }
                Err(err)
            }
        }
    }
}
