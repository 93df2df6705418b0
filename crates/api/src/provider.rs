use crate::models::CodeLens;
use crate::unit::EditorContext;
use tokio_util::sync::CancellationToken;

/// Two-phase lens capability: place unresolved lenses, then label them on
/// demand.
///
/// Neither operation fails. A failed or cancelled `produce` yields no
/// lenses; a failed or cancelled `resolve` hands the lens back unchanged.
pub trait CodeLensProvider: Send + Sync {
    fn produce(&self, ctx: &dyn EditorContext, cancel: &CancellationToken) -> Vec<CodeLens>;

    fn resolve(
        &self,
        ctx: &dyn EditorContext,
        lens: CodeLens,
        cancel: &CancellationToken,
    ) -> CodeLens;
}
