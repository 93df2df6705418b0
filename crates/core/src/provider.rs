use crate::enumerator::enumerate;
use crate::placeholder;
use crate::resolver::ReferenceResolver;
use crate::settings::LensSettings;
use refscope_api::{
    CancellationToken, CodeLens, CodeLensProvider, EditorContext, LensError, LensResult,
    SourceUnit, SymbolIndex,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, warn};

/// Lenses backed by a workspace symbol index: `N references` on types and
/// methods, `N implementations` on interfaces and abstract types.
pub struct ReferencesLensProvider {
    index: Arc<dyn SymbolIndex>,
    settings: RwLock<Arc<LensSettings>>,
}

impl ReferencesLensProvider {
    pub fn new(index: Arc<dyn SymbolIndex>, settings: LensSettings) -> Self {
        Self {
            index,
            settings: RwLock::new(Arc::new(settings)),
        }
    }

    pub fn settings(&self) -> Arc<LensSettings> {
        match self.settings.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_settings(&self, settings: LensSettings) {
        let mut guard = match self.settings.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(settings);
    }

    fn collect_lenses(
        &self,
        unit: &dyn SourceUnit,
        cancel: &CancellationToken,
    ) -> LensResult<Vec<CodeLens>> {
        let settings = self.settings();
        let declarations = enumerate(unit, cancel)?;
        let mut lenses = Vec::with_capacity(declarations.len());
        for decl in &declarations {
            lenses.extend(placeholder::build(unit, decl, &settings)?);
        }
        if cancel.is_cancelled() {
            return Err(LensError::Cancelled);
        }
        Ok(lenses)
    }
}

impl CodeLensProvider for ReferencesLensProvider {
    fn produce(&self, ctx: &dyn EditorContext, cancel: &CancellationToken) -> Vec<CodeLens> {
        let Some(unit) = ctx.source_unit() else {
            return Vec::new();
        };
        if !unit.exists() || cancel.is_cancelled() {
            return Vec::new();
        }

        match self.collect_lenses(unit.as_ref(), cancel) {
            Ok(lenses) => {
                debug!("Placed {} lenses in {}", lenses.len(), unit.uri());
                lenses
            }
            Err(LensError::Cancelled) => {
                debug!("Lens production cancelled for {}", unit.uri());
                Vec::new()
            }
            Err(e) => {
                error!("Problem getting code lenses for {}: {}", unit.uri(), e);
                Vec::new()
            }
        }
    }

    fn resolve(
        &self,
        ctx: &dyn EditorContext,
        mut lens: CodeLens,
        cancel: &CancellationToken,
    ) -> CodeLens {
        let Some(unit) = ctx.source_unit() else {
            return lens;
        };

        let resolver = ReferenceResolver::new(self.index.as_ref());
        match resolver.count(unit.as_ref(), &lens.anchor, lens.kind, cancel) {
            Ok(Some(count)) => {
                let settings = self.settings();
                lens.set_count(count, settings.command_for(lens.kind));
            }
            Ok(None) => {}
            Err(LensError::Cancelled) => {
                debug!("Lens resolution cancelled in {}", unit.uri());
            }
            Err(e) => {
                warn!(
                    "Failed to resolve {:?} lens at {}:{} in {}: {}",
                    lens.kind,
                    lens.anchor.start_line,
                    lens.anchor.start_col,
                    unit.uri(),
                    e
                );
            }
        }
        lens
    }
}
