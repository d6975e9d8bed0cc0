//! The merge engine facade.
//!
//! One batch at a time: reconcile every category, normalize geography once
//! the category names are final, then audit. Pruning runs separately, on
//! demand, against the full archive.

use lore_model::{Codex, DocumentIndex, ExtractionBatch};

use crate::audit::{audit, AuditWarning};
use crate::config::CodexConfig;
use crate::geo;
use crate::merge::{merge_batch, MergeReport};
use crate::prune::{prune, PruneReport};

/// Everything one batch run produced.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub report: MergeReport,
    pub warnings: Vec<AuditWarning>,
}

/// The engine: configuration plus the staged merge pipeline.
pub struct MergeEngine {
    config: CodexConfig,
}

impl MergeEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: CodexConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CodexConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &CodexConfig {
        &self.config
    }

    /// Merge one extraction batch into the codex.
    ///
    /// Field reconciliation finishes for every category before geographic
    /// normalization runs, because the normalizer depends on finalized
    /// place/region/realm names. The audit is advisory and never blocks.
    pub fn run_batch(&self, codex: &mut Codex, batch: &ExtractionBatch) -> BatchOutcome {
        let report = merge_batch(codex, batch);
        geo::normalize(codex, &self.config);
        let warnings = audit(codex);
        BatchOutcome { report, warnings }
    }

    /// Re-validate all provenance against the full document archive.
    pub fn prune(&self, codex: &mut Codex, documents: &DocumentIndex) -> PruneReport {
        prune(codex, documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::{
        CharacterRecord, ExtractedEntities, PlaceRecord, PolityRecord, SourceDocument,
    };

    #[test]
    fn test_run_batch_merges_normalizes_and_audits() {
        let engine = MergeEngine::with_defaults();
        let mut codex = Codex::new();

        let mut crown = PolityRecord::new("The Crown of Ashmere");
        crown.realm = "Realm of Ashmere".into();
        crown.sovereigns = vec!["Queen Maravel".into()];
        crown.status = "stable".into();
        let mut regency = PolityRecord::new("The Regency of Ashmere");
        regency.realm = "Realm of Ashmere".into();
        regency.sovereigns = vec!["Lord Protector Huln".into()];
        regency.status = "stable".into();

        let batch = ExtractionBatch {
            documents: vec![SourceDocument::new(
                "2026-03-01",
                "The Black Gate",
                "Kael rode north to Ashmere.",
            )],
            extracted_entities: ExtractedEntities {
                characters: vec![CharacterRecord::new("Kael")],
                places: vec![PlaceRecord::new("Ashmere")],
                polities: vec![crown, regency],
                ..ExtractedEntities::default()
            },
        };

        let outcome = engine.run_batch(&mut codex, &batch);

        assert_eq!(outcome.report.created(), 4);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(codex.places[0].geo.continent, "unknown");
        assert_eq!(codex.last_updated, "2026-03-01");
    }

    #[test]
    fn test_batch_reapplied_creates_nothing() {
        let engine = MergeEngine::with_defaults();
        let mut codex = Codex::new();
        let batch = ExtractionBatch {
            documents: Vec::new(),
            extracted_entities: ExtractedEntities {
                characters: vec![CharacterRecord::new("Kael the Nameless")],
                ..ExtractedEntities::default()
            },
        };

        engine.run_batch(&mut codex, &batch);
        let outcome = engine.run_batch(&mut codex, &batch);

        assert_eq!(codex.characters.len(), 1);
        assert_eq!(outcome.report.created(), 0);
        assert_eq!(outcome.report.merged(), 1);
    }
}
