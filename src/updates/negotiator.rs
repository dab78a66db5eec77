use std::collections::HashSet;

use super::dto::{parse_revision, LocaleBundle, SubjectUpdates};
use super::installed::InstalledLocales;

/// Decides which advertised locale bundles are genuine updates for one
/// subject, and answers the targeted single-subject inquiry.
pub struct UpdateNegotiator {
    subject_id: String,
}

impl UpdateNegotiator {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Batch "what's new" path: keeps a candidate only when its language is
    /// enabled on this installation and the local install (if any) is older.
    /// Malformed records are dropped individually and never abort the batch.
    pub fn list_eligible_updates(
        &self,
        candidates: &[LocaleBundle],
        installed: &dyn InstalledLocales,
        supported: &HashSet<String>,
    ) -> Vec<LocaleBundle> {
        let mut eligible = Vec::new();

        for bundle in candidates {
            if bundle.language.is_empty() || !supported.contains(&bundle.language) {
                tracing::debug!(
                    "Skipping {} bundle for unsupported language {:?}",
                    self.subject_id,
                    bundle.language
                );
                continue;
            }

            let Some(remote_revised) = bundle.revised_at() else {
                tracing::warn!(
                    "Skipping {} {} bundle with unparsable revision {:?}",
                    self.subject_id,
                    bundle.language,
                    bundle.updated_at
                );
                continue;
            };

            if let Some(record) = installed.get(&self.subject_id, &bundle.language) {
                if let Some(raw) = record.revision.as_deref() {
                    // Fail closed: an unreadable local revision must never
                    // cause an overwrite offer.
                    let Some(local_revised) = parse_revision(raw) else {
                        tracing::warn!(
                            "Skipping {} {} bundle: installed revision {:?} is unparsable",
                            self.subject_id,
                            bundle.language,
                            raw
                        );
                        continue;
                    };

                    if local_revised >= remote_revised {
                        continue;
                    }
                }
            }

            eligible.push(bundle.clone());
        }

        eligible
    }

    /// Targeted path: a direct inquiry for one subject gets the full,
    /// unfiltered bundle list; any other subject passes through.
    pub fn resolve_updates_for_subject(
        &self,
        requested_subject: &str,
        candidates: &[LocaleBundle],
    ) -> SubjectUpdates {
        if requested_subject == self.subject_id {
            SubjectUpdates::Bundles(candidates.to_vec())
        } else {
            SubjectUpdates::NotApplicable
        }
    }
}
