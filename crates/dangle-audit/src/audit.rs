//! Classification and the audit driver.

use chrono::Utc;
use dangle_core::{ClassificationResult, RecordSetSource, RecordType, Result, ZoneRecord};
use futures_util::{pin_mut, TryStreamExt};
use std::io::Write;
use tracing::{info, warn};

use crate::classifier::RipeDomains;
use crate::extract::{extract, targets};
use crate::inventory::Inventory;
use crate::report::{AuditSummary, MalformedRecord, Reporter};
use crate::walker::ZoneWalker;

/// Classifies normalized records against the inventory
#[derive(Debug, Clone, Copy)]
pub struct Auditor<'a> {
    inventory: &'a Inventory,
    ripe: &'a RipeDomains,
}

impl<'a> Auditor<'a> {
    /// Classify against `inventory`, annotating with `ripe`
    #[must_use]
    pub const fn new(inventory: &'a Inventory, ripe: &'a RipeDomains) -> Self {
        Self { inventory, ripe }
    }

    /// One result per target of `record`, all sharing `sequence`.
    ///
    /// Alias targets are looked up among known names and never get a ripe
    /// annotation. Literal A targets are looked up among known addresses,
    /// literal CNAME targets among known names.
    #[must_use]
    pub fn classify(&self, record: &ZoneRecord, sequence: u64) -> Vec<ClassificationResult> {
        targets(record)
            .into_iter()
            .map(|target| {
                let recognized = if target.is_alias {
                    self.inventory.is_known_name(&target.value)
                } else {
                    match record.record_type {
                        RecordType::A => self.inventory.is_known_ip(&target.value),
                        RecordType::Cname => self.inventory.is_known_name(&target.value),
                    }
                };
                let ripe = if target.is_alias {
                    None
                } else {
                    self.ripe.classify(&target.value).map(String::from)
                };

                ClassificationResult {
                    sequence,
                    name: record.name.clone(),
                    record_type: record.record_type,
                    target: target.value,
                    alias: target.is_alias,
                    ripe,
                    recognized,
                }
            })
            .collect()
    }
}

type ProgressFn<'a> = Box<dyn FnMut(&AuditSummary) + 'a>;

/// One pass over a zone
pub struct Audit<'a, S: ?Sized> {
    walker: ZoneWalker<'a, S>,
    auditor: Auditor<'a>,
    progress: Option<ProgressFn<'a>>,
}

impl<'a, S: RecordSetSource + ?Sized> Audit<'a, S> {
    /// Audit the zone behind `walker`
    #[must_use]
    pub fn new(walker: ZoneWalker<'a, S>, auditor: Auditor<'a>) -> Self {
        Self {
            walker,
            auditor,
            progress: None,
        }
    }

    /// Call `f` with the running totals after every page
    #[must_use]
    pub fn on_progress(mut self, f: impl FnMut(&AuditSummary) + 'a) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Walk the zone and write every classified target to `reporter`.
    ///
    /// Sequence numbers count A and CNAME records from zero in zone order.
    /// Malformed records are logged, kept in the summary and skipped. A
    /// failed page request stops the walk; lines already written stay, and
    /// are flushed page by page.
    pub async fn run<R: Write, U: Write>(
        mut self,
        reporter: &mut Reporter<R, U>,
    ) -> Result<AuditSummary> {
        let mut summary = AuditSummary::start(self.walker.zone_id());
        let mut position: u64 = 0;
        let mut sequence: u64 = 0;

        info!(zone_id = %summary.zone_id, "starting zone walk");

        let pages = self.walker.pages();
        pin_mut!(pages);

        loop {
            let page = match pages.try_next().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(err) => {
                    reporter.flush()?;
                    warn!(
                        zone_id = %summary.zone_id,
                        pages = summary.pages,
                        records = summary.records,
                        error = %err,
                        "zone walk aborted"
                    );
                    return Err(err);
                }
            };
            summary.pages += 1;

            for raw in &page.resource_record_sets {
                match extract(raw) {
                    Ok(Some(record)) => {
                        for result in self.auditor.classify(&record, sequence) {
                            let stream = reporter.report(&result)?;
                            summary.count(stream);
                        }
                        sequence += 1;
                        summary.records += 1;
                    }
                    Ok(None) => summary.skipped += 1,
                    Err(err) => {
                        let malformed = MalformedRecord::new(position, &err);
                        reporter.report_malformed(&malformed);
                        summary.malformed.push(malformed);
                    }
                }
                position += 1;
            }

            reporter.flush()?;
            if let Some(progress) = self.progress.as_mut() {
                progress(&summary);
            }
        }

        summary.finished_at = Some(Utc::now());
        info!(
            zone_id = %summary.zone_id,
            pages = summary.pages,
            records = summary.records,
            recognized = summary.recognized,
            unknown = summary.unknown,
            malformed = summary.malformed.len(),
            "zone walk complete"
        );

        Ok(summary)
    }
}
