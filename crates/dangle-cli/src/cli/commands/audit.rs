//! `dangle audit` - walk a zone and write the two reports.

use anyhow::{Context as _, Result};
use dangle::audit::{
    Audit, Auditor, Inventory, MatcherSpec, ReportFormat, Reporter, RipeDomains, ZoneWalker,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::Context;
use crate::cli::args::AuditArgs;
use crate::config::{expand_path, Config};
use crate::output;

/// Audit settings after merging flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSettings {
    pub zone_id: String,
    pub ip_inventory: PathBuf,
    pub name_inventory: PathBuf,
    pub recognized: PathBuf,
    pub unknown: PathBuf,
    pub format: ReportFormat,
    pub page_size: Option<u32>,
    pub ripe_domains: Vec<MatcherSpec>,
}

impl AuditSettings {
    pub fn resolve(config: &Config, args: AuditArgs) -> Result<Self> {
        let zone_id = args
            .zone_id
            .or_else(|| config.zone_id.clone())
            .filter(|zone| !zone.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Zone ID required.\n\n\
                     Set it with one of:\n  \
                     1. --zone-id <ID>\n  \
                     2. DANGLE_ZONE_ID environment variable\n  \
                     3. dangle config set zone_id <ID>"
                )
            })?;

        let mut ripe_domains = config.ripe_domains.clone();
        ripe_domains.extend(args.ripe_domains.into_iter().map(|suffix| MatcherSpec::Suffix {
            suffix,
            annotation: None,
        }));

        Ok(Self {
            zone_id,
            ip_inventory: path_or(args.ip_inventory, &config.ip_inventory)?,
            name_inventory: path_or(args.name_inventory, &config.name_inventory)?,
            recognized: path_or(args.recognized, &config.recognized_report)?,
            unknown: path_or(args.unknown, &config.unknown_report)?,
            format: args.format.unwrap_or(config.format),
            page_size: args.page_size.or(config.page_size),
            ripe_domains,
        })
    }
}

fn path_or(flag: Option<PathBuf>, configured: &str) -> Result<PathBuf> {
    flag.map_or_else(|| expand_path(configured), Ok)
}

fn create_report(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub async fn execute(ctx: Context, args: AuditArgs) -> Result<()> {
    let settings = AuditSettings::resolve(&ctx.config, args)?;

    let inventory = Inventory::load(&settings.ip_inventory, &settings.name_inventory)?;

    let ripe = RipeDomains::with_specs(&settings.ripe_domains)
        .context("invalid ripe domain configuration")?;
    let client = ctx.client()?;

    let mut reporter = Reporter::new(
        create_report(&settings.recognized)?,
        create_report(&settings.unknown)?,
        settings.format,
    )?;

    let bar = output::spinner(ctx.verbose == 0);
    let walker = ZoneWalker::new(&client, settings.zone_id.as_str()).page_size(settings.page_size);
    let outcome = Audit::new(walker, Auditor::new(&inventory, &ripe))
        .on_progress(|summary| bar.set_message(output::progress_message(summary)))
        .run(&mut reporter)
        .await;
    bar.finish_and_clear();

    let summary = outcome.with_context(|| {
        format!(
            "audit of zone {} stopped; lines already written to {} and {} are valid",
            settings.zone_id,
            settings.recognized.display(),
            settings.unknown.display()
        )
    })?;
    reporter.into_inner()?;

    output::print_summary(&summary, &settings.recognized, &settings.unknown, ctx.output_format)
}
