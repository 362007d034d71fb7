//! Command handlers

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Cli, Commands, OutputFormat, RangeArgs};
use crate::output::{output_candidates, output_summary};
use vahan_app::app::{CacheOnlyLookup, CheckOptions, CheckOutcome, CheckPlan, CheckProgress};
use vahan_app::config::Config;
use vahan_app::repository::{
    create_report, open_registry_lookup, open_status_cache, open_status_cache_at,
};
use vahan_domain::repository::RegistryLookup;
use vahan_domain::service::generate_classified;
use vahan_types::Result;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Generate { range } => {
            let config = apply_range(config.clone(), range);
            cmd_generate(&config, output_format)
        }

        Commands::Check {
            range,
            refresh,
            limit,
            report,
            cache,
            lookup_cmd,
            delay_ms,
        } => {
            let mut config = apply_range(config.clone(), range);
            if let Some(path) = report {
                config.report_path = path.clone();
            }
            if let Some(path) = cache {
                config.cache_path = Some(path.clone());
            }
            if let Some(cmd) = lookup_cmd {
                config.lookup_command = Some(cmd.clone());
            }
            if let Some(ms) = delay_ms {
                config.lookup_delay_ms = *ms;
            }
            cmd_check(&config, *refresh, *limit, output_format)
        }

        Commands::Config {
            show,
            set_prefix,
            set_start,
            set_end,
            set_include_others,
            set_lookup_cmd,
            set_delay_ms,
            set_cache_path,
            set_report_path,
            set_output,
            reset,
        } => cmd_config(
            *show,
            ConfigUpdate {
                prefix: set_prefix.clone(),
                start: *set_start,
                end: *set_end,
                include_others: *set_include_others,
                lookup_command: set_lookup_cmd.clone(),
                lookup_delay_ms: *set_delay_ms,
                cache_path: set_cache_path.clone(),
                report_path: set_report_path.clone(),
                output_format: *set_output,
            },
            *reset,
        ),

        Commands::Cache {
            clear,
            stats,
            get,
            forget,
            path,
        } => cmd_cache(
            &config,
            path.clone(),
            *clear,
            *stats,
            get.as_deref(),
            forget.as_deref(),
        ),
    }
}

/// Override config range settings with CLI arguments for this run
fn apply_range(mut config: Config, range: &RangeArgs) -> Config {
    if let Some(ref prefix) = range.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(start) = range.start {
        config.start = start;
    }
    if let Some(end) = range.end {
        config.end = end;
    }
    if let Some(include_others) = range.include_others() {
        config.include_others = include_others;
    }
    config
}

fn cmd_generate(config: &Config, output_format: OutputFormat) -> Result<()> {
    let candidates = generate_classified(
        &config.prefix,
        config.start,
        config.end,
        config.include_others,
    )?;
    output_candidates(output_format, &candidates)
}

fn cmd_check(
    config: &Config,
    refresh: bool,
    limit: Option<usize>,
    output_format: OutputFormat,
) -> Result<()> {
    let options = CheckOptions::from_config(config)
        .with_refresh(refresh)
        .with_limit(limit);
    let plan = CheckPlan::new(options)?;

    if plan.candidates().is_empty() {
        println!(
            "No candidates in {}..={} (use --include-others to list every number)",
            config.start, config.end
        );
        return Ok(());
    }

    let mut cache = open_status_cache(config)?;
    let pending = plan.pending_lookups(&cache);
    debug!(
        candidates = plan.candidates().len(),
        pending,
        cache = %cache.path().display(),
        "check plan ready"
    );

    let lookup = select_lookup(config, pending)?;

    let mut report = create_report(&config.report_path)?;

    let pb = ProgressBar::new(plan.candidates().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    if pending > 0 {
        pb.enable_steady_tick(Duration::from_millis(200));
    }

    let mut on_progress = |p: CheckProgress<'_>| {
        let msg = match p.outcome {
            CheckOutcome::Cached(status) => format!("{} {} (cached)", p.candidate, status),
            CheckOutcome::Checked(status) => format!("{} {}", p.candidate, status),
            CheckOutcome::Failed(_) => format!("{} failed", p.candidate),
        };
        pb.set_message(msg);
        pb.inc(1);
    };

    let summary = plan.run(&mut cache, &mut report, lookup.as_ref(), Some(&mut on_progress));
    pb.finish_with_message("Complete");
    let summary = summary?;

    eprintln!("Report saved to: {}", config.report_path.display());
    output_summary(output_format, &summary)
}

/// Only insist on a lookup command when something is not cached
fn select_lookup(config: &Config, pending: usize) -> Result<Box<dyn RegistryLookup>> {
    if pending > 0 {
        Ok(Box::new(open_registry_lookup(config)?))
    } else {
        Ok(Box::new(CacheOnlyLookup))
    }
}

/// Config values to change; `None` leaves a value as is
#[derive(Debug, Default)]
struct ConfigUpdate {
    prefix: Option<String>,
    start: Option<i64>,
    end: Option<i64>,
    include_others: Option<bool>,
    lookup_command: Option<String>,
    lookup_delay_ms: Option<u64>,
    cache_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    output_format: Option<OutputFormat>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.include_others.is_none()
            && self.lookup_command.is_none()
            && self.lookup_delay_ms.is_none()
            && self.cache_path.is_none()
            && self.report_path.is_none()
            && self.output_format.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(include_others) = self.include_others {
            config.include_others = include_others;
        }
        if let Some(cmd) = self.lookup_command {
            // An empty string unsets the command
            config.lookup_command = Some(cmd).filter(|c| !c.trim().is_empty());
        }
        if let Some(ms) = self.lookup_delay_ms {
            config.lookup_delay_ms = ms;
        }
        if let Some(path) = self.cache_path {
            config.cache_path = Some(path);
        }
        if let Some(path) = self.report_path {
            config.report_path = path;
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
        }
    }
}

fn cmd_config(show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = !update.is_empty();

    if modified {
        update.apply(&mut config);
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn cmd_cache(
    config: &Config,
    path: Option<PathBuf>,
    clear: bool,
    stats: bool,
    get: Option<&str>,
    forget: Option<&str>,
) -> Result<()> {
    let mut cache = match path {
        Some(ref path) => open_status_cache_at(path)?,
        None => open_status_cache(config)?,
    };

    if let Some(candidate) = get {
        match cache.get(candidate) {
            Some(status) => println!("{}: {}", candidate, status),
            None => println!("{}: not cached", candidate),
        }
    }

    if let Some(candidate) = forget {
        if cache.remove(candidate)? {
            println!("Removed cached status for {}", candidate);
        } else {
            println!("{} was not cached", candidate);
        }
    }

    if clear {
        let count = cache.clear()?;
        println!("Cleared {} cached entries", count);
    }

    let nothing_else = !clear && get.is_none() && forget.is_none();
    if stats || nothing_else {
        println!("{}", cache.stats().display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vahan_types::{Error, LookupError};

    fn range(prefix: Option<&str>, start: Option<i64>, end: Option<i64>) -> RangeArgs {
        RangeArgs {
            prefix: prefix.map(str::to_string),
            start,
            end,
            include_others: false,
            fancy_only: false,
        }
    }

    #[test]
    fn test_apply_range_overrides_only_given_values() {
        let config = apply_range(Config::default(), &range(Some("KA01AB"), None, Some(1500)));
        assert_eq!(config.prefix, "KA01AB");
        assert_eq!(config.start, Config::default().start);
        assert_eq!(config.end, 1500);
        assert_eq!(config.include_others, Config::default().include_others);
    }

    #[test]
    fn test_apply_range_include_flags() {
        let mut args = range(None, None, None);
        args.fancy_only = true;
        assert!(!apply_range(Config::default(), &args).include_others);

        let mut base = Config::default();
        base.include_others = false;
        let mut args = range(None, None, None);
        args.include_others = true;
        assert!(apply_range(base, &args).include_others);
    }

    #[test]
    fn test_config_update_empty() {
        assert!(ConfigUpdate::default().is_empty());
        let update = ConfigUpdate {
            lookup_delay_ms: Some(0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_config_update_sets_and_unsets_lookup_command() {
        let mut config = Config::default();
        ConfigUpdate {
            lookup_command: Some("node check.js".to_string()),
            start: Some(1),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.lookup_command.as_deref(), Some("node check.js"));
        assert_eq!(config.start, 1);
        assert_eq!(config.end, Config::default().end);
        assert_eq!(config.output_format, OutputFormat::Json);

        // An empty or blank command unsets it
        ConfigUpdate {
            lookup_command: Some("  ".to_string()),
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.lookup_command, None);
    }

    #[test]
    fn test_select_lookup_without_pending_needs_no_command() {
        let config = Config::default();
        assert!(config.lookup_command.is_none());

        let lookup = select_lookup(&config, 0).unwrap();
        assert!(matches!(
            lookup.lookup("TN09DE1111"),
            Err(LookupError::NotConfigured)
        ));
    }

    #[test]
    fn test_select_lookup_with_pending_requires_command() {
        let mut config = Config::default();
        assert!(matches!(
            select_lookup(&config, 3),
            Err(Error::Lookup(LookupError::NotConfigured))
        ));

        config.lookup_command = Some("node check.js".to_string());
        assert!(select_lookup(&config, 3).is_ok());
    }
}
