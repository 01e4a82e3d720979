use crate::models::args::ResolveArgs;
use crate::services::output::{read_document, render_settings};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rcfg::domain::settings::ContextDefaults;
use rcfg::engine::schedule::parse_timestamp;
use rcfg::kernel::clock::Clock;
use rcfg::signing::decode_public_key;
use rcfg::{Ed25519Verifier, RemoteConfig, RemoteConfigExt, ResolutionContext, SignedEnvelope, Version};
use std::iter;
use tracing::debug;

/// Prints the settings a client sees now (or at `--date`) and at every later date where the
/// answer may change.
///
/// `--public-key` always verifies. A key from the settings file is used only when the input is a
/// signed envelope, so unsigned drafts still resolve with one configured.
///
/// # Errors
/// Returns an error if the document cannot be read or verified, or a flag does not parse.
pub fn resolve_config(
    args: &ResolveArgs,
    defaults: &ContextDefaults,
    public_key: Option<&str>,
    clock: &dyn Clock,
) -> Result<()> {
    let bytes = read_document(&args.input)?;
    let config = load_document(&bytes, args.public_key.as_deref(), public_key)?;

    let date = resolution_date(args.date.as_deref(), clock)?;
    let context = build_context(args, defaults)?;
    debug!(%date, ?context, "Resolving");

    print_context(&context);

    let mut dates: Vec<_> = iter::once(date).chain(config.upcoming_resolution_dates(&date, &context)).collect();
    dates.dedup();

    for date in dates {
        println!();
        println!("Settings on {}:", date.to_rfc3339());
        for line in render_settings(config.settings(), &config.resolve(&date, &context)) {
            println!("{line}");
        }
    }

    println!();
    println!("No further overrides scheduled.");

    Ok(())
}

fn load_document(bytes: &[u8], flag: Option<&str>, configured: Option<&str>) -> Result<RemoteConfig> {
    if let Some(encoded) = flag {
        return open_signed(bytes, encoded);
    }

    if !SignedEnvelope::is_envelope(bytes) {
        return Ok(RemoteConfig::from_slice(bytes)?);
    }

    match configured.filter(|encoded| !encoded.trim().is_empty()) {
        Some(encoded) => open_signed(bytes, encoded),
        None => bail!("The document is signed, pass --public-key or set keys.public_key"),
    }
}

fn open_signed(bytes: &[u8], encoded: &str) -> Result<RemoteConfig> {
    let key = decode_public_key(encoded)?;
    Ok(RemoteConfig::from_signed(bytes, &key, &Ed25519Verifier)?)
}

/// Flags first, then the settings file defaults.
///
/// # Errors
/// Returns an error if a version is not a semantic version.
pub fn build_context(args: &ResolveArgs, defaults: &ContextDefaults) -> Result<ResolutionContext> {
    let platform_version = args.platform_version.as_deref().unwrap_or(&defaults.platform_version);
    let app_version = args.app_version.as_deref().unwrap_or(&defaults.app_version);

    Ok(ResolutionContext {
        platform: args.platform.unwrap_or(defaults.platform),
        platform_version: Version::parse(platform_version).context("Invalid platform version")?,
        app_version: Version::parse(app_version).context("Invalid app version")?,
        variant: args.variant.clone().or_else(|| defaults.variant.clone()),
        build_variant: args.build_variant.unwrap_or(defaults.build_variant),
        language: args.language.clone().or_else(|| defaults.language.clone()),
    })
}

fn resolution_date(raw: Option<&str>, clock: &dyn Clock) -> Result<DateTime<Utc>> {
    raw.map_or_else(
        || Ok(clock.now()),
        |raw| parse_timestamp(raw).with_context(|| format!("Invalid date '{raw}', expected ISO 8601")),
    )
}

fn print_context(context: &ResolutionContext) {
    println!("Resolving for:");
    println!("  platform            : {}", context.platform);
    println!("  platform version    : {}", context.platform_version);
    println!("  app version         : {}", context.app_version);
    if let Some(variant) = &context.variant {
        println!("  variant             : {variant}");
    }
    println!("  build variant       : {}", context.build_variant);
    if let Some(language) = &context.language {
        println!("  language            : {language}");
    }
}
