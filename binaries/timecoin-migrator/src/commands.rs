//! Running a [`Command`] and printing its result.

use std::{fmt::Display, io::Write};

use anyhow::{bail, Context};
use serde::Serialize;

use timecoin_helper::fmt::short_hash;
use timecoin_kv::{KeyScheme, RedbStore, Store};
use timecoin_migrate::{
    inspect, migrate_range, probe, prune_legacy, KeyProbe, MigrateOptions, Report, Tally,
};
use timecoin_types::{BlockHeaderV1, DecodedHeader, Hash256, LegacyLayout};

use crate::config::{Command, Config};

/// Open the block store of `config` and run `command` on it, printing to stdout.
///
/// # Errors
/// If the store does not exist or cannot be opened, if the command fails,
/// or if any height of a batch failed.
pub(crate) fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let store_config = config.storage.store_config();
    let file = store_config.store_file();

    // Opening creates the file, none of the commands have anything to do in a new store.
    if !file.is_file() {
        bail!("no block store at {}", file.display());
    }

    let mut store = RedbStore::open(&store_config)
        .with_context(|| format!("failed to open block store at {}", file.display()))?;

    execute(
        command,
        &mut store,
        config.migrate.skip_existing,
        &mut std::io::stdout().lock(),
    )
}

/// Run `command` on `store`, writing the result to `out`.
///
/// `skip_existing` is the configured default of [`Command::Migrate`].
fn execute<S: Store, W: Write>(
    command: Command,
    store: &mut S,
    skip_existing: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Inspect {
            height,
            scheme,
            json,
        } => {
            let header = inspect(store, height, scheme)
                .with_context(|| format!("failed to inspect `{}`", scheme.key(height)))?;

            if json {
                write_json(out, &header)
            } else {
                write_header(out, &scheme.key(height), &header)
            }
        }

        Command::Migrate {
            start,
            end,
            skip_existing: skip_existing_flag,
            json,
        } => {
            let end = end.unwrap_or(start);
            check_range(start, end)?;

            let options = MigrateOptions {
                skip_existing: skip_existing_flag || skip_existing,
                ..Default::default()
            };
            let report = migrate_range(store, start..=end, &options);

            write_report(out, &report, ["migrated", "skipped", "failed"], json)
        }

        Command::Probe { height, json } => {
            let probes = probe(store, height)?;

            if json {
                write_json(out, &probes)
            } else {
                write_probes(out, &probes)
            }
        }

        Command::PruneLegacy { start, end, json } => {
            check_range(start, end)?;
            let report = prune_legacy(store, start..=end);

            write_report(out, &report, ["pruned", "kept", "failed"], json)
        }
    }
}

fn check_range(start: u64, end: u64) -> anyhow::Result<()> {
    if end < start {
        bail!("END ({end}) is below START ({start})");
    }
    Ok(())
}

//---------------------------------------------------------------------------------------------------- Printing
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print every outcome and a summary line, `labels` names the
/// done, skipped and failed counts.
///
/// # Errors
/// If writing fails, or if any height failed.
fn write_report<W: Write, O: Tally + Display + Serialize>(
    out: &mut W,
    report: &Report<O>,
    labels: [&str; 3],
    json: bool,
) -> anyhow::Result<()> {
    let counts = report.counts();

    if json {
        write_json(out, report)?;
    } else {
        for (height, outcome) in &report.outcomes {
            writeln!(out, "{height:>10}  {outcome}")?;
        }
        let [done, skipped, failed] = labels;
        writeln!(
            out,
            "{done}: {}, {skipped}: {}, {failed}: {}",
            counts.done, counts.skipped, counts.failed
        )?;
    }

    if counts.failed > 0 {
        bail!("{} of {} heights failed", counts.failed, report.len());
    }
    Ok(())
}

fn write_header<W: Write>(out: &mut W, key: &str, header: &DecodedHeader) -> anyhow::Result<()> {
    fn hash(hash: &Hash256) -> String {
        let short = short_hash(hash.as_bytes());
        if hash.is_zeroed() {
            format!("{short} (zeroed)")
        } else {
            short
        }
    }

    writeln!(out, "key               {key}")?;
    writeln!(out, "schema            {}", header.schema())?;

    let shared = |out: &mut W, v1: &BlockHeaderV1| -> std::io::Result<()> {
        writeln!(out, "version           {}", v1.version)?;
        writeln!(out, "height            {}", v1.height)?;
        writeln!(out, "timestamp         {}", v1.timestamp)?;
        writeln!(out, "previous_hash     {}", hash(&v1.previous_hash))?;
        writeln!(out, "merkle_root       {}", hash(&v1.merkle_root))?;
        writeln!(out, "leader            {}", v1.leader)?;
        writeln!(out, "block_reward      {}", v1.block_reward)?;
        writeln!(out, "vrf_output        {}", hash(&v1.vrf_output))?;
        writeln!(out, "vrf_score         {}", v1.vrf_score)?;
        writeln!(out, "attestation_root  {}", hash(&v1.attestation_root))
    };

    match header {
        DecodedHeader::V1(v1) => {
            shared(out, v1)?;
            if let LegacyLayout::WithBitmap(bitmap) = &v1.layout {
                let bitmap = bitmap.as_deref().map_or_else(|| "none".into(), hex::encode);
                writeln!(out, "bitmap            {bitmap}")?;
            }
        }
        DecodedHeader::V2(v2) => {
            shared(out, &v2.to_v1())?;
            let tiers = &v2.masternode_tiers;
            writeln!(
                out,
                "masternode_tiers  free {} bronze {} silver {} gold {} (total {})",
                tiers.free,
                tiers.bronze,
                tiers.silver,
                tiers.gold,
                tiers.total()
            )?;
            writeln!(out, "vrf_proof         {}", hex::encode(&v2.vrf_proof))?;
            writeln!(
                out,
                "active_bitmap     {}",
                hex::encode(&v2.active_masternodes_bitmap)
            )?;
            let liveness = v2
                .liveness_recovery
                .map_or_else(|| "none".into(), |b| b.to_string());
            writeln!(out, "liveness_recovery {liveness}")?;
        }
    }

    Ok(())
}

fn write_probes<W: Write>(out: &mut W, probes: &[KeyProbe]) -> anyhow::Result<()> {
    for KeyProbe {
        scheme,
        key,
        record,
    } in probes
    {
        let Some(record) = record else {
            writeln!(out, "{key} ({scheme}): missing")?;
            continue;
        };

        writeln!(out, "{key} ({scheme}): {} bytes", record.len)?;
        match (record.schema, record.height, &record.error) {
            (Some(schema), Some(height), _) => {
                writeln!(out, "  decodes as {schema}, height {height}")?;
            }
            (_, _, Some(error)) => writeln!(out, "  does not decode: {error}")?,
            (_, _, None) => (),
        }
        writeln!(out, "  {}", record.preview)?;
    }

    Ok(())
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use timecoin_kv::MemoryStore;
    use timecoin_test_utils::{
        data::{block_42, mixed_store, MixedStoreHeights, BLOCK_42_V1},
        store::FaultyStore,
    };

    use super::*;

    fn exec<S: Store>(store: &mut S, command: Command) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = execute(command, store, false, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn block_42_store() -> MemoryStore {
        [(KeyScheme::Legacy.key(42).into_bytes(), BLOCK_42_V1.to_vec())]
            .into_iter()
            .collect()
    }

    #[test]
    fn inspect_text() {
        let (result, out) = exec(
            &mut block_42_store(),
            Command::Inspect {
                height: 42,
                scheme: KeyScheme::Legacy,
                json: false,
            },
        );
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "key               block:42");
        assert_eq!(lines[1], "schema            v1");
        assert!(lines.contains(&"leader            node-A"));
        assert!(lines.contains(&"previous_hash     0000000000000000... (zeroed)"));
        assert!(lines.contains(&"merkle_root       1111111111111111..."));
        assert!(lines.contains(&"vrf_score         123456789012345678901234567890"));
    }

    #[test]
    fn inspect_json_after_migrate() {
        let mut store = block_42_store();
        let (result, _) = exec(
            &mut store,
            Command::Migrate {
                start: 42,
                end: None,
                skip_existing: false,
                json: false,
            },
        );
        result.unwrap();

        let (result, out) = exec(
            &mut store,
            Command::Inspect {
                height: 42,
                scheme: KeyScheme::Current,
                json: true,
            },
        );
        result.unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["v2"]["leader"], "node-A");
        assert_eq!(json["v2"]["height"], 42);
        assert_eq!(json["v2"]["vrf_proof"], "");
        assert_eq!(json["v2"]["liveness_recovery"], serde_json::Value::Null);
    }

    #[test]
    fn inspect_text_after_migrate() {
        let mut store = block_42_store();
        migrate_range(&mut store, 42..=42, &MigrateOptions::default());

        let (result, out) = exec(
            &mut store,
            Command::Inspect {
                height: 42,
                scheme: KeyScheme::Current,
                json: false,
            },
        );
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "schema            v2");
        assert!(lines.contains(&"masternode_tiers  free 0 bronze 0 silver 0 gold 0 (total 0)"));
        assert!(lines.contains(&"liveness_recovery none"));
    }

    #[test]
    fn inspect_missing_key() {
        let (result, out) = exec(
            &mut MemoryStore::new(),
            Command::Inspect {
                height: 1,
                scheme: KeyScheme::Legacy,
                json: false,
            },
        );
        let error = format!("{:#}", result.unwrap_err());
        assert!(error.starts_with("failed to inspect `block:1`"), "{error}");
        assert!(out.is_empty());
    }

    #[test]
    fn migrate_mixed_store() {
        let (result, out) = exec(
            &mut mixed_store(),
            Command::Migrate {
                start: 1,
                end: Some(6),
                skip_existing: false,
                json: false,
            },
        );
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2].trim_start(), "3  skipped: key_not_found");
        assert_eq!(lines[6], "migrated: 4, skipped: 2, failed: 0");
    }

    #[test]
    fn migrate_json() {
        let (result, out) = exec(
            &mut mixed_store(),
            Command::Migrate {
                start: MixedStoreHeights::ALREADY_MIGRATED,
                end: None,
                skip_existing: true,
                json: true,
            },
        );
        result.unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "outcomes": { "6": { "skipped": "already_migrated" } } })
        );
    }

    #[test]
    fn configured_skip_existing() {
        let mut out = Vec::new();
        execute(
            Command::Migrate {
                start: MixedStoreHeights::ALREADY_MIGRATED,
                end: None,
                skip_existing: false,
                json: false,
            },
            &mut mixed_store(),
            true,
            &mut out,
        )
        .unwrap();

        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("         6  skipped: already_migrated"));
    }

    #[test]
    fn failed_heights_are_an_error() {
        let mut store =
            FaultyStore::new(block_42_store()).fail_writes_to(KeyScheme::Current.key(42));
        let (result, out) = exec(
            &mut store,
            Command::Migrate {
                start: 41,
                end: Some(42),
                skip_existing: false,
                json: false,
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "1 of 2 heights failed");
        assert!(out.ends_with("migrated: 0, skipped: 1, failed: 1\n"), "{out}");
    }

    #[test]
    fn reversed_range() {
        let (start, end) = (5, 4);
        let (result, out) = exec(
            &mut MemoryStore::new(),
            Command::PruneLegacy {
                start,
                end,
                json: false,
            },
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "END (4) is below START (5)"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn prune_after_migrate() {
        let mut store = block_42_store();
        for command in [
            Command::Migrate {
                start: 42,
                end: None,
                skip_existing: false,
                json: false,
            },
            Command::PruneLegacy {
                start: 42,
                end: 42,
                json: false,
            },
        ] {
            exec(&mut store, command).0.unwrap();
        }

        assert!(!store
            .contains_key(KeyScheme::Legacy.key(42).as_bytes())
            .unwrap());
        assert_eq!(
            DecodedHeader::decode_current_record(
                &store.get(KeyScheme::Current.key(42).as_bytes()).unwrap().unwrap()
            )
            .unwrap()
            .into_v2(Default::default())
            .to_v1(),
            block_42()
        );
    }

    #[test]
    fn probe_text() {
        let (result, out) = exec(
            &mut mixed_store(),
            Command::Probe {
                height: MixedStoreHeights::GARBAGE,
                json: false,
            },
        );
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "block:4 (legacy): 4 bytes");
        assert!(lines[1].starts_with("  does not decode: "), "{}", lines[1]);
        assert_eq!(lines[2], "  deadbeef");
        assert_eq!(lines[3], "block_4 (current): missing");
    }
}
