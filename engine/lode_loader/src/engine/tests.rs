#![expect(clippy::unwrap_used, reason = "tests unwrap freely")]

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lode_canon::{FsCanonConfig, FsCanonicalizer, MemoCanonicalizer, ResolveError};
use lode_ref::ReferenceRegistry;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::{LoadError, LoadStage};

/// Source-file backend: fetch reads the canonical path, parse rejects
/// sources containing `BOOM`, link tags the record.
struct SourceBackend {
    fetches: AtomicUsize,
}

impl LoaderBackend for SourceBackend {
    type Raw = String;
    type Unit = String;
    type Record = String;

    fn fetch(&self, key: &CanonicalKey) -> Result<String, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        fs::read_to_string(key.as_str())
            .map_err(|e| LoadError::stage(LoadStage::Fetch, key, e.to_string()))
    }

    fn parse(&self, key: &CanonicalKey, raw: String) -> Result<String, LoadError> {
        if raw.contains("BOOM") {
            return Err(LoadError::stage(LoadStage::Parse, key, "corrupt source"));
        }
        Ok(raw)
    }

    fn link(&self, _key: &CanonicalKey, unit: String) -> Result<String, LoadError> {
        Ok(format!("linked:{}", unit.trim()))
    }
}

type Engine = AssetEngine<MemoCanonicalizer<FsCanonicalizer>, SourceBackend>;

struct Fixture {
    dir: TempDir,
    engine: Engine,
    backend: Arc<SourceBackend>,
    registry: ReferenceRegistry,
}

impl Fixture {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("src/app.lod"), "app module\n").unwrap();
        fs::write(dir.path().join("src/b.lod"), "module b\n").unwrap();
        fs::write(dir.path().join("lib/util.lod"), "module util\n").unwrap();

        let canon = MemoCanonicalizer::new(FsCanonicalizer::new(
            FsCanonConfig::new()
                .with_root(dir.path().join("lib"))
                .with_extension("lod"),
        ));
        let backend = Arc::new(SourceBackend {
            fetches: AtomicUsize::new(0),
        });
        let engine = AssetEngine::new(canon, Arc::clone(&backend));
        Fixture {
            dir,
            engine,
            backend,
            registry: ReferenceRegistry::new(),
        }
    }

    fn app_origin(&self) -> OriginContext {
        let path = self.dir.path().join("src/app.lod");
        OriginContext::new(path.to_string_lossy().as_ref())
    }

    fn fetch_count(&self) -> usize {
        self.backend.fetches.load(Ordering::SeqCst)
    }
}

fn record_of(handle: &LoadHandle<String>) -> Arc<String> {
    match handle.wait() {
        Ok(record) => record,
        Err(e) => panic!("expected fulfilled outcome, got {e}"),
    }
}

#[test]
fn third_module_loads_a_reference_declared_elsewhere() {
    let fx = Fixture::new();
    // Declared in module A; the origin travels with the reference.
    let reference = fx.registry.create(fx.app_origin(), "./b").unwrap();

    // Modules A and C race to import the same reference.
    let mut records = Vec::new();
    std::thread::scope(|s| {
        let workers: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(|| match fx.engine.import_from_reference(&reference) {
                    Ok(handle) => record_of(&handle),
                    Err(e) => panic!("resolution failed: {e}"),
                })
            })
            .collect();
        for worker in workers {
            match worker.join() {
                Ok(record) => records.push(record),
                Err(_) => panic!("worker panicked"),
            }
        }
    });

    assert!(Arc::ptr_eq(&records[0], &records[1]));
    assert_eq!(*records[0], "linked:module b");
    assert_eq!(fx.fetch_count(), 1);
}

#[test]
fn distinct_references_share_one_cache_entry() {
    let fx = Fixture::new();
    let a = fx.registry.create(fx.app_origin(), "./b").unwrap();
    let b = fx.registry.create(fx.app_origin(), "./b").unwrap();
    assert_ne!(a, b);

    let first = record_of(&fx.engine.import_from_reference(&a).unwrap());
    let second = record_of(&fx.engine.import_from_reference(&b).unwrap());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fx.fetch_count(), 1);

    // Both references canonicalize to the same key.
    let key_a = fx.engine.canonicalize(a.origin(), a.specifier()).unwrap();
    let key_b = fx.engine.canonicalize(b.origin(), b.specifier()).unwrap();
    assert_eq!(key_a, key_b);
}

#[test]
fn bare_specifiers_resolve_against_roots() {
    let fx = Fixture::new();
    let reference = fx.registry.create(fx.app_origin(), "util").unwrap();
    let record = record_of(&fx.engine.import_from_reference(&reference).unwrap());
    assert_eq!(*record, "linked:module util");
}

#[test]
fn resolution_failure_surfaces_before_any_load() {
    let fx = Fixture::new();
    let reference = fx.registry.create(fx.app_origin(), "./nope").unwrap();
    match fx.engine.import_from_reference(&reference) {
        Err(ResolveError::NotFound { specifier, .. }) => assert_eq!(specifier, "./nope"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(fx.fetch_count(), 0);
    assert!(fx.engine.coordinator().cache().is_empty());
}

#[test]
fn rejection_is_terminal_until_evicted() {
    let fx = Fixture::new();
    fs::write(fx.dir.path().join("src/b.lod"), "BOOM\n").unwrap();
    let reference = fx.registry.create(fx.app_origin(), "./b").unwrap();
    let key = fx
        .engine
        .canonicalize(reference.origin(), reference.specifier())
        .unwrap();

    let first = fx.engine.import_from_reference(&reference).unwrap().wait();
    let second = fx.engine.import_from_reference(&reference).unwrap().wait();
    match (&first, &second) {
        (Err(a), Err(b)) => {
            assert_eq!(a.failed_stage(), Some(LoadStage::Parse));
            assert!(Arc::ptr_eq(a, b), "rejections were not shared");
        }
        other => panic!("expected shared rejection, got {other:?}"),
    }
    // The failed pipeline ran once; the second import hit the cache.
    assert_eq!(fx.fetch_count(), 1);
    assert_eq!(fx.engine.probe(&key), LoadState::Rejected);

    // Repair the source, evict, and import fresh.
    fs::write(fx.dir.path().join("src/b.lod"), "module b\n").unwrap();
    assert!(fx.engine.evict(&key));
    let repaired = record_of(&fx.engine.import_from_reference(&reference).unwrap());
    assert_eq!(*repaired, "linked:module b");
    assert_eq!(fx.fetch_count(), 2);
}

#[test]
fn probe_tracks_the_key_lifecycle() {
    let fx = Fixture::new();
    let reference = fx.registry.create(fx.app_origin(), "./b").unwrap();
    let key = fx
        .engine
        .canonicalize(reference.origin(), reference.specifier())
        .unwrap();

    assert_eq!(fx.engine.probe(&key), LoadState::Absent);
    let handle = fx.engine.import_from_reference(&reference).unwrap();
    record_of(&handle);
    assert_eq!(fx.engine.probe(&key), LoadState::Fulfilled);
    assert!(fx.engine.evict(&key));
    assert_eq!(fx.engine.probe(&key), LoadState::Absent);
}
