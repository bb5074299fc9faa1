use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use pretty_assertions::assert_eq;
use ref_config::{StorageConfig, StorageProvider};
use ref_core::{Field, RecordFields};
use ref_store::{
    BackendError, FileHandle, FileLocation, ObjectStoreBackend, RecordStore, RemoteFileBackend,
    StoreError, codec,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn fields(title: &str, main_subject: &str) -> RecordFields {
    RecordFields {
        title: title.into(),
        campaign: "Verão Estiloso".into(),
        category: "POST".into(),
        place: "INSTAGRAM".into(),
        main_subject: main_subject.into(),
        path: format!("https://example.com/{title}"),
        description: "Praia, sol e estilo".into(),
        language: "pt".into(),
        keywords: "praia sol verão".into(),
    }
}

fn location() -> FileLocation {
    FileLocation::new("dados_refs", "refs.csv")
}

async fn seed(backend: &ObjectStoreBackend, key: &str, rows: &[RecordFields]) {
    let bytes = codec::encode(rows).unwrap();
    backend
        .object_store()
        .put(&Path::from(key), PutPayload::from(bytes))
        .await
        .unwrap();
}

async fn remote_rows(backend: &ObjectStoreBackend, key: &str) -> Vec<RecordFields> {
    let bytes = backend
        .object_store()
        .get(&Path::from(key))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    codec::decode(&bytes).unwrap()
}

/// Backend whose every call fails with a transport error.
struct Unreachable;

impl RemoteFileBackend for Unreachable {
    async fn find(&self, _: &str, _: &str) -> Result<Option<FileHandle>, BackendError> {
        Err(BackendError::transport("connection refused"))
    }

    async fn find_subfolder(&self, _: &str, _: &str) -> Result<Option<String>, BackendError> {
        Err(BackendError::transport("connection refused"))
    }

    async fn download(&self, _: &FileHandle) -> Result<Vec<u8>, BackendError> {
        Err(BackendError::transport("connection refused"))
    }

    async fn create(&self, _: &str, _: &str, _: Vec<u8>) -> Result<FileHandle, BackendError> {
        Err(BackendError::transport("connection refused"))
    }

    async fn replace(&self, _: &FileHandle, _: Vec<u8>) -> Result<FileHandle, BackendError> {
        Err(BackendError::transport("connection refused"))
    }

    fn describe(&self) -> String {
        "unreachable://".into()
    }
}

/// Delegates to an in-memory backend but can be told to reject writes.
struct FlakyWrites {
    inner: ObjectStoreBackend,
    fail: Arc<AtomicBool>,
}

impl RemoteFileBackend for FlakyWrites {
    async fn find(&self, folder: &str, name: &str) -> Result<Option<FileHandle>, BackendError> {
        self.inner.find(folder, name).await
    }

    async fn find_subfolder(&self, folder: &str, name: &str) -> Result<Option<String>, BackendError> {
        self.inner.find_subfolder(folder, name).await
    }

    async fn download(&self, handle: &FileHandle) -> Result<Vec<u8>, BackendError> {
        self.inner.download(handle).await
    }

    async fn create(&self, folder: &str, name: &str, bytes: Vec<u8>) -> Result<FileHandle, BackendError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BackendError::transport("quota exceeded"));
        }
        self.inner.create(folder, name, bytes).await
    }

    async fn replace(&self, handle: &FileHandle, bytes: Vec<u8>) -> Result<FileHandle, BackendError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BackendError::transport("quota exceeded"));
        }
        self.inner.replace(handle, bytes).await
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

// ── Load ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn absent_file_loads_as_empty_store() {
    let store = RecordStore::open(ObjectStoreBackend::in_memory(), location())
        .await
        .unwrap();
    assert!(store.is_empty());
    assert!(!store.file_present());
    assert!(store.is_in_sync());
    assert!(store.last_synced_at().is_some());
}

#[tokio::test]
async fn load_preserves_file_order_and_assigns_distinct_ids() {
    let backend = ObjectStoreBackend::in_memory();
    let rows = vec![fields("a", "ESTILO"), fields("b", "MODA"), fields("a", "ESTILO")];
    seed(&backend, "dados_refs/refs.csv", &rows).await;

    let store = RecordStore::open(backend, location()).await.unwrap();
    let loaded: Vec<RecordFields> = store.records().iter().map(|r| r.fields.clone()).collect();
    assert_eq!(loaded, rows);
    assert!(store.file_present());

    let ids: std::collections::HashSet<_> = store.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 3, "duplicates still get distinct ids");
}

#[tokio::test]
async fn malformed_file_is_reported() {
    let backend = ObjectStoreBackend::in_memory();
    backend
        .object_store()
        .put(
            &Path::from("dados_refs/refs.csv"),
            PutPayload::from(b"TITULO\n\xff\xfe\n".to_vec()),
        )
        .await
        .unwrap();

    let err = RecordStore::open(backend, location()).await.unwrap_err();
    assert!(matches!(err, StoreError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_backend_fails_open() {
    let err = RecordStore::open(Unreachable, location()).await.unwrap_err();
    assert!(err.is_backend_unavailable());
    assert!(err.to_string().contains("find"));
}

#[tokio::test]
async fn open_or_empty_falls_back_and_returns_the_error() {
    let (store, error) = RecordStore::open_or_empty(Unreachable, location()).await;
    assert!(store.is_empty());
    assert!(!store.is_in_sync());
    assert!(matches!(error, Some(StoreError::BackendUnavailable { .. })));
}

// ── Save ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_creates_file_then_reload_round_trips() {
    let backend = ObjectStoreBackend::in_memory();
    let mut store = RecordStore::open(backend.clone(), location()).await.unwrap();

    store.push(fields("first, with comma", "ESTILO"));
    store.push(fields("second \"quoted\"", "MODA"));
    assert!(!store.is_in_sync());
    store.save().await.unwrap();
    assert!(store.is_in_sync());
    assert!(store.file_present());

    let reopened = RecordStore::open(backend, location()).await.unwrap();
    let before: Vec<_> = store.records().iter().map(|r| &r.fields).collect();
    let after: Vec<_> = reopened.records().iter().map(|r| &r.fields).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn save_overwrites_whole_file() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X"), fields("b", "Y")]).await;
    let mut store = RecordStore::open(backend.clone(), location()).await.unwrap();

    let first = store.id_at(0).cloned().unwrap();
    store.remove(&first).unwrap();
    store.save().await.unwrap();

    assert_eq!(remote_rows(&backend, "dados_refs/refs.csv").await, vec![fields("b", "Y")]);
}

#[tokio::test]
async fn failed_save_keeps_memory_and_flags_divergence() {
    let fail = Arc::new(AtomicBool::new(false));
    let backend = FlakyWrites {
        inner: ObjectStoreBackend::in_memory(),
        fail: Arc::clone(&fail),
    };
    let mut store = RecordStore::open(backend, location()).await.unwrap();

    fail.store(true, Ordering::SeqCst);
    store.push(fields("kept", "ESTILO"));
    let err = store.save().await.unwrap_err();
    assert!(err.is_backend_unavailable());
    assert_eq!(store.len(), 1);
    assert!(!store.is_in_sync());
    assert!(!store.file_present());

    fail.store(false, Ordering::SeqCst);
    store.save().await.unwrap();
    assert!(store.is_in_sync());
}

#[tokio::test]
async fn failed_reload_keeps_current_records() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X")]).await;
    let mut store = RecordStore::open(backend.clone(), location()).await.unwrap();

    backend
        .object_store()
        .put(
            &Path::from("dados_refs/refs.csv"),
            PutPayload::from(b"TITULO\n\xff\n".to_vec()),
        )
        .await
        .unwrap();

    assert!(store.load().await.is_err());
    assert_eq!(store.len(), 1);
}

// ── Ids and in-memory primitives ────────────────────────────────────────

#[tokio::test]
async fn replace_keeps_id_and_position() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X"), fields("b", "Y"), fields("c", "Z")]).await;
    let mut store = RecordStore::open(backend, location()).await.unwrap();

    let id = store.id_at(1).cloned().unwrap();
    let updated = store
        .replace(&id, fields("b", "Y").with(Field::Title, "b2"))
        .unwrap()
        .clone();
    assert_eq!(updated.id, id);
    assert_eq!(store.position_of(&id), Some(1));
    assert_eq!(store.len(), 3);
    assert_eq!(store.records()[1].fields.title, "b2");
}

#[tokio::test]
async fn remove_shifts_later_positions() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X"), fields("b", "Y"), fields("c", "Z")]).await;
    let mut store = RecordStore::open(backend, location()).await.unwrap();

    let last = store.id_at(2).cloned().unwrap();
    let middle = store.id_at(1).cloned().unwrap();
    let (position, removed) = store.remove(&middle).unwrap();
    assert_eq!(position, 1);
    assert_eq!(removed.fields.title, "b");
    assert_eq!(store.position_of(&last), Some(1));
    assert!(store.remove(&middle).is_none());
}

// ── Subfolders ──────────────────────────────────────────────────────────

#[tokio::test]
async fn subfolder_is_resolved_by_name() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/2025/refs.csv", &[fields("in-sub", "X")]).await;
    seed(&backend, "dados_refs/refs.csv", &[fields("in-root", "X")]).await;

    let store = RecordStore::open(backend, location().with_subfolder("2025"))
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].fields.title, "in-sub");
}

#[tokio::test]
async fn missing_subfolder_reads_empty_and_creates_on_save() {
    let backend = ObjectStoreBackend::in_memory();
    let mut store = RecordStore::open(backend.clone(), location().with_subfolder("2026"))
        .await
        .unwrap();
    assert!(store.is_empty());

    store.push(fields("new", "X"));
    store.save().await.unwrap();
    assert_eq!(
        remote_rows(&backend, "dados_refs/2026/refs.csv").await,
        vec![fields("new", "X")]
    );
}

// ── Guarded writes ──────────────────────────────────────────────────────

#[tokio::test]
async fn guarded_save_detects_concurrent_change() {
    let shared: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
    let backend = ObjectStoreBackend::new(Arc::clone(&shared), "memory://", true);
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X")]).await;

    let mut mine = RecordStore::open(backend.clone(), location()).await.unwrap();
    let mut theirs = RecordStore::open(backend.clone(), location()).await.unwrap();

    theirs.push(fields("theirs", "X"));
    theirs.save().await.unwrap();

    mine.push(fields("mine", "X"));
    let err = mine.save().await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
    assert!(!mine.is_in_sync());

    mine.load().await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn blind_save_is_last_write_wins() {
    let backend = ObjectStoreBackend::in_memory();
    seed(&backend, "dados_refs/refs.csv", &[fields("a", "X")]).await;

    let mut mine = RecordStore::open(backend.clone(), location()).await.unwrap();
    let mut theirs = RecordStore::open(backend.clone(), location()).await.unwrap();
    theirs.push(fields("theirs", "X"));
    theirs.save().await.unwrap();
    mine.push(fields("mine", "X"));
    mine.save().await.unwrap();

    let titles: Vec<String> = remote_rows(&backend, "dados_refs/refs.csv")
        .await
        .into_iter()
        .map(|row| row.title)
        .collect();
    assert_eq!(titles, vec!["a", "mine"]);
}

// ── Providers ───────────────────────────────────────────────────────────

#[tokio::test]
async fn local_provider_writes_csv_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        provider: StorageProvider::Local,
        bucket: dir.path().join("bucket").display().to_string(),
        folder: "dados_refs".into(),
        ..Default::default()
    };
    let backend = ObjectStoreBackend::from_config(&config).unwrap();
    let mut store = RecordStore::open(backend, FileLocation::from_config(&config))
        .await
        .unwrap();
    store.push(fields("on disk", "X"));
    store.save().await.unwrap();

    let text = std::fs::read_to_string(dir.path().join("bucket/dados_refs/refs.csv")).unwrap();
    assert!(text.starts_with("TITULO,CAMPANHA,"));
    assert!(text.contains("on disk"));
}

#[test]
fn local_provider_rejects_conditional_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        provider: StorageProvider::Local,
        bucket: dir.path().display().to_string(),
        conditional_writes: true,
        ..Default::default()
    };
    let err = ObjectStoreBackend::from_config(&config).unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
}

#[test]
fn unconfigured_storage_is_a_config_error() {
    let err = ObjectStoreBackend::from_config(&StorageConfig::default()).unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
}

#[test]
fn status_reports_location() {
    let store = RecordStore::empty(ObjectStoreBackend::in_memory(), location());
    let status = store.status();
    assert_eq!(status.location, "memory://dados_refs/refs.csv");
    assert_eq!(status.records, 0);
    assert!(!status.in_sync);
}
