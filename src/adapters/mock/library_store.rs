use crate::domain::LibrarySnapshot;
use crate::ports::library_store::{LibraryStore as LibraryStoreTrait, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// LibraryStoreのモック実装
///
/// 最後に保存されたスナップショットをメモリ上に保持する。
/// 故障モードに切り替えると、読込は保存データ破損、保存は書込不可として失敗する。
#[derive(Debug, Default)]
pub struct LibraryStore {
    snapshot: Mutex<Option<LibrarySnapshot>>,
    broken: Mutex<bool>,
    saves: Mutex<usize>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// スナップショットが保存済みの状態で生成
    pub fn with_snapshot(snapshot: LibrarySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// 以降の読込・保存をすべて失敗させる
    pub fn break_store(&self) {
        *lock(&self.broken) = true;
    }

    /// 最後に保存（または初期設定）されたスナップショット
    pub fn stored(&self) -> Option<LibrarySnapshot> {
        lock(&self.snapshot).clone()
    }

    /// 成功した保存の回数
    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl LibraryStoreTrait for LibraryStore {
    async fn load(&self) -> Result<Option<LibrarySnapshot>> {
        if *lock(&self.broken) {
            return Err("mock store: snapshot is corrupt".into());
        }
        Ok(lock(&self.snapshot).clone())
    }

    async fn save(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        if *lock(&self.broken) {
            return Err("mock store: write failed".into());
        }
        *lock(&self.snapshot) = Some(snapshot.clone());
        *lock(&self.saves) += 1;
        Ok(())
    }
}
