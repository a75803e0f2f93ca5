use crate::domain::LibrarySnapshot;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 蔵書データ保存ポート
///
/// Library 集約のスナップショット全体を1単位として保存・読込する。
/// 保存形式・保存先はアダプターが決める。
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// 保存済みのスナップショットを読み込む
    ///
    /// まだ一度も保存されていない場合は`Ok(None)`。
    /// 読み込めない・壊れている場合はエラー。
    async fn load(&self) -> Result<Option<LibrarySnapshot>>;

    /// スナップショットを保存する（既存のものは置き換える）
    async fn save(&self, snapshot: &LibrarySnapshot) -> Result<()>;
}
