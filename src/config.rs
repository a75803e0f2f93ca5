use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "library_data.json";
pub const DEFAULT_BOOKS_SEED: &str = "books.csv";
pub const DEFAULT_BORROWERS_SEED: &str = "borrowers.csv";

/// 起動設定
///
/// 環境変数から一度だけ読み込む。未設定の項目は既定値を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 保存データのファイル（LIBRARY_DATA_FILE）
    pub data_file: PathBuf,
    /// 蔵書の初期データ（LIBRARY_BOOKS_SEED）
    pub books_seed: PathBuf,
    /// 利用者の初期データ（LIBRARY_BORROWERS_SEED）
    pub borrowers_seed: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.into(),
            books_seed: DEFAULT_BOOKS_SEED.into(),
            borrowers_seed: DEFAULT_BORROWERS_SEED.into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の取得関数から設定を組み立てる（空文字は未設定扱い）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| -> PathBuf {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .into()
        };

        Self {
            data_file: read("LIBRARY_DATA_FILE", DEFAULT_DATA_FILE),
            books_seed: read("LIBRARY_BOOKS_SEED", DEFAULT_BOOKS_SEED),
            borrowers_seed: read("LIBRARY_BORROWERS_SEED", DEFAULT_BORROWERS_SEED),
        }
    }
}
