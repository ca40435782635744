use super::model::record::BookRecord;

/// 永続化の抽象。Infra層が実装する。
pub trait RecordRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存先が存在しなければ空のコレクションを返す。
    fn load(&self) -> Result<Vec<BookRecord>, Self::Error>;
    /// コレクション全体で保存先を上書きする。
    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error>;
}
