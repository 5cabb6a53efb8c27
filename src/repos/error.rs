/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - "行が無い" は Option で表現するので、ここに来るのは本物の障害のみ
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}
