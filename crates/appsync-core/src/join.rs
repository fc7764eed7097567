//! Fan-out join discipline
//!
//! Every sibling operation runs to completion before any error is reported,
//! so side effects from unrelated objects are never abandoned mid-flight;
//! the overall call still fails if any one operation failed.

use std::future::Future;

use futures_util::future::join_all;

/// Drive all futures to completion, then return their outputs or the first
/// error encountered, in input order.
pub async fn settle_all<T, E, I, F>(futures: I) -> std::result::Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = std::result::Result<T, E>>,
{
    join_all(futures).await.into_iter().collect()
}
