use std::future::Future;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::error::{Error, Result};
use crate::github::GitHubSource;
use crate::models::{Repository, RestPage};

/// Lazily walks a page-numbered listing, yielding its items one by one.
///
/// Pages are requested only as the stream is polled. Empty pages are skipped
/// as long as the listing says more follow; the first failing page ends the
/// stream with its error.
pub fn paged<'a, T, F, Fut>(fetch: F) -> BoxStream<'a, Result<T>>
where
    T: Send + 'a,
    F: Fn(u32) -> Fut + Send + 'a,
    Fut: Future<Output = Result<RestPage<T>>> + Send + 'a,
{
    stream::try_unfold((fetch, Some(1u32)), |(fetch, next)| async move {
        let Some(page) = next else {
            return Ok(None);
        };

        let batch = fetch(page).await?;
        let next = batch.has_next.then_some(page + 1);
        let items = stream::iter(batch.items.into_iter().map(Ok::<T, Error>));
        Ok::<_, Error>(Some((items, (fetch, next))))
    })
    .try_flatten()
    .boxed()
}

/// Reviews across every pull request of `repo`.
pub async fn count_repository_reviews(source: &dyn GitHubSource, repo: Repository) -> Result<u64> {
    let repo = &repo;
    let reviews = paged(move |page| source.pull_request_page(repo, page))
        .map_ok(move |pull| paged(move |page| source.review_page(repo, pull.number, page)))
        .try_flatten()
        .try_fold(0u64, |count, _review| future::ready(Ok(count + 1)))
        .await?;

    tracing::debug!("{} reviews in {}", reviews, repo.full_name);
    Ok(reviews)
}

/// Reviews received on pull requests of every non-fork repository `login`
/// owns.
///
/// Up to `concurrency` repositories are walked at once; any failing page
/// fails the whole count.
pub async fn count_reviews(
    source: &dyn GitHubSource,
    login: &str,
    concurrency: usize,
) -> Result<u64> {
    let total = paged(move |page| source.owned_repository_page(login, page))
        .try_filter(|repo| future::ready(!repo.fork))
        .map_ok(|repo| count_repository_reviews(source, repo))
        .try_buffer_unordered(concurrency.max(1))
        .try_fold(0u64, |total, reviews| future::ready(Ok(total + reviews)))
        .await?;

    tracing::info!("Counted {} reviews for {}", total, login);
    Ok(total)
}
