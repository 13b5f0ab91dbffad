use crate::common::*;

use crate::model::run::{fetched_batch::*, run_record::*};
use crate::traits::{repository_traits::run_repository::*, service_traits::run_poll_service::*};

const CACHE_MAX_ENTRIES: u64 = 1024;

#[doc = r#"
    Watermark poller over the `runs` table.

    Each result is memoized per watermark for the cache window, so a caller
    retrying the same watermark inside the window sees the earlier batch even
    when new rows have landed in the meantime.
"#]
#[derive(Debug)]
pub struct RunPollServiceImpl<R: RunRepository> {
    run_repository: Arc<R>,
    cache: Cache<i64, FetchedBatch>,
}

impl<R: RunRepository> RunPollServiceImpl<R> {
    pub fn new(run_repository: Arc<R>, cache_ttl: Duration) -> Self {
        Self {
            run_repository,
            cache: Cache::builder()
                .max_capacity(CACHE_MAX_ENTRIES)
                .time_to_live(cache_ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<R: RunRepository> RunPollService for RunPollServiceImpl<R> {
    async fn init_database(&self) -> anyhow::Result<()> {
        self.run_repository.init_schema().await
    }

    async fn fetch_live_data(&self, last_index: i64) -> anyhow::Result<FetchedBatch> {
        if let Some(cached) = self.cache.get(&last_index).await {
            debug!(
                "[RunPollServiceImpl->fetch_live_data] cache hit for watermark {}",
                last_index
            );
            return Ok(cached);
        }

        let records: Vec<RunRecord> = self
            .run_repository
            .fetch_runs_after(last_index)
            .await
            .context("[RunPollServiceImpl->fetch_live_data] Failed to fetch runs")?;

        let batch: FetchedBatch = FetchedBatch::from_records(records, last_index);

        if !batch.is_empty() {
            info!(
                "Fetched {} new runs after id {} (watermark -> {})",
                batch.records().len(),
                last_index,
                batch.watermark()
            );
        }

        self.cache.insert(last_index, batch.clone()).await;

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryRunRepository {
        rows: Mutex<Vec<RunRecord>>,
        queries: AtomicUsize,
    }

    impl MemoryRunRepository {
        fn push(&self, parameters: &str) -> i64 {
            let mut rows = self.rows.lock();
            let id: i64 = rows.last().map_or(1, |r| r.id + 1);
            rows.push(RunRecord::new(id, None, Some(parameters.to_string()), None));
            id
        }
    }

    #[async_trait]
    impl RunRepository for MemoryRunRepository {
        async fn init_schema(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn fetch_runs_after(&self, last_index: i64) -> anyhow::Result<Vec<RunRecord>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows
                .lock()
                .iter()
                .filter(|r| r.id > last_index)
                .cloned()
                .collect())
        }
    }

    fn service(repo: &Arc<MemoryRunRepository>) -> RunPollServiceImpl<MemoryRunRepository> {
        service_with_ttl(repo, Duration::from_secs(300))
    }

    fn service_with_ttl(
        repo: &Arc<MemoryRunRepository>,
        ttl: Duration,
    ) -> RunPollServiceImpl<MemoryRunRepository> {
        RunPollServiceImpl::new(Arc::clone(repo), ttl)
    }

    #[tokio::test]
    async fn empty_batch_returns_input_watermark() {
        let repo: Arc<MemoryRunRepository> = Arc::new(MemoryRunRepository::default());
        let poller = service(&repo);

        let batch: FetchedBatch = poller.fetch_live_data(17).await.unwrap();
        assert!(batch.is_empty());
        assert_eq!(*batch.watermark(), 17);
    }

    #[tokio::test]
    async fn returns_newer_records_and_max_id() {
        let repo: Arc<MemoryRunRepository> = Arc::new(MemoryRunRepository::default());
        for name in ["a", "b", "c"] {
            repo.push(name);
        }
        let poller = service(&repo);

        let batch: FetchedBatch = poller.fetch_live_data(1).await.unwrap();
        let ids: Vec<i64> = batch.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(*batch.watermark(), 3);
    }

    #[tokio::test]
    async fn same_watermark_inside_window_is_served_from_cache() {
        let repo: Arc<MemoryRunRepository> = Arc::new(MemoryRunRepository::default());
        repo.push("first");
        let poller = service(&repo);

        let before: FetchedBatch = poller.fetch_live_data(0).await.unwrap();
        repo.push("second");

        let during: FetchedBatch = poller.fetch_live_data(0).await.unwrap();

        assert_eq!(before, during);
        assert_eq!(during.records().len(), 1);
        assert_eq!(repo.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn changes_become_visible_after_window() {
        let repo: Arc<MemoryRunRepository> = Arc::new(MemoryRunRepository::default());
        repo.push("first");
        let poller = service_with_ttl(&repo, Duration::from_millis(200));

        poller.fetch_live_data(0).await.unwrap();
        repo.push("second");

        /* moka 는 자체 시계를 쓰므로 실제 시간으로 대기 */
        tokio::time::sleep(Duration::from_millis(500)).await;
        let after: FetchedBatch = poller.fetch_live_data(0).await.unwrap();

        assert_eq!(after.records().len(), 2);
        assert_eq!(*after.watermark(), 2);
        assert_eq!(repo.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_watermarks_are_cached_separately() {
        let repo: Arc<MemoryRunRepository> = Arc::new(MemoryRunRepository::default());
        repo.push("first");
        repo.push("second");
        let poller = service(&repo);

        let from_zero: FetchedBatch = poller.fetch_live_data(0).await.unwrap();
        let from_one: FetchedBatch = poller.fetch_live_data(1).await.unwrap();

        assert_eq!(from_zero.records().len(), 2);
        assert_eq!(from_one.records().len(), 1);
        assert_eq!(repo.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn works_over_sqlite_repository() {
        use crate::repository::run_repository_impl::*;

        let dir = tempfile::tempdir().unwrap();
        let repo: Arc<RunRepositoryImpl> =
            Arc::new(RunRepositoryImpl::new(dir.path().join("runs.db")));
        let poller = RunPollServiceImpl::new(Arc::clone(&repo), Duration::from_secs(300));

        poller.init_database().await.unwrap();
        repo.insert_run("2024-09-15 10:00:00", "iv", br#"{"current": 1.0}"#)
            .await
            .unwrap();

        let batch: FetchedBatch = poller.fetch_live_data(0).await.unwrap();
        assert_eq!(*batch.watermark(), 1);
        assert_eq!(
            batch.to_table().column("current").unwrap(),
            &[crate::model::table::cell::Cell::Float(1.0)]
        );
    }
}
