//! Background page loading.

use tokio::sync::mpsc;

use dexview_fetch::{BatchFetcher, ItemSource, PageRequest};

use super::constants::LOAD_CHANNEL_SIZE;
use super::state::LoadResult;

/// Start fetching a page in the background.
///
/// Returns a receiver that will receive progress updates and the final result.
pub fn start_load<S>(fetcher: BatchFetcher<S>, request: PageRequest) -> mpsc::Receiver<LoadResult>
where
    S: ItemSource + 'static,
{
    let (tx, rx) = mpsc::channel(LOAD_CHANNEL_SIZE);

    tokio::spawn(async move {
        let mut progress_rx = fetcher.subscribe();

        // Forward progress updates until the fetch finishes
        let tx_progress = tx.clone();
        let progress_task = tokio::spawn(async move {
            while let Ok(progress) = progress_rx.recv().await {
                if tx_progress.send(LoadResult::Progress(progress)).await.is_err() {
                    break;
                }
            }
        });

        let result = fetcher.fetch(request).await;

        progress_task.abort();
        let _ = tx.send(LoadResult::Complete { request, result }).await;
    });

    rx
}
